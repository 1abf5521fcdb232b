//! # iconforge — 命令行入口
//!
//! 本文件仅负责参数解析、日志初始化与设置合并。
//! 业务逻辑分布在 `icon` 模块中，详见 `lib.rs` 架构文档。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use iconforge::error::AppError;
use iconforge::icon::{ConversionService, EncoderLimits, Quality, TargetFormat, commands};
use iconforge::settings::{self, AppSettings};

#[derive(Debug, Parser)]
#[command(name = "iconforge", version, about = "Convert PNG images into ICO or ICNS icons")]
struct Cli {
    /// 源 PNG 文件（必须为正方形）
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// 目标格式：ico / icns（默认取设置中的 `ico`）
    #[arg(short, long)]
    format: Option<String>,

    /// 重采样质量：0 / 1 / 2 或 low / medium / high
    #[arg(short, long)]
    quality: Option<Quality>,

    /// ICO 小尺寸条目使用 BMP
    #[arg(long, conflicts_with = "png_only")]
    bmp: bool,

    /// ICO 全部条目使用 PNG
    #[arg(long)]
    png_only: bool,

    /// 输出到桌面
    #[arg(long, conflicts_with = "here")]
    desktop: bool,

    /// 输出到源文件所在目录
    #[arg(long)]
    here: bool,

    /// 源文件大小上限（MB），默认 50
    #[arg(long, value_name = "MB", value_parser = clap::value_parser!(u64).range(1..=4096))]
    max_file_size: Option<u64>,

    /// 设置文件路径
    #[arg(long, env = "ICONFORGE_SETTINGS")]
    settings: Option<PathBuf>,

    /// 将本次命令行覆盖的选项写回设置文件
    #[arg(long, requires = "settings")]
    save_settings: bool,

    /// 以 JSON 输出结果记录
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn merged_settings(&self) -> Result<(AppSettings, TargetFormat), AppError> {
        let mut merged = match &self.settings {
            Some(path) => settings::load_settings(path)?,
            None => AppSettings::default(),
        };

        if let Some(quality) = self.quality {
            merged.quality = quality.level();
        }
        if self.bmp {
            merged.bmp = true;
        }
        if self.png_only {
            merged.bmp = false;
        }
        if self.desktop {
            merged.desktop = true;
        }
        if self.here {
            merged.desktop = false;
        }

        let format = match &self.format {
            Some(value) => value.parse::<TargetFormat>()?,
            None => merged.target_format(),
        };
        merged.ico = format == TargetFormat::Ico;

        Ok((merged, format))
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            log::error!("{err}");
            eprintln!("{err}");
            ExitCode::from(2)
        }
    }
}

/// 逐个转换输入文件，全部成功时返回 `true`。
fn run(cli: Cli) -> Result<bool, AppError> {
    let (merged, format) = cli.merged_settings()?;

    if cli.save_settings {
        if let Some(path) = &cli.settings {
            settings::save_settings(path, &merged)?;
            log::info!("⚙️ 设置已保存: {}", path.display());
        }
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let service = ConversionService::new();
    if let Some(mb) = cli.max_file_size {
        service.set_limits(EncoderLimits {
            max_file_size: mb * 1024 * 1024,
            ..service.limits()?
        })?;
        log::info!("⚙️ 源文件大小上限: {}MB", mb);
    }

    let mut all_ok = true;
    for input in &cli.inputs {
        let record = runtime.block_on(commands::make_icon(
            &service,
            input.clone(),
            format,
            &merged,
        ));

        all_ok &= record.kind == "success";

        if cli.json {
            let line = serde_json::to_string(&record)
                .map_err(|e| AppError::Settings(format!("序列化结果失败: {}", e)))?;
            println!("{line}");
        } else if record.kind == "success" {
            let location = if record.desktop {
                "on your desktop"
            } else {
                "in the current folder"
            };
            println!("{} was created {}.", record.message, location);
        } else {
            eprintln!("{}: {}", input.display(), record.message);
        }
    }

    Ok(all_ok)
}
