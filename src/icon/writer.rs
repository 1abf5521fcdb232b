//! # 写盘与结果上报
//!
//! ## 设计思路
//!
//! 容器字节先写入目标目录中的临时文件，`persist` 时原子替换到最终路径。
//! 任一步失败，临时文件随 `NamedTempFile` 析构被删除，磁盘上不会留下半个图标。
//!
//! ## 输出位置
//!
//! - 桌面：显式配置的 `desktop_dir`，否则 `USERPROFILE`/`HOME` 下的 `Desktop`
//! - 当前目录：源文件所在目录

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::{ConversionConfig, ConvertError, IconContainer, TargetFormat};

/// 单次转换的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionResult {
    Success {
        output_path: PathBuf,
        used_desktop_location: bool,
    },
    Failure {
        reason: String,
    },
}

/// 返回给调用方（前端 / CLI）的结果记录。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionRecord {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub message: String,
    pub desktop: bool,
}

impl ConversionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// 转为结果记录；`desktop` 在失败时沿用本次的输出位置偏好。
    pub fn to_record(&self, desktop_preference: bool) -> ConversionRecord {
        match self {
            Self::Success {
                output_path,
                used_desktop_location,
            } => ConversionRecord {
                kind: "success",
                message: output_path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| output_path.display().to_string()),
                desktop: *used_desktop_location,
            },
            Self::Failure { reason } => ConversionRecord {
                kind: "failed",
                message: reason.clone(),
                desktop: desktop_preference,
            },
        }
    }
}

impl From<Result<(PathBuf, bool), ConvertError>> for ConversionResult {
    fn from(outcome: Result<(PathBuf, bool), ConvertError>) -> Self {
        match outcome {
            Ok((output_path, used_desktop_location)) => Self::Success {
                output_path,
                used_desktop_location,
            },
            Err(err) => Self::Failure {
                reason: err.to_string(),
            },
        }
    }
}

/// 推断桌面目录。
pub fn desktop_dir() -> Option<PathBuf> {
    let home = if cfg!(windows) {
        std::env::var_os("USERPROFILE").or_else(|| std::env::var_os("HOME"))
    } else {
        std::env::var_os("HOME")
    }?;

    Some(PathBuf::from(home).join("Desktop"))
}

/// 计算输出目录。
pub fn destination_dir(source: &Path, config: &ConversionConfig) -> Result<PathBuf, ConvertError> {
    if config.output_to_desktop {
        return config
            .desktop_dir
            .clone()
            .or_else(desktop_dir)
            .ok_or_else(|| ConvertError::Write("无法确定桌面目录".to_string()));
    }

    match source.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Ok(PathBuf::from(".")),
        Some(parent) => Ok(parent.to_path_buf()),
        None => Err(ConvertError::Write(format!(
            "无法确定源文件所在目录：{}",
            source.display()
        ))),
    }
}

/// 输出文件名：源文件名去掉扩展名后加 `.ico` / `.icns`。
pub fn output_file_name(source: &Path, format: TargetFormat) -> Result<PathBuf, ConvertError> {
    let stem = source.file_stem().ok_or_else(|| {
        ConvertError::InvalidSource(format!("源文件名无效：{}", source.display()))
    })?;

    let mut name = stem.to_os_string();
    name.push(".");
    name.push(format.extension());
    Ok(PathBuf::from(name))
}

/// 一次性原子写入容器。
pub fn write_container(
    container: &IconContainer,
    directory: &Path,
    file_name: &Path,
) -> Result<PathBuf, ConvertError> {
    let target = directory.join(file_name);

    let mut temp = tempfile::Builder::new()
        .prefix(".iconforge-")
        .suffix(".part")
        .tempfile_in(directory)
        .map_err(|e| write_error(directory, e))?;

    temp.write_all(&container.bytes)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| write_error(&target, e))?;

    temp.persist(&target)
        .map_err(|e| write_error(&target, e.error))?;

    log::info!(
        "💾 图标已写入 - 路径: {} 大小: {} 字节",
        target.display(),
        container.len()
    );

    Ok(target)
}

fn write_error(path: &Path, err: std::io::Error) -> ConvertError {
    ConvertError::Write(format!("{}：{}", path.display(), err))
}
