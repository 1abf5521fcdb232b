//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `IconConverter` 只负责流程编排，不持有任何可变全局状态。处理链路固定为：
//! 1. 规划条目（必须先得到完整列表再开始编码）
//! 2. 逐条重采样 + 编码
//! 3. 全部条目完成后组装容器
//! 4. 原子写盘
//!
//! 记录 `load/encode/assemble/write/total` 阶段耗时，便于性能诊断。

use std::path::{Path, PathBuf};
use std::time::Instant;

use super::source::{EncodedEntry, EntryEncoding, IconEntry};
use super::{
    ConversionConfig, ConvertError, EncoderLimits, IconContainer, RasterImage, ResampleFilter,
    TargetFormat, bitmap, compressed, icns, ico, loader, planner, resample, writer,
};

const ENTRY_BIT_DEPTH: u16 = 32;

/// 图标转换器。
#[derive(Debug, Clone, Default)]
pub struct IconConverter {
    limits: EncoderLimits,
}

impl IconConverter {
    pub fn new(limits: EncoderLimits) -> Self {
        Self { limits }
    }

    /// 从内存中的源图构建容器，不涉及文件系统。
    pub fn build_container(
        &self,
        source: &RasterImage,
        format: TargetFormat,
        config: &ConversionConfig,
    ) -> Result<IconContainer, ConvertError> {
        let entries = planner::plan_entries(format, config.use_bitmap_entries);
        let filter = config.quality.filter();

        let encode_start = Instant::now();
        let encoded = entries
            .iter()
            .map(|entry| encode_entry(source, entry, filter))
            .collect::<Result<Vec<_>, _>>()?;
        let encode_elapsed = encode_start.elapsed();

        let assemble_start = Instant::now();
        let container = match format {
            TargetFormat::Ico => ico::assemble_ico(&encoded)?,
            TargetFormat::Icns => icns::assemble_icns(&encoded)?,
        };

        log::info!(
            "🧩 {} 容器组装完成 - 条目: {} 大小: {} 字节 encode={}ms assemble={}ms",
            format,
            encoded.len(),
            container.len(),
            encode_elapsed.as_millis(),
            assemble_start.elapsed().as_millis()
        );

        Ok(container)
    }

    /// 处理主入口：读取 PNG、生成图标并写盘，返回输出路径与是否写到了桌面。
    pub fn convert_file(
        &self,
        source_path: &Path,
        format: TargetFormat,
        config: &ConversionConfig,
    ) -> Result<(PathBuf, bool), ConvertError> {
        let total_start = Instant::now();

        // 先确定输出位置，源文件名无效时不做任何编码工作
        let file_name = writer::output_file_name(source_path, format)?;
        let directory = writer::destination_dir(source_path, config)?;

        let load_start = Instant::now();
        let source = loader::load_png_file(source_path, &self.limits)?;
        let load_elapsed = load_start.elapsed();

        let container = self.build_container(&source, format, config)?;
        drop(source);

        let write_start = Instant::now();
        let output_path = writer::write_container(&container, &directory, &file_name)?;
        let write_elapsed = write_start.elapsed();

        log::info!(
            "✅ 图标转换完成 - 格式: {} 质量: {:?} load={}ms write={}ms total={}ms",
            format,
            config.quality,
            load_elapsed.as_millis(),
            write_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        Ok((output_path, config.output_to_desktop))
    }
}

/// 单个条目：重采样 → 按规划的编码方式编码。
fn encode_entry(
    source: &RasterImage,
    entry: &IconEntry,
    filter: ResampleFilter,
) -> Result<EncodedEntry, ConvertError> {
    let resized = resample::resample(source, entry.size, filter)?;

    let data = match entry.encoding {
        EntryEncoding::Bitmap => bitmap::encode_bitmap(&resized)?,
        EntryEncoding::Png => compressed::encode_png(&resized)?,
    };

    log::debug!(
        "条目编码完成 - {}px {:?}{} {} 字节",
        entry.size,
        entry.encoding,
        entry.tag.map(|t| format!(" [{}]", t)).unwrap_or_default(),
        data.len()
    );

    Ok(EncodedEntry {
        size: entry.size,
        encoding: entry.encoding,
        bit_depth: ENTRY_BIT_DEPTH,
        tag: entry.tag,
        data,
    })
}
