//! # 命令层
//!
//! ## 设计思路
//!
//! 命令层仅做入参适配与结果记录转换，不承载业务逻辑。
//! 所有实际处理交由 `ConversionService`，保持命令函数薄、稳定、易测试。

use std::path::PathBuf;

use super::{ConversionRecord, ConversionService, TargetFormat};
use crate::settings::AppSettings;

/// 按设置生成 ICO。
pub async fn make_ico(
    service: &ConversionService,
    path: PathBuf,
    settings: &AppSettings,
) -> ConversionRecord {
    make_icon(service, path, TargetFormat::Ico, settings).await
}

/// 按设置生成 ICNS。
pub async fn make_icns(
    service: &ConversionService,
    path: PathBuf,
    settings: &AppSettings,
) -> ConversionRecord {
    make_icon(service, path, TargetFormat::Icns, settings).await
}

pub async fn make_icon(
    service: &ConversionService,
    path: PathBuf,
    format: TargetFormat,
    settings: &AppSettings,
) -> ConversionRecord {
    let config = match settings.conversion_config() {
        Ok(config) => config,
        Err(err) => {
            return ConversionRecord {
                kind: "failed",
                message: err.to_string(),
                desktop: settings.desktop,
            };
        }
    };

    let desktop = config.output_to_desktop;
    service.convert(path, format, config).await.to_record(desktop)
}
