//! 持久化用户偏好
//!
//! 设置文件为 JSON，字段与默认值：
//!
//! ```json
//! { "ico": true, "desktop": true, "quality": 2, "bmp": true }
//! ```
//!
//! - `ico`：默认目标格式（`true` 为 ICO，`false` 为 ICNS）
//! - `desktop`：输出到桌面还是源文件所在目录
//! - `quality`：重采样档位 0 / 1 / 2
//! - `bmp`：ICO 小尺寸条目是否使用 BMP
//!
//! 文件不存在时使用默认值，未知字段忽略（保留窗口位置等界面字段不报错）。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::icon::{ConversionConfig, Quality, TargetFormat};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub ico: bool,
    pub desktop: bool,
    pub quality: u8,
    pub bmp: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            ico: true,
            desktop: true,
            quality: 2,
            bmp: true,
        }
    }
}

impl AppSettings {
    pub fn quality(&self) -> Result<Quality, AppError> {
        Quality::from_level(self.quality).ok_or_else(|| {
            AppError::Settings(format!("quality 必须在 0~2 之间，当前为 {}", self.quality))
        })
    }

    pub fn target_format(&self) -> TargetFormat {
        if self.ico {
            TargetFormat::Ico
        } else {
            TargetFormat::Icns
        }
    }

    /// 将持久化偏好转换为单次转换配置。
    pub fn conversion_config(&self) -> Result<ConversionConfig, AppError> {
        Ok(ConversionConfig {
            quality: self.quality()?,
            use_bitmap_entries: self.bmp,
            output_to_desktop: self.desktop,
            desktop_dir: None,
        })
    }
}

/// 读取设置文件，不存在时返回默认值。
pub fn load_settings(path: &Path) -> Result<AppSettings, AppError> {
    if !path.exists() {
        log::debug!("设置文件不存在，使用默认设置: {}", path.display());
        return Ok(AppSettings::default());
    }

    let content = fs::read_to_string(path)?;
    let settings = serde_json::from_str::<AppSettings>(&content)
        .map_err(|e| AppError::Settings(format!("解析设置文件失败: {}", e)))?;

    settings.quality()?;
    Ok(settings)
}

/// 保存设置文件，必要时创建父目录。
pub fn save_settings(path: &Path, settings: &AppSettings) -> Result<(), AppError> {
    settings.quality()?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::Settings(format!("创建设置目录失败: {}", e)))?;
        }
    }

    let content = serde_json::to_string_pretty(settings)
        .map_err(|e| AppError::Settings(format!("序列化设置失败: {}", e)))?;

    fs::write(path, content)?;
    Ok(())
}
