//! # 配置模块
//!
//! ## 设计思路
//!
//! 用户可见的“质量档位”（低 / 中 / 高）是高层语义，只在入口处映射一次到具体的
//! 重采样滤镜 `ResampleFilter`，编码器内部不再出现档位字符串或整数比较。
//!
//! ## 实现思路
//!
//! - `Quality` 负责整数档位（0/1/2）与字符串的解析。
//! - `ConversionConfig` 是单次转换的显式配置值，不读取任何全局设置。
//! - `EncoderLimits` 提供源图加载阶段的资源上限，`Default` 即生产配置。

use std::path::PathBuf;
use std::str::FromStr;

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

/// 重采样质量档位。
///
/// - `Low`：最近邻，速度优先
/// - `Medium`：双线性
/// - `High`：双三次（Catmull-Rom），尽量保真
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Low,
    Medium,
    High,
}

/// 实际执行的重采样算法。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResampleFilter {
    Nearest,
    Bilinear,
    Bicubic,
}

impl Quality {
    /// 从持久化的整数档位解析，超出 0..=2 返回 `None`。
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::Low),
            1 => Some(Self::Medium),
            2 => Some(Self::High),
            _ => None,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    /// 档位 → 滤镜，全链路唯一的映射点。
    pub fn filter(self) -> ResampleFilter {
        match self {
            Self::Low => ResampleFilter::Nearest,
            Self::Medium => ResampleFilter::Bilinear,
            Self::High => ResampleFilter::Bicubic,
        }
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::High
    }
}

impl FromStr for Quality {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().to_lowercase();
        if let Ok(level) = value.parse::<u8>() {
            return Self::from_level(level)
                .ok_or_else(|| format!("未知质量档位：{}（可选：0 / 1 / 2）", level));
        }

        match value.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!(
                "未知质量档位：{}（可选：low / medium / high）",
                other
            )),
        }
    }
}

impl ResampleFilter {
    /// `image` 回退路径使用的滤镜。
    pub(crate) fn fallback_filter(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Bilinear => FilterType::Triangle,
            Self::Bicubic => FilterType::CatmullRom,
        }
    }
}

/// 单次转换配置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionConfig {
    /// 重采样质量档位。
    pub quality: Quality,
    /// ICO 中 64px 及以下的条目是否使用 BMP（DIB）编码。
    pub use_bitmap_entries: bool,
    /// 输出到桌面（`true`）还是源文件所在目录（`false`）。
    pub output_to_desktop: bool,
    /// 显式指定的桌面目录；为空时按环境变量推断。
    pub desktop_dir: Option<PathBuf>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            quality: Quality::High,
            use_bitmap_entries: true,
            output_to_desktop: true,
            desktop_dir: None,
        }
    }
}

/// 源图加载阶段的资源上限。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderLimits {
    /// 源文件允许的最大体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
}

impl Default for EncoderLimits {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
        }
    }
}
