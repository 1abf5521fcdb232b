//! # 数据模型
//!
//! 流水线各阶段之间传递的中间数据：
//! - `RasterImage`：已解码、已校验的正方形 RGBA 像素
//! - `IconEntry`：规划阶段输出的（尺寸，编码方式）
//! - `EncodedEntry`：编码阶段输出的字节块
//! - `IconContainer`：组装完成、待写盘的容器字节

use std::fmt;
use std::str::FromStr;

use super::ConvertError;

/// 目标容器格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetFormat {
    Ico,
    Icns,
}

impl TargetFormat {
    /// 输出文件扩展名（不含点）。
    pub fn extension(self) -> &'static str {
        match self {
            Self::Ico => "ico",
            Self::Icns => "icns",
        }
    }
}

impl FromStr for TargetFormat {
    type Err = ConvertError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().trim_start_matches('.').to_lowercase();
        match normalized.as_str() {
            "ico" => Ok(Self::Ico),
            "icns" => Ok(Self::Icns),
            _ => Err(ConvertError::UnsupportedFormat(format!(
                "{}（可选：ico / icns）",
                value.trim()
            ))),
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// ICNS 条目的四字符类型标记。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OsType(pub [u8; 4]);

impl fmt::Display for OsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

/// 单个条目的像素编码方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryEncoding {
    /// 未压缩 32 位 DIB（仅 ICO 小尺寸条目）。
    Bitmap,
    /// PNG 压缩数据。
    Png,
}

/// 规划阶段产出的条目。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconEntry {
    pub size: u32,
    pub encoding: EntryEncoding,
    /// 仅 ICNS 条目携带。
    pub tag: Option<OsType>,
}

/// 编码完成的条目，交给组装器消费一次后丢弃。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedEntry {
    pub size: u32,
    pub encoding: EntryEncoding,
    pub bit_depth: u16,
    pub tag: Option<OsType>,
    pub data: Vec<u8>,
}

/// 组装完成的图标容器。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconContainer {
    pub format: TargetFormat,
    pub bytes: Vec<u8>,
}

impl IconContainer {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// 正方形 RGBA8 栅格图。
///
/// 只能通过 [`RasterImage::new`] 构造，保证宽高相等、非零且像素长度一致。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, ConvertError> {
        if width == 0 || height == 0 {
            return Err(ConvertError::InvalidSource(format!(
                "图片尺寸为空：{}x{}",
                width, height
            )));
        }

        if width != height {
            return Err(ConvertError::InvalidSource(format!(
                "图片必须为正方形，当前尺寸：{}x{}",
                width, height
            )));
        }

        let expected_len = rgba_len(width, height)?;
        if pixels.len() != expected_len {
            return Err(ConvertError::InvalidSource(format!(
                "像素数据长度异常：{}（期望：{}）",
                pixels.len(),
                expected_len
            )));
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// 边长（宽 == 高）。
    pub fn size(&self) -> u32 {
        self.width
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

/// `width * height * 4`，溢出时报编码错误。
pub(crate) fn rgba_len(width: u32, height: u32) -> Result<usize, ConvertError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or_else(|| ConvertError::Encoding("图片尺寸导致内存溢出风险".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raster_rejects_non_square() {
        let result = RasterImage::new(100, 50, vec![0; 100 * 50 * 4]);
        assert!(matches!(result, Err(ConvertError::InvalidSource(_))));
    }

    #[test]
    fn raster_rejects_zero_and_bad_length() {
        assert!(matches!(
            RasterImage::new(0, 0, Vec::new()),
            Err(ConvertError::InvalidSource(_))
        ));
        assert!(matches!(
            RasterImage::new(2, 2, vec![0; 15]),
            Err(ConvertError::InvalidSource(_))
        ));
    }

    #[test]
    fn target_format_parsing() {
        assert_eq!("ico".parse::<TargetFormat>(), Ok(TargetFormat::Ico));
        assert_eq!(".ICNS".parse::<TargetFormat>(), Ok(TargetFormat::Icns));
        assert!(matches!(
            "bmp".parse::<TargetFormat>(),
            Err(ConvertError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn ostype_displays_as_ascii() {
        assert_eq!(OsType(*b"ic10").to_string(), "ic10");
    }
}
