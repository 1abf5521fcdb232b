//! # 源图加载与校验
//!
//! ## 设计思路
//!
//! 先做廉价检查（文件存在、体积、签名、头部尺寸），再做完整解码，
//! 避免超大或伪装文件触发高内存开销。任何失败都视为源图无效。
//!
//! ## 实现思路
//!
//! 1. 读取文件并检查体积上限
//! 2. 用 `infer` 校验签名必须为 PNG
//! 3. 读取头部尺寸：非正方形或像素过多时直接拒绝
//! 4. 完整解码并转换为 RGBA8

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, ImageReader};

use super::{ConvertError, EncoderLimits, RasterImage};

/// 从文件加载 PNG 源图。
pub fn load_png_file(path: &Path, limits: &EncoderLimits) -> Result<RasterImage, ConvertError> {
    log::info!("📁 开始读取源图片 - 路径: {}", path.display());

    if !path.is_file() {
        return Err(ConvertError::InvalidSource(format!(
            "文件不存在：{}",
            path.display()
        )));
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| ConvertError::InvalidSource(format!("无法读取文件信息：{}", e)))?;

    if metadata.len() > limits.max_file_size {
        return Err(ConvertError::InvalidSource(format!(
            "文件过大：{:.2} MB（限制：{:.2} MB）",
            metadata.len() as f64 / 1024.0 / 1024.0,
            limits.max_file_size as f64 / 1024.0 / 1024.0
        )));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| ConvertError::InvalidSource(format!("无法读取图片文件：{}", e)))?;

    decode_png(&bytes, limits)
}

/// 从内存解码 PNG 源图。
pub fn decode_png(bytes: &[u8], limits: &EncoderLimits) -> Result<RasterImage, ConvertError> {
    validate_png_signature(bytes)?;

    let (header_width, header_height) = inspect_dimensions(bytes)?;
    validate_dimensions(limits, header_width, header_height)?;

    let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|e| ConvertError::InvalidSource(format!("图片解码失败：{}", e)))?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    validate_dimensions(limits, width, height)?;

    log::info!("✅ 源图片解码成功 - 尺寸: {}x{}", width, height);

    RasterImage::new(width, height, rgba.into_raw())
}

fn validate_png_signature(bytes: &[u8]) -> Result<(), ConvertError> {
    let kind = infer::get(bytes)
        .ok_or_else(|| ConvertError::InvalidSource("无法识别文件类型".to_string()))?;

    if kind.mime_type() != "image/png" {
        return Err(ConvertError::InvalidSource(format!(
            "文件签名不是 PNG：{}",
            kind.mime_type()
        )));
    }

    Ok(())
}

/// 仅通过头部信息读取宽高，用于完整解码前的快速拒绝。
fn inspect_dimensions(bytes: &[u8]) -> Result<(u32, u32), ConvertError> {
    ImageReader::with_format(Cursor::new(bytes), ImageFormat::Png)
        .into_dimensions()
        .map_err(|e| ConvertError::InvalidSource(format!("无法读取图片尺寸：{}", e)))
}

fn validate_dimensions(limits: &EncoderLimits, width: u32, height: u32) -> Result<(), ConvertError> {
    if width != height {
        return Err(ConvertError::InvalidSource(format!(
            "图片必须为正方形，当前尺寸：{}x{}",
            width, height
        )));
    }

    let pixels = u64::from(width) * u64::from(height);
    if pixels > limits.max_decoded_pixels {
        return Err(ConvertError::InvalidSource(format!(
            "图片像素过大：{} 像素（限制：{} 像素）",
            pixels, limits.max_decoded_pixels
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, Rgba};

    fn create_png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgba([(x % 255) as u8, (y % 255) as u8, ((x + y) % 255) as u8, 255])
        });

        let mut cursor = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut cursor, ImageFormat::Png)
            .expect("failed to encode test image");
        cursor.into_inner()
    }

    #[test]
    fn decodes_square_png() {
        let raster = decode_png(&create_png_bytes(20, 20), &EncoderLimits::default())
            .expect("decode should succeed");
        assert_eq!(raster.size(), 20);
        assert_eq!(raster.pixels().len(), 20 * 20 * 4);
    }

    #[test]
    fn rejects_non_square_png() {
        let result = decode_png(&create_png_bytes(100, 50), &EncoderLimits::default());
        assert!(matches!(result, Err(ConvertError::InvalidSource(_))));
    }

    #[test]
    fn rejects_non_png_bytes() {
        let result = decode_png(b"GIF89a not really", &EncoderLimits::default());
        assert!(matches!(result, Err(ConvertError::InvalidSource(_))));

        let result = decode_png(b"plain text", &EncoderLimits::default());
        assert!(matches!(result, Err(ConvertError::InvalidSource(_))));
    }

    #[test]
    fn rejects_too_many_pixels() {
        let limits = EncoderLimits {
            max_decoded_pixels: 100,
            ..EncoderLimits::default()
        };
        let result = decode_png(&create_png_bytes(20, 20), &limits);
        assert!(matches!(result, Err(ConvertError::InvalidSource(_))));
    }

    #[test]
    fn missing_file_is_invalid_source() {
        let result = load_png_file(Path::new("/definitely/not/here.png"), &EncoderLimits::default());
        assert!(matches!(result, Err(ConvertError::InvalidSource(_))));
    }
}
