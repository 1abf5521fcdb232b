//! PNG 编码（RGBA8，无损）。

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};

use super::{ConvertError, RasterImage};

/// 将栅格图编码为 PNG 字节块。
pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>, ConvertError> {
    let mut bytes = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut bytes, CompressionType::Best, FilterType::Adaptive);

    encoder
        .write_image(
            image.pixels(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| ConvertError::Encoding(format!("PNG 编码失败：{}", e)))?;

    if bytes.is_empty() {
        return Err(ConvertError::Encoding("PNG 编码输出为空".to_string()));
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;

    #[test]
    fn png_round_trip_is_lossless() {
        let size = 33;
        let pixels: Vec<u8> = (0..size * size * 4).map(|i| (i * 7 % 251) as u8).collect();
        let image = RasterImage::new(size as u32, size as u32, pixels.clone()).expect("image");

        let png = encode_png(&image).expect("encode");
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png)
            .expect("decode")
            .to_rgba8();
        assert_eq!(decoded.dimensions(), (size as u32, size as u32));
        assert_eq!(decoded.into_raw(), pixels);
    }
}
