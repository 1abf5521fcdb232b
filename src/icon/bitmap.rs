//! # DIB 编码
//!
//! 生成 ICO 内嵌用的 32 位 DIB：`BITMAPINFOHEADER` + BGRA 像素（自下而上）+ 1 位 AND 掩码。
//! 头部高度记录为实际高度的两倍（XOR + AND 两层），这是 ICO 读取方的约定。

use super::ico::ICO_MAX_DIMENSION;
use super::source::rgba_len;
use super::{ConvertError, RasterImage};

const HEADER_SIZE: u32 = 40;
const BITS_PER_PIXEL: u16 = 32;

/// AND 掩码单行字节数（按 4 字节对齐）。
fn mask_row_len(width: u32) -> usize {
    (width as usize).div_ceil(32) * 4
}

/// 将正方形 RGBA 图编码为 DIB 字节块。
pub fn encode_bitmap(image: &RasterImage) -> Result<Vec<u8>, ConvertError> {
    let width = image.width();
    let height = image.height();

    // 上限取 ICO 目录可表示的边长；实际规划只在 64px 及以下使用 DIB
    if width > ICO_MAX_DIMENSION {
        return Err(ConvertError::Encoding(format!(
            "DIB 条目尺寸过大：{}px（上限：{}px）",
            width, ICO_MAX_DIMENSION
        )));
    }

    // 32 位像素行天然 4 字节对齐
    let xor_len = rgba_len(width, height)?;
    let mask_row = mask_row_len(width);
    let and_len = mask_row
        .checked_mul(height as usize)
        .ok_or_else(|| ConvertError::Encoding("AND 掩码长度溢出".to_string()))?;
    let image_size = u32::try_from(xor_len + and_len)
        .map_err(|_| ConvertError::Encoding("DIB 数据长度溢出".to_string()))?;

    let mut out = Vec::with_capacity(HEADER_SIZE as usize + xor_len + and_len);
    out.extend_from_slice(&HEADER_SIZE.to_le_bytes()); // biSize
    out.extend_from_slice(&(width as i32).to_le_bytes()); // biWidth
    out.extend_from_slice(&((height * 2) as i32).to_le_bytes()); // biHeight
    out.extend_from_slice(&1u16.to_le_bytes()); // biPlanes
    out.extend_from_slice(&BITS_PER_PIXEL.to_le_bytes()); // biBitCount
    out.extend_from_slice(&0u32.to_le_bytes()); // biCompression = BI_RGB
    out.extend_from_slice(&image_size.to_le_bytes()); // biSizeImage
    out.extend_from_slice(&0i32.to_le_bytes()); // biXPelsPerMeter
    out.extend_from_slice(&0i32.to_le_bytes()); // biYPelsPerMeter
    out.extend_from_slice(&0u32.to_le_bytes()); // biClrUsed
    out.extend_from_slice(&0u32.to_le_bytes()); // biClrImportant

    let row_len = width as usize * 4;
    let rows: Vec<&[u8]> = image.pixels().chunks_exact(row_len).collect();

    for row in rows.iter().rev() {
        for px in row.chunks_exact(4) {
            out.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
        }
    }

    for row in rows.iter().rev() {
        let mut mask = vec![0u8; mask_row];
        for (x, px) in row.chunks_exact(4).enumerate() {
            if px[3] == 0 {
                mask[x / 8] |= 0x80 >> (x % 8);
            }
        }
        out.extend_from_slice(&mask);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ])
    }

    #[test]
    fn header_and_total_length() {
        let image = RasterImage::new(16, 16, vec![255; 16 * 16 * 4]).expect("image");
        let dib = encode_bitmap(&image).expect("encode");

        assert_eq!(u32_at(&dib, 0), 40);
        assert_eq!(u32_at(&dib, 4), 16);
        assert_eq!(u32_at(&dib, 8), 32);
        assert_eq!(u16::from_le_bytes([dib[14], dib[15]]), 32);
        assert_eq!(u32_at(&dib, 16), 0);
        assert_eq!(dib.len(), 40 + 16 * 16 * 4 + 16 * 4);
    }

    #[test]
    fn rows_are_bottom_up_bgra() {
        // 2x2: 顶行红/绿，底行蓝/白
        let pixels = vec![
            255, 0, 0, 255, 0, 255, 0, 255, //
            0, 0, 255, 255, 255, 255, 255, 255,
        ];
        let image = RasterImage::new(2, 2, pixels).expect("image");
        let dib = encode_bitmap(&image).expect("encode");

        let data = &dib[40..56];
        assert_eq!(&data[0..4], &[255, 0, 0, 255]); // 蓝（BGRA）
        assert_eq!(&data[4..8], &[255, 255, 255, 255]);
        assert_eq!(&data[8..12], &[0, 0, 255, 255]); // 红
        assert_eq!(&data[12..16], &[0, 255, 0, 255]);
    }

    #[test]
    fn and_mask_marks_transparent_pixels_with_padding() {
        // 24px 宽：掩码行 3 字节数据 + 1 字节填充
        let mut pixels = vec![255u8; 24 * 24 * 4];
        // 顶行第 0 个像素透明
        pixels[3] = 0;
        let image = RasterImage::new(24, 24, pixels).expect("image");
        let dib = encode_bitmap(&image).expect("encode");

        let mask_start = 40 + 24 * 24 * 4;
        let mask = &dib[mask_start..];
        assert_eq!(mask.len(), 24 * 4);

        // 顶行在最后
        let top_row = &mask[23 * 4..];
        assert_eq!(top_row, &[0x80, 0, 0, 0]);
        assert!(mask[..23 * 4].iter().all(|&b| b == 0));
    }

    #[test]
    fn largest_ico_dimension_is_accepted() {
        let image = RasterImage::new(256, 256, vec![255; 256 * 256 * 4]).expect("image");
        let dib = encode_bitmap(&image).expect("encode");
        assert_eq!(u32_at(&dib, 8), 512);
    }

    #[test]
    fn oversized_bitmap_is_rejected() {
        let image = RasterImage::new(512, 512, vec![0; 512 * 512 * 4]).expect("image");
        assert!(matches!(encode_bitmap(&image), Err(ConvertError::Encoding(_))));
    }
}
