//! # 重采样模块
//!
//! ## 设计思路
//!
//! 主路径使用 `fast_image_resize`，失败时回退到 `image::imageops::resize`，与剪贴板
//! 降采样链路的“快路径 + 保底路径”一致。alpha 通道与颜色通道使用同一滤镜，不做预乘。
//!
//! ## 实现思路
//!
//! 1. 目标尺寸与源相同：直接拷贝，保证恒等
//! 2. 构建 U8x4 源/目标缓冲，按滤镜选择 `ResizeAlg`
//! 3. 校验输出长度，不一致视为编码错误
//!
//! 纯函数、无共享可变状态，可以对不同条目并发调用。

use fast_image_resize as fr;
use image::{ImageBuffer, Rgba};

use super::source::rgba_len;
use super::{ConvertError, RasterImage, ResampleFilter};

/// 将源图缩放（或放大）到 `size x size`。
pub fn resample(
    source: &RasterImage,
    size: u32,
    filter: ResampleFilter,
) -> Result<RasterImage, ConvertError> {
    if size == 0 {
        return Err(ConvertError::Encoding("目标尺寸不能为 0".to_string()));
    }

    if size == source.size() {
        return Ok(source.clone());
    }

    let pixels = match resize_with_fast_image_resize(source, size, filter) {
        Ok(pixels) => pixels,
        Err(err) => {
            log::warn!(
                "⚠️ fast_image_resize 重采样失败，回退 image::resize：{}",
                err
            );
            resize_with_image(source, size, filter)?
        }
    };

    let expected_len = rgba_len(size, size)?;
    if pixels.len() != expected_len {
        return Err(ConvertError::Encoding(format!(
            "重采样输出长度异常：{}（期望：{}）",
            pixels.len(),
            expected_len
        )));
    }

    RasterImage::new(size, size, pixels)
        .map_err(|e| ConvertError::Encoding(format!("重采样输出无效：{}", e)))
}

fn resize_with_fast_image_resize(
    source: &RasterImage,
    size: u32,
    filter: ResampleFilter,
) -> Result<Vec<u8>, ConvertError> {
    let src_image = fr::images::Image::from_vec_u8(
        source.width(),
        source.height(),
        source.pixels().to_vec(),
        fr::PixelType::U8x4,
    )
    .map_err(|e| ConvertError::Encoding(format!("构建源图像缓冲失败：{}", e)))?;

    let mut dst_image = fr::images::Image::new(size, size, fr::PixelType::U8x4);

    let mut resizer = fr::Resizer::new();
    let options = fr::ResizeOptions::new()
        .resize_alg(to_resize_alg(filter))
        .use_alpha(false);

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| ConvertError::Encoding(format!("fast_image_resize 执行失败：{}", e)))?;

    Ok(dst_image.into_vec())
}

fn resize_with_image(
    source: &RasterImage,
    size: u32,
    filter: ResampleFilter,
) -> Result<Vec<u8>, ConvertError> {
    let buffer = ImageBuffer::<Rgba<u8>, &[u8]>::from_raw(
        source.width(),
        source.height(),
        source.pixels(),
    )
    .ok_or_else(|| ConvertError::Encoding("源像素缓冲长度异常".to_string()))?;

    let resized = image::imageops::resize(&buffer, size, size, filter.fallback_filter());
    Ok(resized.into_raw())
}

fn to_resize_alg(filter: ResampleFilter) -> fr::ResizeAlg {
    match filter {
        ResampleFilter::Nearest => fr::ResizeAlg::Nearest,
        ResampleFilter::Bilinear => fr::ResizeAlg::Convolution(fr::FilterType::Bilinear),
        ResampleFilter::Bicubic => fr::ResizeAlg::Convolution(fr::FilterType::CatmullRom),
    }
}
