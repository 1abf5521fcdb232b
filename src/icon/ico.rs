//! # ICO 组装
//!
//! ## 布局
//!
//! ```text
//! ICONDIR        reserved(2)=0 type(2)=1 count(2)
//! ICONDIRENTRY×n width(1) height(1) colors(1) reserved(1) planes(2) bpp(2) bytes(4) offset(4)
//! data×n         按目录顺序紧密排列
//! ```
//!
//! 所有多字节字段为小端序。256px 在目录中记为 0。
//! 偏移量由显式的累加器逐条推进，溢出时返回编码错误。

use super::source::{EncodedEntry, IconContainer, TargetFormat};
use super::ConvertError;

pub const ICO_HEADER_SIZE: u32 = 6;
pub const ICO_DIR_ENTRY_SIZE: u32 = 16;
pub(crate) const ICO_MAX_DIMENSION: u32 = 256;

/// 目录中的尺寸字节：256 记为 0。
fn dimension_byte(size: u32) -> Result<u8, ConvertError> {
    match size {
        ICO_MAX_DIMENSION => Ok(0),
        1..=255 => Ok(size as u8),
        _ => Err(ConvertError::Encoding(format!(
            "ICO 条目尺寸无效：{}px（允许 1~256）",
            size
        ))),
    }
}

/// 按输入顺序组装 ICO 容器。
pub fn assemble_ico(entries: &[EncodedEntry]) -> Result<IconContainer, ConvertError> {
    if entries.is_empty() {
        return Err(ConvertError::Encoding("ICO 至少需要一个条目".to_string()));
    }

    let count = u16::try_from(entries.len())
        .map_err(|_| ConvertError::Encoding(format!("ICO 条目过多：{}", entries.len())))?;

    let directory_len = ICO_DIR_ENTRY_SIZE
        .checked_mul(u32::from(count))
        .and_then(|len| len.checked_add(ICO_HEADER_SIZE))
        .ok_or_else(|| ConvertError::Encoding("ICO 目录长度溢出".to_string()))?;

    let mut header = Vec::with_capacity(directory_len as usize);
    header.extend_from_slice(&0u16.to_le_bytes());
    header.extend_from_slice(&1u16.to_le_bytes());
    header.extend_from_slice(&count.to_le_bytes());

    let mut offset = directory_len;
    for entry in entries {
        let dimension = dimension_byte(entry.size)?;
        let length = u32::try_from(entry.data.len())
            .map_err(|_| ConvertError::Encoding(format!("ICO 条目数据过大：{}px", entry.size)))?;

        header.push(dimension); // width
        header.push(dimension); // height
        header.push(0); // color count
        header.push(0); // reserved
        header.extend_from_slice(&1u16.to_le_bytes()); // planes
        header.extend_from_slice(&entry.bit_depth.to_le_bytes());
        header.extend_from_slice(&length.to_le_bytes());
        header.extend_from_slice(&offset.to_le_bytes());

        offset = offset
            .checked_add(length)
            .ok_or_else(|| ConvertError::Encoding("ICO 数据偏移量溢出".to_string()))?;
    }

    let mut bytes = header;
    bytes.reserve((offset - directory_len) as usize);
    for entry in entries {
        bytes.extend_from_slice(&entry.data);
    }

    debug_assert_eq!(bytes.len(), offset as usize);

    Ok(IconContainer {
        format: TargetFormat::Ico,
        bytes,
    })
}
