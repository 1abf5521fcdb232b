//! # ICNS 组装
//!
//! ```text
//! "icns" total_len(4, BE)
//! { tag(4) chunk_len(4, BE) = 8 + payload, payload }...
//! ```
//!
//! 块顺序沿用规划阶段的固定顺序。

use super::source::{EncodedEntry, IconContainer, TargetFormat};
use super::ConvertError;

pub const ICNS_MAGIC: &[u8; 4] = b"icns";
pub const ICNS_HEADER_SIZE: u32 = 8;

/// 按输入顺序组装 ICNS 容器，每个条目必须带有四字符标记。
pub fn assemble_icns(entries: &[EncodedEntry]) -> Result<IconContainer, ConvertError> {
    if entries.is_empty() {
        return Err(ConvertError::Encoding("ICNS 至少需要一个条目".to_string()));
    }

    let mut total = ICNS_HEADER_SIZE;
    let mut chunks = Vec::with_capacity(entries.len());

    for entry in entries {
        let tag = entry.tag.ok_or_else(|| {
            ConvertError::Encoding(format!("ICNS 条目缺少类型标记：{}px", entry.size))
        })?;

        let chunk_len = u32::try_from(entry.data.len())
            .ok()
            .and_then(|len| len.checked_add(ICNS_HEADER_SIZE))
            .ok_or_else(|| ConvertError::Encoding(format!("ICNS 块过大：{}", tag)))?;

        total = total
            .checked_add(chunk_len)
            .ok_or_else(|| ConvertError::Encoding("ICNS 文件长度溢出".to_string()))?;

        chunks.push((tag, chunk_len, &entry.data));
    }

    let mut bytes = Vec::with_capacity(total as usize);
    bytes.extend_from_slice(ICNS_MAGIC);
    bytes.extend_from_slice(&total.to_be_bytes());

    for (tag, chunk_len, data) in chunks {
        bytes.extend_from_slice(&tag.0);
        bytes.extend_from_slice(&chunk_len.to_be_bytes());
        bytes.extend_from_slice(data);
    }

    Ok(IconContainer {
        format: TargetFormat::Icns,
        bytes,
    })
}
