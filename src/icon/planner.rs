//! # 条目规划
//!
//! 根据目标格式给出固定顺序的（尺寸，编码方式）列表。纯函数，同样的输入永远得到同样的输出。
//!
//! ICO 中大于 64px 的条目一律使用 PNG：经典 DIB 无法可靠表示 256px 条目。

use super::source::{EntryEncoding, IconEntry, OsType, TargetFormat};

/// ICO 标准尺寸。
pub const ICO_SIZES: [u32; 7] = [16, 24, 32, 48, 64, 128, 256];

/// ICO 中允许使用 DIB 编码的最大边长。
pub const ICO_BITMAP_MAX_SIZE: u32 = 64;

/// ICNS 尺寸与对应标记。
pub const ICNS_TYPES: [(u32, OsType); 7] = [
    (16, OsType(*b"icp4")),
    (32, OsType(*b"icp5")),
    (64, OsType(*b"icp6")),
    (128, OsType(*b"ic07")),
    (256, OsType(*b"ic08")),
    (512, OsType(*b"ic09")),
    (1024, OsType(*b"ic10")),
];

/// 生成目标格式需要的全部条目。
pub fn plan_entries(format: TargetFormat, use_bitmap_entries: bool) -> Vec<IconEntry> {
    match format {
        TargetFormat::Ico => ICO_SIZES
            .iter()
            .map(|&size| IconEntry {
                size,
                encoding: if use_bitmap_entries && size <= ICO_BITMAP_MAX_SIZE {
                    EntryEncoding::Bitmap
                } else {
                    EntryEncoding::Png
                },
                tag: None,
            })
            .collect(),
        TargetFormat::Icns => ICNS_TYPES
            .iter()
            .map(|&(size, tag)| IconEntry {
                size,
                encoding: EntryEncoding::Png,
                tag: Some(tag),
            })
            .collect(),
    }
}
