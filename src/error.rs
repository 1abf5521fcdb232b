//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 图标转换链路本身使用 `ConvertError` 的四个终止性分支；
//! 设置读写、命令行入口等外围逻辑统一返回 `AppError`。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `ConvertError` 与 `std::io::Error` 提供 `From` 转换，无需手动 map。
//! - 实现 `Serialize` 将错误序列化为字符串，便于以 JSON 输出给调用方。

use serde::Serialize;

use crate::icon::ConvertError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 图标转换流水线错误
    #[error("{0}")]
    Convert(#[from] ConvertError),

    /// 设置文件读取 / 解析 / 保存失败
    #[error("设置错误: {0}")]
    Settings(String),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
