//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 图标转换链路只对外暴露四类终止性错误：源图无效、目标格式不支持、编码失败、写入失败。
//! 内部出现的溢出、锁中毒、库错误等一律归入 `Encoding`，调用方永远只需匹配这四个分支。

/// 图标转换统一错误类型。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("源图片无效：{0}")]
    InvalidSource(String),

    #[error("不支持的目标格式：{0}")]
    UnsupportedFormat(String),

    #[error("编码错误：{0}")]
    Encoding(String),

    #[error("写入失败：{0}")]
    Write(String),
}

impl ConvertError {
    /// 稳定错误码，供命令层与前端区分分支。
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidSource(_) => "E_INVALID_SOURCE",
            Self::UnsupportedFormat(_) => "E_UNSUPPORTED_FORMAT",
            Self::Encoding(_) => "E_ENCODING",
            Self::Write(_) => "E_WRITE",
        }
    }

    /// 出错的流水线阶段。
    pub fn stage(&self) -> &'static str {
        match self {
            Self::InvalidSource(_) => "load",
            Self::UnsupportedFormat(_) => "plan",
            Self::Encoding(_) => "encode",
            Self::Write(_) => "write",
        }
    }
}

impl From<ConvertError> for String {
    fn from(error: ConvertError) -> Self {
        error.to_string()
    }
}
