//! # 图标编码模块（icon）
//!
//! ## 设计思路
//!
//! 该模块将“源图加载 → 条目规划 → 重采样 → 条目编码 → 容器组装 → 写盘”
//! 按职责拆分为多个子模块，每个阶段都是可单测的纯函数（写盘除外）。
//!
//! - `commands`：入参/出参适配（薄封装）
//! - `service`：承载可注入状态（`ConversionService`）
//! - `handler`：编排整条处理流水线
//! - `loader`：PNG 读取与源图校验
//! - `planner`：按目标格式给出条目列表
//! - `resample`：最近邻 / 双线性 / 双三次重采样
//! - `bitmap` / `compressed`：DIB 与 PNG 条目编码
//! - `ico` / `icns`：两种容器的二进制布局
//! - `writer`：原子写盘与结果记录
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 调用链
//!
//! ```text
//! CLI / 调用方
//!    ↓
//! commands.rs（设置 → ConversionConfig）
//!    ↓
//! service.rs（配置快照 + spawn_blocking）
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志）
//!    ├─ loader.rs
//!    ├─ planner.rs
//!    ├─ resample.rs → bitmap.rs / compressed.rs（逐条目）
//!    ├─ ico.rs / icns.rs
//!    └─ writer.rs
//!    ↓
//! ConversionRecord { type, message, desktop }
//! ```

pub mod bitmap;
pub mod commands;
pub mod compressed;
mod config;
mod error;
mod handler;
pub mod icns;
pub mod ico;
pub mod loader;
pub mod planner;
pub mod resample;
mod service;
mod source;
pub mod writer;

pub use config::{ConversionConfig, EncoderLimits, Quality, ResampleFilter};
pub use error::ConvertError;
pub use handler::IconConverter;
pub use service::ConversionService;
pub use source::{
    EncodedEntry, EntryEncoding, IconContainer, IconEntry, OsType, RasterImage, TargetFormat,
};
pub use writer::{ConversionRecord, ConversionResult};
