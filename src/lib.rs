//! # iconforge — 库入口
//!
//! 将一张正方形 PNG 转换为 Windows ICO 或 macOS ICNS 多分辨率图标。
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  main.rs (clap CLI)                                      │
//! │     │  settings.json ── AppSettings                      │
//! │     ↓                                                    │
//! │  icon::commands ── make_ico / make_icns                  │
//! │     ↓                                                    │
//! │  icon::service ── ConversionService (spawn_blocking)     │
//! │     ↓                                                    │
//! │  icon::handler ── IconConverter                          │
//! │     ├─ loader     PNG 读取·签名·正方形校验               │
//! │     ├─ planner    ICO 7 尺寸 / ICNS 7 标记               │
//! │     ├─ resample   Nearest / Bilinear / Bicubic           │
//! │     ├─ bitmap     32 位 DIB + AND 掩码                    │
//! │     ├─ compressed PNG                                    │
//! │     ├─ ico/icns   容器布局                               │
//! │     └─ writer     原子写盘 + 结果记录                     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 应用级统一错误类型 `AppError` |
//! | [`icon`] | 图标编码引擎与其服务/命令层 |
//! | [`settings`] | 用户偏好 JSON 的加载与保存 |

pub mod error;
pub mod icon;
pub mod settings;
