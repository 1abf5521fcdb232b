//! # 服务层（可注入状态）
//!
//! ## 设计思路
//!
//! `ConversionService` 是命令层持有的状态对象，替代全局单例函数：
//! 1. 加载上限通过 `Arc<RwLock<EncoderLimits>>` 支持运行时调整
//! 2. 单次请求使用同一份配置快照，避免处理中途配置漂移
//! 3. 编码是 CPU 密集的同步流程，放到 `spawn_blocking` 中执行，不阻塞异步运行时
//!
//! 每次请求独立加载源图，不缓存、不共享。

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use super::{
    ConversionConfig, ConversionResult, ConvertError, EncoderLimits, IconConverter, TargetFormat,
};

#[derive(Debug, Clone, Default)]
pub struct ConversionService {
    limits: Arc<RwLock<EncoderLimits>>,
}

impl ConversionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: EncoderLimits) -> Self {
        Self {
            limits: Arc::new(RwLock::new(limits)),
        }
    }

    /// 获取上限快照。
    pub fn limits(&self) -> Result<EncoderLimits, ConvertError> {
        self.limits
            .read()
            .map(|limits| limits.clone())
            .map_err(|_| ConvertError::Encoding("配置读取锁已中毒".to_string()))
    }

    /// 替换上限，之后发起的请求生效。
    pub fn set_limits(&self, limits: EncoderLimits) -> Result<(), ConvertError> {
        let mut guard = self
            .limits
            .write()
            .map_err(|_| ConvertError::Encoding("配置写入锁已中毒".to_string()))?;
        *guard = limits;
        Ok(())
    }

    /// 执行一次完整转换，失败也以 `ConversionResult::Failure` 返回。
    pub async fn convert(
        &self,
        source_path: PathBuf,
        format: TargetFormat,
        config: ConversionConfig,
    ) -> ConversionResult {
        let outcome = self.try_convert(source_path, format, config).await;
        if let Err(err) = &outcome {
            log::warn!(
                "❌ 图标转换失败 - code={} stage={} {}",
                err.code(),
                err.stage(),
                err
            );
        }
        ConversionResult::from(outcome)
    }

    async fn try_convert(
        &self,
        source_path: PathBuf,
        format: TargetFormat,
        config: ConversionConfig,
    ) -> Result<(PathBuf, bool), ConvertError> {
        let converter = IconConverter::new(self.limits()?);

        tokio::task::spawn_blocking(move || {
            converter.convert_file(&source_path, format, &config)
        })
        .await
        .map_err(|e| ConvertError::Encoding(format!("转换任务异常终止：{}", e)))?
    }
}
