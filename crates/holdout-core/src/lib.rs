//! # Holdout Core
//!
//! 核心資料模型與類型定義

pub mod config;
pub mod partition;
pub mod request;

// Re-export 主要類型
pub use config::{CacheFailureMode, HoldoutConfig, PercentagePolicy};
pub use partition::{Group, PartitionResult};
pub use request::PartitionRequest;

/// 分組錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum HoldoutError {
    #[error("請求總數不可為負數: {0}")]
    NegativeTotalRequest(i64),

    #[error("請求總數超出平台可定址範圍: {0}")]
    TotalRequestTooLarge(u64),

    #[error("無效的百分比: {0}")]
    InvalidPercentage(f64),

    #[error("快取鍵不可為空")]
    EmptyKey,

    #[error("快取驅動錯誤: {0}")]
    CacheDriver(String),

    #[error("序列化錯誤: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HoldoutError>;
