//! 分組配置模型

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::Result;

/// 分組與快取參數配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldoutConfig {
    /// 快取鍵前綴（與呼叫端的 key 直接串接）
    pub key_prefix: String,

    /// 快取存活秒數，`None` 表示交由快取後端決定
    pub ttl_secs: Option<u64>,

    /// 快取驅動失敗時的處理方式
    pub failure_mode: CacheFailureMode,

    /// 百分比超出 0–100 時的處理方式
    pub percentage_policy: PercentagePolicy,
}

impl HoldoutConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            key_prefix: String::new(),
            ttl_secs: None,
            failure_mode: CacheFailureMode::Propagate,
            percentage_policy: PercentagePolicy::Clamp,
        }
    }

    /// 從 JSON 設定載入，缺少的欄位使用預設值
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// 建構器模式：設置快取鍵前綴
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// 建構器模式：設置快取存活秒數
    pub fn with_ttl_secs(mut self, secs: u64) -> Self {
        self.ttl_secs = Some(secs);
        self
    }

    /// 建構器模式：設置快取失敗處理方式
    pub fn with_failure_mode(mut self, mode: CacheFailureMode) -> Self {
        self.failure_mode = mode;
        self
    }

    /// 建構器模式：設置百分比處理方式
    pub fn with_percentage_policy(mut self, policy: PercentagePolicy) -> Self {
        self.percentage_policy = policy;
        self
    }

    /// 快取存活時間
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_secs.map(Duration::from_secs)
    }

    /// 組合完整的快取鍵
    pub fn cache_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    /// 快取失敗時是否直接回傳計算結果
    pub fn fails_open(&self) -> bool {
        self.failure_mode == CacheFailureMode::FailOpen
    }
}

impl Default for HoldoutConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// 快取驅動失敗處理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheFailureMode {
    /// 錯誤回傳給呼叫端（預設）
    #[default]
    Propagate,
    /// 記錄警告後回傳未快取的計算結果
    FailOpen,
}

/// 百分比超出範圍時的處理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentagePolicy {
    /// 照常計算，再把右側數量限制在 0..=total_request（預設）
    #[default]
    Clamp,
    /// 超出 0–100 直接回傳錯誤
    Reject,
}
