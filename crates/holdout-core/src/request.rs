//! 分組請求模型

use serde::{Deserialize, Serialize};

use crate::{HoldoutError, PercentagePolicy, Result};

/// 分組請求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionRequest {
    /// 右側（holdout）百分比，通常介於 0–100，可為小數
    pub percentage: f64,

    /// 請求總數
    pub total_request: i64,

    /// 快取識別（僅快取版本使用）
    pub key: Option<String>,
}

impl PartitionRequest {
    /// 創建新的分組請求
    pub fn new(percentage: f64, total_request: i64) -> Self {
        Self {
            percentage,
            total_request,
            key: None,
        }
    }

    /// 建構器模式：設置快取識別
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// 百分比乘數（percentage / 100）
    pub fn percentage_multiplier(&self) -> f64 {
        self.percentage / 100.0
    }

    /// 百分比是否落在 0–100
    pub fn percentage_in_range(&self) -> bool {
        (0.0..=100.0).contains(&self.percentage)
    }

    /// 檢查輸入，回傳非負的請求總數
    pub fn validate(&self, policy: PercentagePolicy) -> Result<u64> {
        if !self.percentage.is_finite() {
            return Err(HoldoutError::InvalidPercentage(self.percentage));
        }

        if policy == PercentagePolicy::Reject && !self.percentage_in_range() {
            return Err(HoldoutError::InvalidPercentage(self.percentage));
        }

        u64::try_from(self.total_request)
            .map_err(|_| HoldoutError::NegativeTotalRequest(self.total_request))
    }
}
