//! 分組計算器

use holdout_core::{
    HoldoutConfig, HoldoutError, PartitionRequest, PartitionResult, PercentagePolicy,
};

/// 分組計算器
///
/// 把 `1..=total_request` 依百分比切成左右兩段，右段為尾端的
/// `floor(percentage / 100 * total_request)` 個序號。相同輸入永遠得到相同結果。
#[derive(Debug, Clone, Copy, Default)]
pub struct PartitionCalculator {
    /// 百分比超出範圍時的處理方式
    percentage_policy: PercentagePolicy,
}

impl PartitionCalculator {
    /// 創建使用預設配置的計算器
    pub fn new() -> Self {
        Self::default()
    }

    /// 依配置創建計算器
    pub fn with_config(config: &HoldoutConfig) -> Self {
        Self {
            percentage_policy: config.percentage_policy,
        }
    }

    /// 檢查請求並計算分組
    pub fn compute(&self, request: &PartitionRequest) -> holdout_core::Result<PartitionResult> {
        let total_request = request.validate(self.percentage_policy)?;
        Self::split(request.percentage, total_request)
    }

    /// 分組計算本體
    ///
    /// 請求總數超出 `usize` 時回傳 [`HoldoutError::TotalRequestTooLarge`]。
    pub fn split(percentage: f64, total_request: u64) -> holdout_core::Result<PartitionResult> {
        usize::try_from(total_request)
            .map_err(|_| HoldoutError::TotalRequestTooLarge(total_request))?;

        let list_requests: Vec<u64> = (1..=total_request).collect();
        let percentage_multiplier = percentage / 100.0;

        let raw_right = (percentage_multiplier * total_request as f64).floor();
        // `as` 轉換會把負數飽和為 0
        let total_right = (raw_right as u64).min(total_request);
        if raw_right < 0.0 || raw_right > total_request as f64 {
            tracing::warn!(
                "百分比 {} 超出範圍，右側數量 {} 限制為 {}",
                percentage,
                raw_right,
                total_right
            );
        }

        let total_left = total_request - total_right;
        let split_at = usize::try_from(total_left)
            .map_err(|_| HoldoutError::TotalRequestTooLarge(total_request))?;
        let list_left = list_requests[..split_at].to_vec();
        let list_right = list_requests[split_at..].to_vec();

        tracing::debug!(
            "分組完成：總數 {}，左側 {}，右側 {}",
            total_request,
            total_left,
            total_right
        );

        Ok(PartitionResult {
            list_requests,
            percentage_multiplier,
            total_right,
            total_left,
            list_left,
            list_right,
            total_request,
        })
    }
}

/// 以預設配置計算分組
pub fn compute_partition(
    percentage: f64,
    total_request: i64,
) -> holdout_core::Result<PartitionResult> {
    PartitionCalculator::new().compute(&PartitionRequest::new(percentage, total_request))
}
