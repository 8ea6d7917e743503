//! 分組結果模型

use serde::{Deserialize, Serialize};
use std::fmt;

/// 分組（左側為對照組，右側為 holdout 組）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    /// 左側（對照組）
    Left,
    /// 右側（holdout / 實驗組）
    Right,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Left => write!(f, "left"),
            Group::Right => write!(f, "right"),
        }
    }
}

/// 分組結果
///
/// 欄位名稱即為快取中 JSON 物件的鍵名。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionResult {
    /// 全部請求序號 `1..=total_request`
    pub list_requests: Vec<u64>,

    /// percentage / 100
    pub percentage_multiplier: f64,

    /// 右側數量
    pub total_right: u64,

    /// 左側數量
    pub total_left: u64,

    /// 左側序號（list_requests 的前段）
    pub list_left: Vec<u64>,

    /// 右側序號（list_requests 的尾段）
    pub list_right: Vec<u64>,

    /// 請求總數
    pub total_request: u64,
}

impl PartitionResult {
    /// 查詢序號所屬分組，超出 `1..=total_request` 回傳 `None`
    pub fn group_of(&self, index: u64) -> Option<Group> {
        if index == 0 || index > self.total_request {
            None
        } else if index <= self.total_left {
            Some(Group::Left)
        } else {
            Some(Group::Right)
        }
    }

    /// 序號是否落在 holdout 組
    pub fn is_holdout(&self, index: u64) -> bool {
        self.group_of(index) == Some(Group::Right)
    }

    /// 檢查各欄位是否互相一致
    pub fn is_consistent(&self) -> bool {
        let total = self.total_request as usize;

        self.total_left.checked_add(self.total_right) == Some(self.total_request)
            && self.list_requests.len() == total
            && self
                .list_requests
                .iter()
                .zip(1u64..)
                .all(|(value, expected)| *value == expected)
            && self.list_left.len() as u64 == self.total_left
            && self.list_right.len() as u64 == self.total_right
            && self
                .list_left
                .iter()
                .chain(self.list_right.iter())
                .eq(self.list_requests.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PartitionResult {
        PartitionResult {
            list_requests: vec![1, 2, 3, 4],
            percentage_multiplier: 0.5,
            total_right: 2,
            total_left: 2,
            list_left: vec![1, 2],
            list_right: vec![3, 4],
            total_request: 4,
        }
    }

    #[test]
    fn test_group_of() {
        let result = sample();

        assert_eq!(result.group_of(0), None);
        assert_eq!(result.group_of(1), Some(Group::Left));
        assert_eq!(result.group_of(2), Some(Group::Left));
        assert_eq!(result.group_of(3), Some(Group::Right));
        assert_eq!(result.group_of(4), Some(Group::Right));
        assert_eq!(result.group_of(5), None);

        assert!(result.is_holdout(4));
        assert!(!result.is_holdout(1));
        assert!(!result.is_holdout(9));
    }

    #[test]
    fn test_is_consistent() {
        assert!(sample().is_consistent());

        let mut shifted = sample();
        shifted.list_right = vec![4, 3];
        assert!(!shifted.is_consistent());

        let mut miscounted = sample();
        miscounted.total_right = 3;
        assert!(!miscounted.is_consistent());
    }

    #[test]
    fn test_json_field_names() {
        let value = serde_json::to_value(sample()).unwrap();

        for field in [
            "list_requests",
            "percentage_multiplier",
            "total_right",
            "total_left",
            "list_left",
            "list_right",
            "total_request",
        ] {
            assert!(value.get(field).is_some(), "缺少欄位 {}", field);
        }
    }

    #[test]
    fn test_group_display() {
        assert_eq!(Group::Left.to_string(), "left");
        assert_eq!(Group::Right.to_string(), "right");
    }
}
