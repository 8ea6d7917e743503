//! # Holdout Calculation Engine
//!
//! 百分比分組計算

pub mod calculator;

// Re-export 主要類型
pub use calculator::{compute_partition, PartitionCalculator};
