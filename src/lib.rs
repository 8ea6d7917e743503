//! # Holdout
//!
//! 百分比 holdout 分組：純計算的分組器與以快取記住結果的管理器。
//!
//! ```
//! use holdout::compute_partition;
//!
//! let result = compute_partition(10.0, 10).unwrap();
//! assert_eq!(result.list_right, vec![10]);
//! ```

pub use holdout_cache::{
    CacheDriver, HoldoutManager, HoldoutScope, InMemoryCacheDriver, KeyLockGuard,
    KeyLockRegistry,
};
pub use holdout_calc::{compute_partition, PartitionCalculator};
pub use holdout_core::{
    CacheFailureMode, Group, HoldoutConfig, HoldoutError, PartitionRequest, PartitionResult,
    PercentagePolicy, Result,
};
