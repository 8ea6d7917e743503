//! # Holdout Cache
//!
//! 快取驅動與 holdout 分組管理器

pub mod driver;
pub mod key_lock;
pub mod manager;
pub mod memory;

// Re-export 主要類型
pub use driver::CacheDriver;
pub use key_lock::{KeyLockGuard, KeyLockRegistry};
pub use manager::{HoldoutManager, HoldoutScope};
pub use memory::InMemoryCacheDriver;
