//! Holdout 分組示例
//!
//! 執行：`RUST_LOG=debug cargo run --example holdout_split`

use holdout::{HoldoutConfig, HoldoutManager, InMemoryCacheDriver, KeyLockRegistry};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== Holdout 分組示例 ===\n");

    let driver = Arc::new(InMemoryCacheDriver::new());
    let locks = Arc::new(KeyLockRegistry::new());
    let config = HoldoutConfig::from_json(r#"{"key_prefix": "holdout:", "ttl_secs": 3600}"#)?;

    for round in 1..=2 {
        let manager = HoldoutManager::new(13.0, 85, "collection-reminder", driver.clone())
            .with_config(config.clone())
            .with_locks(Arc::clone(&locks));
        let holdout = manager.enter()?;
        let variables = holdout.variables();

        println!("第 {} 次（快取命中: {}）", round, holdout.from_cache());
        println!(
            "  - 對照組 {} 筆: {:?}..{:?}",
            variables.total_left,
            variables.list_left.first(),
            variables.list_left.last()
        );
        println!("  - holdout 組 {} 筆: {:?}", variables.total_right, variables.list_right);
    }

    tracing::info!("快取項目數量: {}", driver.len());

    Ok(())
}
