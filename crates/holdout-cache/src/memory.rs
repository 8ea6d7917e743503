//! 記憶體快取驅動

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use holdout_core::{HoldoutError, Result};

use crate::driver::CacheDriver;

/// 快取項目
#[derive(Debug, Clone)]
struct CachedEntry {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

impl CachedEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

/// 記憶體快取驅動（程序內，過期項目在讀取時清除）
#[derive(Debug, Default)]
pub struct InMemoryCacheDriver {
    entries: Mutex<HashMap<String, CachedEntry>>,
}

impl InMemoryCacheDriver {
    /// 創建空的快取
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CachedEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 移除指定快取項目，回傳是否存在
    pub fn remove(&self, key: &str) -> bool {
        self.entries().remove(key).is_some()
    }

    /// 清除所有快取
    pub fn clear(&self) {
        self.entries().clear();
    }

    /// 快取項目數量（含尚未清除的過期項目）
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl CacheDriver for InMemoryCacheDriver {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.entries();

        let now = Utc::now();
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            tracing::debug!("快取項目已過期: {}", key);
            entries.remove(key);
            return Ok(None);
        }

        Ok(entries.get(key).map(|entry| entry.value.clone()))
    }

    fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<()> {
        let expires_at = match ttl {
            Some(ttl) => {
                let ttl = chrono::Duration::from_std(ttl)
                    .map_err(|e| HoldoutError::CacheDriver(format!("無效的存活時間: {}", e)))?;
                let expires_at = Utc::now().checked_add_signed(ttl);
                if expires_at.is_none() {
                    tracing::debug!("存活時間超出日期範圍，{} 不設過期", key);
                }
                expires_at
            }
            None => None,
        };

        self.entries()
            .insert(key.to_string(), CachedEntry { value, expires_at });
        Ok(())
    }
}
