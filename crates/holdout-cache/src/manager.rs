//! Holdout 快取管理器

use std::sync::Arc;

use holdout_calc::PartitionCalculator;
use holdout_core::{
    Group, HoldoutConfig, HoldoutError, PartitionRequest, PartitionResult, Result,
};

use crate::driver::CacheDriver;
use crate::key_lock::KeyLockRegistry;

/// Holdout 快取管理器
///
/// 以快取鍵記住分組結果。`enter` 時先讀快取，未命中才計算並寫回；
/// 回傳的 [`HoldoutScope`] 離開作用域時呼叫驅動的 `release`。
pub struct HoldoutManager {
    request: PartitionRequest,
    key: String,
    driver: Arc<dyn CacheDriver>,
    config: HoldoutConfig,
    locks: Option<Arc<KeyLockRegistry>>,
}

impl HoldoutManager {
    /// 創建新的管理器
    pub fn new(
        percentage: f64,
        total_request: i64,
        key: impl Into<String>,
        driver: Arc<dyn CacheDriver>,
    ) -> Self {
        let key = key.into();
        Self {
            request: PartitionRequest::new(percentage, total_request).with_key(key.clone()),
            key,
            driver,
            config: HoldoutConfig::default(),
            locks: None,
        }
    }

    /// 建構器模式：設置配置
    pub fn with_config(mut self, config: HoldoutConfig) -> Self {
        self.config = config;
        self
    }

    /// 建構器模式：設置快取鍵寫入鎖
    pub fn with_locks(mut self, locks: Arc<KeyLockRegistry>) -> Self {
        self.locks = Some(locks);
        self
    }

    /// 分組請求
    pub fn request(&self) -> &PartitionRequest {
        &self.request
    }

    /// 實際寫入快取的鍵（含前綴）
    pub fn cache_key(&self) -> String {
        self.config.cache_key(&self.key)
    }

    /// 進入使用範圍：讀取快取或計算後寫入
    pub fn enter(&self) -> Result<HoldoutScope<'_>> {
        if self.key.is_empty() {
            return Err(HoldoutError::EmptyKey);
        }
        let total_request = self.request.validate(self.config.percentage_policy)?;

        let cache_key = self.cache_key();
        let _lock = self.locks.as_ref().map(|locks| locks.lock(&cache_key));

        let (variables, from_cache) = match self.load(&cache_key)? {
            Some(cached) => {
                if cached.total_request != total_request
                    || cached.percentage_multiplier != self.request.percentage_multiplier()
                {
                    tracing::warn!(
                        "快取 {} 的分組參數與請求不同，沿用快取結果直到過期",
                        cache_key
                    );
                }
                (cached, true)
            }
            None => {
                let computed =
                    PartitionCalculator::split(self.request.percentage, total_request)?;
                self.store(&cache_key, &computed)?;
                (computed, false)
            }
        };

        Ok(HoldoutScope {
            driver: self.driver.as_ref(),
            cache_key,
            variables,
            from_cache,
        })
    }

    /// 在使用範圍內執行閉包，結束後自動釋放
    pub fn scope<T>(&self, f: impl FnOnce(&HoldoutScope<'_>) -> T) -> Result<T> {
        let holdout = self.enter()?;
        Ok(f(&holdout))
    }

    /// 讀取快取，無法解析或不一致的項目視為未命中
    fn load(&self, cache_key: &str) -> Result<Option<PartitionResult>> {
        let raw = match self.driver.get(cache_key) {
            Ok(raw) => raw,
            Err(e) if self.config.fails_open() => {
                tracing::warn!("讀取快取 {} 失敗，改為直接計算: {}", cache_key, e);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let Some(raw) = raw else {
            tracing::debug!("快取未命中: {}", cache_key);
            return Ok(None);
        };

        match serde_json::from_str::<PartitionResult>(&raw) {
            Ok(cached) if cached.is_consistent() => {
                tracing::debug!("快取命中: {}", cache_key);
                Ok(Some(cached))
            }
            Ok(_) => {
                tracing::warn!("快取 {} 的分組結果不一致，重新計算", cache_key);
                Ok(None)
            }
            Err(e) => {
                tracing::warn!("快取 {} 無法解析，重新計算: {}", cache_key, e);
                Ok(None)
            }
        }
    }

    fn store(&self, cache_key: &str, variables: &PartitionResult) -> Result<()> {
        let value = serde_json::to_string(variables)?;

        match self.driver.set(cache_key, value, self.config.ttl()) {
            Ok(()) => Ok(()),
            Err(e) if self.config.fails_open() => {
                tracing::warn!("寫入快取 {} 失敗，回傳未快取結果: {}", cache_key, e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

/// 使用範圍，持有本次取得的分組結果
pub struct HoldoutScope<'a> {
    driver: &'a dyn CacheDriver,
    cache_key: String,
    variables: PartitionResult,
    from_cache: bool,
}

impl HoldoutScope<'_> {
    /// 分組結果
    pub fn variables(&self) -> &PartitionResult {
        &self.variables
    }

    /// 是否由快取取得
    pub fn from_cache(&self) -> bool {
        self.from_cache
    }

    /// 本次使用的快取鍵（含前綴）
    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }

    /// 序號是否落在 holdout 組
    pub fn is_holdout(&self, index: u64) -> bool {
        self.variables.is_holdout(index)
    }

    /// 查詢序號所屬分組
    pub fn group_of(&self, index: u64) -> Option<Group> {
        self.variables.group_of(index)
    }
}

impl Drop for HoldoutScope<'_> {
    fn drop(&mut self) {
        tracing::trace!("釋放快取範圍: {}", self.cache_key);
        self.driver.release();
    }
}
