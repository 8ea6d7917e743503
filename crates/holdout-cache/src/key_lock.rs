//! 快取鍵寫入鎖

use std::collections::HashSet;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// 快取鍵寫入鎖登記表
///
/// 記錄正在「讀取或計算並寫入」的快取鍵。同一個鍵同時間只有一個呼叫端
/// 能持有鎖，其他呼叫端等待釋放後再讀快取，因此首次存取只計算一次。
/// 只在單一程序內有效，由呼叫端以 `Arc` 注入共用。
#[derive(Debug, Default)]
pub struct KeyLockRegistry {
    locked_keys: Mutex<HashSet<String>>,
    released: Condvar,
}

impl KeyLockRegistry {
    /// 創建新的登記表
    pub fn new() -> Self {
        Self::default()
    }

    fn keys(&self) -> MutexGuard<'_, HashSet<String>> {
        self.locked_keys.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 取得快取鍵的鎖，已被持有時阻塞等待
    pub fn lock(&self, key: &str) -> KeyLockGuard<'_> {
        let mut keys = self.keys();
        while keys.contains(key) {
            keys = self
                .released
                .wait(keys)
                .unwrap_or_else(PoisonError::into_inner);
        }
        keys.insert(key.to_string());

        KeyLockGuard {
            registry: self,
            key: key.to_string(),
        }
    }

    /// 檢查快取鍵是否被持有
    pub fn is_locked(&self, key: &str) -> bool {
        self.keys().contains(key)
    }

    /// 獲取所有被持有的快取鍵
    pub fn locked_keys(&self) -> Vec<String> {
        self.keys().iter().cloned().collect()
    }

    fn unlock(&self, key: &str) {
        self.keys().remove(key);
        self.released.notify_all();
    }
}

/// 快取鍵鎖，離開作用域時釋放
#[derive(Debug)]
pub struct KeyLockGuard<'a> {
    registry: &'a KeyLockRegistry,
    key: String,
}

impl KeyLockGuard<'_> {
    /// 持有的快取鍵
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for KeyLockGuard<'_> {
    fn drop(&mut self) {
        self.registry.unlock(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_lock_and_release() {
        let registry = KeyLockRegistry::new();

        {
            let guard = registry.lock("exp-a");
            assert_eq!(guard.key(), "exp-a");
            assert!(registry.is_locked("exp-a"));
            assert!(!registry.is_locked("exp-b"));
            assert_eq!(registry.locked_keys(), vec!["exp-a".to_string()]);
        }

        assert!(!registry.is_locked("exp-a"));
        assert!(registry.locked_keys().is_empty());
    }

    #[test]
    fn test_different_keys_do_not_block() {
        let registry = KeyLockRegistry::new();
        let _a = registry.lock("exp-a");
        let _b = registry.lock("exp-b");

        assert!(registry.is_locked("exp-a"));
        assert!(registry.is_locked("exp-b"));
    }

    #[test]
    fn test_same_key_is_exclusive() {
        let registry = Arc::new(KeyLockRegistry::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let inside = Arc::clone(&inside);
                let max_inside = Arc::clone(&max_inside);
                thread::spawn(move || {
                    for _ in 0..50 {
                        let _guard = registry.lock("exp-a");
                        let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                        max_inside.fetch_max(now, Ordering::SeqCst);
                        thread::yield_now();
                        inside.fetch_sub(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
        assert!(!registry.is_locked("exp-a"));
    }
}
