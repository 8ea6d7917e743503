//! 快取驅動介面

use std::time::Duration;

use holdout_core::Result;

/// 快取驅動
///
/// 只需要 `get` 與 `set` 兩個操作，值為分組結果的 JSON 字串。
/// 後端（記憶體、Redis 等）由呼叫端注入。
pub trait CacheDriver: Send + Sync {
    /// 讀取快取值，不存在時回傳 `None`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// 寫入快取值，`ttl` 為 `None` 時使用後端預設
    fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<()>;

    /// 離開使用範圍時呼叫（例如歸還連線）
    fn release(&self) {}
}
