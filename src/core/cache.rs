use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// A cached value together with the moment it was fetched.
#[derive(Debug, Clone)]
pub struct CachedValue<V> {
    pub value: V,
    pub fetched_at: Instant,
}

impl<V> CachedValue<V> {
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// In-memory cache whose entries go stale after a fixed TTL.
///
/// Owners hold it behind an `Arc` and pass it to whichever provider needs it,
/// so tests and callers control both the lifetime and the TTL.
#[derive(Clone)]
pub struct TtlCache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    ttl: Duration,
    inner: Arc<Mutex<HashMap<K, CachedValue<V>>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Send + Sync + std::fmt::Debug + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        self.get_entry(key).await.map(|entry| entry.value)
    }

    /// Returns the fresh entry for `key`, evicting it if it has gone stale.
    pub async fn get_entry(&self, key: &K) -> Option<CachedValue<V>> {
        let mut cache = self.inner.lock().await;
        match cache.get(key).map(|entry| entry.is_fresh(self.ttl)) {
            Some(true) => {
                debug!("Cache HIT for key: {:?}", key);
                cache.get(key).cloned()
            }
            Some(false) => {
                debug!("Cache entry expired for key: {:?}", key);
                cache.remove(key);
                None
            }
            None => {
                debug!("Cache MISS for key: {:?}", key);
                None
            }
        }
    }

    pub async fn put(&self, key: K, value: V) {
        let mut cache = self.inner.lock().await;
        debug!("Cache PUT for key: {:?}", key);
        cache.insert(
            key,
            CachedValue {
                value,
                fetched_at: Instant::now(),
            },
        );
    }

    pub async fn invalidate(&self, key: &K) {
        let mut cache = self.inner.lock().await;
        cache.remove(key);
        debug!("Cache REMOVE for key: {:?}", key);
    }

    pub async fn clear(&self) {
        let mut cache = self.inner.lock().await;
        cache.clear();
        debug!("Cache CLEAR");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_cache_get_put() {
        let cache = TtlCache::<String, i32>::new(Duration::from_secs(60));

        // Initially, cache is empty
        assert!(cache.get(&"key1".to_string()).await.is_none());

        cache.put("key1".to_string(), 123).await;
        assert_eq!(cache.get(&"key1".to_string()).await, Some(123));

        // Get a non-existent key
        assert!(cache.get(&"key2".to_string()).await.is_none());
    }

    #[tokio::test]
    async fn test_cache_ttl_expiration() {
        let cache = TtlCache::<String, i32>::new(Duration::from_millis(10));

        cache.put("key1".to_string(), 123).await;
        assert_eq!(cache.get(&"key1".to_string()).await, Some(123));

        sleep(Duration::from_millis(20)).await;
        assert!(cache.get(&"key1".to_string()).await.is_none());
    }

    #[tokio::test]
    async fn test_zero_ttl_never_hits() {
        let cache = TtlCache::<String, i32>::new(Duration::ZERO);
        cache.put("key1".to_string(), 123).await;
        assert!(cache.get(&"key1".to_string()).await.is_none());
    }

    #[tokio::test]
    async fn test_cache_entry_records_fetch_time() {
        let cache = TtlCache::<String, i32>::new(Duration::from_secs(60));
        let before = Instant::now();
        cache.put("key1".to_string(), 7).await;

        let entry = cache.get_entry(&"key1".to_string()).await.unwrap();
        assert_eq!(entry.value, 7);
        assert!(entry.fetched_at >= before);
        assert!(entry.is_fresh(cache.ttl()));
    }

    #[tokio::test]
    async fn test_cache_invalidate_and_clear() {
        let cache = TtlCache::<String, i32>::new(Duration::from_secs(60));

        cache.put("key1".to_string(), 123).await;
        cache.put("key2".to_string(), 456).await;

        cache.invalidate(&"key1".to_string()).await;
        assert!(cache.get(&"key1".to_string()).await.is_none());
        assert_eq!(cache.get(&"key2".to_string()).await, Some(456));

        cache.clear().await;
        assert!(cache.get(&"key2".to_string()).await.is_none());
    }
}
