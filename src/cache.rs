//! Cache-aside storage for values fetched from the activity service.
//!
//! Entries are considered fresh for a fixed refresh interval. A failed refresh
//! falls back to the last known value when there is one.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
struct Cached<V> {
    value: V,
    last_refreshed: DateTime<Utc>,
}

pub struct Cache<K, V> {
    entries: HashMap<K, Cached<V>>,
    refresh_interval: Duration,
    clock: Arc<dyn Clock>,
}

impl<K: Eq + Hash, V: Clone> Cache<K, V> {
    pub fn new(refresh_interval: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            refresh_interval,
            clock,
        }
    }

    /// The value stored under `key` if it was refreshed within the interval.
    pub fn fresh(&self, key: &K) -> Option<V> {
        let cutoff = self.clock.now() - self.refresh_interval;

        self.entries
            .get(key)
            .filter(|c| c.last_refreshed > cutoff)
            .map(|c| c.value.clone())
    }

    /// The value stored under `key`, however old.
    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).map(|c| c.value.clone())
    }

    pub fn insert(&mut self, key: K, value: V) {
        let last_refreshed = self.clock.now();
        self.entries.insert(
            key,
            Cached {
                value,
                last_refreshed,
            },
        );
    }
}

/// Returns the fresh value for `key` or fetches and stores a new one.
///
/// The lock is released while `fetch` runs.
pub async fn get_or_refresh<K, V, E, F, Fut>(
    cache: &Mutex<Cache<K, V>>,
    key: K,
    fetch: F,
) -> Result<V, E>
where
    K: Eq + Hash + Clone,
    V: Clone,
    E: std::fmt::Display,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V, E>>,
{
    if let Some(value) = cache.lock().await.fresh(&key) {
        return Ok(value);
    }

    match fetch().await {
        Ok(value) => {
            cache.lock().await.insert(key, value.clone());
            Ok(value)
        }
        Err(e) => match cache.lock().await.get(&key) {
            Some(stale) => {
                tracing::warn!(error = %e, "refresh failed, serving stale value");
                Ok(stale)
            }
            None => Err(e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TestClock(std::sync::Mutex<DateTime<Utc>>);

    impl TestClock {
        fn new() -> Arc<Self> {
            Arc::new(Self(std::sync::Mutex::new(
                Utc.with_ymd_and_hms(2022, 3, 1, 12, 0, 0).unwrap(),
            )))
        }

        fn advance(&self, by: Duration) {
            let mut now = self.0.lock().unwrap();
            *now = *now + by;
        }
    }

    impl Clock for TestClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    #[test]
    fn entries_go_stale() {
        let clock = TestClock::new();
        let mut cache: Cache<&str, u32> = Cache::new(Duration::seconds(60), clock.clone());

        cache.insert("users", 1);
        assert_eq!(cache.fresh(&"users"), Some(1));

        clock.advance(Duration::seconds(59));
        assert_eq!(cache.fresh(&"users"), Some(1));

        clock.advance(Duration::seconds(1));
        assert_eq!(cache.fresh(&"users"), None);
        assert_eq!(cache.get(&"users"), Some(1));
    }

    #[tokio::test]
    async fn fetches_only_when_stale() {
        let clock = TestClock::new();
        let cache = Mutex::new(Cache::new(Duration::seconds(60), clock.clone()));
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        let fetch = move || async move { Ok::<_, String>(calls.fetch_add(1, Ordering::SeqCst) + 1) };

        assert_eq!(get_or_refresh(&cache, "k", fetch).await, Ok(1));
        assert_eq!(get_or_refresh(&cache, "k", fetch).await, Ok(1));

        clock.advance(Duration::seconds(61));
        assert_eq!(get_or_refresh(&cache, "k", fetch).await, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_refresh_serves_stale_value() {
        let clock = TestClock::new();
        let cache = Mutex::new(Cache::new(Duration::seconds(60), clock.clone()));

        cache.lock().await.insert("k", 7);
        clock.advance(Duration::seconds(120));

        let result = get_or_refresh(&cache, "k", || async { Err::<u32, _>("ratelimited") }).await;
        assert_eq!(result, Ok(7));

        let result = get_or_refresh(&cache, "other", || async { Err::<u32, _>("ratelimited") }).await;
        assert_eq!(result, Err("ratelimited"));
    }
}
