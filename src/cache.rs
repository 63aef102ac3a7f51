//! Process-wide keyed cache with loader-on-miss.
//!
//! [`Cache::get_with`] returns the cached value when present and unexpired,
//! and otherwise runs the supplied loader and stores its result for the
//! given time-to-live. The single-loader-call property is best effort:
//! concurrent first access to the same key may run the loader more than
//! once, with the last insert winning. Callers needing strict single-flight
//! must coordinate above this layer.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

struct Entry {
    value: Arc<dyn Any + Send + Sync>,
    expired_at: Instant,
}

impl Entry {
    fn is_expired(&self) -> bool {
        Instant::now() > self.expired_at
    }
}

/// A keyed store of values with per-entry expiry.
#[derive(Default)]
pub struct Cache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl Cache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns the value under `key`, running `loader` on a miss or an
    /// expired entry and storing its result for `ttl`.
    ///
    /// A stored value of a different type than `T` counts as a miss.
    pub fn get_with<T, F>(&self, key: &str, ttl: Duration, loader: F) -> T
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        {
            let entries = self.entries.read();
            if let Some(entry) = entries.get(key) {
                if !entry.is_expired() {
                    if let Some(value) = entry.value.downcast_ref::<T>() {
                        return value.clone();
                    }
                }
            }
        }

        // loader runs outside the lock; a racing caller may load too
        let value = loader();
        self.entries.write().insert(
            key.to_string(),
            Entry {
                value: Arc::new(value.clone()),
                expired_at: Instant::now() + ttl,
            },
        );
        value
    }

    /// Removes the given keys immediately.
    pub fn invalidate<I, S>(&self, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = self.entries.write();
        for key in keys {
            entries.remove(key.as_ref());
        }
    }

    /// Returns `true` if `key` holds an unexpired entry.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .read()
            .get(key)
            .map(|entry| !entry.is_expired())
            .unwrap_or(false)
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn loader_runs_at_most_once_while_fresh() {
        let cache = Cache::new();
        let calls = AtomicUsize::new(0);
        let ttl = Duration::from_secs(60);

        let first: String = cache.get_with("k", ttl, || {
            calls.fetch_add(1, Ordering::SeqCst);
            "value".to_string()
        });
        let second: String = cache.get_with("k", ttl, || {
            calls.fetch_add(1, Ordering::SeqCst);
            "other".to_string()
        });

        assert_eq!(first, "value");
        assert_eq!(second, "value");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn expiry_reruns_the_loader() {
        let cache = Cache::new();
        let calls = AtomicUsize::new(0);
        let ttl = Duration::from_millis(10);

        let _: u32 = cache.get_with("k", ttl, || {
            calls.fetch_add(1, Ordering::SeqCst);
            1
        });
        std::thread::sleep(Duration::from_millis(30));
        assert!(!cache.contains("k"));
        let reloaded: u32 = cache.get_with("k", ttl, || {
            calls.fetch_add(1, Ordering::SeqCst);
            2
        });

        assert_eq!(reloaded, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn invalidate_reruns_the_loader() {
        let cache = Cache::new();
        let calls = AtomicUsize::new(0);
        let ttl = Duration::from_secs(60);

        let _: u32 = cache.get_with("a", ttl, || {
            calls.fetch_add(1, Ordering::SeqCst);
            1
        });
        let _: u32 = cache.get_with("b", ttl, || {
            calls.fetch_add(1, Ordering::SeqCst);
            2
        });
        cache.invalidate(["a"]);
        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));

        let reloaded: u32 = cache.get_with("a", ttl, || {
            calls.fetch_add(1, Ordering::SeqCst);
            3
        });
        assert_eq!(reloaded, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn type_mismatch_is_a_miss() {
        let cache = Cache::new();
        let ttl = Duration::from_secs(60);
        let _: u32 = cache.get_with("k", ttl, || 1);
        let text: String = cache.get_with("k", ttl, || "replaced".to_string());
        assert_eq!(text, "replaced");
    }
}
