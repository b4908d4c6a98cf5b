//! Generic in-memory cache with per-entry TTL and hit/miss accounting.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// 1 minute.
pub fn ttl_short() -> Duration {
    Duration::milliseconds(60_000)
}

/// 5 minutes.
pub fn ttl_medium() -> Duration {
    Duration::milliseconds(300_000)
}

/// 30 minutes, for boundary data that changes essentially never.
pub fn ttl_long() -> Duration {
    Duration::milliseconds(1_800_000)
}

#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub evictions: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64 * 100.0
        }
    }
}

struct Entry<T> {
    value: T,
    stored_at: DateTime<Utc>,
}

pub struct DataCache<T: Clone> {
    entries: HashMap<String, Entry<T>>,
    default_ttl: Duration,
    stats: CacheStats,
}

impl<T: Clone> DataCache<T> {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            default_ttl,
            stats: CacheStats::default(),
        }
    }

    /// Fetch a non-expired entry. An expired entry is evicted and counted as
    /// a miss.
    pub fn get(&mut self, key: &str, max_age: Option<Duration>) -> Option<T> {
        self.get_at(key, max_age, Utc::now())
    }

    fn get_at(&mut self, key: &str, max_age: Option<Duration>, now: DateTime<Utc>) -> Option<T> {
        let max_age = max_age.unwrap_or(self.default_ttl);
        match self.entries.get(key) {
            Some(entry) if now.signed_duration_since(entry.stored_at) <= max_age => {
                self.stats.hits += 1;
                Some(entry.value.clone())
            }
            Some(_) => {
                self.entries.remove(key);
                self.stats.misses += 1;
                self.stats.evictions += 1;
                log::info!("🗄️ Cache expired for key: {}", key);
                None
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    pub fn set(&mut self, key: &str, value: T) {
        self.set_at(key, value, Utc::now());
    }

    fn set_at(&mut self, key: &str, value: T, now: DateTime<Utc>) {
        self.entries.insert(
            key.to_string(),
            Entry {
                value,
                stored_at: now,
            },
        );
        self.stats.sets += 1;
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_within_ttl() {
        let mut cache: DataCache<u32> = DataCache::new(ttl_medium());
        let t0 = Utc::now();
        cache.set_at("a", 7, t0);
        assert_eq!(cache.get_at("a", None, t0 + Duration::seconds(10)), Some(7));
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn expired_entry_is_evicted_and_counted() {
        let mut cache: DataCache<u32> = DataCache::new(ttl_short());
        let t0 = Utc::now();
        cache.set_at("a", 7, t0);
        let later = t0 + ttl_short() + Duration::seconds(1);
        assert_eq!(cache.get_at("a", None, later), None);
        assert!(!cache.has("a"));
        assert_eq!(cache.stats().evictions, 1);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn per_entry_ttl_overrides_default() {
        let mut cache: DataCache<&str> = DataCache::new(ttl_short());
        let t0 = Utc::now();
        cache.set_at("geo", "data", t0);
        let later = t0 + ttl_short() + Duration::seconds(5);
        assert_eq!(cache.get_at("geo", Some(ttl_long()), later), Some("data"));
    }

    #[test]
    fn miss_on_absent_key() {
        let mut cache: DataCache<u32> = DataCache::new(ttl_medium());
        assert_eq!(cache.get("nope", None), None);
        assert_eq!(cache.stats().misses, 1);
        assert!((cache.stats().hit_rate() - 0.0).abs() < f64::EPSILON);
    }
}
