use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use super::clock::Clock;
use crate::models::StateImage;

/// How long a region thumbnail is reused before asking Unsplash again.
pub const IMAGE_TTL_HOURS: i64 = 24;

/// In-memory thumbnail cache keyed by region name.
///
/// Entries are never evicted; staleness is checked on read against the
/// injected clock.
pub struct ImageCache {
    clock: Arc<dyn Clock>,
    ttl: Duration,
    entries: Mutex<HashMap<String, StateImage>>,
}

impl ImageCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(clock, Duration::hours(IMAGE_TTL_HOURS))
    }

    pub fn with_ttl(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        ImageCache {
            clock,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Cached entry for `name`, fresh or not.
    pub fn get(&self, name: &str) -> Option<StateImage> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .cloned()
    }

    pub fn set(&self, name: &str, image: StateImage) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.to_string(), image);
    }

    pub fn is_fresh(&self, image: &StateImage) -> bool {
        self.now() - image.last_fetched < self.ttl
    }

    /// Cached entry for `name` if it is still within the TTL.
    pub fn get_fresh(&self, name: &str) -> Option<StateImage> {
        self.get(name).filter(|img| self.is_fresh(img))
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clock::ManualClock;
    use chrono::TimeZone;

    fn image(at: DateTime<Utc>) -> StateImage {
        StateImage {
            url: Some("https://images.unsplash.com/x.jpg".into()),
            credit: None,
            last_fetched: at,
        }
    }

    #[test]
    fn entry_goes_stale_exactly_at_ttl() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let cache = ImageCache::new(clock.clone());

        cache.set("Lagos", image(start));
        assert!(cache.get_fresh("Lagos").is_some());

        clock.advance(Duration::hours(IMAGE_TTL_HOURS) - Duration::seconds(1));
        assert!(cache.get_fresh("Lagos").is_some());

        clock.advance(Duration::seconds(1));
        assert!(cache.get_fresh("Lagos").is_none());
        // stale entries are still readable
        assert!(cache.get("Lagos").is_some());
    }

    #[test]
    fn set_replaces_entry() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let cache = ImageCache::with_ttl(clock.clone(), Duration::minutes(5));

        cache.set("Kano", image(start));
        clock.advance(Duration::minutes(10));
        assert!(cache.get_fresh("Kano").is_none());

        cache.set("Kano", image(clock.now()));
        assert!(cache.get_fresh("Kano").is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn missing_entry() {
        let cache = ImageCache::new(Arc::new(ManualClock::new(Utc::now())));
        assert!(cache.get("Oyo").is_none());
        assert!(cache.is_empty());
    }
}
