use dashmap::DashMap;
use evroute_core::VehicleDetails;
use std::hash::Hash;
use std::time::{Duration, Instant};

pub trait CacheEntry {
    fn fetched_at(&self) -> Instant;
}

/// Drop entries older than `max_age`, then the oldest ones past `max_entries`.
pub fn prune_cache<K, V>(cache: &DashMap<K, V>, max_entries: usize, max_age: Duration)
where
    K: Clone + Eq + Hash,
    V: CacheEntry,
{
    let now = Instant::now();
    let mut entries: Vec<(K, Instant)> = cache
        .iter()
        .map(|entry| (entry.key().clone(), entry.value().fetched_at()))
        .collect();

    entries.retain(|(key, fetched_at)| {
        let expired = now.duration_since(*fetched_at) > max_age;
        if expired {
            cache.remove(key);
        }
        !expired
    });

    if cache.len() <= max_entries {
        return;
    }

    entries.sort_by_key(|(_, fetched_at)| *fetched_at);
    for (key, _) in entries {
        if cache.len() <= max_entries {
            break;
        }
        cache.remove(&key);
    }
}

#[derive(Debug, Clone)]
struct CachedVehicle {
    details: VehicleDetails,
    fetched_at: Instant,
}

impl CacheEntry for CachedVehicle {
    fn fetched_at(&self) -> Instant {
        self.fetched_at
    }
}

/// Vehicle details keyed by catalog id, bounded in age and size.
pub struct VehicleCache {
    entries: DashMap<String, CachedVehicle>,
    ttl: Duration,
    max_entries: usize,
}

impl VehicleCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            max_entries,
        }
    }

    pub fn get(&self, vehicle_id: &str) -> Option<VehicleDetails> {
        let fresh = self
            .entries
            .get(vehicle_id)
            .filter(|entry| entry.fetched_at.elapsed() <= self.ttl)
            .map(|entry| entry.details.clone());

        if fresh.is_none() {
            self.entries
                .remove_if(vehicle_id, |_, entry| entry.fetched_at.elapsed() > self.ttl);
        }
        fresh
    }

    pub fn insert(&self, vehicle_id: &str, details: VehicleDetails) {
        if self.max_entries == 0 || self.ttl.is_zero() {
            return;
        }
        self.entries.insert(
            vehicle_id.to_string(),
            CachedVehicle {
                details,
                fetched_at: Instant::now(),
            },
        );
        if self.entries.len() > self.max_entries {
            prune_cache(&self.entries, self.max_entries, self.ttl);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evroute_core::VehicleProfile;

    fn details(id: &str) -> VehicleDetails {
        VehicleDetails {
            id: id.to_string(),
            make: "Renault".to_string(),
            model: "Zoe".to_string(),
            version: None,
            image_url: None,
            profile: VehicleProfile::new(390.0, 52.0, Vec::new()).unwrap(),
        }
    }

    #[test]
    fn returns_fresh_entries() {
        let cache = VehicleCache::new(Duration::from_secs(60), 8);
        cache.insert("zoe", details("zoe"));

        assert_eq!(cache.get("zoe").map(|d| d.id), Some("zoe".to_string()));
        assert!(cache.get("model3").is_none());
    }

    #[test]
    fn expired_entries_are_dropped_on_read() {
        let cache = VehicleCache::new(Duration::from_millis(20), 8);
        cache.insert("zoe", details("zoe"));
        std::thread::sleep(Duration::from_millis(40));

        assert!(cache.get("zoe").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn oldest_entries_are_evicted_past_capacity() {
        let cache = VehicleCache::new(Duration::from_secs(60), 2);
        for id in ["a", "b", "c"] {
            cache.insert(id, details(id));
            std::thread::sleep(Duration::from_millis(2));
        }

        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_none());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn zero_capacity_disables_caching() {
        let cache = VehicleCache::new(Duration::from_secs(60), 0);
        cache.insert("zoe", details("zoe"));
        assert!(cache.is_empty());
    }

    #[test]
    fn prune_removes_stale_and_overflow() {
        struct Stamp(Instant);
        impl CacheEntry for Stamp {
            fn fetched_at(&self) -> Instant {
                self.0
            }
        }

        let map: DashMap<u32, Stamp> = DashMap::new();
        map.insert(1, Stamp(Instant::now()));
        std::thread::sleep(Duration::from_millis(60));
        for key in 2..=4 {
            map.insert(key, Stamp(Instant::now()));
            std::thread::sleep(Duration::from_millis(2));
        }

        prune_cache(&map, 2, Duration::from_millis(40));

        assert_eq!(map.len(), 2);
        assert!(map.contains_key(&3));
        assert!(map.contains_key(&4));
    }
}
