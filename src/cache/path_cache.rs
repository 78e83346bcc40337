//! TTL cache for planned routes.
//!
//! Entries age out by sweep count rather than wall-clock time: each
//! `sweep()` decrements every entry's TTL and drops the ones that hit
//! zero. Hits push an entry's expiry out aggressively (`get` squares
//! the TTL) so popular routes effectively pin themselves while unused
//! ones decay within a few sweeps. The cache never spawns a timer; the
//! embedder calls `sweep()` on its own cadence.

use std::collections::HashMap;

use log::debug;

use crate::core::Waypoint;
use crate::route::Route;

struct CacheEntry {
    route: Route,
    ttl: i32,
}

pub struct PathCache {
    entries: HashMap<String, CacheEntry>,
    initial_ttl: i32,
}

impl PathCache {
    pub fn new(initial_ttl: i32) -> Self {
        Self {
            entries: HashMap::new(),
            initial_ttl,
        }
    }

    /// Cache key for a waypoint list: each coordinate rounded to two
    /// decimals, joined with `#`. Requests within roughly a kilometer
    /// of each other share a key on purpose.
    pub fn key_for(waypoints: &[Waypoint]) -> String {
        waypoints
            .iter()
            .map(|wp| wp.coordinate.hash_key())
            .collect::<Vec<_>>()
            .join("#")
    }

    /// Store a route under `key` with the initial TTL, replacing any
    /// previous entry.
    pub fn insert(&mut self, key: String, route: Route) {
        self.entries.insert(
            key,
            CacheEntry {
                route,
                ttl: self.initial_ttl,
            },
        );
    }

    /// Membership probe. A hit bumps the entry's TTL by one.
    pub fn contains(&mut self, key: &str) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.ttl += 1;
                true
            }
            None => false,
        }
    }

    /// Fetch a cached route. A hit rewards the entry with ttl = 1 + ttl².
    pub fn get(&mut self, key: &str) -> Option<&Route> {
        let entry = self.entries.get_mut(key)?;
        entry.ttl = 1 + entry.ttl * entry.ttl;
        Some(&entry.route)
    }

    /// Current TTL of an entry, without touching it.
    pub fn ttl(&self, key: &str) -> Option<i32> {
        self.entries.get(key).map(|e| e.ttl)
    }

    /// Age every entry by one tick and evict the expired ones.
    pub fn sweep(&mut self) {
        let before = self.entries.len();
        self.entries.retain(|_, entry| {
            entry.ttl -= 1;
            entry.ttl > 0
        });
        let evicted = before - self.entries.len();
        if evicted > 0 {
            debug!("path cache sweep evicted {evicted} of {before} routes");
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
