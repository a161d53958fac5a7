// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A size-bounded, policy-driven store for loaded resource handles.

use pyxis_core::cache::{CacheStats, EvictionPolicy};
use pyxis_core::resource::{Resource, ResourceHandle};
use std::collections::{HashMap, VecDeque};
use std::time::Instant;

/// Callback invoked on a cache miss to produce the missing resource.
type Loader<T> = Box<dyn FnMut(&str) -> Option<T>>;

/// Per-entry bookkeeping: the shared handle plus the metadata the eviction
/// policies consult.
struct CacheEntry<T: Resource> {
    handle: ResourceHandle<T>,
    size_bytes: u64,
    last_access: Instant,
    access_count: u64,
}

/// A central, in-memory cache for a specific type of resource `T`, bounded to
/// a byte budget.
///
/// The cache maps string keys to shared [`ResourceHandle`]s. It holds one
/// handle per entry; lookups return clones, so a caller-held handle keeps its
/// resource alive even after the cache evicts the entry. When an insertion
/// would exceed the budget, victims are chosen one at a time by the
/// configured [`EvictionPolicy`] until the new entry fits. An entry heavier
/// than the entire budget is never admitted.
///
/// Every failure path is encoded in the return value: lookups that find
/// nothing yield `None`, mutations of absent keys are no-ops, and an
/// over-budget insertion is silently dropped. No operation returns a
/// `Result`.
///
/// All operations run to completion on the caller's thread. The `&mut self`
/// receivers make exclusive access a compile-time property; callers that need
/// sharing layer their own synchronization outside.
///
/// # Examples
///
/// ```
/// use pyxis_cache::ResourceCache;
/// use pyxis_core::Resource;
///
/// struct Texture {
///     pixels: Vec<u8>,
/// }
/// impl Resource for Texture {}
///
/// let mut cache = ResourceCache::new(1024);
/// cache.insert("ui/cursor", Texture { pixels: vec![0; 512] }, 512);
///
/// assert!(cache.contains("ui/cursor"));
/// assert_eq!(cache.size_bytes(), 512);
///
/// let handle = cache.get("ui/cursor").unwrap();
/// assert_eq!(handle.pixels.len(), 512);
/// ```
pub struct ResourceCache<T: Resource> {
    entries: HashMap<String, CacheEntry<T>>,
    /// Keys in recency order under LRU, insertion order otherwise. The front
    /// is always the eviction candidate for the queue-based policies.
    order: VecDeque<String>,
    current_size: u64,
    max_size: u64,
    policy: EvictionPolicy,
    loader: Option<Loader<T>>,
    stats: CacheStats,
}

impl<T: Resource> ResourceCache<T> {
    /// Creates an empty cache with the given byte budget and the default
    /// (LRU) eviction policy.
    #[must_use]
    pub fn new(max_size_bytes: u64) -> Self {
        Self::with_policy(max_size_bytes, EvictionPolicy::default())
    }

    /// Creates an empty cache with the given byte budget and eviction policy.
    #[must_use]
    pub fn with_policy(max_size_bytes: u64, policy: EvictionPolicy) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            current_size: 0,
            max_size: max_size_bytes,
            policy,
            loader: None,
            stats: CacheStats::default(),
        }
    }

    /// Installs the loader invoked on cache misses.
    ///
    /// The loader runs synchronously inside [`get`](Self::get) and returns
    /// `None` for keys it cannot produce. Resources inserted through the
    /// loader are weighted at `size_of::<T>()` (floored at one byte); callers
    /// that know the real payload size should prefer
    /// [`insert`](Self::insert).
    pub fn set_loader(&mut self, loader: impl FnMut(&str) -> Option<T> + 'static) {
        self.loader = Some(Box::new(loader));
    }

    /// Looks up a resource, loading it on a miss if a loader is installed.
    ///
    /// A hit refreshes the entry's access metadata (timestamp and access
    /// count; under LRU also its position in the recency queue) and returns a
    /// clone of the stored handle. A miss with a loader invokes it
    /// synchronously; a produced resource is inserted with the default weight
    /// and returned even when the insertion itself was dropped for exceeding
    /// the budget. A miss without a loader, or a loader that returns `None`,
    /// yields `None`.
    pub fn get(&mut self, key: &str) -> Option<ResourceHandle<T>> {
        let hit = if let Some(entry) = self.entries.get_mut(key) {
            entry.last_access = Instant::now();
            entry.access_count += 1;
            Some(entry.handle.clone())
        } else {
            None
        };

        if let Some(handle) = hit {
            self.stats.hits += 1;
            log::trace!("hit for \"{key}\"");
            if self.policy.refreshes_order_on_access() {
                self.refresh_order(key);
            }
            return Some(handle);
        }

        self.stats.misses += 1;
        log::trace!("miss for \"{key}\"");

        let loader = self.loader.as_mut()?;
        let Some(resource) = loader(key) else {
            self.stats.failed_loads += 1;
            return None;
        };

        self.stats.loads += 1;
        let handle = ResourceHandle::new(resource);
        self.insert_handle(key.to_owned(), handle.clone(), default_weight::<T>());
        Some(handle)
    }

    /// Inserts a resource under `key` with an explicit byte weight.
    ///
    /// An existing entry under the same key is fully removed first, so the
    /// cache never accounts for the old and new weight at once. An entry
    /// heavier than the entire budget is dropped up front, without an error
    /// and without evicting anything. Otherwise victims are evicted one at a
    /// time until the new entry fits.
    pub fn insert(&mut self, key: impl Into<String>, resource: T, size_bytes: u64) {
        self.insert_handle(key.into(), ResourceHandle::new(resource), size_bytes);
    }

    /// Returns `true` if `key` is resident, without touching access metadata.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes the entry under `key`, returning its handle.
    ///
    /// Returns `None` and changes nothing if the key is absent.
    pub fn remove(&mut self, key: &str) -> Option<ResourceHandle<T>> {
        let entry = self.entries.remove(key)?;
        self.subtract_size(key, entry.size_bytes);
        self.order.retain(|k| k != key);
        Some(entry.handle)
    }

    /// Drops every entry and resets the size accounting to zero.
    ///
    /// Lifetime counters in [`stats`](Self::stats) are preserved.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.current_size = 0;
    }

    /// The summed weight of all resident entries, in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> u64 {
        self.current_size
    }

    /// The configured capacity budget, in bytes.
    #[must_use]
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size
    }

    /// The number of resident entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The eviction policy applied to future evictions.
    #[must_use]
    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    /// A snapshot of the lifetime operation counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Changes the capacity budget, evicting immediately until the resident
    /// set fits the new value.
    ///
    /// Shrinking below the current usage therefore takes effect right away
    /// rather than on the next insertion.
    pub fn set_max_size_bytes(&mut self, max_size_bytes: u64) {
        self.max_size = max_size_bytes;
        while self.current_size > self.max_size && !self.entries.is_empty() {
            if !self.evict_one() {
                break;
            }
        }
    }

    /// Changes the eviction policy for future evictions.
    ///
    /// Existing bookkeeping is not reordered: switching to LRU only begins
    /// tracking recency from the next access onward.
    pub fn set_policy(&mut self, policy: EvictionPolicy) {
        self.policy = policy;
    }

    /// Shared insertion path for explicit inserts and loader-produced
    /// resources.
    fn insert_handle(&mut self, key: String, handle: ResourceHandle<T>, size_bytes: u64) {
        self.remove(&key);

        if size_bytes > self.max_size {
            self.stats.rejected_inserts += 1;
            log::warn!(
                "dropping \"{key}\": {size_bytes} B cannot fit the {} B budget",
                self.max_size
            );
            return;
        }

        while self.current_size + size_bytes > self.max_size && !self.entries.is_empty() {
            if !self.evict_one() {
                break;
            }
        }

        self.current_size += size_bytes;
        self.order.push_back(key.clone());
        self.entries.insert(
            key,
            CacheEntry {
                handle,
                size_bytes,
                last_access: Instant::now(),
                access_count: 1,
            },
        );
    }

    /// Evicts the policy's current victim. Returns `false` if no victim could
    /// be determined.
    fn evict_one(&mut self) -> bool {
        let Some(victim) = self.select_victim() else {
            return false;
        };
        if let Some(entry) = self.entries.remove(&victim) {
            self.subtract_size(&victim, entry.size_bytes);
            self.order.retain(|k| k != &victim);
            self.stats.evictions += 1;
            log::debug!(
                "evicted \"{victim}\" ({} B, {} policy)",
                entry.size_bytes,
                self.policy
            );
        }
        true
    }

    /// Picks the next victim from the entry table and order queue.
    ///
    /// LRU and FIFO both take the front of the queue; they differ upstream in
    /// whether a lookup refreshed that queue. LFU scans access counts, ties
    /// broken by the first key encountered in queue order so the choice is
    /// deterministic within a run.
    fn select_victim(&self) -> Option<String> {
        match self.policy {
            EvictionPolicy::Lru | EvictionPolicy::Fifo => self.order.front().cloned(),
            EvictionPolicy::Lfu => {
                let mut victim: Option<(&String, u64)> = None;
                for key in &self.order {
                    let Some(entry) = self.entries.get(key) else {
                        continue;
                    };
                    let better = match victim {
                        Some((_, best)) => entry.access_count < best,
                        None => true,
                    };
                    if better {
                        victim = Some((key, entry.access_count));
                    }
                }
                victim.map(|(key, _)| key.clone())
            }
        }
    }

    /// Moves `key` to the back of the order queue.
    fn refresh_order(&mut self, key: &str) {
        if let Some(position) = self.order.iter().position(|k| k == key) {
            if let Some(owned) = self.order.remove(position) {
                self.order.push_back(owned);
            }
        }
    }

    /// Subtracts a removed entry's weight from the running total.
    fn subtract_size(&mut self, key: &str, size_bytes: u64) {
        self.current_size = match self.current_size.checked_sub(size_bytes) {
            Some(remaining) => remaining,
            None => {
                log::error!("size accounting underflowed while removing \"{key}\"");
                0
            }
        };
    }
}

/// Weight assigned to loader-produced resources: the static size of `T`,
/// floored at one so zero-sized types still consume an accounting unit.
fn default_weight<T>() -> u64 {
    (std::mem::size_of::<T>() as u64).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    struct Blob(u32);

    impl Resource for Blob {}

    fn filled(cache_size: u64, keys: &[&str]) -> ResourceCache<Blob> {
        let mut cache = ResourceCache::new(cache_size);
        for (i, key) in keys.iter().enumerate() {
            cache.insert(*key, Blob(i as u32), 1);
        }
        cache
    }

    #[test]
    fn test_size_tracks_resident_entries() {
        let mut cache = ResourceCache::new(10);
        cache.insert("a", Blob(0), 4);
        cache.insert("b", Blob(1), 3);
        assert_eq!(cache.size_bytes(), 7);

        cache.insert("c", Blob(2), 5);
        assert!(cache.size_bytes() <= cache.max_size_bytes());
        assert_eq!(cache.size_bytes(), 8); // "a" evicted: 3 + 5
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_oversized_insert_leaves_cache_unchanged() {
        let mut cache = ResourceCache::new(4);
        cache.insert("small", Blob(0), 2);

        cache.insert("huge", Blob(1), 5);
        assert!(!cache.contains("huge"));
        assert!(cache.contains("small")); // no resident entry was sacrificed
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.size_bytes(), 2);
        assert_eq!(cache.stats().rejected_inserts, 1);
    }

    #[test]
    fn test_oversized_insert_into_empty_cache_is_rejected() {
        let mut cache: ResourceCache<Blob> = ResourceCache::new(4);
        cache.insert("huge", Blob(0), 5);

        assert!(cache.is_empty());
        assert_eq!(cache.size_bytes(), 0);
    }

    #[test]
    fn test_lru_keeps_the_recently_accessed_entry() {
        let mut cache = filled(2, &["a", "b"]);
        cache.get("a");
        cache.insert("c", Blob(2), 1);

        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn test_fifo_ignores_access_order() {
        let mut cache = ResourceCache::with_policy(2, EvictionPolicy::Fifo);
        cache.insert("a", Blob(0), 1);
        cache.insert("b", Blob(1), 1);
        cache.get("a");
        cache.insert("c", Blob(2), 1);

        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn test_lfu_evicts_the_least_frequent_entry() {
        let mut cache = ResourceCache::with_policy(2, EvictionPolicy::Lfu);
        cache.insert("a", Blob(0), 1);
        cache.insert("b", Blob(1), 1);
        cache.get("a");
        cache.get("a");
        cache.get("a");
        cache.get("b");
        cache.insert("c", Blob(2), 1);

        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn test_lfu_tie_breaks_by_insertion_order() {
        let mut cache = ResourceCache::with_policy(2, EvictionPolicy::Lfu);
        cache.insert("first", Blob(0), 1);
        cache.insert("second", Blob(1), 1);
        cache.insert("third", Blob(2), 1);

        assert!(!cache.contains("first"));
        assert!(cache.contains("second"));
        assert!(cache.contains("third"));
    }

    #[test]
    fn test_remove_absent_key_is_a_noop() {
        let mut cache = filled(4, &["a", "b"]);
        assert!(cache.remove("missing").is_none());
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.size_bytes(), 2);
    }

    #[test]
    fn test_replacing_a_key_accounts_only_the_new_weight() {
        let mut cache = ResourceCache::new(10);
        cache.insert("a", Blob(0), 4);
        cache.insert("a", Blob(1), 2);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.size_bytes(), 2);
        assert_eq!(cache.get("a").map(|h| h.0), Some(1));
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut cache = filled(4, &["a", "b", "c"]);
        cache.clear();

        assert_eq!(cache.len(), 0);
        assert_eq!(cache.size_bytes(), 0);
        assert!(!cache.contains("a"));
    }

    #[test]
    fn test_round_trip_returns_the_same_handle() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();

        let mut cache = ResourceCache::new(4);
        cache.set_loader(move |_| {
            counter.set(counter.get() + 1);
            Some(Blob(99))
        });
        cache.insert("a", Blob(7), 1);

        let first = cache.get("a").unwrap();
        let second = cache.get("a").unwrap();
        assert!(first.ptr_eq(&second));
        assert_eq!(first.0, 7);
        assert_eq!(calls.get(), 0); // resident key never hits the loader
    }

    #[test]
    fn test_loader_populates_on_miss() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();

        let mut cache = ResourceCache::new(64);
        cache.set_loader(move |key| {
            counter.set(counter.get() + 1);
            Some(Blob(key.len() as u32))
        });

        let handle = cache.get("abc").unwrap();
        assert_eq!(handle.0, 3);
        assert!(cache.contains("abc"));
        assert_eq!(calls.get(), 1);

        cache.get("abc");
        assert_eq!(calls.get(), 1);

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.loads, 1);
    }

    #[test]
    fn test_miss_without_loader_returns_none() {
        let mut cache: ResourceCache<Blob> = ResourceCache::new(4);
        assert!(cache.get("anything").is_none());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_loader_returning_none_is_a_failed_load() {
        let mut cache: ResourceCache<Blob> = ResourceCache::new(4);
        cache.set_loader(|_| None);

        assert!(cache.get("a").is_none());
        assert!(!cache.contains("a"));
        assert_eq!(cache.stats().failed_loads, 1);
    }

    #[test]
    fn test_loaded_resource_is_returned_even_when_too_big_to_cache() {
        // Blob is 4 bytes, so the default weight exceeds a 1-byte budget.
        let mut cache: ResourceCache<Blob> = ResourceCache::new(1);
        cache.set_loader(|_| Some(Blob(5)));

        let handle = cache.get("a").unwrap();
        assert_eq!(handle.0, 5);
        assert!(!cache.contains("a"));
        assert_eq!(cache.stats().rejected_inserts, 1);
    }

    #[test]
    fn test_shrinking_the_budget_evicts_immediately() {
        let mut cache = filled(4, &["a", "b", "c", "d"]);
        cache.set_max_size_bytes(2);

        assert_eq!(cache.size_bytes(), 2);
        assert_eq!(cache.len(), 2);
        // LRU with no accesses degenerates to insertion order.
        assert!(cache.contains("c"));
        assert!(cache.contains("d"));
    }

    #[test]
    fn test_policy_switch_applies_to_future_evictions() {
        let mut cache = filled(2, &["a", "b"]);
        cache.get("a"); // under LRU, "b" is now the front candidate

        cache.set_policy(EvictionPolicy::Fifo);
        cache.insert("c", Blob(2), 1);

        // The queue was not rebuilt, so FIFO evicts the current front.
        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn test_evicted_handle_held_by_caller_stays_alive() {
        let mut cache = filled(2, &["a", "b"]);
        let held = cache.get("a").unwrap();

        cache.set_policy(EvictionPolicy::Fifo);
        cache.insert("c", Blob(2), 1);
        cache.insert("d", Blob(3), 1);
        assert!(!cache.contains("a"));

        assert_eq!(held.ref_count(), 1);
        assert_eq!(held.0, 0);
    }

    #[test]
    fn test_exact_fit_is_admitted() {
        let mut cache = ResourceCache::new(4);
        cache.insert("a", Blob(0), 4);

        assert!(cache.contains("a"));
        assert_eq!(cache.size_bytes(), 4);
    }

    #[test]
    fn test_eviction_counter_increments() {
        let mut cache = filled(2, &["a", "b", "c", "d"]);
        assert_eq!(cache.stats().evictions, 2);
    }
}
