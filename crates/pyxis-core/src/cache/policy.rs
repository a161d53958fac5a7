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

//! Eviction policies for size-bounded caches.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// The rule a bounded cache applies to choose a victim when it must free
/// space.
///
/// Recency-based and insertion-order-based eviction share the same
/// front-of-queue victim selection; what distinguishes them is whether a
/// lookup refreshes a key's position in the order queue (see
/// [`refreshes_order_on_access`](EvictionPolicy::refreshes_order_on_access)).
/// Frequency-based eviction ignores the queue ordering and scans access
/// counts instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvictionPolicy {
    /// Least-recently-used: evict the entry whose last access is oldest.
    #[default]
    Lru,
    /// Least-frequently-used: evict the entry with the smallest access count.
    Lfu,
    /// First-in-first-out: evict the entry inserted earliest, regardless of
    /// how often or how recently it was accessed.
    Fifo,
}

impl EvictionPolicy {
    /// Returns `true` if a successful lookup should move the key to the back
    /// of the cache's order queue.
    ///
    /// Only [`Lru`](EvictionPolicy::Lru) keeps the queue in recency order.
    /// [`Fifo`](EvictionPolicy::Fifo) leaves it in insertion order, and
    /// [`Lfu`](EvictionPolicy::Lfu) does not consult the queue for eviction
    /// decisions.
    #[must_use]
    pub fn refreshes_order_on_access(self) -> bool {
        matches!(self, EvictionPolicy::Lru)
    }
}

impl Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EvictionPolicy::Lru => "lru",
            EvictionPolicy::Lfu => "lfu",
            EvictionPolicy::Fifo => "fifo",
        };
        write!(f, "{name}")
    }
}
