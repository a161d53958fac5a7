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

//! A type-keyed registry owning one cache per resource type.
//!
//! The registry replaces process-wide singleton caches with explicit
//! ownership: it is constructed once at startup and passed by reference to
//! whichever systems need it. Nothing here is global, so every test can build
//! its own registry and caches in isolation.

use crate::cache::ResourceCache;
use pyxis_core::resource::Resource;
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Owns one [`ResourceCache`] per resource type, keyed by [`TypeId`].
///
/// Like the caches it holds, the registry is single-threaded; callers that
/// need sharing wrap it externally.
///
/// # Example
///
/// ```rust
/// use pyxis_cache::{CacheRegistry, ResourceCache};
/// use pyxis_core::Resource;
///
/// struct Texture { id: u32 }
/// impl Resource for Texture {}
///
/// let mut registry = CacheRegistry::new();
/// registry.register(ResourceCache::<Texture>::new(1024));
///
/// let cache = registry.cache_mut::<Texture>().unwrap();
/// cache.insert("ui/icon", Texture { id: 7 }, 64);
/// assert!(cache.contains("ui/icon"));
/// ```
#[derive(Default)]
pub struct CacheRegistry {
    caches: HashMap<TypeId, Box<dyn Any>>,
}

impl CacheRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            caches: HashMap::new(),
        }
    }

    /// Registers the cache for resource type `T`.
    ///
    /// If a cache for the same type was already registered, it is replaced
    /// and its entries are dropped (caller-held handles stay alive).
    pub fn register<T: Resource>(&mut self, cache: ResourceCache<T>) {
        self.caches.insert(TypeId::of::<T>(), Box::new(cache));
    }

    /// Retrieves a shared reference to the cache for resource type `T`.
    ///
    /// Returns `None` if no cache for `T` has been registered. Note that
    /// lookups mutate access metadata, so fetching resources requires
    /// [`cache_mut`](Self::cache_mut); this accessor serves read-only
    /// inspection (`contains`, sizes, stats).
    #[must_use]
    pub fn cache<T: Resource>(&self) -> Option<&ResourceCache<T>> {
        self.caches
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref())
    }

    /// Retrieves an exclusive reference to the cache for resource type `T`.
    ///
    /// Returns `None` if no cache for `T` has been registered.
    #[must_use]
    pub fn cache_mut<T: Resource>(&mut self) -> Option<&mut ResourceCache<T>> {
        self.caches
            .get_mut(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_mut())
    }

    /// Returns `true` if a cache for resource type `T` is registered.
    #[must_use]
    pub fn contains<T: Resource>(&self) -> bool {
        self.caches.contains_key(&TypeId::of::<T>())
    }

    /// Returns the number of registered caches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.caches.len()
    }

    /// Returns `true` if no caches are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.caches.is_empty()
    }
}
