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

use super::Resource;
use std::{ops::Deref, sync::Arc};

/// A thread-safe, reference-counted handle to a loaded resource.
///
/// This acts as a smart pointer, providing shared ownership of a resource's
/// data. Cloning a handle is cheap, as it only increments the reference count
/// and does not duplicate the underlying resource data.
///
/// A cache holds exactly one handle per entry; callers receive clones. When a
/// cache evicts or removes an entry it drops only its own handle, so any
/// caller-held clone keeps the resource alive until the last handle is
/// dropped.
#[derive(Debug)]
pub struct ResourceHandle<T: Resource>(Arc<T>);

impl<T: Resource> ResourceHandle<T> {
    /// Creates a new `ResourceHandle` that takes ownership of the resource
    /// data.
    ///
    /// This is typically called by a cache once a resource has been
    /// successfully loaded into memory.
    pub fn new(resource: T) -> Self {
        Self(Arc::new(resource))
    }

    /// Returns `true` if both handles point to the same resource allocation.
    ///
    /// This compares identity, not contents, and is the right way to check
    /// that two lookups yielded the same cached resource.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the number of handles currently sharing this resource.
    ///
    /// Diagnostic only: the count is a snapshot and may be stale by the time
    /// it is read if handles are shared across threads.
    #[must_use]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }
}

impl<T: Resource> Clone for ResourceHandle<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Resource> Deref for ResourceHandle<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
