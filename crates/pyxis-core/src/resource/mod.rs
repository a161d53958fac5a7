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

//! Provides the foundational traits and primitive types for Pyxis' resource
//! system.
//!
//! This module defines the "common language" for all resource-related
//! operations. It contains the core contracts that other crates implement or
//! consume, but it has no knowledge of how resources are produced or cached.
//!
//! The key components are:
//! - The [`Resource`] trait: a marker for all types that can be cached.
//! - The [`ResourceHandle`]: shared, reference-counted ownership of a loaded
//!   resource.

mod handle;

pub use handle::*;

/// A marker trait for types that can be held by a resource cache.
///
/// This trait's primary purpose is to categorize a type, making it eligible
/// for use within the caching infrastructure (e.g., in a
/// [`ResourceHandle<T>`]).
///
/// The supertraits enforce critical safety guarantees:
/// - `Send` + `Sync`: the resource type can be safely shared and sent between
///   threads, so handles may outlive the cache that produced them anywhere in
///   the process.
/// - `'static`: the resource type does not contain any non-static references,
///   ensuring it can be stored for the lifetime of the application.
///
/// # Examples
///
/// ```
/// use pyxis_core::resource::Resource;
///
/// // A simple struct representing a texture.
/// struct Texture {
///     // ... fields
/// }
///
/// // By implementing Resource, `Texture` can now be cached.
/// impl Resource for Texture {}
/// ```
pub trait Resource: Send + Sync + 'static {}
