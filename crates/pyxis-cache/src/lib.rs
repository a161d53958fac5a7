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

//! # Pyxis Cache
//!
//! Size-bounded, policy-driven caching for engine resources.
//!
//! The centerpiece is [`ResourceCache`], a keyed store that bounds the memory
//! used by cached resources to a configured byte budget, keeps frequently or
//! recently used resources resident, and transparently loads missing
//! resources through a caller-supplied function. [`CacheRegistry`] groups one
//! cache per resource type behind explicit ownership, and [`CacheConfig`]
//! provides serde-based configuration for both.

#![warn(missing_docs)]

pub mod cache;
pub mod config;
pub mod registry;

pub use cache::ResourceCache;
pub use config::{CacheConfig, ConfigError};
pub use registry::CacheRegistry;
