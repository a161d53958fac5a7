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

//! RON-based configuration for resource caches.
//!
//! Cache settings are the only persisted state in this crate; cached
//! resources themselves are never written anywhere.

use crate::cache::ResourceCache;
use pyxis_core::cache::EvictionPolicy;
use pyxis_core::resource::Resource;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Capacity used when no budget is configured: 64 MiB.
const DEFAULT_MAX_SIZE_BYTES: u64 = 64 * 1024 * 1024;

/// An error that can occur while loading cache configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read cache config: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration text is not valid RON for [`CacheConfig`].
    #[error("failed to parse cache config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Tunable settings for a [`ResourceCache`].
///
/// Missing fields fall back to their defaults, so a RON document may
/// configure only what it needs:
///
/// ```text
/// (
///     max_size_bytes: 8388608,
///     policy: Lfu,
/// )
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Capacity budget, in the same unit as entry weights.
    pub max_size_bytes: u64,
    /// Eviction rule applied when the budget is exceeded.
    pub policy: EvictionPolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            policy: EvictionPolicy::Lru,
        }
    }
}

impl CacheConfig {
    /// Parses a configuration from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Reads and parses a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    /// Builds a cache for resource type `T` with these settings.
    #[must_use]
    pub fn build<T: Resource>(&self) -> ResourceCache<T> {
        ResourceCache::with_policy(self.max_size_bytes, self.policy)
    }
}
