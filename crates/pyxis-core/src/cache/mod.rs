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

//! Provides the foundational types for bounded resource caching.
//!
//! This module defines the "common language" of the cache subsystem: the
//! eviction policies a cache can apply and the counters it reports. It
//! contains the abstract "what" of caching, while `pyxis-cache` provides the
//! concrete bounded store that consumes these types.

pub mod policy;
pub mod stats;

pub use self::policy::EvictionPolicy;
pub use self::stats::CacheStats;
