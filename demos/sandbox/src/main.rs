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

//! Demo driver for the Pyxis resource caches.
//!
//! Run with `RUST_LOG=debug cargo run -p sandbox` to watch hits, loads, and
//! evictions as they happen.

use anyhow::{Result, anyhow};
use log::info;
use pyxis_cache::{CacheConfig, CacheRegistry, ResourceCache};
use pyxis_core::{EvictionPolicy, Resource};

#[derive(Debug)]
struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Resource for Texture {}

#[derive(Debug)]
struct Mesh {
    vertex_count: usize,
}

impl Resource for Mesh {}

fn checkerboard(width: u32, height: u32) -> Texture {
    let pixels = (0..width * height)
        .map(|i| {
            let (x, y) = (i % width, i / width);
            if (x / 8 + y / 8) % 2 == 0 { 0xFF } else { 0x00 }
        })
        .collect();
    Texture {
        width,
        height,
        pixels,
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut registry = CacheRegistry::new();
    registry.register(
        CacheConfig {
            max_size_bytes: 16 * 1024,
            policy: EvictionPolicy::Lru,
        }
        .build::<Texture>(),
    );
    registry.register(ResourceCache::<Mesh>::with_policy(
        4 * 1024,
        EvictionPolicy::Lfu,
    ));

    let textures = registry
        .cache_mut::<Texture>()
        .ok_or_else(|| anyhow!("texture cache not registered"))?;
    textures.set_loader(|key| {
        log::debug!("loading texture \"{key}\"");
        Some(checkerboard(64, 64))
    });

    // Each texture weighs 4 KiB of pixels, so the fifth distinct key pushes
    // the least recently used one out of the 16 KiB budget.
    for key in [
        "ui/cursor",
        "world/grass",
        "world/rock",
        "world/sand",
        "ui/cursor",
        "world/water",
    ] {
        if let Some(texture) = textures.get(key) {
            info!(
                "fetched \"{key}\": {}x{} ({} B)",
                texture.width,
                texture.height,
                texture.pixels.len()
            );
        }
        let resident = textures.size_bytes();
        textures.insert(key.to_string(), checkerboard(64, 64), 4 * 1024);
        info!(
            "weighted \"{key}\": {} -> {} B resident",
            resident,
            textures.size_bytes()
        );
    }

    let stats = textures.stats();
    info!(
        "texture cache: {} hits / {} misses ({:.0}% hit ratio), {} loads, {} evictions",
        stats.hits,
        stats.misses,
        stats.hit_ratio() * 100.0,
        stats.loads,
        stats.evictions
    );

    let meshes = registry
        .cache_mut::<Mesh>()
        .ok_or_else(|| anyhow!("mesh cache not registered"))?;
    for (key, vertices, weight) in [
        ("props/crate", 128, 1536),
        ("props/barrel", 256, 1536),
        ("props/fence", 64, 1536),
    ] {
        meshes.insert(
            key,
            Mesh {
                vertex_count: vertices,
            },
            weight,
        );
    }
    meshes.get("props/barrel");

    // Shrinking the budget evicts immediately; the frequently used barrel
    // survives under LFU.
    meshes.set_max_size_bytes(2 * 1024);
    if let Some(survivor) = meshes.get("props/barrel") {
        info!(
            "mesh cache kept \"props/barrel\" ({} vertices) after shrinking to {} B",
            survivor.vertex_count,
            meshes.max_size_bytes()
        );
    }
    info!(
        "mesh cache: {} entries, {} B resident, {} evictions",
        meshes.len(),
        meshes.size_bytes(),
        meshes.stats().evictions
    );

    Ok(())
}
