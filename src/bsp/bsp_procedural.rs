// src/bsp/bsp_procedural.rs

use std::fs;
use std::path::Path;
use std::time::Instant;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bsp::bsp_rooms;
use crate::bsp::{
    BspLevel, Rect, DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH, DEFAULT_MAX_LEAF_SIZE,
    DEFAULT_MIN_LEAF_SIZE, MAX_MAP_EXTENT, MIN_LEAF_EXTENT,
};
use crate::error::GenerationError;
use crate::utils::RandomSource;

pub struct ProceduralGenerator<R = StdRng> {
    config: GeneratorConfig,
    rng: RandomSource<R>,
    stats: Option<GenerationStats>,
}

/// Fixed inputs of a generation run. Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub map_width: i32,
    pub map_height: i32,
    pub min_leaf_size: i32,
    pub max_leaf_size: i32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            map_width: DEFAULT_MAP_WIDTH,
            map_height: DEFAULT_MAP_HEIGHT,
            min_leaf_size: DEFAULT_MIN_LEAF_SIZE,
            max_leaf_size: DEFAULT_MAX_LEAF_SIZE,
        }
    }
}

impl GeneratorConfig {
    /// Check the size constraints every run relies on:
    /// - both map extents fit at least one room (`>= 5`) and stay within
    ///   [`MAX_MAP_EXTENT`],
    /// - `min_leaf_size >= 5`, so every split child can still hold a room,
    /// - `max_leaf_size >= 2 * min_leaf_size + 1`, so oversized nodes can always split.
    pub fn validate(&self) -> Result<(), GenerationError> {
        let extents = MIN_LEAF_EXTENT..=MAX_MAP_EXTENT;
        if !extents.contains(&self.map_width) || !extents.contains(&self.map_height) {
            return Err(GenerationError::InvalidConfig(format!(
                "map is {}x{}, both sides must be between {} and {}",
                self.map_width, self.map_height, MIN_LEAF_EXTENT, MAX_MAP_EXTENT
            )));
        }
        if !extents.contains(&self.min_leaf_size) {
            return Err(GenerationError::InvalidConfig(format!(
                "min_leaf_size {} must be between {} and {}",
                self.min_leaf_size, MIN_LEAF_EXTENT, MAX_MAP_EXTENT
            )));
        }
        // Widened so that no user-supplied size can overflow.
        let required = self.min_leaf_size as i64 * 2 + 1;
        if (self.max_leaf_size as i64) < required {
            return Err(GenerationError::InvalidConfig(format!(
                "max_leaf_size {} must be at least 2 * min_leaf_size + 1 = {}",
                self.max_leaf_size, required
            )));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, GenerationError> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GenerationError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[derive(Default, Debug, Clone)]
pub struct GenerationStats {
    pub generation_time: f64,
    pub split_passes: usize,
    pub node_count: usize,
    pub room_count: usize,
    pub corridor_count: usize,
    pub max_depth: u32,
}

impl ProceduralGenerator<StdRng> {
    /// A generator seeded from the operating system.
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_random_source(config, RandomSource::from_os_rng())
    }

    /// A generator whose output is fully determined by `seed`.
    pub fn with_seed(config: GeneratorConfig, seed: u64) -> Self {
        Self::with_random_source(config, RandomSource::from_seed(seed))
    }
}

impl<R: Rng> ProceduralGenerator<R> {
    pub fn with_random_source(config: GeneratorConfig, rng: RandomSource<R>) -> Self {
        ProceduralGenerator {
            config,
            rng,
            stats: None,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Statistics of the last successful run.
    pub fn stats(&self) -> Option<&GenerationStats> {
        self.stats.as_ref()
    }

    /// Run one full generation: split, place rooms, route corridors.
    ///
    /// Later calls keep drawing from the same random stream, so each produces a
    /// different map. A failed run leaves no partial result behind.
    pub fn generate(&mut self) -> Result<BspLevel, GenerationError> {
        self.config.validate()?;
        let GeneratorConfig {
            map_width,
            map_height,
            min_leaf_size,
            max_leaf_size,
        } = self.config;

        info!("Generating {}x{} map", map_width, map_height);
        let started = Instant::now();

        let mut level = BspLevel::new(Rect::new(0, 0, map_width, map_height), &mut self.rng)?;
        let split_passes = level.split_all(min_leaf_size, max_leaf_size, &mut self.rng)?;
        level.check_leaf_extents()?;
        debug!("Partitioned into {} nodes", level.node_count());

        bsp_rooms::create_rooms(&mut level, &mut self.rng)?;

        let stats = GenerationStats {
            generation_time: started.elapsed().as_secs_f64(),
            split_passes,
            node_count: level.node_count(),
            room_count: level.rooms().count(),
            corridor_count: level.corridors().count(),
            max_depth: level.max_depth(),
        };
        info!(
            "Generated {} rooms and {} corridor segments in {} passes ({:.3} ms)",
            stats.room_count,
            stats.corridor_count,
            stats.split_passes,
            stats.generation_time * 1000.0
        );
        self.stats = Some(stats);

        Ok(level)
    }
}
