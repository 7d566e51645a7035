//! # Generation Module
//!
//! Procedural dungeon generation: room placement, corridor routing and object
//! population.
//!
//! The stages run in a fixed order on one grid. Each stage lives in its own
//! submodule and only sees what it needs (the grid, the anchors, the random
//! stream); [`DungeonGenerator`] drives them and owns the tunables that are not
//! part of the dungeon's own configuration.

pub mod dungeon;
pub mod paths;
pub mod population;
pub mod rooms;

pub use dungeon::*;
pub use paths::*;
pub use population::*;
pub use rooms::*;

use crate::{config, BurrowError, BurrowResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest grid side accepted by [`GenerationConfig::validate`].
pub const MAX_GRID_SIZE: u32 = 4096;

/// Configuration for a single dungeon.
///
/// Every field must be set before a generation run; [`validate`] rejects
/// combinations that can never produce a dungeon.
///
/// [`validate`]: GenerationConfig::validate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Grid side length in tiles
    pub size: u32,
    /// Number of rooms to place
    pub rooms: usize,
    /// Smallest room size (inclusive)
    pub min_room_size: u32,
    /// Largest room size (exclusive), also the separation unit
    pub max_room_size: u32,
    /// Random seed; `None` gives a different dungeon every run
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GenerationConfig {
    /// Creates an unseeded configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(64, 4, 2, 4).with_seed(12345);
    /// assert_eq!(config.seed, Some(12345));
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(size: u32, rooms: usize, min_room_size: u32, max_room_size: u32) -> Self {
        Self {
            size,
            rooms,
            min_room_size,
            max_room_size,
            seed: None,
        }
    }

    /// Returns the configuration with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Creates a small seeded configuration for testing.
    pub fn for_testing(seed: u64) -> Self {
        Self::new(64, 4, 2, 4).with_seed(seed)
    }

    /// Reads a configuration from JSON text.
    pub fn from_json_str(json: &str) -> BurrowResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> BurrowResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// How many mutually separated anchors can ever fit on the grid.
    ///
    /// Anchors are drawn from a span of `size - 2 * max_room_size - 1` values
    /// per axis, and any `2 * max_room_size` square of that span holds at most
    /// one anchor.
    pub fn placement_capacity(&self) -> usize {
        let max = self.max_room_size as u64;
        let span = (self.size as u64).saturating_sub(2 * max + 1);
        let cell = (2 * max).max(1);
        let per_axis = span.div_ceil(cell);
        (per_axis * per_axis) as usize
    }

    /// Checks that this configuration can produce a dungeon.
    pub fn validate(&self) -> BurrowResult<()> {
        let invalid = |field: &'static str, reason: String| -> BurrowResult<()> {
            Err(BurrowError::InvalidConfig { field, reason })
        };

        if self.min_room_size == 0 {
            return invalid("min_room_size", "must be positive".to_string());
        }
        if self.min_room_size > self.max_room_size {
            return invalid(
                "min_room_size",
                format!(
                    "{} exceeds max_room_size {}",
                    self.min_room_size, self.max_room_size
                ),
            );
        }
        if self.max_room_size < 2 {
            // A door one step from the last anchor would land on its enemy
            return invalid(
                "max_room_size",
                format!("must be at least 2, got {}", self.max_room_size),
            );
        }
        if self.rooms < 2 {
            return invalid(
                "rooms",
                format!("need at least 2 rooms to route a path, got {}", self.rooms),
            );
        }
        if self.size > MAX_GRID_SIZE {
            return invalid(
                "size",
                format!("{} is larger than the supported {}", self.size, MAX_GRID_SIZE),
            );
        }
        let smallest = 2 * self.max_room_size as u64 + 2;
        if (self.size as u64) < smallest {
            return invalid(
                "size",
                format!(
                    "{} leaves no room for anchors; needs at least {} for max_room_size {}",
                    self.size, smallest, self.max_room_size
                ),
            );
        }
        let capacity = self.placement_capacity();
        if self.rooms > capacity {
            return invalid(
                "rooms",
                format!(
                    "{} rooms cannot be separated on a {}x{} grid with max_room_size {} (at most {})",
                    self.rooms, self.size, self.size, self.max_room_size, capacity
                ),
            );
        }

        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(
            config::DEFAULT_GRID_SIZE,
            config::DEFAULT_ROOMS,
            config::DEFAULT_MIN_ROOM_SIZE,
            config::DEFAULT_MAX_ROOM_SIZE,
        )
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> BurrowResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> BurrowResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Generates a dungeon with the default generator, seeding from the config.
///
/// # Examples
///
/// ```
/// use burrow::{generate, GenerationConfig};
///
/// let config = GenerationConfig::for_testing(99);
/// let first = generate(&config).unwrap();
/// let second = generate(&config).unwrap();
/// assert_eq!(first, second);
/// ```
pub fn generate(config: &GenerationConfig) -> BurrowResult<Dungeon> {
    let mut rng = utils::create_rng(config);
    DungeonGenerator::new().generate(config, &mut rng)
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;

    /// Creates a random number generator from the config's seed, or from
    /// system entropy when no seed is set.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
