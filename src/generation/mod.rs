//! # Generation Module
//!
//! Procedural content generation: the room-and-corridor dungeon layout and
//! the monsters that populate it.
//!
//! Generation is driven by a [`GenerationConfig`] and a seeded `StdRng`, so
//! the same seed and configuration always produce the same dungeon.

pub mod dungeon;
pub mod encounters;

pub use dungeon::*;
pub use encounters::*;

use crate::config::{
    DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH, DEFAULT_MAX_MONSTERS_PER_ROOM, DEFAULT_MAX_ROOMS,
    DEFAULT_ROOM_MAX_SIZE, DEFAULT_ROOM_MIN_SIZE, MAX_MAP_DIMENSION,
};
use crate::game::Position;
use crate::{DelveError, DelveResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Number of room placement attempts
    pub max_rooms: u32,
    /// Smallest room side, walls included
    pub room_min_size: i32,
    /// Largest room side, walls included
    pub room_max_size: i32,
    pub map_width: i32,
    pub map_height: i32,
    /// Upper bound on monsters placed in each room
    pub max_monsters_per_room: u32,
}

impl GenerationConfig {
    /// Creates the standard configuration with the given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!(config.seed, 7);
    /// assert!(config.room_min_size <= config.room_max_size);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            max_rooms: DEFAULT_MAX_ROOMS,
            room_min_size: DEFAULT_ROOM_MIN_SIZE,
            room_max_size: DEFAULT_ROOM_MAX_SIZE,
            map_width: DEFAULT_MAP_WIDTH,
            map_height: DEFAULT_MAP_HEIGHT,
            max_monsters_per_room: DEFAULT_MAX_MONSTERS_PER_ROOM,
        }
    }

    /// Creates a configuration for testing with a small map.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            max_rooms: 8,
            room_min_size: 4,
            room_max_size: 7,
            map_width: 40,
            map_height: 25,
            max_monsters_per_room: 1,
        }
    }

    /// Checks the constraints the generator relies on.
    ///
    /// Every room must fit strictly inside the map and have at least one
    /// interior cell, which means a side of at least 2.
    pub fn validate(&self) -> DelveResult<()> {
        if self.max_rooms == 0 {
            return Err(DelveError::InvalidConfig(
                "max_rooms must be at least 1".to_string(),
            ));
        }
        if self.room_min_size < 2 {
            return Err(DelveError::InvalidConfig(format!(
                "room_min_size must be at least 2, got {}",
                self.room_min_size
            )));
        }
        if self.room_min_size > self.room_max_size {
            return Err(DelveError::InvalidConfig(format!(
                "room_min_size {} exceeds room_max_size {}",
                self.room_min_size, self.room_max_size
            )));
        }
        if self.map_width > MAX_MAP_DIMENSION || self.map_height > MAX_MAP_DIMENSION {
            return Err(DelveError::InvalidConfig(format!(
                "map sides are limited to {}, got {}x{}",
                MAX_MAP_DIMENSION, self.map_width, self.map_height
            )));
        }
        if self.room_max_size >= self.map_width || self.room_max_size >= self.map_height {
            return Err(DelveError::InvalidConfig(format!(
                "rooms up to {} do not fit in a {}x{} map",
                self.room_max_size, self.map_width, self.map_height
            )));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// An axis-aligned room. `(x1, y1)` is the top-left corner and
/// `(x2, y2) = (x1 + width, y1 + height)`; the border cells stay wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RectangularRoom {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl RectangularRoom {
    /// # Examples
    ///
    /// ```
    /// use delve::{Position, RectangularRoom};
    ///
    /// let room = RectangularRoom::new(2, 3, 6, 4);
    /// assert_eq!(room.center(), Position::new(5, 5));
    /// assert_eq!(room.inner().count(), 5 * 3);
    /// ```
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn center(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Cells carved to floor: `x1 < x < x2` and `y1 < y < y2`.
    pub fn inner(&self) -> impl Iterator<Item = Position> {
        let (x1, x2) = (self.x1, self.x2);
        (self.y1 + 1..self.y2).flat_map(move |y| (x1 + 1..x2).map(move |x| Position::new(x, y)))
    }

    pub fn contains_inner(&self, pos: Position) -> bool {
        self.x1 < pos.x && pos.x < self.x2 && self.y1 < pos.y && pos.y < self.y2
    }

    /// True if the rooms overlap, touching edges included.
    pub fn intersects(&self, other: &RectangularRoom) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DelveResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> DelveResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}
