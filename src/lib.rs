//! # Delve
//!
//! A small turn-based dungeon crawl: explore a procedurally generated dungeon,
//! fight what lives there, and try to survive.
//!
//! ## Architecture Overview
//!
//! - **Generation**: room-and-corridor dungeon layout plus monster population
//! - **Game Map**: tile grid, visibility grids, and the entities standing on it
//! - **Entity Model**: one `Entity` type with optional actor capabilities
//!   (combat stats and AI)
//! - **Field of View**: recursive shadow-casting from the player's position
//! - **Engine**: the turn scheduler that resolves the player's action and then
//!   lets every living enemy act once
//! - **Message Log**: a de-duplicating narrative log
//!
//! Rendering and input live in thin frontend modules that only read the core's
//! outputs (`render_snapshot`, the entity list, and the log) and produce
//! [`Action`] values.

pub mod config;
pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;

pub use config::{GameConfig, PlayerConfig};
pub use game::*;
pub use generation::{DungeonGenerator, GenerationConfig, Generator, RectangularRoom};
pub use input::{InputHandler, PlayerInput};
pub use rendering::{ascii_dump, MacroquadDisplay};

/// Core error type for the Delve engine.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// An entity id did not resolve to an entity on the map
    #[error("Entity {0} not found")]
    EntityNotFound(EntityId),

    /// A coordinate fell outside the map
    #[error("Position ({x}, {y}) is out of bounds")]
    OutOfBounds { x: i32, y: i32 },

    /// Configuration values violate their constraints
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
