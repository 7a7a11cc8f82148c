//! # Utilities Module
//!
//! Grid geometry and pathfinding shared by generation and AI.

pub mod math;
pub mod pathfinding;

pub use self::math::*;
pub use self::pathfinding::*;
