//! # Enemy AI
//!
//! Hostile monsters attack when adjacent to a player who can see them and
//! otherwise follow an A* path towards the player. The path is kept between
//! turns, so a monster that loses sight of the player keeps walking towards
//! where it last saw them.

use crate::game::actions::Action;
use crate::game::world::GameMap;
use crate::game::Position;
use crate::utils::find_path;
use log::trace;

/// Path-following state of a hostile monster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostileEnemy {
    path: Vec<Position>,
}

impl HostileEnemy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining steps of the current path, next step first.
    pub fn path(&self) -> &[Position] {
        &self.path
    }

    /// Decides this turn's action for a monster standing at `position`.
    ///
    /// Visibility is symmetric, so the monster only notices the player while
    /// its own cell is in the player's field of view.
    pub fn plan(&mut self, map: &GameMap, position: Position, target: Position) -> Action {
        let dx = target.x - position.x;
        let dy = target.y - position.y;

        if map.is_visible(position.x, position.y) {
            if position.chebyshev_distance(target) <= 1 {
                return Action::Melee { dx, dy };
            }
            self.path = find_path(map, position, target).unwrap_or_default();
            trace!(
                "Monster at ({}, {}) planned {} steps",
                position.x,
                position.y,
                self.path.len()
            );
        }

        if self.path.is_empty() {
            return Action::Wait;
        }

        let next = self.path.remove(0);
        if position.chebyshev_distance(next) != 1 {
            // Stale path from a step that never happened
            self.path.clear();
            return Action::Wait;
        }
        if map.blocking_entity_at(next.x, next.y).is_some() {
            return Action::Wait;
        }

        Action::Move {
            dx: next.x - position.x,
            dy: next.y - position.y,
        }
    }
}
