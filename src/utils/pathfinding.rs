//! # Pathfinding
//!
//! A* search over the walkable cells of a map with weighted steps. Cells
//! occupied by blocking entities stay passable but cost extra, so paths route
//! around crowds when a detour exists.

use crate::game::{Direction, GameMap, Position};
use pathfinding::prelude::astar;

/// Cost of an orthogonal step.
pub const CARDINAL_COST: u32 = 2;
/// Cost of a diagonal step.
pub const DIAGONAL_COST: u32 = 3;
/// Extra cost of stepping onto a cell held by a blocking entity.
pub const OCCUPIED_PENALTY: u32 = 10;

/// Finds a path from `start` to `goal`, excluding `start` and ending at
/// `goal`. Returns `None` when no walkable route exists.
///
/// The goal itself is never penalised for being occupied, since the usual
/// goal is the cell of the actor being chased.
pub fn find_path(map: &GameMap, start: Position, goal: Position) -> Option<Vec<Position>> {
    if start == goal {
        return Some(Vec::new());
    }

    let (mut path, _cost) = astar(
        &start,
        |&current| successors(map, current, goal),
        |&current| current.chebyshev_distance(goal) as u32 * CARDINAL_COST,
        |&current| current == goal,
    )?;
    path.remove(0);
    Some(path)
}

fn successors(map: &GameMap, from: Position, goal: Position) -> Vec<(Position, u32)> {
    Direction::all()
        .into_iter()
        .filter_map(|direction| {
            let next = from + direction.to_delta();
            if !map.is_walkable(next.x, next.y) {
                return None;
            }
            let mut cost = if direction.is_diagonal() {
                DIAGONAL_COST
            } else {
                CARDINAL_COST
            };
            if next != goal && map.blocking_entity_at(next.x, next.y).is_some() {
                cost += OCCUPIED_PENALTY;
            }
            Some((next, cost))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Entity, TileKind};

    fn room(width: i32, height: i32) -> GameMap {
        let mut map = GameMap::new(width, height);
        for y in 1..height - 1 {
            for x in 1..width - 1 {
                map.set_tile(x, y, TileKind::Floor).unwrap();
            }
        }
        map
    }

    #[test]
    fn test_straight_path() {
        let map = room(10, 5);
        let path = find_path(&map, Position::new(1, 2), Position::new(5, 2)).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.last(), Some(&Position::new(5, 2)));
        assert!(!path.contains(&Position::new(1, 2)));
    }

    #[test]
    fn test_path_steps_are_adjacent() {
        let map = room(12, 12);
        let start = Position::new(1, 1);
        let path = find_path(&map, start, Position::new(9, 6)).unwrap();

        let mut previous = start;
        for step in &path {
            assert_eq!(previous.chebyshev_distance(*step), 1);
            assert!(map.is_walkable(step.x, step.y));
            previous = *step;
        }
    }

    #[test]
    fn test_no_path_through_walls() {
        let mut map = room(10, 5);
        for y in 0..5 {
            map.set_tile(5, y, TileKind::Wall).unwrap();
        }
        assert!(find_path(&map, Position::new(1, 2), Position::new(8, 2)).is_none());
    }

    #[test]
    fn test_routes_around_blocking_entity() {
        let mut map = room(10, 5);
        map.place_entity(Entity::orc(Position::new(3, 2))).unwrap();

        let path = find_path(&map, Position::new(1, 2), Position::new(5, 2)).unwrap();
        assert!(!path.contains(&Position::new(3, 2)));
        assert_eq!(path.last(), Some(&Position::new(5, 2)));
    }

    #[test]
    fn test_occupied_goal_is_reachable() {
        let mut map = room(10, 5);
        map.place_entity(Entity::orc(Position::new(5, 2))).unwrap();
        let path = find_path(&map, Position::new(1, 2), Position::new(5, 2)).unwrap();
        assert_eq!(path.len(), 4);
    }
}
