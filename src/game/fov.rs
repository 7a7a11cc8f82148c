//! # Field of View
//!
//! Recursive shadow-casting over eight octants. A cell is visible when an
//! unobstructed line reaches it from the origin within a circular radius.
//! Opaque cells stop sight past themselves but are lit when reached.

use crate::game::world::GameMap;
use crate::game::Position;
use crate::DelveResult;
use log::trace;

/// Octant transforms as `(xx, xy, yx, yy)` multipliers.
const OCTANTS: [(i32, i32, i32, i32); 8] = [
    (1, 0, 0, 1),
    (0, 1, 1, 0),
    (0, -1, 1, 0),
    (-1, 0, 0, 1),
    (-1, 0, 0, -1),
    (0, -1, -1, 0),
    (0, 1, -1, 0),
    (1, 0, 0, -1),
];

/// Computes which cells of `map` are visible from `origin`.
///
/// Returns a row-major grid of the map's dimensions. The map itself is not
/// touched; see [`recompute`] for the version that updates `visible` and
/// `explored`.
pub fn compute_fov(map: &GameMap, origin: Position, radius: i32) -> Vec<bool> {
    let mut scan = Scan {
        map,
        origin,
        // Past the map's extent a larger radius lights nothing new
        radius: radius.clamp(0, map.width + map.height),
        visible: vec![false; (map.width * map.height) as usize],
    };

    if !map.in_bounds(origin.x, origin.y) {
        return scan.visible;
    }

    scan.mark(origin.x, origin.y);
    for &(xx, xy, yx, yy) in OCTANTS.iter() {
        scan.cast_light(1, 1.0, 0.0, xx, xy, yx, yy);
    }
    scan.visible
}

/// Recomputes the map's `visible` grid from `origin` and folds the result
/// into `explored`.
pub fn recompute(map: &mut GameMap, origin: Position, radius: i32) -> DelveResult<()> {
    let visible = compute_fov(map, origin, radius);
    trace!(
        "FOV from ({}, {}) radius {}: {} cells visible",
        origin.x,
        origin.y,
        radius,
        visible.iter().filter(|&&v| v).count()
    );
    map.apply_visibility(visible)
}

struct Scan<'a> {
    map: &'a GameMap,
    origin: Position,
    radius: i32,
    visible: Vec<bool>,
}

impl Scan<'_> {
    fn mark(&mut self, x: i32, y: i32) {
        if self.map.in_bounds(x, y) {
            self.visible[(y * self.map.width + x) as usize] = true;
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn cast_light(
        &mut self,
        row: i32,
        mut start: f64,
        end: f64,
        xx: i32,
        xy: i32,
        yx: i32,
        yy: i32,
    ) {
        if start < end {
            return;
        }
        let radius_squared = self.radius * self.radius;
        let mut new_start = 0.0;

        for j in row..=self.radius {
            let dy = -j;
            let mut dx = -j - 1;
            let mut blocked = false;

            while dx <= 0 {
                dx += 1;
                let x = self.origin.x + dx * xx + dy * xy;
                let y = self.origin.y + dx * yx + dy * yy;
                let left_slope = (dx as f64 - 0.5) / (dy as f64 + 0.5);
                let right_slope = (dx as f64 + 0.5) / (dy as f64 - 0.5);

                if start < right_slope {
                    continue;
                }
                if end > left_slope {
                    break;
                }

                if dx * dx + dy * dy <= radius_squared {
                    self.mark(x, y);
                }

                let opaque = !self.map.is_transparent(x, y);
                if blocked {
                    if opaque {
                        new_start = right_slope;
                        continue;
                    }
                    blocked = false;
                    start = new_start;
                } else if opaque && j < self.radius {
                    blocked = true;
                    self.cast_light(j + 1, start, left_slope, xx, xy, yx, yy);
                    new_start = right_slope;
                }
            }

            if blocked {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::world::TileKind;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn explored_never_shrinks(
            walls in prop::collection::vec((1_i32..19, 1_i32..14), 0..40),
            origins in prop::collection::vec((1_i32..19, 1_i32..14), 1..8),
            radius in 0_i32..10,
        ) {
            let mut map = open_room(20);
            for (x, y) in walls {
                map.set_tile(x, y, TileKind::Wall).unwrap();
            }

            let mut explored = map.explored().to_vec();
            for (x, y) in origins {
                recompute(&mut map, Position::new(x, y), radius).unwrap();
                prop_assert!(map.is_visible(x, y));
                for (idx, &seen) in map.explored().iter().enumerate() {
                    prop_assert!(!explored[idx] || seen);
                    prop_assert!(!map.visible()[idx] || seen);
                }
                explored = map.explored().to_vec();
            }
        }

        #[test]
        fn visible_cells_lie_within_radius(x in 1_i32..19, y in 1_i32..19, radius in 0_i32..12) {
            let map = open_room(20);
            let origin = Position::new(x, y);
            let visible = compute_fov(&map, origin, radius);
            for (idx, &lit) in visible.iter().enumerate() {
                let cell = Position::new(idx as i32 % 20, idx as i32 / 20);
                if lit {
                    prop_assert!(origin.distance_squared(cell) <= radius * radius);
                }
            }
        }
    }

    fn open_room(size: i32) -> GameMap {
        let mut map = GameMap::new(size, size);
        for y in 1..size - 1 {
            for x in 1..size - 1 {
                map.set_tile(x, y, TileKind::Floor).unwrap();
            }
        }
        map
    }

    fn corridor() -> GameMap {
        let mut map = GameMap::new(12, 11);
        for x in 1..11 {
            map.set_tile(x, 5, TileKind::Floor).unwrap();
        }
        map.set_tile(6, 5, TileKind::Wall).unwrap();
        map
    }

    #[test]
    fn test_origin_is_always_visible() {
        let map = GameMap::new(5, 5);
        let visible = compute_fov(&map, Position::new(2, 2), 8);
        assert!(visible[2 * 5 + 2]);
    }

    #[test]
    fn test_open_room_sees_everything_in_radius() {
        let map = open_room(21);
        let origin = Position::new(10, 10);
        let visible = compute_fov(&map, origin, 8);

        for y in 1..20 {
            for x in 1..20 {
                let in_radius = origin.distance_squared(Position::new(x, y)) <= 64;
                assert_eq!(
                    visible[(y * 21 + x) as usize],
                    in_radius,
                    "cell ({}, {}) visibility mismatch",
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn test_open_room_is_symmetric() {
        let map = open_room(21);
        let visible = compute_fov(&map, Position::new(10, 10), 6);
        for y in 0..21 {
            for x in 0..21 {
                let mirrored_x = 20 - x;
                let mirrored_y = 20 - y;
                assert_eq!(
                    visible[(y * 21 + x) as usize],
                    visible[(mirrored_y * 21 + mirrored_x) as usize]
                );
                assert_eq!(
                    visible[(y * 21 + x) as usize],
                    visible[(x * 21 + y) as usize]
                );
            }
        }
    }

    #[test]
    fn test_walls_are_lit_but_block_beyond() {
        let map = corridor();
        let visible = compute_fov(&map, Position::new(3, 5), 10);
        let at = |x: i32, y: i32| visible[(y * 12 + x) as usize];

        assert!(at(5, 5));
        assert!(at(6, 5), "the blocking wall itself is visible");
        assert!(!at(7, 5), "the floor behind the wall is hidden");
        assert!(!at(9, 5));
        assert!(at(3, 4), "walls lining the corridor are visible");
    }

    #[test]
    fn test_radius_limits_sight() {
        let map = open_room(30);
        let visible = compute_fov(&map, Position::new(5, 5), 3);
        assert!(visible[5 * 30 + 8]);
        assert!(!visible[5 * 30 + 9]);
    }

    #[test]
    fn test_huge_radius_sees_the_whole_room() {
        let map = open_room(12);
        let visible = compute_fov(&map, Position::new(6, 6), i32::MAX);
        for y in 1..11 {
            for x in 1..11 {
                assert!(visible[(y * 12 + x) as usize], "({}, {}) should be lit", x, y);
            }
        }
    }

    #[test]
    fn test_out_of_bounds_origin_sees_nothing() {
        let map = open_room(10);
        let visible = compute_fov(&map, Position::new(-1, 3), 8);
        assert!(visible.iter().all(|v| !v));
    }

    #[test]
    fn test_recompute_is_deterministic() {
        let mut map = corridor();
        recompute(&mut map, Position::new(2, 5), 8).unwrap();
        let first = map.visible().to_vec();
        recompute(&mut map, Position::new(2, 5), 8).unwrap();
        assert_eq!(first, map.visible());
    }

    #[test]
    fn test_recompute_accumulates_explored() {
        let mut map = corridor();
        recompute(&mut map, Position::new(2, 5), 8).unwrap();
        assert!(map.is_explored(5, 5));
        assert!(!map.is_explored(8, 5));

        recompute(&mut map, Position::new(9, 5), 8).unwrap();
        assert!(map.is_explored(8, 5));
        assert!(map.is_explored(5, 5), "explored cells stay explored");
        assert!(!map.is_visible(2, 5));
    }
}
