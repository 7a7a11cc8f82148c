//! # Dungeon Generation
//!
//! Room-and-corridor layout generation.
//!
//! The generator makes `max_rooms` placement attempts. Each attempt picks a
//! random size and position; a candidate that intersects an accepted room is
//! dropped. Accepted rooms have their interior carved to floor and are joined
//! to the previously accepted room by an L-shaped tunnel, which keeps every
//! room reachable from the first one. The player starts at the centre of the
//! first room.

use crate::game::{Entity, GameMap, Position, TileKind};
use crate::generation::{EncounterGenerator, GenerationConfig, Generator, RectangularRoom};
use crate::utils::bresenham_line;
use crate::{DelveError, DelveResult};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::{HashSet, VecDeque};

/// The carved tiles and the rooms that were accepted, in acceptance order.
#[derive(Debug, Clone)]
pub struct DungeonLayout {
    pub map: GameMap,
    pub rooms: Vec<RectangularRoom>,
}

impl DungeonLayout {
    /// Centre of the first accepted room.
    pub fn player_start(&self) -> Option<Position> {
        self.rooms.first().map(RectangularRoom::center)
    }
}

/// Room-and-corridor dungeon generator.
#[derive(Debug, Clone, Default)]
pub struct DungeonGenerator {
    /// Populates accepted rooms with monsters
    pub encounters: EncounterGenerator,
}

impl DungeonGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a complete level: layout, the player at the first room's
    /// centre, and monsters in every room.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{DungeonGenerator, Entity, Fighter, GenerationConfig, Position};
    /// use delve::generation::utils::create_rng;
    ///
    /// let config = GenerationConfig::for_testing(3);
    /// let mut rng = create_rng(&config);
    /// let player = Entity::player("Hero", Position::new(0, 0), Fighter::new(30, 2, 5));
    /// let id = player.id();
    ///
    /// let map = DungeonGenerator::new()
    ///     .generate_dungeon(&config, player, &mut rng)
    ///     .unwrap();
    /// let start = map.entity(id).unwrap().position();
    /// assert!(map.is_walkable(start.x, start.y));
    /// ```
    pub fn generate_dungeon(
        &self,
        config: &GenerationConfig,
        mut player: Entity,
        rng: &mut StdRng,
    ) -> DelveResult<GameMap> {
        let layout = self.generate(config, rng)?;
        self.validate(&layout, config)?;

        let start = layout.player_start().ok_or_else(|| {
            DelveError::GenerationFailed("no room was placed".to_string())
        })?;
        let DungeonLayout { mut map, rooms } = layout;

        player.set_position(start);
        map.place_entity(player)?;
        self.encounters
            .populate(&mut map, &rooms, config.max_monsters_per_room, rng)?;

        info!(
            "Generated {}x{} dungeon: {} rooms, {} entities, player at ({}, {})",
            map.width,
            map.height,
            rooms.len(),
            map.entities().len(),
            start.x,
            start.y
        );
        Ok(map)
    }

    fn generate_room_candidate(
        &self,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> RectangularRoom {
        let width = rng.gen_range(config.room_min_size..=config.room_max_size);
        let height = rng.gen_range(config.room_min_size..=config.room_max_size);
        let x = rng.gen_range(0..=config.map_width - width - 1);
        let y = rng.gen_range(0..=config.map_height - height - 1);
        RectangularRoom::new(x, y, width, height)
    }

    fn carve(
        &self,
        map: &mut GameMap,
        cells: impl IntoIterator<Item = Position>,
    ) -> DelveResult<()> {
        for pos in cells {
            map.set_tile(pos.x, pos.y, TileKind::Floor)?;
        }
        Ok(())
    }

    /// Checks that every room interior is reachable from the first room.
    fn validate_connectivity(&self, map: &GameMap, rooms: &[RectangularRoom]) -> DelveResult<()> {
        let start = match rooms.first() {
            Some(room) => room.center(),
            None => return Ok(()),
        };

        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(pos) = queue.pop_front() {
            for next in [
                pos.offset(0, -1),
                pos.offset(0, 1),
                pos.offset(-1, 0),
                pos.offset(1, 0),
            ] {
                if map.is_walkable(next.x, next.y) && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        for (index, room) in rooms.iter().enumerate() {
            if room.inner().any(|pos| !visited.contains(&pos)) {
                return Err(DelveError::GenerationFailed(format!(
                    "room {} is not connected to the first room",
                    index
                )));
            }
        }
        Ok(())
    }
}

impl Generator<DungeonLayout> for DungeonGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DelveResult<DungeonLayout> {
        config.validate()?;

        let mut map = GameMap::new(config.map_width, config.map_height);
        let mut rooms: Vec<RectangularRoom> = Vec::new();

        for attempt in 0..config.max_rooms {
            let room = self.generate_room_candidate(config, rng);
            if rooms.iter().any(|other| room.intersects(other)) {
                debug!("Room attempt {} overlaps, skipped", attempt);
                continue;
            }

            self.carve(&mut map, room.inner())?;
            if let Some(previous) = rooms.last() {
                let tunnel = tunnel_between(previous.center(), room.center(), rng);
                self.carve(&mut map, tunnel)?;
            }
            rooms.push(room);
        }

        Ok(DungeonLayout { map, rooms })
    }

    fn validate(&self, layout: &DungeonLayout, _config: &GenerationConfig) -> DelveResult<()> {
        if layout.map.count_tiles(TileKind::Floor) == 0 {
            return Err(DelveError::GenerationFailed(
                "level has no floor tiles".to_string(),
            ));
        }
        self.validate_connectivity(&layout.map, &layout.rooms)
    }

    fn generator_type(&self) -> &'static str {
        "DungeonGenerator"
    }
}

/// Cells of an L-shaped tunnel from `start` to `end`, both included.
///
/// The elbow is `(end.x, start.y)` (horizontal leg first) or
/// `(start.x, end.y)` (vertical leg first) with equal probability.
pub fn tunnel_between(start: Position, end: Position, rng: &mut StdRng) -> Vec<Position> {
    let corner = if rng.gen_bool(0.5) {
        Position::new(end.x, start.y)
    } else {
        Position::new(start.x, end.y)
    };

    let mut cells = bresenham_line(start, corner);
    cells.extend(bresenham_line(corner, end));
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Fighter;
    use crate::generation::utils::create_rng;

    fn hero() -> Entity {
        Entity::player("Hero", Position::new(0, 0), Fighter::new(30, 2, 5))
    }

    #[test]
    fn test_layout_rooms_do_not_intersect() {
        let config = GenerationConfig::new(12345);
        let mut rng = create_rng(&config);
        let layout = DungeonGenerator::new().generate(&config, &mut rng).unwrap();

        assert!(!layout.rooms.is_empty());
        for (i, a) in layout.rooms.iter().enumerate() {
            for b in &layout.rooms[i + 1..] {
                assert!(!a.intersects(b));
            }
        }
    }

    #[test]
    fn test_map_border_stays_wall() {
        let config = GenerationConfig::new(777);
        let mut rng = create_rng(&config);
        let layout = DungeonGenerator::new().generate(&config, &mut rng).unwrap();
        let map = &layout.map;

        for x in 0..map.width {
            assert_eq!(map.tile_at(x, 0), Some(TileKind::Wall));
            assert_eq!(map.tile_at(x, map.height - 1), Some(TileKind::Wall));
        }
        for y in 0..map.height {
            assert_eq!(map.tile_at(0, y), Some(TileKind::Wall));
            assert_eq!(map.tile_at(map.width - 1, y), Some(TileKind::Wall));
        }
    }

    #[test]
    fn test_single_room_on_small_map() {
        let config = GenerationConfig {
            seed: 5,
            max_rooms: 1,
            room_min_size: 4,
            room_max_size: 6,
            map_width: 10,
            map_height: 10,
            max_monsters_per_room: 0,
        };
        let mut rng = create_rng(&config);
        let player = hero();
        let id = player.id();

        let map = DungeonGenerator::new()
            .generate_dungeon(&config, player, &mut rng)
            .unwrap();

        assert_eq!(map.entities().len(), 1);
        let start = map.entity(id).unwrap().position();
        assert!(map.is_walkable(start.x, start.y));

        // With one room and no tunnels the floor is exactly the room interior
        let floor = map.count_tiles(TileKind::Floor);
        let mut min = Position::new(i32::MAX, i32::MAX);
        let mut max = Position::new(i32::MIN, i32::MIN);
        for y in 0..map.height {
            for x in 0..map.width {
                if map.is_walkable(x, y) {
                    min = Position::new(min.x.min(x), min.y.min(y));
                    max = Position::new(max.x.max(x), max.y.max(y));
                }
            }
        }
        assert_eq!(floor as i32, (max.x - min.x + 1) * (max.y - min.y + 1));
        let room = RectangularRoom {
            x1: min.x - 1,
            y1: min.y - 1,
            x2: max.x + 1,
            y2: max.y + 1,
        };
        assert_eq!(start, room.center());
    }

    #[test]
    fn test_same_seed_same_dungeon() {
        let config = GenerationConfig::for_testing(99);
        let generator = DungeonGenerator::new();

        let mut rng = create_rng(&config);
        let first = generator.generate(&config, &mut rng).unwrap();
        let mut rng = create_rng(&config);
        let second = generator.generate(&config, &mut rng).unwrap();

        assert_eq!(first.rooms, second.rooms);
        let cells = |layout: &DungeonLayout| {
            (0..layout.map.height)
                .flat_map(|y| (0..layout.map.width).map(move |x| (x, y)))
                .map(|(x, y)| layout.map.tile_at(x, y))
                .collect::<Vec<_>>()
        };
        assert_eq!(cells(&first), cells(&second));
    }

    #[test]
    fn test_tunnel_is_connected_l_shape() {
        let mut rng = create_rng(&GenerationConfig::new(1));
        let start = Position::new(2, 3);
        let end = Position::new(9, 7);

        for _ in 0..10 {
            let tunnel = tunnel_between(start, end, &mut rng);
            assert_eq!(tunnel.first(), Some(&start));
            assert_eq!(tunnel.last(), Some(&end));
            for pair in tunnel.windows(2) {
                assert!(pair[0].chebyshev_distance(pair[1]) <= 1);
                assert!(pair[0].x == pair[1].x || pair[0].y == pair[1].y);
            }
            let corner_a = tunnel.contains(&Position::new(9, 3));
            let corner_b = tunnel.contains(&Position::new(2, 7));
            assert!(corner_a ^ corner_b);
        }
    }

    #[test]
    fn test_generate_rejects_invalid_config() {
        let mut config = GenerationConfig::new(1);
        config.room_max_size = 100;
        let mut rng = create_rng(&config);
        let result = DungeonGenerator::new().generate_dungeon(&config, hero(), &mut rng);
        assert!(matches!(result, Err(DelveError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_detects_disconnected_rooms() {
        let generator = DungeonGenerator::new();
        let config = GenerationConfig::for_testing(1);
        let mut map = GameMap::new(20, 10);
        let rooms = vec![
            RectangularRoom::new(1, 1, 4, 4),
            RectangularRoom::new(10, 1, 4, 4),
        ];
        for room in &rooms {
            for pos in room.inner() {
                map.set_tile(pos.x, pos.y, TileKind::Floor).unwrap();
            }
        }
        let layout = DungeonLayout { map, rooms };
        assert!(matches!(
            generator.validate(&layout, &config),
            Err(DelveError::GenerationFailed(_))
        ));
        assert_eq!(generator.generator_type(), "DungeonGenerator");
    }
}
