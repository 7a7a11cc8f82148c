//! Property tests for dungeon generation.

use delve::generation::utils::create_rng;
use delve::{
    DungeonGenerator, Entity, Fighter, GameMap, GenerationConfig, Generator, Position,
    RectangularRoom,
};
use proptest::prelude::*;
use std::collections::{HashSet, VecDeque};

fn hero() -> Entity {
    Entity::player("Hero", Position::new(0, 0), Fighter::new(30, 2, 5))
}

/// Cells reachable from `start` through walkable tiles, moving orthogonally.
fn reachable(map: &GameMap, start: Position) -> HashSet<Position> {
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(pos) = queue.pop_front() {
        for next in [
            pos.offset(1, 0),
            pos.offset(-1, 0),
            pos.offset(0, 1),
            pos.offset(0, -1),
        ] {
            if map.is_walkable(next.x, next.y) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

fn config_strategy() -> impl Strategy<Value = GenerationConfig> {
    (
        any::<u64>(),
        1_u32..=40,
        2_i32..=6,
        0_i32..=5,
        20_i32..=80,
        15_i32..=45,
        0_u32..=3,
    )
        .prop_map(|(seed, max_rooms, min, extra, width, height, monsters)| {
            GenerationConfig {
                seed,
                max_rooms,
                room_min_size: min,
                room_max_size: min + extra,
                map_width: width,
                map_height: height,
                max_monsters_per_room: monsters,
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_rooms_never_intersect(config in config_strategy()) {
        let mut rng = create_rng(&config);
        let layout = DungeonGenerator::new().generate(&config, &mut rng).unwrap();

        prop_assert!(!layout.rooms.is_empty());
        for (i, a) in layout.rooms.iter().enumerate() {
            for b in &layout.rooms[i + 1..] {
                prop_assert!(!a.intersects(b), "{:?} intersects {:?}", a, b);
            }
        }
    }

    #[test]
    fn every_floor_cell_is_reachable_from_the_player(config in config_strategy()) {
        let mut rng = create_rng(&config);
        let player = hero();
        let id = player.id();
        let map = DungeonGenerator::new().generate_dungeon(&config, player, &mut rng).unwrap();

        let start = map.entity(id).unwrap().position();
        prop_assert!(map.is_walkable(start.x, start.y));

        let seen = reachable(&map, start);
        for y in 0..map.height {
            for x in 0..map.width {
                if map.is_walkable(x, y) {
                    prop_assert!(seen.contains(&Position::new(x, y)), "({}, {}) is cut off", x, y);
                }
            }
        }
    }

    #[test]
    fn entities_stand_on_distinct_floor_cells(config in config_strategy()) {
        let mut rng = create_rng(&config);
        let map = DungeonGenerator::new().generate_dungeon(&config, hero(), &mut rng).unwrap();

        let mut occupied = HashSet::new();
        for entity in map.entities() {
            let pos = entity.position();
            prop_assert!(map.is_walkable(pos.x, pos.y));
            prop_assert!(occupied.insert(pos), "two entities at ({}, {})", pos.x, pos.y);
        }
    }
}

#[test]
fn test_ten_by_ten_single_room() {
    let config = GenerationConfig {
        seed: 31,
        max_rooms: 1,
        room_min_size: 3,
        room_max_size: 8,
        map_width: 10,
        map_height: 10,
        max_monsters_per_room: 2,
    };
    let mut rng = create_rng(&config);
    let layout = DungeonGenerator::new().generate(&config, &mut rng).unwrap();
    assert_eq!(layout.rooms.len(), 1);

    let room: RectangularRoom = layout.rooms[0];
    let mut rng = create_rng(&config);
    let player = hero();
    let id = player.id();
    let map = DungeonGenerator::new()
        .generate_dungeon(&config, player, &mut rng)
        .unwrap();

    assert_eq!(map.entity(id).unwrap().position(), room.center());
    assert!(map.entities().len() <= 3);
    for entity in map.entities() {
        assert!(room.contains_inner(entity.position()));
    }
}

#[test]
fn test_max_monsters_zero_places_only_the_player() {
    let mut config = GenerationConfig::new(2024);
    config.max_monsters_per_room = 0;
    let mut rng = create_rng(&config);
    let map = DungeonGenerator::new()
        .generate_dungeon(&config, hero(), &mut rng)
        .unwrap();
    assert_eq!(map.entities().len(), 1);
}
