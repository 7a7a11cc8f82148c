//! # Encounter Generation
//!
//! Monster placement for freshly carved rooms.

use crate::game::{Entity, GameMap, Position};
use crate::generation::RectangularRoom;
use crate::DelveResult;
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

/// Chance that a placed monster is an orc rather than a troll.
pub const ORC_CHANCE: f64 = 0.8;

/// Places monsters in rooms.
#[derive(Debug, Clone, PartialEq)]
pub struct EncounterGenerator {
    /// Probability in `[0, 1]` of an orc; trolls fill the rest
    pub orc_chance: f64,
}

impl Default for EncounterGenerator {
    fn default() -> Self {
        Self {
            orc_chance: ORC_CHANCE,
        }
    }
}

impl EncounterGenerator {
    /// Populates each room in order.
    pub fn populate(
        &self,
        map: &mut GameMap,
        rooms: &[RectangularRoom],
        max_per_room: u32,
        rng: &mut StdRng,
    ) -> DelveResult<usize> {
        let mut placed = 0;
        for room in rooms {
            placed += self.place_entities(map, room, max_per_room, rng)?;
        }
        Ok(placed)
    }

    /// Rolls between 0 and `max_monsters` monsters for one room. Each lands on
    /// a random interior cell; a roll that hits an occupied cell is skipped.
    pub fn place_entities(
        &self,
        map: &mut GameMap,
        room: &RectangularRoom,
        max_monsters: u32,
        rng: &mut StdRng,
    ) -> DelveResult<usize> {
        if room.x2 - room.x1 < 2 || room.y2 - room.y1 < 2 {
            return Ok(0);
        }

        let count = rng.gen_range(0..=max_monsters);
        let mut placed = 0;
        for _ in 0..count {
            let x = rng.gen_range(room.x1 + 1..=room.x2 - 1);
            let y = rng.gen_range(room.y1 + 1..=room.y2 - 1);
            let pos = Position::new(x, y);

            if map.entities().iter().any(|entity| entity.position() == pos) {
                debug!("Monster roll at ({}, {}) hit an occupied cell", x, y);
                continue;
            }

            let monster = if rng.gen_bool(self.orc_chance.clamp(0.0, 1.0)) {
                Entity::orc(pos)
            } else {
                Entity::troll(pos)
            };
            map.place_entity(monster)?;
            placed += 1;
        }
        Ok(placed)
    }
}
