//! # Entities
//!
//! Everything that can occupy a map cell: the player, monsters, items, and the
//! corpses monsters leave behind. Capabilities are expressed as a sum type so
//! that "has AI" and "is alive" are the same fact.

use crate::game::ai::HostileEnemy;
use crate::game::colors::{Rgb, CORPSE, ORC, TROLL, WHITE};
use crate::game::{new_entity_id, EntityId, Position};
use serde::{Deserialize, Serialize};

/// Draw priority when several entities share a cell. Lower values draw first,
/// so the highest value is what ends up visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RenderOrder {
    Corpse,
    Item,
    Actor,
}

/// Combat statistics attached to an actor.
///
/// `hp` is private: every write goes through clamping so that
/// `0 <= hp <= max_hp` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fighter {
    pub max_hp: i32,
    hp: i32,
    pub defense: i32,
    pub power: i32,
}

impl Fighter {
    /// Creates a fighter at full health.
    pub fn new(hp: i32, defense: i32, power: i32) -> Self {
        let max_hp = hp.max(0);
        Self {
            max_hp,
            hp: max_hp,
            defense,
            power,
        }
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    /// Sets hp, clamped into `[0, max_hp]`.
    pub fn set_hp(&mut self, value: i32) {
        self.hp = value.min(self.max_hp).max(0);
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.set_hp(self.hp.saturating_sub(amount));
    }

    /// Restores up to `amount` hp and returns how much was actually recovered.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::Fighter;
    ///
    /// let mut fighter = Fighter::new(10, 0, 3);
    /// assert_eq!(fighter.heal(5), 0);
    /// fighter.take_damage(4);
    /// assert_eq!(fighter.heal(10), 4);
    /// assert_eq!(fighter.hp(), 10);
    /// ```
    pub fn heal(&mut self, amount: i32) -> i32 {
        if self.hp == self.max_hp || amount <= 0 {
            return 0;
        }
        let before = self.hp;
        self.set_hp(self.hp.saturating_add(amount));
        self.hp - before
    }
}

/// Behaviour driving an actor's turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ai {
    /// Turns come from player input; the engine never runs this one.
    PlayerControlled,
    /// Chases and attacks the player.
    Hostile(HostileEnemy),
}

/// A combat-capable entity. `ai` is `None` once the actor has died.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub fighter: Fighter,
    pub ai: Option<Ai>,
}

impl Actor {
    pub fn is_alive(&self) -> bool {
        self.ai.is_some()
    }
}

/// Capability variant of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKind {
    Item,
    Actor(Actor),
}

/// Report produced when an actor dies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Death {
    /// The name the actor had before it became "remains of ...".
    pub name: String,
}

/// Anything that occupies a map cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    id: EntityId,
    position: Position,
    pub glyph: char,
    pub color: Rgb,
    pub name: String,
    pub blocks_movement: bool,
    pub render_order: RenderOrder,
    pub kind: EntityKind,
}

impl Entity {
    /// Creates an item-like entity that does not block movement.
    pub fn item(name: impl Into<String>, glyph: char, color: Rgb, position: Position) -> Self {
        Self {
            id: new_entity_id(),
            position,
            glyph,
            color,
            name: name.into(),
            blocks_movement: false,
            render_order: RenderOrder::Item,
            kind: EntityKind::Item,
        }
    }

    /// Creates a blocking actor with the given stats and behaviour.
    pub fn actor(
        name: impl Into<String>,
        glyph: char,
        color: Rgb,
        position: Position,
        fighter: Fighter,
        ai: Ai,
    ) -> Self {
        Self {
            id: new_entity_id(),
            position,
            glyph,
            color,
            name: name.into(),
            blocks_movement: true,
            render_order: RenderOrder::Actor,
            kind: EntityKind::Actor(Actor {
                fighter,
                ai: Some(ai),
            }),
        }
    }

    pub fn player(name: impl Into<String>, position: Position, fighter: Fighter) -> Self {
        Self::actor(name, '@', WHITE, position, fighter, Ai::PlayerControlled)
    }

    pub fn orc(position: Position) -> Self {
        Self::actor(
            "Orc",
            'o',
            ORC,
            position,
            Fighter::new(10, 0, 3),
            Ai::Hostile(HostileEnemy::new()),
        )
    }

    pub fn troll(position: Position) -> Self {
        Self::actor(
            "Troll",
            'T',
            TROLL,
            position,
            Fighter::new(16, 1, 4),
            Ai::Hostile(HostileEnemy::new()),
        )
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Moves the entity without any checks. Bounds are enforced by `GameMap`.
    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn actor_data(&self) -> Option<&Actor> {
        match &self.kind {
            EntityKind::Actor(actor) => Some(actor),
            EntityKind::Item => None,
        }
    }

    pub fn actor_data_mut(&mut self) -> Option<&mut Actor> {
        match &mut self.kind {
            EntityKind::Actor(actor) => Some(actor),
            EntityKind::Item => None,
        }
    }

    pub fn fighter(&self) -> Option<&Fighter> {
        self.actor_data().map(|actor| &actor.fighter)
    }

    pub fn is_actor(&self) -> bool {
        matches!(self.kind, EntityKind::Actor(_))
    }

    /// An entity is alive iff it is an actor that still has its AI.
    pub fn is_alive(&self) -> bool {
        self.actor_data().map(Actor::is_alive).unwrap_or(false)
    }

    /// Sets hp through the clamping setter and runs death processing if hp
    /// reached zero while the actor still had AI. Returns the death report
    /// exactly once; later calls on the corpse return `None`.
    pub fn set_hp(&mut self, value: i32) -> Option<Death> {
        let actor = self.actor_data_mut()?;
        actor.fighter.set_hp(value);
        if actor.fighter.hp() == 0 && actor.ai.is_some() {
            Some(self.die())
        } else {
            None
        }
    }

    pub fn take_damage(&mut self, amount: i32) -> Option<Death> {
        let hp = self.fighter()?.hp();
        self.set_hp(hp.saturating_sub(amount))
    }

    /// Heals a living actor. Corpses and items recover nothing.
    pub fn heal(&mut self, amount: i32) -> i32 {
        match self.actor_data_mut() {
            Some(actor) if actor.is_alive() => actor.fighter.heal(amount),
            _ => 0,
        }
    }

    fn die(&mut self) -> Death {
        let name = std::mem::take(&mut self.name);
        self.glyph = '%';
        self.color = CORPSE;
        self.blocks_movement = false;
        if let Some(actor) = self.actor_data_mut() {
            actor.ai = None;
        }
        self.name = format!("remains of {}", name);
        self.render_order = RenderOrder::Corpse;
        Death { name }
    }
}
