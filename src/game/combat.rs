//! # Combat
//!
//! Attack resolution and damage application. Everything these functions touch
//! is passed in explicitly: the two combatants, the player's id (for message
//! wording and colour), and the message log.

use crate::game::colors::{ENEMY_ATK, ENEMY_DIE, PLAYER_ATK, PLAYER_DIE};
use crate::game::entities::{Death, Entity};
use crate::game::messages::MessageLog;
use crate::game::EntityId;
use log::debug;

/// What happened when one actor attacked another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackOutcome {
    /// Damage applied; 0 for a miss
    pub damage: i32,
    /// Set when the defender died from this attack
    pub death: Option<Death>,
}

impl AttackOutcome {
    pub fn is_miss(&self) -> bool {
        self.damage == 0
    }
}

/// Resolves a melee attack: `damage = attacker.power - defender.defense`,
/// applied only when positive. Returns `None` if either side has no fighter.
pub fn resolve_attack(
    attacker: &Entity,
    defender: &mut Entity,
    player_id: EntityId,
    log: &mut MessageLog,
) -> Option<AttackOutcome> {
    let power = attacker.fighter()?.power;
    let defense = defender.fighter()?.defense;
    let damage = power - defense;

    let description = format!("{} attacks {}", capitalize(&attacker.name), defender.name);
    let color = if attacker.id() == player_id {
        PLAYER_ATK
    } else {
        ENEMY_ATK
    };
    debug!(
        "{} (power {}) vs {} (defense {}): {} damage",
        attacker.name, power, defender.name, defense, damage
    );

    if damage > 0 {
        log.add(
            format!("{} for {} hit points.", description, damage),
            color,
            true,
        );
        let death = apply_damage(defender, damage, player_id, log);
        Some(AttackOutcome { damage, death })
    } else {
        log.add(format!("{} but does no damage.", description), color, true);
        Some(AttackOutcome {
            damage: 0,
            death: None,
        })
    }
}

/// Applies damage and, if it kills, writes the death message.
pub fn apply_damage(
    target: &mut Entity,
    amount: i32,
    player_id: EntityId,
    log: &mut MessageLog,
) -> Option<Death> {
    let death = target.take_damage(amount)?;
    if target.id() == player_id {
        log.add("You died!", PLAYER_DIE, true);
    } else {
        log.add(format!("{} is dead!", death.name), ENEMY_DIE, true);
    }
    Some(death)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::Fighter;
    use crate::game::Position;

    fn hero(power: i32) -> Entity {
        Entity::player("player", Position::new(1, 1), Fighter::new(30, 2, power))
    }

    #[test]
    fn test_hit_reduces_hp_and_logs() {
        let player = hero(5);
        let mut orc = Entity::orc(Position::new(2, 1));
        let mut log = MessageLog::new();

        let outcome = resolve_attack(&player, &mut orc, player.id(), &mut log).unwrap();

        assert_eq!(outcome.damage, 5);
        assert!(outcome.death.is_none());
        assert_eq!(orc.fighter().unwrap().hp(), 5);
        let message = log.last().unwrap();
        assert_eq!(message.plain_text, "Player attacks Orc for 5 hit points.");
        assert_eq!(message.color, PLAYER_ATK);
    }

    #[test]
    fn test_equal_power_and_defense_is_a_miss() {
        let attacker = Entity::actor(
            "goblin",
            'g',
            ENEMY_ATK,
            Position::new(0, 0),
            Fighter::new(5, 0, 5),
            crate::game::entities::Ai::Hostile(Default::default()),
        );
        let mut defender = Entity::player("Hero", Position::new(1, 0), Fighter::new(30, 5, 5));
        let defender_id = defender.id();
        let mut log = MessageLog::new();

        let outcome = resolve_attack(&attacker, &mut defender, defender_id, &mut log).unwrap();

        assert!(outcome.is_miss());
        assert_eq!(defender.fighter().unwrap().hp(), 30);
        let message = log.last().unwrap();
        assert_eq!(message.plain_text, "Goblin attacks Hero but does no damage.");
        assert_eq!(message.color, ENEMY_ATK);
    }

    #[test]
    fn test_killing_blow_logs_death() {
        let player = hero(20);
        let mut orc = Entity::orc(Position::new(2, 1));
        let mut log = MessageLog::new();

        let outcome = resolve_attack(&player, &mut orc, player.id(), &mut log).unwrap();

        assert_eq!(outcome.death.map(|d| d.name), Some("Orc".to_string()));
        assert_eq!(log.last().unwrap().plain_text, "Orc is dead!");
        assert_eq!(log.last().unwrap().color, ENEMY_DIE);
        assert_eq!(orc.name, "remains of Orc");
    }

    #[test]
    fn test_player_death_message() {
        let mut player = hero(5);
        let player_id = player.id();
        let mut log = MessageLog::new();

        let death = apply_damage(&mut player, 100, player_id, &mut log);
        assert!(death.is_some());
        assert_eq!(log.last().unwrap().plain_text, "You died!");
        assert_eq!(log.last().unwrap().color, PLAYER_DIE);

        assert!(apply_damage(&mut player, 100, player_id, &mut log).is_none());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_items_cannot_fight() {
        let player = hero(5);
        let mut item = Entity::item("Scroll", '?', PLAYER_ATK, Position::new(0, 0));
        let mut log = MessageLog::new();
        assert!(resolve_attack(&player, &mut item, player.id(), &mut log).is_none());
        assert!(log.is_empty());
    }
}
