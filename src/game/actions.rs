//! # Actions
//!
//! Everything an actor can do on its turn. Actions are plain values; the
//! engine hands them the acting entity's id and they validate against the
//! current map before changing anything, so a rejected action leaves the
//! world untouched.

use crate::game::combat::resolve_attack;
use crate::game::state::Engine;
use crate::game::{Direction, EntityId};
use crate::{DelveError, DelveResult};
use log::debug;
use serde::{Deserialize, Serialize};

/// An intent to act, relative to the actor's own position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// End the session
    Escape,
    /// Do nothing; still consumes the turn
    Wait,
    /// Step by `(dx, dy)`, attacking instead if a living actor is in the way
    Move { dx: i32, dy: i32 },
    /// Attack whatever living actor stands at `(dx, dy)`
    Melee { dx: i32, dy: i32 },
}

/// Result of performing an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action was not possible; nothing changed and no turn is spent
    Rejected,
    /// The action happened; `moved` is set when the actor changed cells
    Performed { moved: bool },
    /// The actor asked to leave the game
    Quit,
}

impl Action {
    /// A one-step move in the given direction.
    pub fn step(direction: Direction) -> Self {
        let delta = direction.to_delta();
        Action::Move {
            dx: delta.x,
            dy: delta.y,
        }
    }

    /// Performs the action for `actor`.
    ///
    /// Errors are reserved for broken invariants such as an unknown actor id;
    /// ordinary impossibilities come back as [`ActionOutcome::Rejected`].
    pub fn perform(self, engine: &mut Engine, actor: EntityId) -> DelveResult<ActionOutcome> {
        match self {
            Action::Escape => Ok(ActionOutcome::Quit),
            Action::Wait => Ok(ActionOutcome::Performed { moved: false }),
            Action::Move { dx, dy } => perform_move(engine, actor, dx, dy),
            Action::Melee { dx, dy } => perform_melee(engine, actor, dx, dy),
        }
    }
}

fn perform_move(
    engine: &mut Engine,
    actor: EntityId,
    dx: i32,
    dy: i32,
) -> DelveResult<ActionOutcome> {
    let entity = engine
        .map
        .entity(actor)
        .ok_or(DelveError::EntityNotFound(actor))?;
    let destination = entity.position().offset(dx, dy);

    if !engine.map.in_bounds(destination.x, destination.y) {
        debug!("{} cannot leave the map", entity.name);
        return Ok(ActionOutcome::Rejected);
    }
    if !engine.map.is_walkable(destination.x, destination.y) {
        debug!("{} bumps into a wall", entity.name);
        return Ok(ActionOutcome::Rejected);
    }
    if let Some(blocker) = engine.map.blocking_entity_at(destination.x, destination.y) {
        if blocker.is_alive() && blocker.id() != actor {
            return perform_melee(engine, actor, dx, dy);
        }
        return Ok(ActionOutcome::Rejected);
    }

    engine.map.move_entity(actor, destination)?;
    if actor == engine.player_id() {
        engine.statistics.steps_taken += 1;
    }
    Ok(ActionOutcome::Performed { moved: true })
}

fn perform_melee(
    engine: &mut Engine,
    actor: EntityId,
    dx: i32,
    dy: i32,
) -> DelveResult<ActionOutcome> {
    let origin = engine
        .map
        .entity(actor)
        .ok_or(DelveError::EntityNotFound(actor))?
        .position();
    let target = origin.offset(dx, dy);

    let target_id = match engine.map.actor_at(target.x, target.y) {
        Some(defender) if defender.id() != actor => defender.id(),
        _ => {
            debug!("Nothing to attack at ({}, {})", target.x, target.y);
            return Ok(ActionOutcome::Rejected);
        }
    };

    let player_id = engine.player_id();
    let (attacker, defender) = engine
        .map
        .entity_pair_mut(actor, target_id)
        .ok_or_else(|| DelveError::InvalidState("attacker and target overlap".to_string()))?;
    let outcome = match resolve_attack(attacker, defender, player_id, &mut engine.log) {
        Some(outcome) => outcome,
        None => return Ok(ActionOutcome::Rejected),
    };

    if actor == player_id {
        engine.statistics.damage_dealt += outcome.damage as u64;
        if outcome.death.is_some() {
            engine.statistics.enemies_defeated += 1;
        }
    } else if target_id == player_id {
        engine.statistics.damage_taken += outcome.damage as u64;
    }

    Ok(ActionOutcome::Performed { moved: false })
}
