//! # Engine
//!
//! The turn engine: owns the current map, the player's id and the message
//! log, and drives the cycle of player action, field-of-view update and enemy
//! turns.
//!
//! The engine is an explicit state machine. Player input is only accepted in
//! [`EngineState::AwaitingPlayerInput`]; each accepted action passes through
//! [`EngineState::ProcessingPlayerAction`] and, if it spent a turn,
//! [`EngineState::EnemyTurn`] before returning to waiting for input. Once the
//! player dies the engine settles in [`EngineState::GameOver`] and only
//! accepts a request to quit.

use crate::config::GameConfig;
use crate::game::actions::{Action, ActionOutcome};
use crate::game::colors::WELCOME_TEXT;
use crate::game::entities::{Ai, Entity, Fighter};
use crate::game::fov;
use crate::game::messages::MessageLog;
use crate::game::world::GameMap;
use crate::game::{EntityId, Position};
use crate::generation::DungeonGenerator;
use crate::{DelveError, DelveResult};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Greeting written to the log when a new game starts.
pub const WELCOME_MESSAGE: &str = "Hello and welcome, adventurer, to yet another dungeon!";

/// Where the engine is in the turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineState {
    AwaitingPlayerInput,
    ProcessingPlayerAction,
    EnemyTurn,
    GameOver,
}

/// What a call to [`Engine::handle_action`] amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The player asked to quit
    Quit,
    /// The action was rejected; no turn passed
    NoTurn,
    /// The player acted and every enemy took its turn
    TurnTaken,
    /// Input arrived while the game was over and was ignored
    Ignored,
}

/// Running totals for the current game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Enemies killed by the player
    pub enemies_defeated: u32,
    /// Damage dealt by the player
    pub damage_dealt: u64,
    /// Damage the player received
    pub damage_taken: u64,
    /// Successful player moves
    pub steps_taken: u64,
}

/// The turn engine.
#[derive(Debug, Clone)]
pub struct Engine {
    /// The current level and everything on it
    pub map: GameMap,
    /// Narrative log shown to the player
    pub log: MessageLog,
    /// Totals kept for the status display
    pub statistics: GameStatistics,
    player_id: EntityId,
    state: EngineState,
    fov_radius: i32,
    turn_number: u64,
}

impl Engine {
    /// Wraps an existing map whose entities include the player.
    ///
    /// Field of view is computed immediately so the first frame already shows
    /// the player's surroundings.
    pub fn new(map: GameMap, player_id: EntityId, fov_radius: i32) -> DelveResult<Self> {
        let player = map
            .entity(player_id)
            .ok_or(DelveError::EntityNotFound(player_id))?;
        if !player.is_alive() {
            return Err(DelveError::InvalidState(
                "the player must be a living actor".to_string(),
            ));
        }

        let mut engine = Self {
            map,
            log: MessageLog::new(),
            statistics: GameStatistics::default(),
            player_id,
            state: EngineState::AwaitingPlayerInput,
            fov_radius: fov_radius.max(0),
            turn_number: 0,
        };
        engine.update_fov()?;
        Ok(engine)
    }

    /// Generates a fresh dungeon from `config` and starts a game in it.
    pub fn new_game(config: &GameConfig, rng: &mut StdRng) -> DelveResult<Self> {
        config.validate()?;

        let player = Entity::player(
            config.player.name.clone(),
            Position::new(0, 0),
            Fighter::new(config.player.hp, config.player.defense, config.player.power),
        );
        let player_id = player.id();
        let map = DungeonGenerator::new().generate_dungeon(&config.generation, player, rng)?;

        let mut engine = Self::new(map, player_id, config.fov_radius)?;
        engine.log.add(WELCOME_MESSAGE, WELCOME_TEXT, true);
        info!(
            "New game: {}x{} map, {} entities",
            engine.map.width,
            engine.map.height,
            engine.map.entities().len()
        );
        Ok(engine)
    }

    pub fn player_id(&self) -> EntityId {
        self.player_id
    }

    pub fn player(&self) -> Option<&Entity> {
        self.map.entity(self.player_id)
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == EngineState::GameOver
    }

    pub fn fov_radius(&self) -> i32 {
        self.fov_radius
    }

    /// Completed turns since the game started.
    pub fn turn_number(&self) -> u64 {
        self.turn_number
    }

    /// Recomputes visibility around the player.
    pub fn update_fov(&mut self) -> DelveResult<()> {
        let origin = self
            .player()
            .ok_or(DelveError::EntityNotFound(self.player_id))?
            .position();
        fov::recompute(&mut self.map, origin, self.fov_radius)
    }

    /// Runs one player action and, if it spent a turn, the enemy phase.
    ///
    /// On error the engine returns to waiting for input (or to the game-over
    /// state if the player is dead), so the caller can report the error and
    /// keep going.
    pub fn handle_action(&mut self, action: Action) -> DelveResult<TurnOutcome> {
        match self.state {
            EngineState::GameOver => {
                return Ok(if action == Action::Escape {
                    TurnOutcome::Quit
                } else {
                    TurnOutcome::Ignored
                });
            }
            EngineState::AwaitingPlayerInput => {}
            other => {
                return Err(DelveError::InvalidState(format!(
                    "cannot accept input while in {:?}",
                    other
                )));
            }
        }

        let result = self.run_turn(action);
        if let Err(error) = &result {
            warn!("Turn aborted: {}", error);
            self.state = if self.player_alive() {
                EngineState::AwaitingPlayerInput
            } else {
                EngineState::GameOver
            };
        }
        result
    }

    fn run_turn(&mut self, action: Action) -> DelveResult<TurnOutcome> {
        self.state = EngineState::ProcessingPlayerAction;
        debug!("Turn {}: player {:?}", self.turn_number, action);

        let player_id = self.player_id;
        match action.perform(self, player_id)? {
            ActionOutcome::Quit => {
                self.state = EngineState::AwaitingPlayerInput;
                return Ok(TurnOutcome::Quit);
            }
            ActionOutcome::Rejected => {
                self.state = EngineState::AwaitingPlayerInput;
                return Ok(TurnOutcome::NoTurn);
            }
            ActionOutcome::Performed { moved } => {
                if moved {
                    self.update_fov()?;
                }
            }
        }

        if !self.check_player_alive() {
            self.turn_number += 1;
            return Ok(TurnOutcome::TurnTaken);
        }

        self.state = EngineState::EnemyTurn;
        self.handle_enemy_turns()?;
        self.turn_number += 1;

        if self.check_player_alive() {
            self.state = EngineState::AwaitingPlayerInput;
        }
        Ok(TurnOutcome::TurnTaken)
    }

    /// Gives every living hostile actor one turn, in map order. Stops early
    /// if the player dies.
    pub fn handle_enemy_turns(&mut self) -> DelveResult<()> {
        let enemies: Vec<EntityId> = self
            .map
            .living_actors()
            .filter(|entity| entity.id() != self.player_id)
            .map(Entity::id)
            .collect();

        for id in enemies {
            let target = self
                .player()
                .ok_or(DelveError::EntityNotFound(self.player_id))?
                .position();

            let (position, mut brain) = match self.map.entity_mut(id) {
                Some(entity) => {
                    let position = entity.position();
                    match entity.actor_data_mut().and_then(|actor| actor.ai.as_mut()) {
                        Some(Ai::Hostile(brain)) => (position, std::mem::take(brain)),
                        _ => continue,
                    }
                }
                None => continue,
            };

            let action = brain.plan(&self.map, position, target);

            if let Some(Ai::Hostile(slot)) = self
                .map
                .entity_mut(id)
                .and_then(Entity::actor_data_mut)
                .and_then(|actor| actor.ai.as_mut())
            {
                *slot = brain;
            }

            action.perform(self, id)?;

            if !self.check_player_alive() {
                break;
            }
        }
        Ok(())
    }

    fn player_alive(&self) -> bool {
        self.player().map(Entity::is_alive).unwrap_or(false)
    }

    /// Moves to the game-over state if the player has died.
    fn check_player_alive(&mut self) -> bool {
        if self.player_alive() {
            return true;
        }
        if self.state != EngineState::GameOver {
            info!(
                "Player died on turn {} after defeating {} enemies",
                self.turn_number, self.statistics.enemies_defeated
            );
            self.state = EngineState::GameOver;
        }
        false
    }
}
