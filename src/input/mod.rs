//! # Input Module
//!
//! Keyboard handling: maps macroquad key presses to [`PlayerInput`] and
//! player input to engine [`Action`]s.

use crate::game::{Action, Direction};
use macroquad::prelude::*;

/// Movement bindings: arrows, the navigation block, vi keys and the keypad.
const MOVE_KEYS: [(KeyCode, Direction); 28] = [
    (KeyCode::Up, Direction::North),
    (KeyCode::Down, Direction::South),
    (KeyCode::Left, Direction::West),
    (KeyCode::Right, Direction::East),
    (KeyCode::Home, Direction::Northwest),
    (KeyCode::End, Direction::Southwest),
    (KeyCode::PageUp, Direction::Northeast),
    (KeyCode::PageDown, Direction::Southeast),
    (KeyCode::K, Direction::North),
    (KeyCode::J, Direction::South),
    (KeyCode::H, Direction::West),
    (KeyCode::L, Direction::East),
    (KeyCode::Y, Direction::Northwest),
    (KeyCode::U, Direction::Northeast),
    (KeyCode::B, Direction::Southwest),
    (KeyCode::N, Direction::Southeast),
    (KeyCode::Kp8, Direction::North),
    (KeyCode::Kp2, Direction::South),
    (KeyCode::Kp4, Direction::West),
    (KeyCode::Kp6, Direction::East),
    (KeyCode::Kp7, Direction::Northwest),
    (KeyCode::Kp9, Direction::Northeast),
    (KeyCode::Kp1, Direction::Southwest),
    (KeyCode::Kp3, Direction::Southeast),
    (KeyCode::W, Direction::North),
    (KeyCode::S, Direction::South),
    (KeyCode::A, Direction::West),
    (KeyCode::D, Direction::East),
];

const WAIT_KEYS: [KeyCode; 3] = [KeyCode::Period, KeyCode::Space, KeyCode::Kp5];

/// Player input recognised by the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Step (or attack) in a direction
    Move(Direction),
    /// Pass the turn
    Wait,
    /// Leave the game
    Quit,
}

/// Translates key presses into game actions.
#[derive(Debug, Clone, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Action, InputHandler, PlayerInput};
    ///
    /// let input_handler = InputHandler::new();
    /// assert_eq!(input_handler.input_to_action(PlayerInput::Wait), Action::Wait);
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// The input for the first bound key pressed this frame, if any.
    pub fn get_input(&self) -> Option<PlayerInput> {
        get_keys_pressed()
            .into_iter()
            .find_map(|key| self.input_for_key(key))
    }

    /// Looks up the binding for a single key.
    pub fn input_for_key(&self, key: KeyCode) -> Option<PlayerInput> {
        if key == KeyCode::Escape {
            return Some(PlayerInput::Quit);
        }
        if WAIT_KEYS.contains(&key) {
            return Some(PlayerInput::Wait);
        }
        MOVE_KEYS
            .iter()
            .find(|(bound, _)| *bound == key)
            .map(|&(_, direction)| PlayerInput::Move(direction))
    }

    /// Converts player input to the action the engine should perform.
    pub fn input_to_action(&self, input: PlayerInput) -> Action {
        match input {
            PlayerInput::Move(direction) => Action::step(direction),
            PlayerInput::Wait => Action::Wait,
            PlayerInput::Quit => Action::Escape,
        }
    }
}
