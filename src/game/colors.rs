//! # Colours
//!
//! RGB colour type and the palette shared by tiles, entities and messages.

use serde::{Deserialize, Serialize};

/// A 24-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);
pub const BLACK: Rgb = Rgb(0x0, 0x0, 0x0);

pub const PLAYER_ATK: Rgb = Rgb(0xE0, 0xE0, 0xE0);
pub const ENEMY_ATK: Rgb = Rgb(0xFF, 0xC0, 0xC0);

pub const PLAYER_DIE: Rgb = Rgb(0xFF, 0x30, 0x30);
pub const ENEMY_DIE: Rgb = Rgb(0xFF, 0xA0, 0x30);

pub const WELCOME_TEXT: Rgb = Rgb(0x20, 0xA0, 0xFF);
pub const ERROR_TEXT: Rgb = Rgb(0xFF, 0x40, 0x40);

pub const CORPSE: Rgb = Rgb(191, 0, 0);
pub const ORC: Rgb = Rgb(63, 127, 63);
pub const TROLL: Rgb = Rgb(0, 127, 0);
