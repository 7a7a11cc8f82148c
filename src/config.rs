//! # Configuration
//!
//! Game constants and the JSON-loadable [`GameConfig`].

use crate::generation::GenerationConfig;
use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default map width in tiles
pub const DEFAULT_MAP_WIDTH: i32 = 80;

/// Default map height in tiles
pub const DEFAULT_MAP_HEIGHT: i32 = 45;

/// Default largest room side
pub const DEFAULT_ROOM_MAX_SIZE: i32 = 10;

/// Default smallest room side
pub const DEFAULT_ROOM_MIN_SIZE: i32 = 6;

/// Default number of room placement attempts
pub const DEFAULT_MAX_ROOMS: u32 = 30;

/// Default cap on monsters per room
pub const DEFAULT_MAX_MONSTERS_PER_ROOM: u32 = 2;

/// Default player sight radius
pub const DEFAULT_FOV_RADIUS: i32 = 8;

/// Log lines shown under the map
pub const DEFAULT_MESSAGE_LOG_LINES: usize = 5;

/// Largest accepted map side. Keeps cell counts and squared distances
/// within `i32`.
pub const MAX_MAP_DIMENSION: i32 = 1000;

/// Largest accepted sight radius
pub const MAX_FOV_RADIUS: i32 = 1000;


/// Starting stats of the player character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub name: String,
    pub hp: i32,
    pub defense: i32,
    pub power: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: "Player".to_string(),
            hp: 30,
            defense: 2,
            power: 5,
        }
    }
}

/// Everything needed to start a game. Missing fields take their defaults, so
/// a config file only has to name what it changes.
///
/// # Examples
///
/// ```
/// use delve::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{"fov_radius": 5}"#).unwrap();
/// assert_eq!(config.fov_radius, 5);
/// assert_eq!(config.player.hp, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub generation: GenerationConfig,
    pub player: PlayerConfig,
    pub fov_radius: i32,
    pub message_log_lines: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            player: PlayerConfig::default(),
            fov_radius: DEFAULT_FOV_RADIUS,
            message_log_lines: DEFAULT_MESSAGE_LOG_LINES,
        }
    }
}

impl GameConfig {
    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> DelveResult<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Writes the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> DelveResult<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), text)?;
        Ok(())
    }

    pub fn validate(&self) -> DelveResult<()> {
        self.generation.validate()?;
        if !(0..=MAX_FOV_RADIUS).contains(&self.fov_radius) {
            return Err(DelveError::InvalidConfig(format!(
                "fov_radius must be between 0 and {}, got {}",
                MAX_FOV_RADIUS, self.fov_radius
            )));
        }
        if self.player.hp <= 0 {
            return Err(DelveError::InvalidConfig(format!(
                "player hp must be positive, got {}",
                self.player.hp
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fov_radius, 8);
        assert_eq!(config.player, PlayerConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("delve.json");

        let mut config = GameConfig::default();
        config.generation.seed = 1234;
        config.player.name = "Tester".to_string();
        config.save(&path).unwrap();

        let loaded = GameConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"player": {"hp": 0}}"#).unwrap();

        assert!(matches!(
            GameConfig::load(&path),
            Err(DelveError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_oversized_radius_or_map_is_rejected() {
        let config = GameConfig {
            fov_radius: 50_000,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(DelveError::InvalidConfig(_))));

        let mut config = GameConfig::default();
        config.generation.map_width = 100_000;
        assert!(matches!(config.validate(), Err(DelveError::InvalidConfig(_))));

        let config = GameConfig {
            fov_radius: MAX_FOV_RADIUS,
            ..GameConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_reports_parse_and_io_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(GameConfig::load(&path), Err(DelveError::Serde(_))));
        assert!(matches!(
            GameConfig::load(dir.path().join("missing.json")),
            Err(DelveError::Io(_))
        ));
    }
}
