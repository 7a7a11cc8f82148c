//! # Display Management
//!
//! Draws the engine's render snapshot, the player's status and the tail of
//! the message log with macroquad.

use crate::game::{Engine, Entity, Rgb};
use macroquad::prelude::*;

/// Macroquad display manager for the game.
#[derive(Debug, Clone)]
pub struct MacroquadDisplay {
    /// Tile size in pixels
    pub tile_size: f32,
    /// Font size for glyphs and text
    pub font_size: f32,
    /// Number of log lines shown under the map
    pub message_lines: usize,
}

impl MacroquadDisplay {
    pub fn new(message_lines: usize) -> Self {
        Self {
            tile_size: 16.0,
            font_size: 18.0,
            message_lines,
        }
    }

    /// Window size that fits a map of the given dimensions plus the panel.
    pub fn window_size(&self, map_width: i32, map_height: i32) -> (f32, f32) {
        let panel = (self.message_lines as f32 + 2.0) * self.font_size;
        (
            map_width as f32 * self.tile_size,
            map_height as f32 * self.tile_size + panel,
        )
    }

    /// Draws one frame.
    pub fn render(&self, engine: &Engine) {
        clear_background(BLACK);
        self.render_map(engine);
        self.render_panel(engine);
    }

    fn render_map(&self, engine: &Engine) {
        let snapshot = engine.map.render_snapshot();
        for (y, row) in snapshot.rows().enumerate() {
            for (x, glyph) in row.iter().enumerate() {
                let px = x as f32 * self.tile_size;
                let py = y as f32 * self.tile_size;
                draw_rectangle(px, py, self.tile_size, self.tile_size, to_color(glyph.bg));
                if glyph.ch != ' ' {
                    draw_text(
                        &glyph.ch.to_string(),
                        px + self.tile_size * 0.2,
                        py + self.tile_size * 0.85,
                        self.font_size,
                        to_color(glyph.fg),
                    );
                }
            }
        }
    }

    fn render_panel(&self, engine: &Engine) {
        let mut line_y = engine.map.height as f32 * self.tile_size + self.font_size;

        if let Some(fighter) = engine.player().and_then(Entity::fighter) {
            draw_text(
                &format!("HP: {}/{}", fighter.hp(), fighter.max_hp),
                4.0,
                line_y,
                self.font_size,
                WHITE,
            );
        }
        if engine.is_game_over() {
            draw_text(
                "Press Escape to quit.",
                160.0,
                line_y,
                self.font_size,
                RED,
            );
        }
        line_y += self.font_size;

        for message in engine.log.recent(self.message_lines) {
            draw_text(
                &message.full_text(),
                4.0,
                line_y,
                self.font_size,
                to_color(message.color),
            );
            line_y += self.font_size;
        }
    }
}

impl Default for MacroquadDisplay {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MESSAGE_LOG_LINES)
    }
}

/// Converts a game colour to a macroquad colour.
pub fn to_color(rgb: Rgb) -> Color {
    Color::from_rgba(rgb.0, rgb.1, rgb.2, 255)
}
