//! # Rendering Module
//!
//! The macroquad frontend plus a plain-text map dump for headless use.

pub mod display;

pub use display::*;

use crate::game::{GameMap, TileKind};

/// Renders the whole map as text, ignoring visibility: `#` for wall, `.` for
/// floor, with each cell's top entity glyph drawn over it.
///
/// # Examples
///
/// ```
/// use delve::{ascii_dump, GameMap, TileKind};
///
/// let mut map = GameMap::new(3, 1);
/// map.set_tile(1, 0, TileKind::Floor).unwrap();
/// assert_eq!(ascii_dump(&map), "#.#\n");
/// ```
pub fn ascii_dump(map: &GameMap) -> String {
    let width = map.width.max(0) as usize;
    let mut rows: Vec<Vec<char>> = (0..map.height)
        .map(|y| {
            (0..map.width)
                .map(|x| match map.tile_at(x, y) {
                    Some(TileKind::Floor) => '.',
                    _ => '#',
                })
                .collect()
        })
        .collect();

    for entity in map.entities_in_render_order() {
        let pos = entity.position();
        if map.in_bounds(pos.x, pos.y) {
            rows[pos.y as usize][pos.x as usize] = entity.glyph;
        }
    }

    let mut out = String::with_capacity((width + 1) * rows.len());
    for row in rows {
        out.extend(row);
        out.push('\n');
    }
    out
}
