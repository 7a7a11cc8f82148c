//! # World Representation
//!
//! The tile registry and the `GameMap`: a row-major tile grid, the
//! `visible`/`explored` grids maintained by the field-of-view engine, and the
//! entities standing on the map.

use crate::game::colors::{Rgb, BLACK, WHITE};
use crate::game::entities::Entity;
use crate::game::{EntityId, Position};
use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};

/// How a single cell is drawn: a character with foreground and background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glyph {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Glyph {
    pub const fn new(ch: char, fg: Rgb, bg: Rgb) -> Self {
        Self { ch, fg, bg }
    }
}

/// Appearance of cells that have never been seen.
pub const SHROUD: Glyph = Glyph::new(' ', WHITE, BLACK);

/// Static properties of a tile kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub walkable: bool,
    pub transparent: bool,
    /// Seen before but not currently in view
    pub dark: Glyph,
    /// Currently in view
    pub light: Glyph,
}

const FLOOR: Tile = Tile {
    walkable: true,
    transparent: true,
    dark: Glyph::new(' ', WHITE, Rgb(50, 50, 150)),
    light: Glyph::new(' ', WHITE, Rgb(200, 180, 50)),
};

const WALL: Tile = Tile {
    walkable: false,
    transparent: false,
    dark: Glyph::new(' ', WHITE, Rgb(0, 0, 100)),
    light: Glyph::new(' ', WHITE, Rgb(130, 110, 50)),
};

/// Tile kinds stored in the map grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Floor,
}

impl TileKind {
    /// Looks up the immutable tile definition for this kind.
    pub fn tile(self) -> &'static Tile {
        match self {
            TileKind::Wall => &WALL,
            TileKind::Floor => &FLOOR,
        }
    }

    pub fn is_walkable(self) -> bool {
        self.tile().walkable
    }

    pub fn is_transparent(self) -> bool {
        self.tile().transparent
    }
}

/// The chosen appearance of every cell, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSnapshot {
    pub width: i32,
    pub height: i32,
    cells: Vec<Glyph>,
}

impl RenderSnapshot {
    pub fn get(&self, x: i32, y: i32) -> Option<Glyph> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get((y * self.width + x) as usize).copied()
    }

    /// Rows of glyphs from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Glyph]> {
        self.cells.chunks(self.width.max(1) as usize)
    }
}

/// A single dungeon level and everything on it.
///
/// Grids are row-major: the cell `(x, y)` lives at index `y * width + x`.
#[derive(Debug, Clone)]
pub struct GameMap {
    pub width: i32,
    pub height: i32,
    tiles: Vec<TileKind>,
    visible: Vec<bool>,
    explored: Vec<bool>,
    entities: Vec<Entity>,
}

impl GameMap {
    /// Creates a map filled with walls, with nothing visible or explored.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{GameMap, TileKind};
    ///
    /// let map = GameMap::new(10, 8);
    /// assert!(map.in_bounds(9, 7));
    /// assert!(!map.in_bounds(10, 0));
    /// assert_eq!(map.tile_at(0, 0), Some(TileKind::Wall));
    /// ```
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let cells = (width * height) as usize;
        Self {
            width,
            height,
            tiles: vec![TileKind::Wall; cells],
            visible: vec![false; cells],
            explored: vec![false; cells],
            entities: Vec::new(),
        }
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        0 <= x && x < self.width && 0 <= y && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    pub fn tile_at(&self, x: i32, y: i32) -> Option<TileKind> {
        self.index(x, y).map(|idx| self.tiles[idx])
    }

    pub fn set_tile(&mut self, x: i32, y: i32, kind: TileKind) -> DelveResult<()> {
        let idx = self.index(x, y).ok_or(DelveError::OutOfBounds { x, y })?;
        self.tiles[idx] = kind;
        Ok(())
    }

    /// False outside the map or on a tile that cannot be walked on.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.tile_at(x, y).map(TileKind::is_walkable).unwrap_or(false)
    }

    /// False outside the map, so the edge of the world blocks sight.
    pub fn is_transparent(&self, x: i32, y: i32) -> bool {
        self.tile_at(x, y)
            .map(TileKind::is_transparent)
            .unwrap_or(false)
    }

    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map(|idx| self.visible[idx]).unwrap_or(false)
    }

    pub fn is_explored(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map(|idx| self.explored[idx]).unwrap_or(false)
    }

    pub fn visible(&self) -> &[bool] {
        &self.visible
    }

    pub fn explored(&self) -> &[bool] {
        &self.explored
    }

    /// Replaces the visibility grid and folds it into `explored`.
    /// `explored` only ever gains cells.
    pub(crate) fn apply_visibility(&mut self, visible: Vec<bool>) -> DelveResult<()> {
        if visible.len() != self.visible.len() {
            return Err(DelveError::InvalidState(format!(
                "visibility grid has {} cells, map has {}",
                visible.len(),
                self.visible.len()
            )));
        }
        for (explored, &seen) in self.explored.iter_mut().zip(&visible) {
            *explored |= seen;
        }
        self.visible = visible;
        Ok(())
    }

    /// Adds an entity to the map. Entities outside the bounds are rejected.
    pub fn place_entity(&mut self, entity: Entity) -> DelveResult<EntityId> {
        let pos = entity.position();
        if !self.in_bounds(pos.x, pos.y) {
            return Err(DelveError::OutOfBounds { x: pos.x, y: pos.y });
        }
        let id = entity.id();
        self.entities.push(entity);
        Ok(id)
    }

    /// Moves an entity to a new cell inside the map.
    pub fn move_entity(&mut self, id: EntityId, to: Position) -> DelveResult<()> {
        if !self.in_bounds(to.x, to.y) {
            return Err(DelveError::OutOfBounds { x: to.x, y: to.y });
        }
        let entity = self.entity_mut(id).ok_or(DelveError::EntityNotFound(id))?;
        entity.set_position(to);
        Ok(())
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id() == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id() == id)
    }

    /// Borrows two distinct entities mutably at once.
    pub fn entity_pair_mut(
        &mut self,
        first: EntityId,
        second: EntityId,
    ) -> Option<(&mut Entity, &mut Entity)> {
        let a = self.entities.iter().position(|e| e.id() == first)?;
        let b = self.entities.iter().position(|e| e.id() == second)?;
        if a == b {
            return None;
        }
        if a < b {
            let (left, right) = self.entities.split_at_mut(b);
            Some((&mut left[a], &mut right[0]))
        } else {
            let (left, right) = self.entities.split_at_mut(a);
            Some((&mut right[0], &mut left[b]))
        }
    }

    /// The first entity at `(x, y)` that blocks movement.
    pub fn blocking_entity_at(&self, x: i32, y: i32) -> Option<&Entity> {
        let target = Position::new(x, y);
        self.entities
            .iter()
            .find(|entity| entity.blocks_movement && entity.position() == target)
    }

    /// The first living actor at `(x, y)`.
    pub fn actor_at(&self, x: i32, y: i32) -> Option<&Entity> {
        let target = Position::new(x, y);
        self.living_actors()
            .find(|entity| entity.position() == target)
    }

    /// Actors that still have their AI, in map order.
    pub fn living_actors(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|entity| entity.is_alive())
    }

    /// Entities sorted so that lower render orders come first. The sort is
    /// stable, so ties keep map order.
    pub fn entities_in_render_order(&self) -> Vec<&Entity> {
        let mut sorted: Vec<&Entity> = self.entities.iter().collect();
        sorted.sort_by_key(|entity| entity.render_order);
        sorted
    }

    /// Per-cell appearance: light tiles in view, dark tiles explored, shroud
    /// elsewhere; visible entities drawn over the top in render order.
    pub fn render_snapshot(&self) -> RenderSnapshot {
        let mut cells: Vec<Glyph> = self
            .tiles
            .iter()
            .enumerate()
            .map(|(idx, kind)| {
                if self.visible[idx] {
                    kind.tile().light
                } else if self.explored[idx] {
                    kind.tile().dark
                } else {
                    SHROUD
                }
            })
            .collect();

        for entity in self.entities_in_render_order() {
            let pos = entity.position();
            if let Some(idx) = self.index(pos.x, pos.y) {
                if self.visible[idx] {
                    cells[idx].ch = entity.glyph;
                    cells[idx].fg = entity.color;
                }
            }
        }

        RenderSnapshot {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Counts cells of the given kind.
    pub fn count_tiles(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|&&tile| tile == kind).count()
    }
}
