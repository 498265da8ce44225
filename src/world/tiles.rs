//! World domain: the ground tile plus player-placed platforms.

use bevy::prelude::*;

use crate::world::geometry::WorldRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    /// Permanent, created once at startup
    Ground,
    /// Placed by the player at runtime, cleared on reset
    Placed,
}

#[derive(Debug, Clone)]
pub struct Tile {
    pub id: u32,
    pub rect: WorldRect,
    pub kind: TileKind,
    /// Transient landing glow, in ms since startup
    pub glow_until_ms: u64,
}

impl Tile {
    pub fn is_glowing(&self, now_ms: u64) -> bool {
        now_ms < self.glow_until_ms
    }
}

/// Index of the first tile containing `point`.
pub fn tile_at(tiles: &[Tile], point: Vec2) -> Option<usize> {
    tiles.iter().position(|t| t.rect.contains_point(point))
}

/// Ground tiles first, placed tiles after them in placement order.
#[derive(Debug, Clone)]
pub struct TileSet {
    tiles: Vec<Tile>,
    placed_size: Vec2,
    next_id: u32,
}

impl TileSet {
    pub fn new(ground: WorldRect, placed_size: Vec2) -> Self {
        Self {
            tiles: vec![Tile {
                id: 0,
                rect: ground,
                kind: TileKind::Ground,
                glow_until_ms: 0,
            }],
            placed_size,
            next_id: 1,
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn ground_top(&self) -> f32 {
        self.tiles
            .iter()
            .find(|t| t.kind == TileKind::Ground)
            .map(|t| t.rect.top())
            .unwrap_or(0.0)
    }

    /// Add a platform centered on `center`, returns its id.
    pub fn place(&mut self, center: Vec2) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.tiles.push(Tile {
            id,
            rect: WorldRect::from_center(center, self.placed_size),
            kind: TileKind::Placed,
            glow_until_ms: 0,
        });
        debug!("Placed platform {} at ({:.0}, {:.0})", id, center.x, center.y);
        id
    }

    pub fn glow(&mut self, index: usize, until_ms: u64) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.glow_until_ms = until_ms;
        }
    }

    /// Drop every placed platform; ground tiles stay.
    pub fn clear_placed(&mut self) {
        self.tiles.retain(|t| t.kind == TileKind::Ground);
        for tile in &mut self.tiles {
            tile.glow_until_ms = 0;
        }
    }
}
