//! World domain: geometry, tiles, and their on-screen representation.

use bevy::prelude::*;
use std::collections::HashMap;

pub mod geometry;
pub mod tiles;


pub use geometry::WorldRect;
pub use tiles::{Tile, TileKind, TileSet};

use crate::session::{FrameSet, Session};
use geometry::to_render;

const TILE_Z: f32 = 0.0;
const GLOW_RINGS: u32 = 3;

#[derive(Component)]
pub struct TileView(pub u32);

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb(0.08, 0.09, 0.14)))
            .add_systems(
                Update,
                (sync_tile_sprites, draw_tile_glow).in_set(FrameSet::Present),
            );
    }
}

fn tile_color(kind: TileKind) -> Color {
    match kind {
        TileKind::Ground => Color::srgb(0.22, 0.30, 0.42),
        TileKind::Placed => Color::srgb(0.45, 0.32, 0.62),
    }
}

/// One sprite per tile, keyed by tile id. Sprites for cleared tiles despawn.
fn sync_tile_sprites(
    mut commands: Commands,
    session: Res<Session>,
    views: Query<(Entity, &TileView)>,
) {
    let mut missing: HashMap<u32, &Tile> =
        session.tiles.tiles().iter().map(|t| (t.id, t)).collect();

    for (entity, view) in &views {
        if missing.remove(&view.0).is_none() {
            commands.entity(entity).despawn();
        }
    }

    for (id, tile) in missing {
        commands.spawn((
            TileView(id),
            Sprite::from_color(tile_color(tile.kind), tile.rect.size()),
            Transform::from_translation(to_render(tile.rect.center()).extend(TILE_Z)),
        ));
    }
}

/// Pulsing outline around tiles the player just landed on.
fn draw_tile_glow(session: Res<Session>, time: Res<Time<Real>>, mut gizmos: Gizmos) {
    let now = time.elapsed().as_millis() as u64;
    let glow_ms = session.config.world.glow_ms.max(1) as f32;
    for tile in session.tiles.tiles().iter().filter(|t| t.is_glowing(now)) {
        let remaining = (tile.glow_until_ms - now) as f32 / glow_ms;
        let center = to_render(tile.rect.center());
        for ring in 0..GLOW_RINGS {
            let grow = ring as f32 * 6.0;
            let alpha = remaining * (1.0 - ring as f32 / GLOW_RINGS as f32);
            gizmos.rect_2d(
                Isometry2d::from_translation(center),
                tile.rect.size() + Vec2::splat(grow),
                Color::srgba(1.0, 0.86, 0.45, alpha),
            );
        }
    }
}
