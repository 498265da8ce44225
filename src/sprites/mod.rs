//! Sprites module for the player sheet and its on-screen sprite.
//!
//! This module handles:
//! - Loading the player sheet manifest from JSON
//! - Animation frame selection
//! - Mirroring the simulated actor into a Bevy sprite

pub mod animation;
pub mod manifest;


use bevy::prelude::*;
use std::path::Path;

pub use animation::PlayerAnimator;
pub use manifest::{ClipDef, ManifestLoadError, PlayerSheet, SheetCell};

use crate::core::config::GameConfig;
use crate::movement::Facing;
use crate::session::{FrameSet, Session};
use crate::world::geometry::to_render;

const PLAYER_Z: f32 = 3.0;

#[derive(Component)]
pub struct PlayerSprite;

pub struct SpritesPlugin;

impl Plugin for SpritesPlugin {
    fn build(&self, app: &mut App) {
        let manifest_path = app
            .world()
            .get_resource::<GameConfig>()
            .map(|config| config.assets.player_manifest.clone())
            .unwrap_or_else(|| GameConfig::default().assets.player_manifest);
        let sheet = PlayerSheet::load_or_default(&Path::new("assets").join(manifest_path));

        app.insert_resource(sheet)
            .add_systems(Startup, spawn_player_sprite)
            .add_systems(
                Update,
                (animate_player, sync_player_sprite)
                    .chain()
                    .in_set(FrameSet::Present),
            );
    }
}

fn spawn_player_sprite(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    sheet: Res<PlayerSheet>,
) {
    let layout = layouts.add(TextureAtlasLayout::from_grid(
        sheet.frame_size(),
        sheet.cols,
        sheet.rows,
        None,
        None,
    ));
    let mut sprite = Sprite::from_atlas_image(
        asset_server.load(sheet.image.clone()),
        TextureAtlas { layout, index: 0 },
    );
    sprite.custom_size = Some(sheet.render_size());

    commands.spawn((
        PlayerSprite,
        PlayerAnimator::default(),
        sprite,
        Transform::from_xyz(0.0, 0.0, PLAYER_Z),
    ));
}

fn animate_player(
    session: Res<Session>,
    sheet: Res<PlayerSheet>,
    time: Res<Time<Real>>,
    mut players: Query<(&mut PlayerAnimator, &mut Sprite), With<PlayerSprite>>,
) {
    let now = time.elapsed().as_millis() as u64;
    for (mut animator, mut sprite) in &mut players {
        let cell = animator.update(&session.actor, &sheet, now);
        if let Some(atlas) = sprite.texture_atlas.as_mut() {
            atlas.index = sheet.atlas_index(cell);
        }
    }
}

fn sync_player_sprite(
    session: Res<Session>,
    mut players: Query<(&mut Transform, &mut Sprite), With<PlayerSprite>>,
) {
    let actor = &session.actor;
    let center = to_render(actor.center());
    // Simulation angles are clockwise on screen
    let angle = -actor.render_angle_deg(session.game_over).to_radians();
    for (mut transform, mut sprite) in &mut players {
        transform.translation = center.extend(PLAYER_Z);
        transform.rotation = Quat::from_rotation_z(angle);
        sprite.flip_x = actor.facing == Facing::Left;
        sprite.custom_size = Some(actor.size);
    }
}
