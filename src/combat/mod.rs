//! Combat domain: knives, chasers, hits and their sprites.

use bevy::prelude::*;
use std::collections::HashMap;

pub mod enemies;
pub mod health;
pub mod hits;
pub mod projectiles;

#[cfg(test)]
mod tests;

pub use enemies::{Enemy, step_enemy};
pub use health::Health;
pub use hits::{HitOutcome, apply_contact_damage, resolve_projectile_hits};
pub use projectiles::{Ammo, Projectile, hand_point};

use crate::core::config::GameConfig;
use crate::session::{FrameSet, Session};
use crate::world::geometry::{WorldRect, to_render};

const ENEMY_Z: f32 = 1.0;
const PROJECTILE_Z: f32 = 2.0;

#[derive(Resource, Debug, Clone)]
pub struct CombatArt {
    pub projectile: Handle<Image>,
    pub enemy: Handle<Image>,
    pub enemy_split: Handle<Image>,
}

#[derive(Component)]
pub struct ProjectileView(pub u32);

#[derive(Component)]
pub struct EnemyView {
    pub id: u32,
    pub split: bool,
}

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_combat_art).add_systems(
            Update,
            (sync_projectile_sprites, sync_enemy_sprites).in_set(FrameSet::Present),
        );
    }
}

fn load_combat_art(mut commands: Commands, asset_server: Res<AssetServer>, config: Res<GameConfig>) {
    let paths = &config.assets;
    commands.insert_resource(CombatArt {
        projectile: asset_server.load(paths.projectile.clone()),
        enemy: asset_server.load(paths.enemy.clone()),
        enemy_split: asset_server.load(paths.enemy_split.clone()),
    });
}

fn rect_transform(rect: &WorldRect, z: f32) -> Transform {
    Transform::from_translation(to_render(rect.center()).extend(z))
}

fn sync_projectile_sprites(
    mut commands: Commands,
    session: Res<Session>,
    art: Res<CombatArt>,
    mut views: Query<(Entity, &ProjectileView, &mut Transform, &mut Sprite)>,
) {
    let mut live: HashMap<u32, &Projectile> = session
        .projectiles
        .iter()
        .filter(|p| p.active)
        .map(|p| (p.id, p))
        .collect();

    for (entity, view, mut transform, mut sprite) in &mut views {
        match live.remove(&view.0) {
            Some(projectile) => {
                *transform = rect_transform(&projectile.rect, PROJECTILE_Z)
                    .with_rotation(Quat::from_rotation_z(-projectile.angle_deg.to_radians()));
                sprite.flip_x = projectile.dir < 0.0;
            }
            None => commands.entity(entity).despawn(),
        }
    }

    for (id, projectile) in live {
        commands.spawn((
            ProjectileView(id),
            Sprite {
                image: art.projectile.clone(),
                custom_size: Some(projectile.rect.size()),
                flip_x: projectile.dir < 0.0,
                ..default()
            },
            rect_transform(&projectile.rect, PROJECTILE_Z),
        ));
    }
}

fn sync_enemy_sprites(
    mut commands: Commands,
    session: Res<Session>,
    art: Res<CombatArt>,
    mut views: Query<(Entity, &mut EnemyView, &mut Transform, &mut Sprite)>,
) {
    let mut live: HashMap<u32, &Enemy> = session
        .enemies
        .iter()
        .filter(|e| !e.removed)
        .map(|e| (e.id, e))
        .collect();

    for (entity, mut view, mut transform, mut sprite) in &mut views {
        let Some(enemy) = live.remove(&view.id) else {
            commands.entity(entity).despawn();
            continue;
        };
        *transform = rect_transform(&enemy.rect, ENEMY_Z);
        if enemy.is_split() != view.split {
            view.split = enemy.is_split();
            sprite.image = if view.split {
                art.enemy_split.clone()
            } else {
                art.enemy.clone()
            };
        }
    }

    for (id, enemy) in live {
        let image = if enemy.is_split() {
            art.enemy_split.clone()
        } else {
            art.enemy.clone()
        };
        commands.spawn((
            EnemyView {
                id,
                split: enemy.is_split(),
            },
            Sprite {
                image,
                custom_size: Some(enemy.rect.size()),
                ..default()
            },
            rect_transform(&enemy.rect, ENEMY_Z),
        ));
    }
}
