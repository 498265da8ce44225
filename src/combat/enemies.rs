//! Combat domain: ground-walking chasers that split when killed.

use bevy::prelude::*;

use crate::core::config::{EnemyTuning, KinematicsTuning};
use crate::core::resources::SimMode;
use crate::movement::kinematics::resolve_landing;
use crate::world::geometry::WorldRect;
use crate::world::tiles::Tile;

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub rect: WorldRect,
    pub vel: Vec2,
    pub hp: i32,
    /// Set on death; the split sprite shows until this time
    pub split_until_ms: Option<u64>,
    pub last_contact_ms: Option<u64>,
    /// Already added to the score
    pub counted: bool,
    pub removed: bool,
}

impl Enemy {
    /// Spawn with the bottom edge at `bottom`, horizontally centered on `center_x`.
    pub fn spawn(id: u32, center_x: f32, bottom: f32, tuning: &EnemyTuning) -> Self {
        let size: Vec2 = tuning.size.into();
        Self {
            id,
            rect: WorldRect::new(center_x - size.x * 0.5, bottom - size.y, size.x, size.y),
            vel: Vec2::ZERO,
            hp: tuning.hp,
            split_until_ms: None,
            last_contact_ms: None,
            counted: false,
            removed: false,
        }
    }

    pub fn is_split(&self) -> bool {
        self.split_until_ms.is_some()
    }

    pub fn split_expired(&self, now_ms: u64) -> bool {
        self.split_until_ms.is_some_and(|until| now_ms >= until)
    }

    /// Turn into the split sprite. Returns true the first time (for scoring).
    pub fn kill(&mut self, now_ms: u64, tuning: &EnemyTuning) -> bool {
        if self.split_until_ms.is_none() {
            self.split_until_ms = Some(now_ms + tuning.split_show_ms);
        }
        if self.counted {
            return false;
        }
        self.counted = true;
        true
    }
}

/// Gravity, landing on tiles, then chase the player horizontally.
pub fn step_enemy(
    enemy: &mut Enemy,
    player_center_x: f32,
    tiles: &[Tile],
    kinematics: &KinematicsTuning,
    tuning: &EnemyTuning,
    mode: SimMode,
) {
    let prev_bottom = enemy.rect.bottom();
    enemy.vel.y += mode.gravity(kinematics);
    enemy.rect.y += enemy.vel.y;

    let grounded = match resolve_landing(prev_bottom, enemy.rect, enemy.vel.y, tiles, kinematics) {
        Some(landing) => {
            enemy.rect.y = landing.top - enemy.rect.h;
            enemy.vel.y = 0.0;
            true
        }
        None => false,
    };

    let dir = if player_center_x > enemy.rect.center().x {
        1.0
    } else {
        -1.0
    };
    if grounded && !enemy.is_split() {
        enemy.vel.x = tuning.walk_speed * dir;
    } else {
        enemy.vel.x *= tuning.air_damping;
    }
    enemy.rect.x += enemy.vel.x;
}
