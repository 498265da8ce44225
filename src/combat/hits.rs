//! Combat domain: projectile hits and enemy contact damage.

use bevy::prelude::*;

use crate::combat::enemies::Enemy;
use crate::combat::health::Health;
use crate::combat::projectiles::Projectile;
use crate::core::config::{EnemyTuning, WeaponTuning};
use crate::world::geometry::WorldRect;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitOutcome {
    pub hits: u32,
    pub kills: u32,
}

/// Each active projectile is consumed by the first live enemy it overlaps.
/// Split enemies still absorb projectiles but take no damage.
pub fn resolve_projectile_hits(
    projectiles: &mut [Projectile],
    enemies: &mut [Enemy],
    weapon: &WeaponTuning,
    tuning: &EnemyTuning,
    now_ms: u64,
) -> HitOutcome {
    let mut outcome = HitOutcome::default();
    for projectile in projectiles.iter_mut().filter(|p| p.active) {
        let Some(enemy) = enemies
            .iter_mut()
            .find(|e| !e.removed && projectile.rect.intersects(&e.rect))
        else {
            continue;
        };
        projectile.active = false;
        if enemy.is_split() {
            continue;
        }
        enemy.hp -= weapon.damage;
        outcome.hits += 1;
        if enemy.hp <= 0 && enemy.kill(now_ms, tuning) {
            outcome.kills += 1;
            debug!("Enemy {} split", enemy.id);
        }
    }
    outcome
}

/// Damage from every overlapping live enemy whose cooldown has elapsed.
/// Returns the total damage dealt this frame.
pub fn apply_contact_damage(
    player_box: WorldRect,
    enemies: &mut [Enemy],
    health: &mut Health,
    tuning: &EnemyTuning,
    now_ms: u64,
) -> f32 {
    let mut dealt = 0.0;
    for enemy in enemies
        .iter_mut()
        .filter(|e| !e.removed && !e.is_split())
    {
        if !player_box.intersects(&enemy.rect) {
            continue;
        }
        let ready = enemy
            .last_contact_ms
            .is_none_or(|last| now_ms.saturating_sub(last) >= tuning.damage_cooldown_ms);
        if ready {
            dealt += health.take_damage(tuning.contact_damage);
            enemy.last_contact_ms = Some(now_ms);
        }
    }
    dealt
}
