//! Combat domain: the thrown knife and its clip.

use bevy::prelude::*;

use crate::core::config::WeaponTuning;
use crate::core::resources::SimMode;
use crate::movement::actor::Actor;
use crate::world::geometry::WorldRect;

/// Rounds left in the clip plus the recharge clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Ammo {
    pub rounds: u32,
    pub last_recharge_ms: u64,
}

impl Ammo {
    pub fn full(tuning: &WeaponTuning, now_ms: u64) -> Self {
        Self {
            rounds: tuning.clip,
            last_recharge_ms: now_ms,
        }
    }

    /// Take one round. Unlimited mode never consumes.
    pub fn try_fire(&mut self, tuning: &WeaponTuning, mode: SimMode, now_ms: u64) -> bool {
        if mode.unlimited_ammo {
            return true;
        }
        if self.rounds == 0 {
            return false;
        }
        // A full clip was not recharging; start counting from this shot
        if self.rounds >= tuning.clip {
            self.last_recharge_ms = now_ms;
        }
        self.rounds -= 1;
        true
    }

    /// Restore at most one round once `recharge_ms` has passed.
    pub fn recharge(&mut self, tuning: &WeaponTuning, mode: SimMode, now_ms: u64) -> bool {
        if mode.unlimited_ammo || self.rounds >= tuning.clip {
            return false;
        }
        if now_ms.saturating_sub(self.last_recharge_ms) < tuning.recharge_ms {
            return false;
        }
        self.rounds += 1;
        self.last_recharge_ms = now_ms;
        true
    }

    pub fn recharge_fraction(&self, tuning: &WeaponTuning, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.last_recharge_ms) as f32;
        (elapsed / tuning.recharge_ms.max(1) as f32).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub rect: WorldRect,
    /// Units per frame
    pub vel: Vec2,
    pub born_ms: u64,
    pub dir: f32,
    pub angle_deg: f32,
    pub active: bool,
}

impl Projectile {
    pub fn spawn(id: u32, hand: Vec2, dir: f32, tuning: &WeaponTuning, now_ms: u64) -> Self {
        Self {
            id,
            rect: WorldRect::from_center(hand, tuning.size.into()),
            vel: Vec2::new(tuning.speed * dir, 0.0),
            born_ms: now_ms,
            dir,
            angle_deg: 0.0,
            active: true,
        }
    }

    /// Move, spin, and expire past the lifetime.
    pub fn advance(&mut self, now_ms: u64, tuning: &WeaponTuning) {
        if !self.active {
            return;
        }
        self.rect = self.rect.translated(self.vel);
        let elapsed = now_ms.saturating_sub(self.born_ms);
        self.angle_deg = self.dir * tuning.spin_dps * (elapsed as f32 / 1000.0);
        if elapsed >= tuning.lifetime_ms {
            self.active = false;
        }
    }
}

/// Where a throw leaves the hand, in front of the actor along `dir`.
pub fn hand_point(actor: &Actor, dir: f32, tuning: &WeaponTuning) -> Vec2 {
    let body = actor.render_box();
    Vec2::new(
        body.x + body.w * 0.5 + dir * tuning.spawn_offset.x,
        body.y + body.h * tuning.spawn_hand_frac + tuning.spawn_offset.y,
    )
}
