//! Movement domain: per-frame integration and the one-way landing resolver.
//!
//! Tiles are one-way platforms: bodies only land when moving down and when
//! the bottom edge crossed (or grazed) a tile top this frame. There is no
//! side or ceiling collision.

use bevy::prelude::*;

use crate::core::config::KinematicsTuning;
use crate::core::resources::SimMode;
use crate::movement::actor::{Actor, Facing};
use crate::world::geometry::WorldRect;
use crate::world::tiles::Tile;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    pub index: usize,
    pub top: f32,
}

/// Pick the tile a falling box lands on this frame, if any.
///
/// `prev_bottom` is the box bottom before the vertical step, `now_box` the
/// box after it. Among valid candidates the topmost wins; ties keep the
/// earlier tile.
pub fn resolve_landing(
    prev_bottom: f32,
    now_box: WorldRect,
    vel_y: f32,
    tiles: &[Tile],
    tuning: &KinematicsTuning,
) -> Option<Landing> {
    if vel_y < 0.0 {
        return None;
    }
    let eps = tuning.landing_epsilon;
    let now_bottom = now_box.bottom();
    let travel_cap = tuning.max_step + vel_y.max(0.0);

    let mut best: Option<Landing> = None;
    for (index, tile) in tiles.iter().enumerate() {
        if !now_box.overlaps_x(&tile.rect) {
            continue;
        }
        let top = tile.rect.top();
        let crossed = prev_bottom <= top + eps && now_bottom >= top - eps;
        if !crossed || now_bottom - prev_bottom > travel_cap {
            continue;
        }
        if best.is_none_or(|b| top < b.top) {
            best = Some(Landing { index, top });
        }
    }
    best
}

/// Advance the actor one frame. Returns the index of the tile landed on.
///
/// `intent` is the horizontal input in [-1, 1]. Airborne swing momentum in
/// `vel.x` decays by `air_drag` unless a grapple holds the actor.
pub fn step_actor(
    actor: &mut Actor,
    intent: f32,
    tiles: &[Tile],
    tuning: &KinematicsTuning,
    mode: SimMode,
    now_ms: u64,
) -> Option<usize> {
    let intent = intent.clamp(-1.0, 1.0);
    actor.walking = intent != 0.0;
    if intent < 0.0 {
        actor.facing = Facing::Left;
    } else if intent > 0.0 {
        actor.facing = Facing::Right;
    }
    actor.pos.x += intent * tuning.walk_speed + actor.vel.x;
    if !actor.frame_lock {
        actor.vel.x *= tuning.air_drag;
    }

    let prev_bottom = actor.collision_box(tuning).bottom();
    actor.vel.y += mode.gravity(tuning);
    actor.pos.y += actor.vel.y;
    actor.on_ground = false;

    let landing = resolve_landing(
        prev_bottom,
        actor.collision_box(tuning),
        actor.vel.y,
        tiles,
        tuning,
    );
    if let Some(landing) = landing {
        actor.pos.y = landing.top - actor.collision_bottom_offset(tuning);
        actor.vel = Vec2::ZERO;
        actor.on_ground = true;
        actor.jump_count = 0;
        actor.flip = None;
    }

    actor.update_flip(now_ms, tuning.flip_duration_ms);
    landing.map(|l| l.index)
}

/// Ground jump or air jump while the budget lasts.
pub fn jump(actor: &mut Actor, tuning: &KinematicsTuning, mode: SimMode) -> bool {
    if !actor.on_ground && actor.jump_count >= tuning.max_jumps {
        return false;
    }
    actor.vel.y = mode.jump_impulse(tuning);
    actor.on_ground = false;
    actor.jump_count = actor.jump_count.saturating_add(1);
    true
}
