//! Web domain: the grapple state machine and the rigid-rope swing.
//!
//! Idle is `Option::<Grapple>::None`. A cast that hits a tile starts
//! `Shooting`; once the visual rope reaches the target length the grapple
//! becomes `Latched` and the swing constraint takes over the actor's motion.

use bevy::prelude::*;

use crate::core::config::WebTuning;
use crate::movement::actor::Actor;
use crate::world::tiles::{Tile, tile_at};

/// Per-frame rope controls. Only meaningful while latched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WebControls {
    pub reel_in: bool,
    pub reel_out: bool,
    pub pump: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Grapple {
    Shooting {
        anchor: Vec2,
        target_len: f32,
        cur_len: f32,
    },
    Latched {
        anchor: Vec2,
        target_len: f32,
        /// Rope length at the end of the previous swing step
        prev_len: f32,
        tension: f32,
    },
}

/// What the renderer needs to draw the rope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RopeView {
    pub from: Vec2,
    pub to: Vec2,
    pub shown_len: f32,
}

/// Radial unit vector from `anchor` toward `attach`; straight down when they coincide.
fn radial(anchor: Vec2, attach: Vec2) -> Vec2 {
    (attach - anchor).try_normalize().unwrap_or(Vec2::Y)
}

fn tangent_of(radial: Vec2) -> Vec2 {
    Vec2::new(-radial.y, radial.x)
}

impl Grapple {
    /// Fire at `point`. Returns the new grapple and the hit tile index, or
    /// `None` when no tile contains the point.
    pub fn cast(
        tiles: &[Tile],
        point: Vec2,
        attach: Vec2,
        tuning: &WebTuning,
    ) -> Option<(Grapple, usize)> {
        let index = tile_at(tiles, point)?;
        let target_len = tuning.clamp_len(point.distance(attach));
        Some((
            Grapple::Shooting {
                anchor: point,
                target_len,
                cur_len: 0.0,
            },
            index,
        ))
    }

    pub fn anchor(&self) -> Vec2 {
        match *self {
            Grapple::Shooting { anchor, .. } | Grapple::Latched { anchor, .. } => anchor,
        }
    }

    pub fn target_len(&self) -> f32 {
        match *self {
            Grapple::Shooting { target_len, .. } | Grapple::Latched { target_len, .. } => {
                target_len
            }
        }
    }

    pub fn tension(&self) -> f32 {
        match *self {
            Grapple::Latched { tension, .. } => tension,
            Grapple::Shooting { .. } => 0.0,
        }
    }

    pub fn is_latched(&self) -> bool {
        matches!(self, Grapple::Latched { .. })
    }

    pub fn state_name(grapple: Option<&Grapple>) -> &'static str {
        match grapple {
            None => "None",
            Some(Grapple::Shooting { .. }) => "Shooting",
            Some(Grapple::Latched { .. }) => "Latched",
        }
    }

    /// Grow the visual rope. Returns true on the frame it latches.
    pub fn advance_shot(&mut self, dt: f32, tuning: &WebTuning) -> bool {
        let Grapple::Shooting {
            anchor,
            target_len,
            cur_len,
        } = *self
        else {
            return false;
        };
        let cur_len = cur_len + tuning.shoot_speed * dt;
        if cur_len >= target_len {
            *self = Grapple::Latched {
                anchor,
                target_len,
                prev_len: target_len,
                tension: 0.0,
            };
            true
        } else {
            *self = Grapple::Shooting {
                anchor,
                target_len,
                cur_len,
            };
            false
        }
    }

    /// One frame of rigid pendulum motion. No-op unless latched.
    ///
    /// The actor is moved so its attach point sits exactly `target_len` from
    /// the anchor, and its velocity is replaced by the tangential component.
    pub fn swing(
        &mut self,
        actor: &mut Actor,
        controls: WebControls,
        tuning: &WebTuning,
        gravity: f32,
        dt: f32,
    ) {
        let Grapple::Latched {
            anchor,
            target_len,
            prev_len,
            tension,
        } = self
        else {
            return;
        };

        let attach = actor.attach_point();
        let rn = radial(*anchor, attach);
        let tangent = tangent_of(rn);

        if controls.reel_in {
            *target_len -= tuning.reel_rate * dt;
        }
        if controls.reel_out {
            *target_len += tuning.reel_rate * dt;
        }
        *target_len = tuning.clamp_len(*target_len);
        let len = *target_len;

        let damping = (1.0 - tuning.damping * dt).max(0.0);
        let mut v_tan = actor.vel.dot(tangent) * damping;

        // Pin the attach point onto the rope circle
        let on_circle = *anchor + rn * len;
        actor.pos += on_circle - attach;

        if controls.pump {
            let drive = tuning.pump_gain * gravity * dt * (0.5 + 0.5 * (1.0 - rn.y.abs()));
            v_tan += if v_tan < 0.0 { -drive } else { drive };
        }

        if len < *prev_len * 0.999 {
            v_tan *= (*prev_len / len).clamp(tuning.reel_amplify_min, tuning.reel_amplify_max);
        }
        *prev_len = len;

        actor.vel = tangent * v_tan;
        *tension = v_tan * v_tan / len.max(1.0) + gravity * -rn.y;
    }

    /// Mouse-wheel reel. Positive steps shorten the rope. Latched only.
    pub fn fine_reel(&mut self, steps: f32, tuning: &WebTuning) {
        if let Grapple::Latched { target_len, .. } = self {
            let delta = -steps * tuning.reel_rate * tuning.fine_reel_fraction;
            *target_len = tuning.clamp_len(*target_len + delta);
        }
    }

    /// Let go. A latched release adds a speed-scaled boost along the swing.
    pub fn release(self, actor: &mut Actor, tuning: &WebTuning) {
        if let Grapple::Latched { anchor, .. } = self {
            let tangent = tangent_of(radial(anchor, actor.attach_point()));
            let direction = if actor.vel.dot(tangent) < 0.0 {
                -tangent
            } else {
                tangent
            };
            let speed = actor.vel.length();
            let boost = (tuning.release_boost_base + tuning.release_boost_per_speed * speed)
                .min(tuning.release_boost_cap);
            actor.vel += direction * boost;
        }
        actor.set_frame_lock(false);
    }

    pub fn rope_view(&self, attach: Vec2) -> RopeView {
        let anchor = self.anchor();
        let shown = match *self {
            Grapple::Shooting { cur_len, .. } => cur_len,
            Grapple::Latched { target_len, .. } => target_len,
        };
        let distance = anchor.distance(attach);
        let shown_len = shown.min(distance);
        let to = if distance > f32::EPSILON {
            attach + (anchor - attach) / distance * shown_len
        } else {
            anchor
        };
        RopeView {
            from: attach,
            to,
            shown_len,
        }
    }
}
