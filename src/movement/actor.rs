//! Movement domain: the player body, its derived boxes and pose state.

use bevy::prelude::*;

use crate::core::config::KinematicsTuning;
use crate::world::geometry::WorldRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipKind {
    Back,
    Front,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flip {
    pub kind: FlipKind,
    pub angle_deg: f32,
    /// +1 or -1, fixed when the flip starts
    pub sign: f32,
    pub started_ms: u64,
}

/// Web attachment point as a fraction of the render box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorUv {
    pub u: f32,
    pub v: f32,
    /// Mirror `u` horizontally when facing left
    pub mirror: bool,
}

impl Default for AnchorUv {
    fn default() -> Self {
        Self {
            u: 0.78,
            v: 0.33,
            mirror: true,
        }
    }
}

/// Render size and web anchor, usually taken from the sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorBody {
    pub size: Vec2,
    pub web_anchor: AnchorUv,
}

impl Default for ActorBody {
    fn default() -> Self {
        Self {
            size: Vec2::new(480.0, 384.0),
            web_anchor: AnchorUv::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Actor {
    /// Top-left of the render box
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    pub on_ground: bool,
    pub jump_count: u8,
    /// Pins the web pose while a grapple is active
    pub frame_lock: bool,
    pub flip: Option<Flip>,
    pub throw_pose_until_ms: Option<u64>,
    pub web_anchor: AnchorUv,
    /// Whether the last step had horizontal intent
    pub walking: bool,
}

impl Actor {
    pub fn new(body: ActorBody) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: body.size,
            facing: Facing::Right,
            on_ground: false,
            jump_count: 0,
            frame_lock: false,
            flip: None,
            throw_pose_until_ms: None,
            web_anchor: body.web_anchor,
            walking: false,
        }
    }

    pub fn render_box(&self) -> WorldRect {
        WorldRect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    /// Used for landing.
    pub fn collision_box(&self, tuning: &KinematicsTuning) -> WorldRect {
        self.render_box()
            .inset(tuning.hitbox_shrink.into(), tuning.min_box_side)
    }

    /// Proximity box drawn by the debug overlay. Only guaranteed to sit
    /// inside the render box; with the default shrinks it is smaller than
    /// the collision box, not a superset of it. Enemy contact tests the
    /// full render box instead.
    pub fn interaction_box(&self, tuning: &KinematicsTuning) -> WorldRect {
        self.render_box()
            .inset(tuning.interaction_shrink.into(), tuning.min_box_side)
    }

    /// Distance from `pos.y` to the collision box bottom. Position independent.
    pub fn collision_bottom_offset(&self, tuning: &KinematicsTuning) -> f32 {
        WorldRect::new(0.0, 0.0, self.size.x, self.size.y)
            .inset(tuning.hitbox_shrink.into(), tuning.min_box_side)
            .bottom()
    }

    /// Lift the actor so its collision bottom is not below `top`.
    pub fn keep_above(&mut self, top: f32, tuning: &KinematicsTuning) {
        let limit = top - self.collision_bottom_offset(tuning);
        if self.pos.y > limit {
            self.pos.y = limit;
            self.vel.y = self.vel.y.min(0.0);
        }
    }

    pub fn center(&self) -> Vec2 {
        self.render_box().center()
    }

    pub fn attach_point(&self) -> Vec2 {
        let anchor = self.web_anchor;
        let u = if anchor.mirror && self.facing == Facing::Left {
            1.0 - anchor.u
        } else {
            anchor.u
        };
        Vec2::new(self.pos.x + self.size.x * u, self.pos.y + self.size.y * anchor.v)
    }

    pub fn nudge_anchor(&mut self, du: f32, dv: f32) {
        self.web_anchor.u = (self.web_anchor.u + du).clamp(0.0, 1.0);
        self.web_anchor.v = (self.web_anchor.v + dv).clamp(0.0, 1.0);
    }

    /// Rest the render box bottom on `top`.
    pub fn place_on_top_of(&mut self, top: f32) {
        self.pos.y = top - self.size.y;
    }

    pub fn hard_reset(&mut self, ground_top: f32) {
        self.vel = Vec2::ZERO;
        self.on_ground = false;
        self.jump_count = 0;
        self.frame_lock = false;
        self.flip = None;
        self.throw_pose_until_ms = None;
        self.walking = false;
        self.place_on_top_of(ground_top);
    }

    pub fn is_flipping(&self) -> bool {
        self.flip.is_some()
    }

    /// Starts a flip when airborne and not already flipping.
    pub fn start_flip(&mut self, kind: FlipKind, now_ms: u64) -> bool {
        if self.on_ground || self.is_flipping() {
            return false;
        }
        let back_sign = match self.facing {
            Facing::Left => 1.0,
            Facing::Right => -1.0,
        };
        let sign = match kind {
            FlipKind::Back => back_sign,
            FlipKind::Front => -back_sign,
        };
        self.flip = Some(Flip {
            kind,
            angle_deg: 0.0,
            sign,
            started_ms: now_ms,
        });
        true
    }

    pub fn update_flip(&mut self, now_ms: u64, duration_ms: u64) {
        let Some(flip) = self.flip.as_mut() else {
            return;
        };
        let t = now_ms.saturating_sub(flip.started_ms) as f32 / duration_ms.max(1) as f32;
        if t >= 1.0 {
            self.flip = None;
            return;
        }
        flip.angle_deg = 360.0 * (0.5 - 0.5 * (std::f32::consts::PI * t).cos());
    }

    pub fn trigger_throw_pose(&mut self, now_ms: u64, hold_ms: u64) {
        if self.frame_lock {
            return;
        }
        self.throw_pose_until_ms = Some(now_ms + hold_ms);
    }

    pub fn throw_pose_active(&self, now_ms: u64) -> bool {
        self.throw_pose_until_ms.is_some_and(|until| now_ms < until)
    }

    pub fn set_frame_lock(&mut self, locked: bool) {
        self.frame_lock = locked;
    }

    /// Clockwise degrees in simulation space.
    pub fn render_angle_deg(&self, dead: bool) -> f32 {
        if dead {
            return 90.0;
        }
        self.flip.map_or(0.0, |flip| flip.sign * flip.angle_deg)
    }
}
