//! Web domain: grapple engine and rope rendering.

use bevy::prelude::*;

pub mod grapple;

#[cfg(test)]
mod tests;

pub use grapple::{Grapple, RopeView, WebControls};

use crate::session::{FrameSet, Session};
use crate::world::geometry::to_render;

const ROPE_SEGMENTS: usize = 18;
const ROPE_WIGGLE: f32 = 3.5;
const ROPE_WIGGLE_SPEED: f32 = 7.0;

pub struct WebPlugin;

impl Plugin for WebPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, draw_rope.in_set(FrameSet::Present));
    }
}

/// Polyline from the hand to the rope tip with a small travelling wiggle,
/// pinned at both ends.
pub fn rope_points(view: &RopeView, phase: f32) -> Vec<Vec2> {
    let along = view.to - view.from;
    let normal = along.perp().try_normalize().unwrap_or(Vec2::X);
    (0..=ROPE_SEGMENTS)
        .map(|i| {
            let s = i as f32 / ROPE_SEGMENTS as f32;
            let envelope = (std::f32::consts::PI * s).sin();
            let wiggle = ROPE_WIGGLE * envelope * (phase + s * 12.0).sin();
            view.from + along * s + normal * wiggle
        })
        .collect()
}

fn draw_rope(session: Res<Session>, time: Res<Time<Real>>, mut gizmos: Gizmos) {
    let Some(view) = session.rope_view() else {
        return;
    };
    let phase = time.elapsed_secs() * ROPE_WIGGLE_SPEED;
    let points = rope_points(&view, phase).into_iter().map(to_render);
    gizmos.linestrip_2d(points, Color::srgb(0.92, 0.92, 0.96));
}
