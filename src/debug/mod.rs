//! Debug overlay for tuning the player body (dev-tools only).
//!
//! - H toggles collision / interaction / render boxes and the web attach cross
//! - J/L and I/K nudge the web anchor uv, Shift for coarse steps

use bevy::prelude::*;

#[cfg(test)]
mod tests;

use crate::session::{FrameSet, Session};
use crate::world::WorldRect;
use crate::world::geometry::to_render;

const FINE_STEP: f32 = 0.01;
const COARSE_STEP: f32 = 0.03;
const CROSS_HALF: f32 = 8.0;

#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether the box overlay is drawn
    pub show_boxes: bool,
}

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(
                Update,
                (toggle_debug_boxes, nudge_web_anchor).in_set(FrameSet::Input),
            )
            .add_systems(
                Update,
                draw_debug_boxes
                    .run_if(|state: Res<DebugState>| state.show_boxes)
                    .in_set(FrameSet::Present),
            );
    }
}

/// Anchor delta (du, dv) for the held direction keys.
pub(crate) fn anchor_delta(left: bool, right: bool, up: bool, down: bool, coarse: bool) -> Vec2 {
    let step = if coarse { COARSE_STEP } else { FINE_STEP };
    let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
    Vec2::new(axis(left, right), axis(up, down)) * step
}

fn toggle_debug_boxes(keyboard: Res<ButtonInput<KeyCode>>, mut state: ResMut<DebugState>) {
    if keyboard.just_pressed(KeyCode::KeyH) {
        state.show_boxes = !state.show_boxes;
        info!(
            "[DEBUG] Box overlay {}",
            if state.show_boxes { "ON" } else { "OFF" }
        );
    }
}

fn nudge_web_anchor(keyboard: Res<ButtonInput<KeyCode>>, mut session: ResMut<Session>) {
    let coarse = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    let delta = anchor_delta(
        keyboard.just_pressed(KeyCode::KeyJ),
        keyboard.just_pressed(KeyCode::KeyL),
        keyboard.just_pressed(KeyCode::KeyI),
        keyboard.just_pressed(KeyCode::KeyK),
        coarse,
    );
    if delta == Vec2::ZERO {
        return;
    }
    session.actor.nudge_anchor(delta.x, delta.y);
    let anchor = session.actor.web_anchor;
    debug!("[DEBUG] Web anchor u={:.2} v={:.2}", anchor.u, anchor.v);
}

fn outline(gizmos: &mut Gizmos, rect: &WorldRect, color: Color) {
    gizmos.rect_2d(
        Isometry2d::from_translation(to_render(rect.center())),
        rect.size(),
        color,
    );
}

fn draw_debug_boxes(session: Res<Session>, mut gizmos: Gizmos) {
    let actor = &session.actor;
    let tuning = &session.config.kinematics;

    outline(&mut gizmos, &actor.render_box(), Color::srgba(1.0, 1.0, 1.0, 0.35));
    outline(&mut gizmos, &actor.collision_box(tuning), Color::srgb(0.0, 1.0, 1.0));
    outline(&mut gizmos, &actor.interaction_box(tuning), Color::srgb(1.0, 0.2, 0.2));
    for enemy in session.enemies.iter().filter(|e| !e.removed) {
        outline(&mut gizmos, &enemy.rect, Color::srgb(1.0, 0.6, 0.1));
    }

    let attach = to_render(actor.attach_point());
    let yellow = Color::srgb(1.0, 0.95, 0.2);
    gizmos.line_2d(
        attach - Vec2::X * CROSS_HALF,
        attach + Vec2::X * CROSS_HALF,
        yellow,
    );
    gizmos.line_2d(
        attach - Vec2::Y * CROSS_HALF,
        attach + Vec2::Y * CROSS_HALF,
        yellow,
    );
}
