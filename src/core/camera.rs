//! Core domain: follow camera, cursor picking and window mode.

use bevy::prelude::*;
use bevy::window::{MonitorSelection, PrimaryWindow, WindowMode};

use crate::core::config::{CameraTuning, GameConfig};
use crate::session::{Session, SessionReset};
use crate::world::geometry::{from_render, to_render};

#[derive(Component)]
pub struct MainCamera;

/// Player-adjustable framing. Reset on restart.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CameraRig {
    pub anchor: f32,
    pub pixel_offset: f32,
}

impl CameraRig {
    pub fn new(tuning: &CameraTuning) -> Self {
        Self {
            anchor: tuning.anchor,
            pixel_offset: 0.0,
        }
    }

    pub fn nudge_anchor(&mut self, delta: f32, tuning: &CameraTuning) {
        self.anchor = (self.anchor + delta).clamp(tuning.anchor_min, tuning.anchor_max);
    }

    /// Simulation-space point the camera should center on.
    pub fn view_center(&self, player_center: Vec2, screen_height: f32) -> Vec2 {
        Vec2::new(
            player_center.x,
            player_center.y + screen_height * (0.5 - self.anchor) + self.pixel_offset,
        )
    }
}

pub(crate) fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera));
}

pub(crate) fn adjust_camera_rig(
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<GameConfig>,
    mut rig: ResMut<CameraRig>,
) {
    let tuning = &config.camera;
    if keyboard.just_pressed(KeyCode::BracketLeft) {
        rig.nudge_anchor(-tuning.anchor_step, tuning);
    }
    if keyboard.just_pressed(KeyCode::BracketRight) {
        rig.nudge_anchor(tuning.anchor_step, tuning);
    }
    if keyboard.pressed(KeyCode::Semicolon) {
        rig.pixel_offset -= tuning.pixel_step;
    }
    if keyboard.pressed(KeyCode::Quote) {
        rig.pixel_offset += tuning.pixel_step;
    }
}

pub(crate) fn reset_camera_rig(
    mut resets: MessageReader<SessionReset>,
    config: Res<GameConfig>,
    mut rig: ResMut<CameraRig>,
) {
    if resets.read().count() > 0 {
        *rig = CameraRig::new(&config.camera);
    }
}

pub(crate) fn follow_player(
    session: Res<Session>,
    rig: Res<CameraRig>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok(mut transform) = cameras.single_mut() else {
        return;
    };
    let center = rig.view_center(session.actor.center(), window.height());
    let target = to_render(center);
    transform.translation.x = target.x;
    transform.translation.y = target.y;
}

pub(crate) fn toggle_fullscreen(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if !keyboard.just_pressed(KeyCode::KeyF) {
        return;
    }
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    window.mode = match window.mode {
        WindowMode::Windowed => WindowMode::BorderlessFullscreen(MonitorSelection::Current),
        _ => WindowMode::Windowed,
    };
    info!("Window mode: {:?}", window.mode);
}

/// Cursor position in simulation space, if the cursor is over the window.
pub fn cursor_sim_point(
    window: &Window,
    camera: &Camera,
    camera_transform: &GlobalTransform,
) -> Option<Vec2> {
    let cursor = window.cursor_position()?;
    let world = camera.viewport_to_world_2d(camera_transform, cursor).ok()?;
    Some(from_render(world))
}
