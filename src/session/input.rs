//! Session domain: keyboard and mouse mapping into [`FrameInput`].

use bevy::input::mouse::AccumulatedMouseScroll;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::core::camera::{MainCamera, cursor_sim_point};
use crate::core::resources::SimMode;
use crate::movement::FlipKind;
use crate::session::state::{FrameInput, Session};
use crate::web::WebControls;

#[allow(clippy::too_many_arguments)]
pub(crate) fn read_frame_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    scroll: Res<AccumulatedMouseScroll>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    session: Res<Session>,
    mut mode: ResMut<SimMode>,
    mut input: ResMut<FrameInput>,
    mut exit: MessageWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }

    let cursor = match (windows.single(), cameras.single()) {
        (Ok(window), Ok((camera, transform))) => cursor_sim_point(window, camera, transform),
        _ => None,
    };

    let mut axis = 0.0;
    if keyboard.pressed(KeyCode::KeyA) {
        axis -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        axis += 1.0;
    }

    let flip = if keyboard.just_pressed(KeyCode::KeyB) {
        Some(FlipKind::Back)
    } else if keyboard.just_pressed(KeyCode::KeyV) {
        Some(FlipKind::Front)
    } else {
        None
    };

    let web_pressed = mouse.just_pressed(MouseButton::Right);
    let placing = keyboard.pressed(KeyCode::KeyN);

    let fine_reel = if scroll.delta.y > 0.0 {
        1.0
    } else if scroll.delta.y < 0.0 {
        -1.0
    } else {
        0.0
    };

    *input = FrameInput {
        move_axis: axis,
        jump: keyboard.just_pressed(KeyCode::Space),
        flip,
        fire: mouse.just_pressed(MouseButton::Left),
        cast: cursor.filter(|_| web_pressed && !placing),
        cast_held: mouse.pressed(MouseButton::Right),
        place_platform: cursor.filter(|_| web_pressed && placing),
        controls: WebControls {
            reel_in: keyboard.pressed(KeyCode::KeyE),
            reel_out: keyboard.pressed(KeyCode::KeyQ),
            pump: keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]),
        },
        fine_reel,
        spawn_enemy: keyboard.just_pressed(KeyCode::KeyO),
        reset: keyboard.just_pressed(KeyCode::KeyR),
    };

    if !session.game_over {
        if keyboard.just_pressed(KeyCode::KeyM) {
            mode.moon_gravity = !mode.moon_gravity;
            info!("Moon gravity: {}", mode.moon_gravity);
        }
        if keyboard.just_pressed(KeyCode::KeyT) {
            mode.unlimited_ammo = !mode.unlimited_ammo;
            info!("Unlimited ammo: {}", mode.unlimited_ammo);
        }
    }
}
