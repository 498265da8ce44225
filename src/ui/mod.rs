//! UI domain: in-run HUD and the game-over overlay.

mod game_over;
mod hud;

#[cfg(test)]
mod tests;

pub use hud::{HudLine, HudState};

use bevy::prelude::*;

use crate::session::FrameSet;
use crate::ui::game_over::sync_game_over_screen;
use crate::ui::hud::{spawn_hud, toggle_hud, update_hud};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HudState>()
            .add_systems(Startup, spawn_hud)
            .add_systems(Update, toggle_hud.in_set(FrameSet::Input))
            .add_systems(
                Update,
                (update_hud, sync_game_over_screen).in_set(FrameSet::Present),
            );
    }
}
