use bevy::prelude::*;
use std::path::Path;

pub mod camera;
pub mod config;
pub mod resources;


pub use camera::{CameraRig, MainCamera};
pub use config::GameConfig;
pub use resources::{FrameClock, RunConfig, SimMode};

use crate::session::FrameSet;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let config = config::load_or_default(Path::new(config::TUNING_PATH));
        let rig = CameraRig::new(&config.camera);

        app.insert_resource(config)
            .insert_resource(rig)
            .init_resource::<RunConfig>()
            .init_resource::<SimMode>()
            .init_resource::<FrameClock>()
            .add_systems(Startup, camera::spawn_camera)
            .add_systems(
                Update,
                (camera::adjust_camera_rig, camera::toggle_fullscreen).in_set(FrameSet::Input),
            )
            .add_systems(
                Update,
                (camera::reset_camera_rig, camera::follow_player)
                    .chain()
                    .in_set(FrameSet::Present),
            );
    }
}
