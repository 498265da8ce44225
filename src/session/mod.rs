//! Session domain: frame orchestration between input, simulation and views.

use bevy::prelude::*;

pub mod events;
pub mod input;
pub mod state;


pub use events::{GameEvent, SessionReset};
pub use state::{FrameInput, FrameReport, HudValues, Session};

use crate::core::config::GameConfig;
use crate::core::resources::{FrameClock, RunConfig, SimMode};
use crate::sound::SoundCue;
use crate::sprites::PlayerSheet;

/// Frame phases. Every plugin slots its systems into one of these.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Input,
    Simulate,
    Present,
}

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (FrameSet::Input, FrameSet::Simulate, FrameSet::Present).chain(),
        )
        .add_message::<SessionReset>()
        .init_resource::<FrameInput>()
        .add_systems(Startup, setup_session)
        .add_systems(Update, input::read_frame_input.in_set(FrameSet::Input))
        .add_systems(Update, advance_session.in_set(FrameSet::Simulate));
    }
}

fn now_ms(time: &Time<Real>) -> u64 {
    time.elapsed().as_millis() as u64
}

fn setup_session(
    mut commands: Commands,
    config: Res<GameConfig>,
    sheet: Res<PlayerSheet>,
    run: Res<RunConfig>,
    time: Res<Time<Real>>,
) {
    info!("Starting session with seed {}", run.seed);
    commands.insert_resource(Session::new(
        config.clone(),
        sheet.body(),
        run.seed,
        now_ms(&time),
    ));
}

fn advance_session(
    time: Res<Time<Real>>,
    input: Res<FrameInput>,
    mut mode: ResMut<SimMode>,
    mut clock: ResMut<FrameClock>,
    mut session: ResMut<Session>,
    mut resets: MessageWriter<SessionReset>,
    mut cues: MessageWriter<SoundCue>,
) {
    let now = now_ms(&time);
    let dt = clock.advance(now, &session.config.frame);
    if input.reset {
        mode.reset();
    }

    let report = session.step(&input, *mode, now, dt);

    if report.reset {
        resets.write(SessionReset);
    }
    for event in report.events {
        cues.write(SoundCue::from(event));
    }
}
