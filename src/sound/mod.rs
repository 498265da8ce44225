//! Sound domain: one-shot cues for discrete game events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::core::config::{GameConfig, asset_exists};
use crate::session::{FrameSet, GameEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Throw,
    Slice,
    Death,
    Web,
}

impl Message for SoundCue {}

impl From<GameEvent> for SoundCue {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::ProjectileFired => SoundCue::Throw,
            GameEvent::EnemyHit => SoundCue::Slice,
            GameEvent::PlayerDied => SoundCue::Death,
            GameEvent::WebAttached => SoundCue::Web,
        }
    }
}

/// Loaded clips. A missing file leaves its slot empty and the cue is silent.
#[derive(Resource, Debug, Default)]
pub struct SoundBank {
    pub throw: Option<Handle<AudioSource>>,
    pub slice: Option<Handle<AudioSource>>,
    pub death: Option<Handle<AudioSource>>,
    pub web: Option<Handle<AudioSource>>,
}

impl SoundBank {
    pub fn clip(&self, cue: SoundCue) -> Option<&Handle<AudioSource>> {
        match cue {
            SoundCue::Throw => self.throw.as_ref(),
            SoundCue::Slice => self.slice.as_ref(),
            SoundCue::Death => self.death.as_ref(),
            SoundCue::Web => self.web.as_ref(),
        }
    }
}

pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SoundCue>()
            .init_resource::<SoundBank>()
            .add_systems(Startup, load_sound_bank)
            .add_systems(Update, play_sound_cues.in_set(FrameSet::Present));
    }
}

fn load_clip(asset_server: &AssetServer, path: &str) -> Option<Handle<AudioSource>> {
    if asset_exists(path) {
        Some(asset_server.load(path.to_string()))
    } else {
        warn!("Sound file assets/{} not found; cue disabled", path);
        None
    }
}

fn load_sound_bank(
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
    mut bank: ResMut<SoundBank>,
) {
    let paths = &config.assets;
    *bank = SoundBank {
        throw: load_clip(&asset_server, &paths.throw_sound),
        slice: load_clip(&asset_server, &paths.slice_sound),
        death: load_clip(&asset_server, &paths.death_sound),
        web: load_clip(&asset_server, &paths.web_sound),
    };
}

fn play_sound_cues(mut commands: Commands, mut cues: MessageReader<SoundCue>, bank: Res<SoundBank>) {
    for cue in cues.read() {
        if let Some(clip) = bank.clip(*cue) {
            commands.spawn((AudioPlayer::new(clip.clone()), PlaybackSettings::DESPAWN));
        }
    }
}
