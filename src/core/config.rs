//! Core domain: game tuning loaded from `assets/data/tuning.ron`.
//!
//! Every field has a default, so a partial (or missing) file still yields a
//! playable configuration. The simulation only ever sees a built
//! [`GameConfig`]; it never reads files itself.

use bevy::prelude::*;
use ron::Options;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::world::geometry::WorldRect;

pub const TUNING_PATH: &str = "assets/data/tuning.ron";

/// Error type for tuning load failures.
#[derive(Debug)]
pub struct ConfigLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Serializable stand-in for `Vec2` in tuning files.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2Def {
    pub x: f32,
    pub y: f32,
}

impl Vec2Def {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<Vec2Def> for Vec2 {
    fn from(v: Vec2Def) -> Self {
        Vec2::new(v.x, v.y)
    }
}

#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub kinematics: KinematicsTuning,
    pub web: WebTuning,
    pub weapon: WeaponTuning,
    pub enemy: EnemyTuning,
    pub world: WorldTuning,
    pub camera: CameraTuning,
    pub frame: FrameTuning,
    pub assets: AssetPaths,
}

/// Per-frame actor motion. Gravity and impulses are in units per frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KinematicsTuning {
    pub gravity_normal: f32,
    pub gravity_moon: f32,
    pub jump_impulse_normal: f32,
    pub jump_impulse_moon: f32,
    pub max_jumps: u8,
    pub walk_speed: f32,
    pub landing_epsilon: f32,
    /// Largest downward travel per frame that can still land
    pub max_step: f32,
    pub hitbox_shrink: Vec2Def,
    pub interaction_shrink: Vec2Def,
    pub min_box_side: f32,
    pub flip_duration_ms: u64,
    pub throw_pose_ms: u64,
    /// Per-frame decay of airborne swing momentum
    pub air_drag: f32,
}

impl Default for KinematicsTuning {
    fn default() -> Self {
        Self {
            gravity_normal: 0.50,
            gravity_moon: 0.18,
            jump_impulse_normal: -12.0,
            jump_impulse_moon: -10.5,
            max_jumps: 2,
            walk_speed: 4.0,
            landing_epsilon: 0.5,
            max_step: 24.0,
            hitbox_shrink: Vec2Def::new(150.0, 4.0),
            interaction_shrink: Vec2Def::new(200.0, 100.0),
            min_box_side: 4.0,
            flip_duration_ms: 600,
            throw_pose_ms: 400,
            air_drag: 0.99,
        }
    }
}

/// Rope tuning. Rates are per second and scaled by the frame dt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebTuning {
    pub min_len: f32,
    pub max_len: f32,
    pub shoot_speed: f32,
    pub damping: f32,
    pub reel_rate: f32,
    pub pump_gain: f32,
    /// Share of `reel_rate` applied per wheel step
    pub fine_reel_fraction: f32,
    pub release_boost_base: f32,
    pub release_boost_per_speed: f32,
    pub release_boost_cap: f32,
    pub reel_amplify_min: f32,
    pub reel_amplify_max: f32,
}

impl Default for WebTuning {
    fn default() -> Self {
        Self {
            min_len: 70.0,
            max_len: 1800.0,
            shoot_speed: 1400.0,
            damping: 0.04,
            reel_rate: 550.0,
            pump_gain: 0.45,
            fine_reel_fraction: 0.02,
            release_boost_base: 0.35,
            release_boost_per_speed: 0.015,
            release_boost_cap: 2.2,
            reel_amplify_min: 0.5,
            reel_amplify_max: 2.0,
        }
    }
}

impl WebTuning {
    pub fn clamp_len(&self, len: f32) -> f32 {
        len.clamp(self.min_len, self.max_len)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTuning {
    pub clip: u32,
    pub speed: f32,
    pub size: Vec2Def,
    pub damage: i32,
    pub recharge_ms: u64,
    pub lifetime_ms: u64,
    pub spin_dps: f32,
    /// Hand offset from the render box: x along facing, y below `spawn_hand_frac`
    pub spawn_offset: Vec2Def,
    pub spawn_hand_frac: f32,
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            clip: 3,
            speed: 3.0,
            size: Vec2Def::new(94.0, 31.0),
            damage: 1,
            recharge_ms: 900,
            lifetime_ms: 4000,
            spin_dps: 720.0,
            spawn_offset: Vec2Def::new(22.0, 30.0),
            spawn_hand_frac: 0.42,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub size: Vec2Def,
    pub hp: i32,
    pub walk_speed: f32,
    pub contact_damage: f32,
    pub damage_cooldown_ms: u64,
    pub split_show_ms: u64,
    pub air_damping: f32,
    pub spawn_distance: f32,
    pub spawn_lift: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            size: Vec2Def::new(96.0, 96.0),
            hp: 2,
            walk_speed: 2.2,
            contact_damage: 6.0,
            damage_cooldown_ms: 300,
            split_show_ms: 650,
            air_damping: 0.97,
            spawn_distance: 1200.0,
            spawn_lift: 8.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    pub ground: WorldRect,
    pub platform_size: Vec2Def,
    pub glow_ms: u64,
    pub player_max_hp: f32,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            ground: WorldRect::new(-5000.0, 950.0, 10000.0, 50.0),
            platform_size: Vec2Def::new(128.0, 24.0),
            glow_ms: 120,
            player_max_hp: 100.0,
        }
    }
}

/// Vertical framing of the follow camera.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Fraction of the screen height where the player center sits
    pub anchor: f32,
    pub anchor_min: f32,
    pub anchor_max: f32,
    pub anchor_step: f32,
    pub pixel_step: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            anchor: 0.68,
            anchor_min: 0.30,
            anchor_max: 0.90,
            anchor_step: 0.02,
            pixel_step: 4.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameTuning {
    pub min_dt: f32,
    pub max_dt: f32,
}

impl Default for FrameTuning {
    fn default() -> Self {
        Self {
            min_dt: 1.0 / 240.0,
            max_dt: 1.0 / 30.0,
        }
    }
}

/// Paths relative to the `assets/` directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub player_manifest: String,
    pub projectile: String,
    pub enemy: String,
    pub enemy_split: String,
    pub font: String,
    pub throw_sound: String,
    pub slice_sound: String,
    pub death_sound: String,
    pub web_sound: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            player_manifest: "sprites/player.json".to_string(),
            projectile: "sprites/knife.png".to_string(),
            enemy: "sprites/avocado.png".to_string(),
            enemy_split: "sprites/avocado_split.png".to_string(),
            font: "fonts/hud.ttf".to_string(),
            throw_sound: "audio/throw.ogg".to_string(),
            slice_sound: "audio/slice.ogg".to_string(),
            death_sound: "audio/death.ogg".to_string(),
            web_sound: "audio/web.ogg".to_string(),
        }
    }
}

/// True when `relative` exists under the `assets/` directory.
pub fn asset_exists(relative: &str) -> bool {
    Path::new("assets").join(relative).exists()
}

fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

pub fn parse_config(contents: &str, file: &str) -> Result<GameConfig, ConfigLoadError> {
    ron_options()
        .from_str(contents)
        .map_err(|e| ConfigLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
}

pub fn load_config(path: &Path) -> Result<GameConfig, ConfigLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ConfigLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;
    parse_config(&contents, &file_name)
}

/// Load the tuning file, falling back to defaults with a warning.
pub fn load_or_default(path: &Path) -> GameConfig {
    match load_config(path) {
        Ok(config) => {
            info!("Loaded tuning from {}", path.display());
            config
        }
        Err(e) => {
            warn!("{}; using default tuning", e);
            GameConfig::default()
        }
    }
}
