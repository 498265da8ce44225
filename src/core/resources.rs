//! Core domain: run-wide resources shared by the simulation and the shell.

use bevy::prelude::*;
use rand::Rng;

use crate::core::config::{FrameTuning, KinematicsTuning};

#[derive(Resource, Debug)]
pub struct RunConfig {
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: rand::rng().random(),
        }
    }
}

/// Gameplay toggles handed to every simulation step.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimMode {
    pub moon_gravity: bool,
    pub unlimited_ammo: bool,
}

impl SimMode {
    pub fn gravity(&self, tuning: &KinematicsTuning) -> f32 {
        if self.moon_gravity {
            tuning.gravity_moon
        } else {
            tuning.gravity_normal
        }
    }

    pub fn jump_impulse(&self, tuning: &KinematicsTuning) -> f32 {
        if self.moon_gravity {
            tuning.jump_impulse_moon
        } else {
            tuning.jump_impulse_normal
        }
    }

    /// Called on session reset. Ammo mode is a player preference and survives.
    pub fn reset(&mut self) {
        self.moon_gravity = false;
    }
}

/// Wall-clock frame timing. The first frame uses `max_dt`.
#[derive(Resource, Debug, Default)]
pub struct FrameClock {
    last_ms: Option<u64>,
}

impl FrameClock {
    /// Seconds since the previous call, clamped into `[min_dt, max_dt]`.
    pub fn advance(&mut self, now_ms: u64, tuning: &FrameTuning) -> f32 {
        let raw = match self.last_ms {
            Some(last) => now_ms.saturating_sub(last) as f32 / 1000.0,
            None => tuning.max_dt,
        };
        self.last_ms = Some(now_ms);
        raw.clamp(tuning.min_dt, tuning.max_dt)
    }
}
