//! Player animation frame selection.
//!
//! Pose cells take priority: the web lock pose while a grapple is out, then
//! the throw pose while it is held. Otherwise the walk clip plays while
//! moving and the idle row cycles while standing.

use bevy::prelude::*;

use super::manifest::{ClipDef, PlayerSheet, SheetCell};
use crate::movement::Actor;

/// Playback state for the player sprite.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlayerAnimator {
    pub cell: SheetCell,
    pub last_tick_ms: u64,
}

impl Default for PlayerAnimator {
    fn default() -> Self {
        Self {
            cell: SheetCell { row: 0, col: 0 },
            last_tick_ms: 0,
        }
    }
}

impl PlayerAnimator {
    /// Pick this frame's cell.
    pub fn update(&mut self, actor: &Actor, sheet: &PlayerSheet, now_ms: u64) -> SheetCell {
        if actor.frame_lock {
            self.cell = sheet.web_lock;
        } else if actor.throw_pose_active(now_ms) {
            self.cell = sheet.throw_pose;
        } else if actor.walking {
            self.play(sheet.walk, now_ms);
        } else {
            self.play(sheet.idle, now_ms);
        }
        self.cell
    }

    fn play(&mut self, clip: ClipDef, now_ms: u64) {
        if now_ms.saturating_sub(self.last_tick_ms) < clip.frame_ms {
            return;
        }
        let col = if self.cell.row != clip.row || self.cell.col >= clip.last {
            clip.first
        } else {
            self.cell.col + 1
        };
        self.cell = SheetCell { row: clip.row, col };
        self.last_tick_ms = now_ms;
    }
}
