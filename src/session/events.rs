//! Session domain: discrete outcomes of a frame.

use bevy::ecs::message::Message;

/// Things that happened during one simulation step. The shell turns these
/// into sound cues; the simulation itself never plays audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ProjectileFired,
    EnemyHit,
    PlayerDied,
    WebAttached,
}

/// Sent when the session restarts so view state (camera framing) can follow.
#[derive(Debug, Clone, Copy)]
pub struct SessionReset;

impl Message for SessionReset {}
