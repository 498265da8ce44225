//! Movement domain: actor body, kinematics and landing.

pub mod actor;
pub mod kinematics;


pub use actor::{Actor, ActorBody, AnchorUv, Facing, Flip, FlipKind};
pub use kinematics::{Landing, jump, resolve_landing, step_actor};
