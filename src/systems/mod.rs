//! The two engines: drag quantization and sprite animation.
//!
//! Neither knows about the other or about rendering.

pub mod animation;
pub mod quantizer;

pub use animation::{AnimationCursor, AnimationStateMachine, TickOutcome};
pub use quantizer::{direction_between, direction_for_angle, DirectionQuantizer, DragAnchor};
