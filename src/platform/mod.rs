//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (`clock`)
//! - Keyboard state and single-press actions (`input`)
//! - The animation-frame loop handle (`frame`)

pub mod clock;
pub mod frame;
pub mod input;

pub use clock::FrameClock;
pub use frame::FrameLoopState;
#[cfg(target_arch = "wasm32")]
pub use frame::AnimationLoop;
pub use input::{KeyAction, KeyState};
