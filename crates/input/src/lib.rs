//! Input: held-key state and mouse deltas mapped to camera actions.
//!
//! # Invariants
//! - The camera only ever sees actions, never raw key events.
//! - A controller update rebuilds the view matrix exactly once per frame.

pub mod action;
mod controller;

pub use action::Action;
pub use controller::{CameraController, ConfigError, ControllerConfig, MoveState};
