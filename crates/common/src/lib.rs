//! Shared utilities for the PawGrove renderer.
//!
//! # Invariants
//! - Nothing here touches the GPU or the window; values are plain data.

mod frame;

pub use frame::{FrameStats, FrameTimer};
