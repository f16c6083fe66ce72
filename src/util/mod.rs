//! Shared utilities for the animation engine.
//!
//! Helpers for frame timing and RGB color handling.

pub mod color;
pub mod frame_timing;
