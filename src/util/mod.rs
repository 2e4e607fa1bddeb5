//! Shared utilities for the rendering engine.
//!
//! Helpers for vector math, colors, frame timing, geometry hashing, and
//! falloff curves.

pub mod color;
pub mod easing;
pub mod frame_timing;
pub mod hash;
pub mod vector;
