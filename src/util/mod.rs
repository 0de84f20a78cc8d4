//! Shared helpers for the motion components.
//!
//! Easing curves, color blending and CSS value parsing.

pub mod color;
pub mod css;
pub mod easing;
