//! Animation primitives shared by every animated group.
//!
//! The easing curve shapes a progress value; damping helpers move a value
//! toward its target in a frame-rate-independent way.

pub mod damping;
pub mod easing;

pub use damping::{damp, damp_vec3, lerp_toward, lerp_vec3_toward};
pub use easing::cubic_in_out;
