//! Orbit camera around the tree.
//!
//! The camera orbits the world origin on a sphere. The render loop spins
//! it by the gesture rotation signal while no gallery is open; a host
//! driving it from device orientation suppresses that spin.

/// Spherical orbit controller with distance and polar limits.
pub mod controller;
/// Projection parameters and view-projection matrix.
pub mod core;
