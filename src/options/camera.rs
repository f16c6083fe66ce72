use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Orbit camera projection and limits.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Initial eye position; the camera orbits the origin.
    #[schemars(skip)]
    pub start_position: [f32; 3],
    /// Closest orbit distance.
    #[schemars(title = "Min Distance", range(min = 1.0, max = 100.0), extend("step" = 1.0))]
    pub min_distance: f32,
    /// Farthest orbit distance.
    #[schemars(title = "Max Distance", range(min = 10.0, max = 500.0), extend("step" = 1.0))]
    pub max_distance: f32,
    /// Largest polar angle (radians from +Y) the eye may reach.
    #[schemars(skip)]
    pub max_polar_angle: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 50.0,
            start_position: [0.0, 5.0, 50.0],
            min_distance: 20.0,
            max_distance: 100.0,
            max_polar_angle: std::f32::consts::PI / 1.7,
        }
    }
}
