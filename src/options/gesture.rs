use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Gesture", inline)]
#[serde(default)]
/// Thresholds of the gesture pipeline. The defaults are empirically tuned.
pub struct GestureOptions {
    /// Minimum gap between two inference runs, in milliseconds.
    #[schemars(title = "Inference Interval", range(min = 0, max = 1000))]
    pub inference_interval_ms: u64,
    /// A classification must score strictly above this to act.
    #[schemars(title = "Min Confidence", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub min_confidence: f32,
    /// Minimum gap between two gallery triggers, in milliseconds.
    #[schemars(title = "Gallery Cooldown", range(min = 0, max = 5000))]
    pub gallery_cooldown_ms: u64,
    /// Multiplier from wrist offset to rotation speed.
    #[schemars(title = "Rotation Gain", range(min = 0.0, max = 0.5), extend("step" = 0.01))]
    pub rotation_gain: f32,
    /// Rotation speeds at or below this magnitude report as zero.
    #[schemars(title = "Dead Zone", range(min = 0.0, max = 0.05), extend("step" = 0.005))]
    pub rotation_dead_zone: f32,
    /// Hands requested from the classifier; handed to the model loader.
    /// Only the best hand drives the scene.
    #[schemars(skip)]
    pub max_hands: usize,
    /// Emit a status line naming every actionable gesture.
    #[schemars(title = "Debug Status")]
    pub debug_status: bool,
}

impl Default for GestureOptions {
    fn default() -> Self {
        Self {
            inference_interval_ms: 100,
            min_confidence: 0.5,
            gallery_cooldown_ms: 1000,
            rotation_gain: 0.1,
            rotation_dead_zone: 0.02,
            max_hands: 1,
            debug_status: false,
        }
    }
}
