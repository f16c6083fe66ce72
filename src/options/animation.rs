use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
/// Damping time constants and per-group blend rates.
pub struct AnimationOptions {
    /// Time constant (seconds) of the foliage formation progress damp.
    #[schemars(title = "Formation Time", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub formation_time_constant: f32,
    /// Per-second lerp factor for photo ornaments.
    #[schemars(title = "Ornament Speed", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub ornament_lerp: f32,
    /// Per-second lerp factor for box decorations.
    #[schemars(title = "Decoration Speed", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub decoration_lerp: f32,
    /// Per-second lerp factor for fairy lights.
    #[schemars(title = "Light Speed", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub light_lerp: f32,
    /// Per-second scale lerp factor for the top star.
    #[schemars(skip)]
    pub star_lerp: f32,
    /// Per-second position and scale lerp factor for gallery frames.
    #[schemars(skip)]
    pub gallery_lerp: f32,
    /// Per-second blend rate of the foliage toward the theme color.
    #[schemars(skip)]
    pub foliage_color_rate: f32,
    /// Amplitude of the shimmer noise added to formed foliage.
    #[schemars(title = "Shimmer", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub foliage_noise: f32,
    /// Amplitude of the ornament wind sway about x.
    #[schemars(skip)]
    pub wind_pitch: f32,
    /// Amplitude of the ornament wind sway about z.
    #[schemars(skip)]
    pub wind_roll: f32,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            formation_time_constant: 1.5,
            ornament_lerp: 0.8,
            decoration_lerp: 1.0,
            light_lerp: 2.0,
            star_lerp: 2.0,
            gallery_lerp: 0.8,
            foliage_color_rate: 2.0,
            foliage_noise: 0.15,
            wind_pitch: 0.2,
            wind_roll: 0.1,
        }
    }
}
