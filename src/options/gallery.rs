use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Gallery", inline)]
#[serde(default)]
/// Photo collection size and the carousel ring layout.
pub struct GalleryOptions {
    /// Radius of the carousel ring.
    #[schemars(title = "Ring Radius", range(min = 5.0, max = 60.0), extend("step" = 0.5))]
    pub ring_radius: f32,
    /// Base height of the carousel ring.
    #[schemars(title = "Ring Height", range(min = -20.0, max = 40.0), extend("step" = 0.5))]
    pub ring_height: f32,
    /// Vertical bob of each frame around the ring height.
    #[schemars(skip)]
    pub bob_amplitude: f32,
    /// Photos shown per numbered page.
    #[schemars(skip)]
    pub page_size: usize,
    /// Number of numbered pages a finger count can select.
    #[schemars(skip)]
    pub page_count: u8,
    /// Ring rotation rate while a gallery is open (rad/s).
    #[schemars(title = "Spin Rate", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub open_rate: f32,
    /// Ring unwind rate while the gallery is closed (rad/s).
    #[schemars(skip)]
    pub close_rate: f32,
    /// Point frames collapse to when the gallery closes.
    #[schemars(skip)]
    pub hidden_position: [f32; 3],
    /// Logical photo slots after the cover.
    #[schemars(skip)]
    pub photo_slots: usize,
    /// Distinct images the slots cycle over.
    #[schemars(skip)]
    pub unique_photos: usize,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            ring_radius: 22.0,
            ring_height: 12.0,
            bob_amplitude: 1.5,
            page_size: 11,
            page_count: 4,
            open_rate: 0.4,
            close_rate: 1.5,
            hidden_position: [0.0, 25.0, 0.0],
            photo_slots: 44,
            unique_photos: 31,
        }
    }
}
