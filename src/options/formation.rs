use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Formation", inline)]
#[serde(default)]
/// Entity counts and the geometry of the scattered and formed layouts.
pub struct FormationOptions {
    /// Number of foliage points.
    #[schemars(title = "Foliage Points", range(min = 0, max = 20000))]
    pub foliage_count: usize,
    /// Number of photo ornaments hung on the tree.
    #[schemars(title = "Ornaments", range(min = 0, max = 1000))]
    pub ornament_count: usize,
    /// Number of box decorations.
    #[schemars(title = "Decorations", range(min = 0, max = 500))]
    pub decoration_count: usize,
    /// Number of fairy lights.
    #[schemars(title = "Lights", range(min = 0, max = 1000))]
    pub light_count: usize,
    /// Height of the tree cone.
    #[schemars(title = "Tree Height", range(min = 4.0, max = 60.0), extend("step" = 0.5))]
    pub tree_height: f32,
    /// Radius of the cone at its base.
    #[schemars(title = "Tree Radius", range(min = 1.0, max = 30.0), extend("step" = 0.5))]
    pub tree_base_radius: f32,
    /// Extra radius added to ornaments so they hang outside the foliage.
    #[schemars(skip)]
    pub ornament_offset: f32,
    /// Radius of the ball foliage scatters into.
    #[schemars(title = "Scatter Radius", range(min = 5.0, max = 80.0), extend("step" = 1.0))]
    pub foliage_scatter_radius: f32,
    /// Edge length of the cube ornaments scatter into.
    #[schemars(skip)]
    pub ornament_scatter_extent: f32,
    /// Edge length of the cube decorations scatter into.
    #[schemars(skip)]
    pub decoration_scatter_extent: f32,
    /// Radius of the sphere shell lights scatter onto.
    #[schemars(skip)]
    pub light_scatter_radius: f32,
    /// Radius of the cylinder decorations gather into.
    #[schemars(skip)]
    pub decoration_radius: f32,
    /// Height of the cylinder decorations gather into.
    #[schemars(skip)]
    pub decoration_height: f32,
    /// Radius of the cylinder lights gather into.
    #[schemars(skip)]
    pub light_radius: f32,
    /// Height of the cylinder lights gather into.
    #[schemars(skip)]
    pub light_height: f32,
    /// Height of the top star above the tree's centre.
    #[schemars(skip)]
    pub star_height: f32,
    /// Translation applied to the whole tree group.
    #[schemars(skip)]
    pub scene_offset: [f32; 3],
    /// Seed for reproducible layouts. `None` draws from the OS.
    #[schemars(skip)]
    pub seed: Option<u64>,
}

impl Default for FormationOptions {
    fn default() -> Self {
        Self {
            foliage_count: 3500,
            ornament_count: 200,
            decoration_count: 80,
            light_count: 150,
            tree_height: 22.0,
            tree_base_radius: 9.0,
            ornament_offset: 0.5,
            foliage_scatter_radius: 25.0,
            ornament_scatter_extent: 70.0,
            decoration_scatter_extent: 60.0,
            light_scatter_radius: 30.0,
            decoration_radius: 8.0,
            decoration_height: 20.0,
            light_radius: 9.0,
            light_height: 22.0,
            star_height: 12.5,
            scene_offset: [0.0, -6.0, 0.0],
            seed: None,
        }
    }
}
