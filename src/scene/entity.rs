use std::ops::Range;

use glam::{Vec2, Vec3};
use rustc_hash::FxHashMap;

// ---------------------------------------------------------------------------
// Ids and groups
// ---------------------------------------------------------------------------

/// Stable index of an entity in the [`EntityArena`]. Ids are assigned at
/// scene construction and never reused for the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Arena slot of this id.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Animated entity classes. Each class has its own formation and per-frame
/// behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityGroup {
    /// Point-sprite needles of the tree body.
    Foliage,
    /// Framed photos hung on the tree surface.
    Ornament,
    /// Red and gold gift boxes.
    Decoration,
    /// Blinking fairy lights.
    Light,
    /// The star on top.
    Star,
}

impl EntityGroup {
    /// All groups in draw order.
    pub const ALL: [EntityGroup; 5] = [
        EntityGroup::Foliage,
        EntityGroup::Ornament,
        EntityGroup::Decoration,
        EntityGroup::Light,
        EntityGroup::Star,
    ];
}

// ---------------------------------------------------------------------------
// AnimatedEntity
// ---------------------------------------------------------------------------

/// One particle, ornament, decoration, light, or star.
///
/// `origin` and `target` are fixed at creation. The current position,
/// rotation, scale, color, and intensity are written only by the engine's
/// per-frame animation pass; everything else reads them.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimatedEntity {
    group: EntityGroup,
    origin: Vec3,
    target: Vec3,
    seed: f32,
    phase: f32,
    speed: f32,
    spin: Vec2,
    base_color: Vec3,
    base_scale: f32,
    image: Option<usize>,

    position: Vec3,
    rotation: Vec3,
    scale: f32,
    color: Vec3,
    intensity: f32,
}

impl AnimatedEntity {
    /// Entity resting at its scattered `origin`, heading nowhere yet.
    #[must_use]
    pub fn new(group: EntityGroup, origin: Vec3, target: Vec3, seed: f32) -> Self {
        Self {
            group,
            origin,
            target,
            seed,
            phase: 0.0,
            speed: 0.0,
            spin: Vec2::ZERO,
            base_color: Vec3::ONE,
            base_scale: 1.0,
            image: None,
            position: origin,
            rotation: Vec3::ZERO,
            scale: 1.0,
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }

    /// Set the fixed base color (also the starting color).
    #[must_use]
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.base_color = color;
        self.color = color;
        self
    }

    /// Set the fixed base scale (also the starting scale).
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.base_scale = scale;
        self.scale = scale;
        self
    }

    /// Override the starting scale without changing the base scale.
    #[must_use]
    pub fn with_initial_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the wind phase, oscillation speed, and tumble rates.
    #[must_use]
    pub fn with_motion(mut self, phase: f32, speed: f32, spin: Vec2) -> Self {
        self.phase = phase;
        self.speed = speed;
        self.spin = spin;
        self
    }

    /// Attach a photo slot.
    #[must_use]
    pub fn with_image(mut self, slot: usize) -> Self {
        self.image = Some(slot);
        self
    }

    /// Entity class.
    #[must_use]
    pub fn group(&self) -> EntityGroup {
        self.group
    }

    /// Scattered position.
    #[must_use]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Formed position.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Per-entity random scalar in `[0, 1)`.
    #[must_use]
    pub fn seed(&self) -> f32 {
        self.seed
    }

    /// Fixed wind phase offset.
    #[must_use]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Fixed oscillation speed.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Tumble rates about x and y (rad/s) while scattered.
    #[must_use]
    pub fn spin(&self) -> Vec2 {
        self.spin
    }

    /// Fixed base color.
    #[must_use]
    pub fn base_color(&self) -> Vec3 {
        self.base_color
    }

    /// Fixed base scale.
    #[must_use]
    pub fn base_scale(&self) -> f32 {
        self.base_scale
    }

    /// Photo slot for ornaments.
    #[must_use]
    pub fn image(&self) -> Option<usize> {
        self.image
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current Euler rotation (XYZ, radians).
    #[must_use]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Current uniform scale.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Current color.
    #[must_use]
    pub fn color(&self) -> Vec3 {
        self.color
    }

    /// Current emissive intensity.
    #[must_use]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub(crate) fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub(crate) fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    pub(crate) fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    pub(crate) fn set_color(&mut self, color: Vec3) {
        self.color = color;
    }

    pub(crate) fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity;
    }
}

// ---------------------------------------------------------------------------
// EntityArena
// ---------------------------------------------------------------------------

/// Flat storage of every animated entity, grouped contiguously by class.
#[derive(Clone, Debug, Default)]
pub struct EntityArena {
    entities: Vec<AnimatedEntity>,
    ranges: FxHashMap<EntityGroup, Range<usize>>,
}

impl EntityArena {
    /// Empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a group's entities and return the ids they were assigned.
    /// Each group is pushed once; the first push defines its range.
    pub fn push_group(
        &mut self,
        group: EntityGroup,
        entities: Vec<AnimatedEntity>,
    ) -> Range<EntityId> {
        let start = self.entities.len();
        self.entities.extend(entities);
        let end = self.entities.len();
        let _ = self.ranges.entry(group).or_insert(start..end);
        EntityId(start as u32)..EntityId(end as u32)
    }

    /// Entity by id.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&AnimatedEntity> {
        self.entities.get(id.index())
    }

    /// Entities of one class.
    #[must_use]
    pub fn group(&self, group: EntityGroup) -> &[AnimatedEntity] {
        match self.ranges.get(&group) {
            Some(range) => &self.entities[range.clone()],
            None => &[],
        }
    }

    pub(crate) fn group_mut(
        &mut self,
        group: EntityGroup,
    ) -> &mut [AnimatedEntity] {
        match self.ranges.get(&group) {
            Some(range) => &mut self.entities[range.clone()],
            None => &mut [],
        }
    }

    /// All entities in id order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &AnimatedEntity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(i, e)| (EntityId(i as u32), e))
    }

    /// Total entity count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the arena holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
