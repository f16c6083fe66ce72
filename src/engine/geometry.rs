//! Per-frame output for the rendering collaborator.
//!
//! Each group becomes one [`InstanceBatch`] of tightly packed
//! [`EntityInstance`] records ready for a GPU instance buffer. Positions
//! are in world space: the scene offset and the carousel yaw are already
//! applied.

use glam::{EulerRot, Quat, Vec3};

use super::gallery::yaw_toward;
use super::TreeEngine;
use crate::scene::{AnimatedEntity, EntityGroup};

/// Texture index of an entity without a photo.
pub const NO_TEXTURE: i32 = -1;

/// Per-instance record, 64 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct EntityInstance {
    /// World position.
    pub position: [f32; 3],
    /// Uniform scale.
    pub scale: f32,
    /// Orientation quaternion (x, y, z, w).
    pub rotation: [f32; 4],
    /// Linear RGB color.
    pub color: [f32; 3],
    /// Emissive intensity.
    pub intensity: f32,
    /// Image number, or [`NO_TEXTURE`].
    pub texture: i32,
    /// Padding to 16-byte multiple.
    pub(crate) _pad: [f32; 3],
}

impl EntityInstance {
    /// Instance record for an animated entity.
    #[must_use]
    pub fn from_entity(entity: &AnimatedEntity, offset: Vec3, texture: i32) -> Self {
        let r = entity.rotation();
        Self {
            position: (entity.position() + offset).to_array(),
            scale: entity.scale(),
            rotation: Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z).to_array(),
            color: entity.color().to_array(),
            intensity: entity.intensity(),
            texture,
            _pad: [0.0; 3],
        }
    }
}

/// What a batch draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BatchKind {
    /// One of the animated entity groups.
    Group(EntityGroup),
    /// Gallery carousel frames.
    Gallery,
}

/// Instances of one kind.
#[derive(Clone, Debug, PartialEq)]
pub struct InstanceBatch {
    /// What the instances are.
    pub kind: BatchKind,
    /// Packed records.
    pub instances: Vec<EntityInstance>,
}

impl InstanceBatch {
    /// Raw bytes for upload.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameGeometry {
    /// One batch per group plus the gallery, in draw order.
    pub batches: Vec<InstanceBatch>,
    /// Combined view-projection matrix (column-major).
    pub view_proj: [[f32; 4]; 4],
    /// Eye position.
    pub eye: [f32; 3],
    /// Clear color of the active theme.
    pub background: [f32; 3],
    /// Key light color of the active theme.
    pub key_light: [f32; 3],
    /// Snowfall is on.
    pub snowing: bool,
    /// A fireworks burst is running.
    pub fireworks: bool,
}

impl FrameGeometry {
    /// Batch of one kind.
    #[must_use]
    pub fn batch(&self, kind: BatchKind) -> Option<&InstanceBatch> {
        self.batches.iter().find(|b| b.kind == kind)
    }

    /// Total instances across batches.
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.batches.iter().map(|b| b.instances.len()).sum()
    }
}

impl TreeEngine {
    /// Snapshot the current frame for rendering.
    #[must_use]
    pub fn frame_geometry(&self) -> FrameGeometry {
        let offset = Vec3::from_array(self.options.formation.scene_offset);
        let mut batches: Vec<InstanceBatch> = EntityGroup::ALL
            .iter()
            .map(|&group| InstanceBatch {
                kind: BatchKind::Group(group),
                instances: self
                    .arena
                    .group(group)
                    .iter()
                    .map(|e| {
                        let texture = e.image().map_or(NO_TEXTURE, |slot| {
                            texture_index(self.photos.image_for(slot))
                        });
                        EntityInstance::from_entity(e, offset, texture)
                    })
                    .collect(),
            })
            .collect();
        batches.push(self.gallery_batch(offset));

        let theme = self.theme();
        FrameGeometry {
            batches,
            view_proj: self.camera.camera.build_matrix().to_cols_array_2d(),
            eye: self.camera.eye().to_array(),
            background: theme.background,
            key_light: theme.light,
            snowing: self.scene.snowing(),
            fireworks: self.scene.fireworks_active(),
        }
    }

    fn gallery_batch(&self, offset: Vec3) -> InstanceBatch {
        let eye = self.camera.eye();
        let spin = Quat::from_rotation_y(yaw_toward(eye));
        let instances = self
            .gallery
            .frames()
            .iter()
            .map(|frame| {
                let world = spin * frame.position + offset;
                let facing = Quat::from_rotation_y(
                    (eye.x - world.x).atan2(eye.z - world.z),
                );
                EntityInstance {
                    position: world.to_array(),
                    scale: frame.scale,
                    rotation: facing.to_array(),
                    color: [1.0; 3],
                    intensity: 1.0,
                    texture: texture_index(frame.image),
                    _pad: [0.0; 3],
                }
            })
            .collect();
        InstanceBatch {
            kind: BatchKind::Gallery,
            instances,
        }
    }
}

fn texture_index(image: usize) -> i32 {
    i32::try_from(image).unwrap_or(i32::MAX)
}
