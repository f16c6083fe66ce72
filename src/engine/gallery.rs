//! The photo carousel.

use glam::Vec3;

use crate::animation::{lerp_toward, lerp_vec3_toward};
use crate::formation::ring::{display_indices, RingLayout, RingRotation};
use crate::options::GalleryOptions;
use crate::scene::{GallerySelector, PhotoLibrary};

/// Scale below which a closing frame is dropped.
const HIDDEN_SCALE: f32 = 1e-3;

/// One photo frame on the carousel, in carousel-local space.
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryFrame {
    /// Photo slot shown.
    pub slot: usize,
    /// Image number for the slot.
    pub image: usize,
    /// Current local position.
    pub position: Vec3,
    /// Current uniform scale.
    pub scale: f32,
}

impl GalleryFrame {
    /// Caption printed under the photo.
    #[must_use]
    pub fn caption(&self) -> String {
        format!("Memory #{}", self.slot)
    }
}

/// Frames of the open (or closing) gallery plus the ring spin.
///
/// Opening a selector lays its photos out on the ring; frames already
/// showing a slot keep their state, new ones fly out from the hidden point.
/// Closing sends every frame back to the hidden point at scale 0, and a
/// frame is dropped once it has shrunk away.
#[derive(Clone, Debug)]
pub struct GalleryRing {
    selector: Option<GallerySelector>,
    frames: Vec<GalleryFrame>,
    layout: RingLayout,
    rotation: RingRotation,
    hidden: Vec3,
    page_size: usize,
    lerp: f32,
}

impl GalleryRing {
    /// Empty, closed carousel.
    #[must_use]
    pub fn new(options: &GalleryOptions, lerp: f32) -> Self {
        Self {
            selector: None,
            frames: Vec::new(),
            layout: RingLayout::from_options(options),
            rotation: RingRotation::new(options.open_rate, options.close_rate),
            hidden: Vec3::from_array(options.hidden_position),
            page_size: options.page_size,
            lerp,
        }
    }

    /// Active selector.
    #[must_use]
    pub fn selector(&self) -> Option<GallerySelector> {
        self.selector
    }

    /// Whether a selector is active.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.selector.is_some()
    }

    /// Frames currently alive, in ring order.
    #[must_use]
    pub fn frames(&self) -> &[GalleryFrame] {
        &self.frames
    }

    /// Current ring spin angle.
    #[must_use]
    pub fn ring_angle(&self) -> f32 {
        self.rotation.angle()
    }

    /// Switch to `selector`.
    pub fn select(
        &mut self,
        selector: Option<GallerySelector>,
        photos: &PhotoLibrary,
    ) {
        self.selector = selector;
        if selector.is_none() {
            return;
        }
        let mut previous = std::mem::take(&mut self.frames);
        self.frames = display_indices(selector, photos.len(), self.page_size)
            .into_iter()
            .map(|slot| match previous.iter().position(|f| f.slot == slot) {
                Some(i) => previous.swap_remove(i),
                None => GalleryFrame {
                    slot,
                    image: photos.image_for(slot),
                    position: self.hidden,
                    scale: 0.0,
                },
            })
            .collect();
        log::debug!(
            "gallery {selector:?}: {} frames",
            self.frames.len()
        );
    }

    /// Advance spin and every frame by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let open = self.is_open();
        let angle = self.rotation.advance(open, dt);
        let total = self.frames.len();
        for (i, frame) in self.frames.iter_mut().enumerate() {
            let (target, scale) = if open {
                (self.layout.position(i, total, angle), 1.0)
            } else {
                (self.hidden, 0.0)
            };
            frame.position =
                lerp_vec3_toward(frame.position, target, self.lerp, dt);
            frame.scale = lerp_toward(frame.scale, scale, self.lerp, dt);
        }
        if !open {
            self.frames.retain(|f| f.scale > HIDDEN_SCALE);
        }
    }
}

/// Yaw that turns the carousel to face a camera at `eye`.
#[must_use]
pub fn yaw_toward(eye: Vec3) -> f32 {
    eye.x.atan2(eye.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> (GalleryRing, PhotoLibrary) {
        (
            GalleryRing::new(&GalleryOptions::default(), 0.8),
            PhotoLibrary::default(),
        )
    }

    #[test]
    fn opening_a_page_spawns_hidden_frames() {
        let (mut ring, photos) = ring();
        ring.select(Some(GallerySelector::Index(2)), &photos);
        assert_eq!(ring.frames().len(), 11);
        assert_eq!(ring.frames()[0].slot, 12);
        assert_eq!(ring.frames()[0].caption(), "Memory #12");
        assert!(ring.frames().iter().all(|f| f.scale == 0.0));
        assert!(ring
            .frames()
            .iter()
            .all(|f| f.position == Vec3::new(0.0, 25.0, 0.0)));
    }

    #[test]
    fn frames_grow_toward_the_ring() {
        let (mut ring, photos) = ring();
        ring.select(Some(GallerySelector::Top), &photos);
        for _ in 0..600 {
            ring.update(1.0 / 60.0);
        }
        let frame = &ring.frames()[0];
        assert!(frame.scale > 0.99);
        assert!((frame.position.y - 12.0).abs() <= 1.6);
        // Trails the spinning target slightly inside the ring.
        let radial = Vec3::new(frame.position.x, 0.0, frame.position.z).length();
        assert!(radial > 18.0 && radial < 22.5, "radial {radial}");
    }

    #[test]
    fn closing_shrinks_then_drops_frames() {
        let (mut ring, photos) = ring();
        ring.select(Some(GallerySelector::Top), &photos);
        for _ in 0..300 {
            ring.update(1.0 / 60.0);
        }
        ring.select(None, &photos);
        ring.update(1.0 / 60.0);
        assert_eq!(ring.frames().len(), 1);
        for _ in 0..2000 {
            ring.update(1.0 / 60.0);
        }
        assert!(ring.frames().is_empty());
    }

    #[test]
    fn reselecting_keeps_shared_frames() {
        let (mut ring, photos) = ring();
        ring.select(Some(GallerySelector::Index(1)), &photos);
        for _ in 0..60 {
            ring.update(1.0 / 60.0);
        }
        let scale = ring.frames()[0].scale;
        ring.select(Some(GallerySelector::Index(1)), &photos);
        assert_eq!(ring.frames()[0].scale, scale);
    }

    #[test]
    fn ring_spins_forward_when_open() {
        let (mut ring, photos) = ring();
        ring.select(Some(GallerySelector::Top), &photos);
        ring.update(1.0);
        assert!((ring.ring_angle() - 0.4).abs() < 1e-5);
    }

    #[test]
    fn carousel_faces_camera() {
        assert!(yaw_toward(Vec3::new(0.0, 5.0, 50.0)).abs() < 1e-6);
        let side = yaw_toward(Vec3::new(50.0, 5.0, 0.0));
        assert!((side - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
