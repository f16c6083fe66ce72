//! Gallery carousel layout: which photo slots a selector shows and where
//! each frame sits on the ring.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::options::GalleryOptions;
use crate::scene::GallerySelector;

/// Photo slots shown for `selector` out of `photo_count` total slots
/// (cover included). `Top` is the cover alone; `Index(k)` is a contiguous
/// page of `page_size` slots starting at `(k − 1) · page_size + 1`,
/// clipped to the collection.
#[must_use]
pub fn display_indices(
    selector: Option<GallerySelector>,
    photo_count: usize,
    page_size: usize,
) -> Vec<usize> {
    match selector {
        None => Vec::new(),
        Some(GallerySelector::Top) => {
            if photo_count > 0 {
                vec![0]
            } else {
                Vec::new()
            }
        }
        Some(GallerySelector::Index(k)) => {
            if k == 0 {
                return Vec::new();
            }
            let start = usize::from(k - 1) * page_size + 1;
            let end = (start + page_size).min(photo_count);
            (start..end).collect()
        }
    }
}

/// Circle geometry of the carousel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingLayout {
    /// Ring radius.
    pub radius: f32,
    /// Ring base height.
    pub height: f32,
    /// Vertical bob amplitude.
    pub bob: f32,
}

impl RingLayout {
    /// Layout from the gallery options.
    #[must_use]
    pub fn from_options(opts: &GalleryOptions) -> Self {
        Self {
            radius: opts.ring_radius,
            height: opts.ring_height,
            bob: opts.bob_amplitude,
        }
    }

    /// Position of frame `i` of `total`, spun by `rotation` radians.
    #[must_use]
    pub fn position(&self, i: usize, total: usize, rotation: f32) -> Vec3 {
        let angle = i as f32 * (TAU / total.max(1) as f32) + rotation;
        Vec3::new(
            angle.sin() * self.radius,
            self.height + (2.0 * angle).cos() * self.bob,
            angle.cos() * self.radius,
        )
    }
}

/// Carousel spin. Winds forward while a gallery is open and unwinds
/// faster while closed, which reads as an opening/closing sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingRotation {
    angle: f32,
    open_rate: f32,
    close_rate: f32,
}

impl RingRotation {
    /// Rotation at angle 0.
    #[must_use]
    pub fn new(open_rate: f32, close_rate: f32) -> Self {
        Self {
            angle: 0.0,
            open_rate,
            close_rate,
        }
    }

    /// Current angle in `[0, 2π)`.
    #[must_use]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Step by `dt` seconds.
    pub fn advance(&mut self, open: bool, dt: f32) -> f32 {
        let rate = if open { self.open_rate } else { -self.close_rate };
        self.angle = (self.angle + rate * dt).rem_euclid(TAU);
        self.angle
    }
}
