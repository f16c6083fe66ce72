//! Read-only queries on [`TreeEngine`].

use glam::Vec3;

use super::gallery::GalleryRing;
use super::TreeEngine;
use crate::camera::controller::OrbitCamera;
use crate::options::{Options, ThemeConfig};
use crate::scene::{EntityArena, PhotoLibrary, SceneState};

// ── Scene ──

impl TreeEngine {
    /// Discrete scene state.
    #[must_use]
    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    /// Every animated entity.
    #[must_use]
    pub fn arena(&self) -> &EntityArena {
        &self.arena
    }

    /// The photo carousel.
    #[must_use]
    pub fn gallery(&self) -> &GalleryRing {
        &self.gallery
    }

    /// Photo slot table.
    #[must_use]
    pub fn photos(&self) -> &PhotoLibrary {
        &self.photos
    }

    /// Active theme.
    #[must_use]
    pub fn theme(&self) -> ThemeConfig {
        self.options.themes.get(self.scene.theme_index())
    }

    /// Damped chaos→formed progress in `[0, 1]`.
    #[must_use]
    pub fn formation_progress(&self) -> f32 {
        self.progress
    }

    /// Foliage base color, blending toward the active theme.
    #[must_use]
    pub fn foliage_color(&self) -> Vec3 {
        self.foliage_color
    }
}

// ── Camera ──

impl TreeEngine {
    /// Orbit camera.
    #[must_use]
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Mutable orbit camera, for host drag and zoom input.
    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    /// Rotation signal applied this frame.
    #[must_use]
    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }
}

// ── Session ──

impl TreeEngine {
    /// Options the engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Latest gesture pipeline status line; empty before the first one.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Whether a gesture pipeline is attached.
    #[must_use]
    pub fn has_controller(&self) -> bool {
        self.controller.is_some()
    }

    /// Scene clock in milliseconds, advanced by [`Self::update`].
    #[must_use]
    pub fn clock_ms(&self) -> u64 {
        (self.elapsed * 1000.0) as u64
    }
}
