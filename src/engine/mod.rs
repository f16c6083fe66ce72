//! The render/animate driver.
//!
//! [`TreeEngine`] owns the scene state machine, the entity arena, the
//! gallery carousel and the orbit camera. A host calls
//! [`TreeEngine::update`] once per display frame and then reads
//! [`TreeEngine::frame_geometry`]:
//!
//! ```ignore
//! let mut engine = TreeEngine::new(Options::default());
//! engine.attach_controller(controller);
//! loop {
//!     engine.update(timing.end_frame());
//!     renderer.draw(&engine.frame_geometry());
//!     for note in engine.drain_notifications() { audio.handle(note); }
//! }
//! ```

mod accessors;
mod animation;
pub mod command;
mod construction;
pub mod gallery;
pub mod geometry;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use self::command::{ControllerEvent, Notification, SceneCommand};
use self::gallery::GalleryRing;
use crate::camera::controller::OrbitCamera;
use crate::gesture::GestureController;
use crate::options::Options;
use crate::scene::{EntityArena, PhotoLibrary, SceneState, StateChange};

/// Viewport aspect until the host reports a size.
const DEFAULT_ASPECT: f32 = 16.0 / 9.0;

/// Scene driver. Single-threaded; the gesture pipeline talks to it only
/// through an attached [`GestureController`].
pub struct TreeEngine {
    options: Options,
    scene: SceneState,
    arena: EntityArena,
    photos: PhotoLibrary,
    gallery: GalleryRing,
    camera: OrbitCamera,
    controller: Option<GestureController>,
    notifications: Vec<Notification>,
    status: String,
    rotation_speed: f32,
    orientation_control: bool,
    /// Damped chaos→formed progress of the foliage, `[0, 1]`.
    progress: f32,
    foliage_color: Vec3,
    elapsed: f64,
}

impl TreeEngine {
    /// Engine with entities drawn from `options.formation.seed`, or from
    /// OS entropy when no seed is set.
    #[must_use]
    pub fn new(options: Options) -> Self {
        let mut rng = match options.formation.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(options, &mut rng)
    }

    /// Engine with entities drawn from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(options: Options, rng: &mut R) -> Self {
        let photos = PhotoLibrary::new(
            options.gallery.photo_slots,
            options.gallery.unique_photos,
        );
        let arena = construction::populate(&options.formation, &photos, rng);
        let gallery =
            GalleryRing::new(&options.gallery, options.animation.gallery_lerp);
        let camera = OrbitCamera::new(&options.camera, DEFAULT_ASPECT);
        let scene = SceneState::new(
            options.themes.len(),
            options.effects.fireworks_duration_ms,
        );
        let foliage_color =
            Vec3::from_array(options.themes.get(scene.theme_index()).foliage);

        Self {
            options,
            scene,
            arena,
            photos,
            gallery,
            camera,
            controller: None,
            notifications: Vec::new(),
            status: String::new(),
            rotation_speed: 0.0,
            orientation_control: false,
            progress: 0.0,
            foliage_color,
            elapsed: 0.0,
        }
    }

    /// Apply a command now. Valid in every state.
    pub fn execute(&mut self, command: SceneCommand) {
        let now = self.clock_ms();
        let change = self.scene.apply(command, now);
        self.after_change(change);
    }

    /// Advance one display frame of `dt` seconds: drain the gesture
    /// pipeline, expire timed effects, animate every entity and spin the
    /// camera.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.elapsed += f64::from(dt);

        self.drain_controller();

        let change = self.scene.tick(self.clock_ms());
        self.after_change(change);

        self.animate(dt, self.elapsed as f32);

        if self.gallery.selector().is_none() && !self.orientation_control {
            self.camera.rotate_azimuth(self.rotation_speed);
        }
    }

    /// Take ownership of a running gesture pipeline.
    pub fn attach_controller(&mut self, controller: GestureController) {
        if let Some(mut old) = self.controller.replace(controller) {
            old.stop();
        }
    }

    /// Hand back the gesture pipeline, if any. The rotation signal resets.
    pub fn detach_controller(&mut self) -> Option<GestureController> {
        self.rotation_speed = 0.0;
        self.controller.take()
    }

    /// Set the rotation signal directly (hosts without a gesture pipeline).
    /// Overwritten each frame while a controller is attached.
    pub fn set_rotation_speed(&mut self, speed: f32) {
        self.rotation_speed = speed;
    }

    /// Whether an external orientation source (a gyroscope) steers the
    /// camera. While set, the rotation signal does not spin it.
    pub fn set_orientation_control(&mut self, enabled: bool) {
        self.orientation_control = enabled;
    }

    /// Side effects produced since the last call, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Stop the gesture pipeline, if attached.
    pub fn shutdown(&mut self) {
        if let Some(mut controller) = self.controller.take() {
            controller.stop();
        }
        self.rotation_speed = 0.0;
    }

    fn drain_controller(&mut self) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        let events = controller.poll_events();
        self.rotation_speed = controller.rotation_speed();
        for event in events {
            match event {
                ControllerEvent::Command(command) => self.execute(command),
                ControllerEvent::PlayTriggerSound => {
                    self.notifications.push(Notification::TriggerSound);
                }
                ControllerEvent::Status(status) => {
                    log::info!("gesture status: {status}");
                    self.status.clone_from(&status);
                    self.notifications.push(Notification::Status(status));
                }
            }
        }
    }

    fn after_change(&mut self, change: StateChange) {
        if change.gallery {
            self.gallery.select(self.scene.gallery(), &self.photos);
        }
        if change.theme {
            let index = self.scene.theme_index();
            log::info!("theme: {}", self.options.themes.get(index).name);
            self.notifications.push(Notification::ThemeChanged(index));
        }
        if change.snow {
            self.notifications
                .push(Notification::SnowChanged(self.scene.snowing()));
        }
        if change.fireworks {
            self.notifications.push(Notification::FireworksChanged(
                self.scene.fireworks_active(),
            ));
        }
        if change.mode {
            log::info!("mode: {:?}", self.scene.mode());
        }
    }
}

impl Drop for TreeEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
