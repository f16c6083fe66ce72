//! Authoritative scene: the discrete state machine plus flat entity
//! storage and the photo collection.
//!
//! [`SceneState`] holds the mode, the gallery selector, the theme index and
//! the effect toggles. It changes only through [`SceneCommand`]s; the one
//! timed transition (fireworks auto-clear) is an expiry timestamp checked
//! by [`SceneState::tick`].

mod entity;
mod photo;

pub use entity::{AnimatedEntity, EntityArena, EntityGroup, EntityId};
pub use photo::PhotoLibrary;

use crate::engine::command::SceneCommand;

// ---------------------------------------------------------------------------
// Mode and gallery selector
// ---------------------------------------------------------------------------

/// Which endpoint configuration the tree entities head toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SceneMode {
    /// Scattered cloud.
    #[default]
    Chaos,
    /// Assembled tree.
    Formed,
}

/// Which photo subset the gallery ring shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GallerySelector {
    /// The single cover photo.
    Top,
    /// A numbered page of photos, `1..=4` by default.
    Index(u8),
}

impl GallerySelector {
    /// Page selector for `page`, or `None` when `page` is outside
    /// `1..=page_count`.
    #[must_use]
    pub fn page(page: usize, page_count: u8) -> Option<Self> {
        if page >= 1 && page <= usize::from(page_count) {
            Some(Self::Index(page as u8))
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// SceneState
// ---------------------------------------------------------------------------

/// The scene state machine.
///
/// Initial state: chaos, no gallery, theme 0, snow off, no fireworks.
/// There is no terminal state. Mode and gallery are independent axes:
/// switching the mode never closes the gallery by itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneState {
    mode: SceneMode,
    gallery: Option<GallerySelector>,
    theme_index: usize,
    theme_count: usize,
    snowing: bool,
    /// Clock time (ms) at which the running fireworks burst ends.
    fireworks_until: Option<u64>,
    fireworks_duration_ms: u64,
}

/// What a call to [`SceneState::apply`] or [`SceneState::tick`] changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StateChange {
    /// Mode changed.
    pub mode: bool,
    /// Gallery selector changed.
    pub gallery: bool,
    /// Theme index changed.
    pub theme: bool,
    /// Snow toggle changed.
    pub snow: bool,
    /// Fireworks started or ended.
    pub fireworks: bool,
}

impl StateChange {
    /// Whether anything changed.
    #[must_use]
    pub fn any(&self) -> bool {
        self.mode || self.gallery || self.theme || self.snow || self.fireworks
    }
}

impl SceneState {
    /// Initial state over a theme cycle of `theme_count` entries.
    #[must_use]
    pub fn new(theme_count: usize, fireworks_duration_ms: u64) -> Self {
        Self {
            mode: SceneMode::Chaos,
            gallery: None,
            theme_index: 0,
            theme_count: theme_count.max(1),
            snowing: false,
            fireworks_until: None,
            fireworks_duration_ms,
        }
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> SceneMode {
        self.mode
    }

    /// Current gallery selector, if a gallery is open.
    #[must_use]
    pub fn gallery(&self) -> Option<GallerySelector> {
        self.gallery
    }

    /// Index into the theme cycle.
    #[must_use]
    pub fn theme_index(&self) -> usize {
        self.theme_index
    }

    /// Whether snowfall is on.
    #[must_use]
    pub fn snowing(&self) -> bool {
        self.snowing
    }

    /// Whether a fireworks burst is running.
    #[must_use]
    pub fn fireworks_active(&self) -> bool {
        self.fireworks_until.is_some()
    }

    /// Apply one command at clock time `now_ms`. Total over every state.
    pub fn apply(&mut self, command: SceneCommand, now_ms: u64) -> StateChange {
        let mut change = StateChange::default();
        match command {
            SceneCommand::SetMode(mode) => {
                change.mode = self.mode != mode;
                self.mode = mode;
            }
            SceneCommand::ShowGallery(selector) => {
                change.gallery = self.gallery != selector;
                self.gallery = selector;
            }
            SceneCommand::NextTheme => {
                let next = (self.theme_index + 1) % self.theme_count;
                change.theme = next != self.theme_index;
                self.theme_index = next;
            }
            SceneCommand::ToggleSnow => {
                self.snowing = !self.snowing;
                change.snow = true;
            }
            SceneCommand::TriggerFireworks => {
                change.fireworks = self.fireworks_until.is_none();
                self.fireworks_until =
                    Some(now_ms.saturating_add(self.fireworks_duration_ms));
            }
        }
        if change.any() {
            log::debug!("scene: {command:?} at {now_ms}ms -> {self:?}");
        }
        change
    }

    /// Expire timed effects. Call once per frame.
    pub fn tick(&mut self, now_ms: u64) -> StateChange {
        let mut change = StateChange::default();
        if self.fireworks_until.is_some_and(|until| now_ms >= until) {
            self.fireworks_until = None;
            change.fireworks = true;
            log::debug!("scene: fireworks ended at {now_ms}ms");
        }
        change
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(3, 3000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state() {
        let s = SceneState::default();
        assert_eq!(s.mode(), SceneMode::Chaos);
        assert_eq!(s.gallery(), None);
        assert_eq!(s.theme_index(), 0);
        assert!(!s.snowing());
        assert!(!s.fireworks_active());
    }

    #[test]
    fn mode_switch_keeps_gallery_open() {
        let mut s = SceneState::default();
        let _ = s.apply(SceneCommand::ShowGallery(Some(GallerySelector::Top)), 0);
        let change = s.apply(SceneCommand::SetMode(SceneMode::Formed), 10);
        assert!(change.mode);
        assert!(!change.gallery);
        assert_eq!(s.gallery(), Some(GallerySelector::Top));
    }

    #[test]
    fn theme_cycles_through_three() {
        let mut s = SceneState::default();
        let seen: Vec<usize> = (0..4)
            .map(|_| {
                let _ = s.apply(SceneCommand::NextTheme, 0);
                s.theme_index()
            })
            .collect();
        assert_eq!(seen, vec![1, 2, 0, 1]);
    }

    #[test]
    fn snow_toggles() {
        let mut s = SceneState::default();
        let _ = s.apply(SceneCommand::ToggleSnow, 0);
        assert!(s.snowing());
        let _ = s.apply(SceneCommand::ToggleSnow, 0);
        assert!(!s.snowing());
    }

    #[test]
    fn fireworks_clear_after_duration() {
        let mut s = SceneState::default();
        let change = s.apply(SceneCommand::TriggerFireworks, 0);
        assert!(change.fireworks);
        assert!(!s.tick(2999).fireworks);
        assert!(s.fireworks_active());
        assert!(s.tick(3000).fireworks);
        assert!(!s.fireworks_active());
    }

    #[test]
    fn retrigger_extends_fireworks() {
        let mut s = SceneState::default();
        let _ = s.apply(SceneCommand::TriggerFireworks, 0);
        let change = s.apply(SceneCommand::TriggerFireworks, 2000);
        assert!(!change.fireworks);
        let _ = s.tick(3500);
        assert!(s.fireworks_active());
        let _ = s.tick(5000);
        assert!(!s.fireworks_active());
    }

    #[test]
    fn repeated_commands_report_no_change() {
        let mut s = SceneState::default();
        assert!(!s.apply(SceneCommand::SetMode(SceneMode::Chaos), 0).any());
        assert!(!s.apply(SceneCommand::ShowGallery(None), 0).any());
    }

    #[test]
    fn page_selector_bounds() {
        assert_eq!(GallerySelector::page(0, 4), None);
        assert_eq!(GallerySelector::page(1, 4), Some(GallerySelector::Index(1)));
        assert_eq!(GallerySelector::page(4, 4), Some(GallerySelector::Index(4)));
        assert_eq!(GallerySelector::page(5, 4), None);
    }
}
