//! The engine's complete interactive vocabulary.
//!
//! Every discrete operation, whether produced by a recognized gesture, a
//! GUI button, or a programmatic call, is a [`SceneCommand`]. Consumers
//! construct commands and pass them to
//! [`TreeEngine::execute`](super::TreeEngine::execute); the gesture
//! pipeline delivers its commands wrapped in [`ControllerEvent`]s over a
//! single channel that the engine drains each frame.

use crate::scene::{GallerySelector, SceneMode};

// ── Commands ─────────────────────────────────────────────────────────────

/// A discrete operation on the scene state machine.
///
/// Every command is valid in every state:
///
/// ```ignore
/// engine.execute(SceneCommand::SetMode(SceneMode::Formed));
/// engine.execute(SceneCommand::ShowGallery(Some(GallerySelector::Top)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    /// Switch between the scattered and the formed tree.
    SetMode(SceneMode),
    /// Open the gallery on a selector, or close it with `None`.
    ShowGallery(Option<GallerySelector>),
    /// Advance to the next theme in the cycle.
    NextTheme,
    /// Flip the snowfall toggle.
    ToggleSnow,
    /// Start a one-shot fireworks burst.
    TriggerFireworks,
}

// ── Controller → engine ──────────────────────────────────────────────────

/// One message from the gesture pipeline to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    /// A command for the scene state machine.
    Command(SceneCommand),
    /// A gallery trigger was accepted; play the trigger sound.
    PlayTriggerSound,
    /// Human-readable pipeline status ("ready", "camera error: …").
    Status(String),
}

// ── Engine → host ────────────────────────────────────────────────────────

/// Side effects the engine hands to downstream collaborators (audio,
/// status bar, effect renderers). Drained with
/// [`TreeEngine::drain_notifications`](super::TreeEngine::drain_notifications).
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// Play the gallery trigger sound.
    TriggerSound,
    /// The pipeline status line changed.
    Status(String),
    /// The active theme changed to the given index.
    ThemeChanged(usize),
    /// Snowfall was switched on or off.
    SnowChanged(bool),
    /// A fireworks burst started or ended.
    FireworksChanged(bool),
}
