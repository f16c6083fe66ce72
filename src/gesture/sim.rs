//! Synthetic camera and classifier for demos and tests.
//!
//! [`ScriptedCamera`] emits blank frames at a fixed rate; the
//! [`ScriptedClassifier`] answers each frame from a [`GestureScript`], a
//! timeline of hand poses that can be written in TOML:
//!
//! ```toml
//! [[steps]]
//! at_ms = 0
//! category = "Closed_Fist"
//! score = 0.9
//!
//! [[steps]]
//! at_ms = 2000
//! category = "Victory"
//! fingers = 2
//! wrist_x = 0.2
//!
//! [[steps]]
//! at_ms = 4000   # no category: hand leaves the frame
//! ```

use std::path::Path;
use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{
    FrameSource, GestureCategory, GestureClassifier, GestureSample,
    VideoFrame, FINGER_PIPS, FINGER_TIPS, LANDMARK_COUNT,
};
use crate::error::GroveError;

// ---------------------------------------------------------------------------
// Camera
// ---------------------------------------------------------------------------

/// Frame source producing empty frames at `fps` for a fixed duration.
#[derive(Debug)]
pub struct ScriptedCamera {
    fps: u32,
    duration_ms: Option<u64>,
    realtime: bool,
    deny: bool,
    next_ms: f64,
    open: bool,
}

impl ScriptedCamera {
    /// Camera running for `duration_ms` (forever when `None`). With
    /// `realtime` set, `next_frame` sleeps one frame interval per frame.
    #[must_use]
    pub fn new(fps: u32, duration_ms: Option<u64>, realtime: bool) -> Self {
        Self {
            fps: fps.max(1),
            duration_ms,
            realtime,
            deny: false,
            next_ms: 0.0,
            open: false,
        }
    }

    /// Camera whose `open` fails as if permission were denied.
    #[must_use]
    pub fn denied() -> Self {
        Self {
            deny: true,
            ..Self::new(30, Some(0), false)
        }
    }

    /// Whether the device is currently held.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    fn frame_interval_ms(&self) -> f64 {
        1000.0 / f64::from(self.fps)
    }
}

impl FrameSource for ScriptedCamera {
    fn open(&mut self) -> Result<(), GroveError> {
        if self.deny {
            return Err(GroveError::CameraUnavailable("permission denied".into()));
        }
        self.open = true;
        self.next_ms = 0.0;
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Option<VideoFrame>, GroveError> {
        if !self.open {
            return Err(GroveError::CameraUnavailable("device not open".into()));
        }
        let timestamp_ms = self.next_ms as u64;
        if self.duration_ms.is_some_and(|end| timestamp_ms > end) {
            return Ok(None);
        }
        if self.realtime {
            std::thread::sleep(Duration::from_secs_f64(
                self.frame_interval_ms() / 1000.0,
            ));
        }
        self.next_ms += self.frame_interval_ms();
        Ok(Some(VideoFrame {
            timestamp_ms,
            width: 640,
            height: 480,
            data: Vec::new(),
        }))
    }

    fn close(&mut self) {
        self.open = false;
    }
}

// ---------------------------------------------------------------------------
// Script
// ---------------------------------------------------------------------------

fn default_score() -> f32 {
    0.9
}

fn default_wrist_x() -> f32 {
    0.5
}

fn default_hands() -> usize {
    1
}

/// One pose held from `at_ms` until the next step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Start of the pose.
    pub at_ms: u64,
    /// Classifier label; absent means no hand in view.
    #[serde(default)]
    pub category: Option<String>,
    /// Reported confidence.
    #[serde(default = "default_score")]
    pub score: f32,
    /// Normalized wrist `x`.
    #[serde(default = "default_wrist_x")]
    pub wrist_x: f32,
    /// Extended non-thumb fingers (0 to 4).
    #[serde(default)]
    pub fingers: usize,
    /// Identical hands in view.
    #[serde(default = "default_hands")]
    pub hands: usize,
}

impl ScriptStep {
    /// Step showing `label` at `at_ms` with default confidence and a
    /// centred wrist.
    #[must_use]
    pub fn pose(at_ms: u64, label: &str, fingers: usize) -> Self {
        Self {
            at_ms,
            category: Some(label.to_owned()),
            score: default_score(),
            wrist_x: default_wrist_x(),
            fingers,
            hands: default_hands(),
        }
    }

    /// Step with no hand in view.
    #[must_use]
    pub fn empty(at_ms: u64) -> Self {
        Self {
            at_ms,
            category: None,
            score: 0.0,
            wrist_x: default_wrist_x(),
            fingers: 0,
            hands: 0,
        }
    }

    /// Same step with the wrist moved to `wrist_x`.
    #[must_use]
    pub fn at_wrist(mut self, wrist_x: f32) -> Self {
        self.wrist_x = wrist_x;
        self
    }

    /// Same step with `hands` copies of the hand in view.
    #[must_use]
    pub fn with_hands(mut self, hands: usize) -> Self {
        self.hands = hands;
        self
    }

    fn sample(&self, timestamp_ms: u64) -> Option<GestureSample> {
        let label = self.category.as_deref()?;
        Some(GestureSample {
            category: GestureCategory::from_label(label),
            score: self.score,
            landmarks: synth_landmarks(self.wrist_x, self.fingers),
            timestamp_ms,
        })
    }
}

/// Timeline of hand poses.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GestureScript {
    /// Steps; sorted by `at_ms` on load.
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

impl GestureScript {
    /// Script from steps in any order.
    #[must_use]
    pub fn new(mut steps: Vec<ScriptStep>) -> Self {
        steps.sort_by_key(|s| s.at_ms);
        Self { steps }
    }

    /// Parse a TOML script.
    ///
    /// # Errors
    ///
    /// Returns [`GroveError::Script`] on malformed input.
    pub fn from_toml(content: &str) -> Result<Self, GroveError> {
        let script: Self =
            toml::from_str(content).map_err(|e| GroveError::Script(e.to_string()))?;
        Ok(Self::new(script.steps))
    }

    /// Load a TOML script from disk.
    ///
    /// # Errors
    ///
    /// Returns [`GroveError::Io`] if the file cannot be read and
    /// [`GroveError::Script`] if it does not parse.
    pub fn load(path: &Path) -> Result<Self, GroveError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Built-in tour through every gesture: form, spin, open a page,
    /// the cover with fireworks, scatter, and leave.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(vec![
            ScriptStep::empty(0),
            ScriptStep::pose(500, "Closed_Fist", 0),
            ScriptStep::pose(2500, "Closed_Fist", 0).at_wrist(0.15),
            ScriptStep::pose(4500, "Victory", 2),
            ScriptStep::pose(7000, "Thumb_Up", 0),
            ScriptStep::pose(9500, "Closed_Fist", 0).at_wrist(0.85),
            ScriptStep::pose(11_500, "Open_Palm", 4),
            ScriptStep::empty(13_500),
        ])
    }

    /// Step active at `timestamp_ms`.
    #[must_use]
    pub fn step_at(&self, timestamp_ms: u64) -> Option<&ScriptStep> {
        self.steps.iter().rev().find(|s| s.at_ms <= timestamp_ms)
    }

    /// Time of the last step.
    #[must_use]
    pub fn end_ms(&self) -> u64 {
        self.steps.last().map_or(0, |s| s.at_ms)
    }
}

/// Classifier answering from a [`GestureScript`], reporting at most
/// `max_hands` hands per frame.
#[derive(Clone, Debug)]
pub struct ScriptedClassifier {
    script: GestureScript,
    max_hands: usize,
}

impl ScriptedClassifier {
    /// Classifier replaying `script`.
    #[must_use]
    pub fn new(script: GestureScript, max_hands: usize) -> Self {
        Self { script, max_hands }
    }
}

impl Default for ScriptedClassifier {
    fn default() -> Self {
        Self::new(GestureScript::default(), 1)
    }
}

impl GestureClassifier for ScriptedClassifier {
    fn recognize(
        &mut self,
        _frame: &VideoFrame,
        timestamp_ms: u64,
    ) -> Result<Vec<GestureSample>, GroveError> {
        let Some(step) = self.script.step_at(timestamp_ms) else {
            return Ok(Vec::new());
        };
        Ok(step.sample(timestamp_ms).map_or_else(Vec::new, |sample| {
            vec![sample; step.hands.min(self.max_hands)]
        }))
    }
}

/// Landmarks of an upright hand at `wrist_x` with the first `fingers`
/// non-thumb fingers extended.
fn synth_landmarks(wrist_x: f32, fingers: usize) -> Vec<Vec3> {
    let mut landmarks = vec![Vec3::new(wrist_x, 0.55, 0.0); LANDMARK_COUNT];
    landmarks[0].y = 0.8;
    for (i, (&tip, &pip)) in FINGER_TIPS.iter().zip(&FINGER_PIPS).enumerate() {
        landmarks[pip].y = 0.5;
        landmarks[tip].y = if i < fingers { 0.3 } else { 0.6 };
    }
    landmarks
}
