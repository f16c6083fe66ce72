//! Gesture recognition pipeline.
//!
//! Video frames flow from a [`FrameSource`] through a throttled
//! [`GestureClassifier`] into the [`GestureInterpreter`], which turns each
//! classification into [`SceneCommand`](crate::engine::command::SceneCommand)s
//! and a continuous rotation signal. [`GestureController`] runs all of this
//! on a background thread and hands the results to the render loop without
//! blocking it.
//!
//! Landmark coordinates are normalized image coordinates: `x` grows to
//! the right, `y` grows downward, both in `[0, 1]`.

mod controller;
mod interpreter;
mod sim;
mod source;

use glam::Vec3;

pub use controller::{
    GestureController, STATUS_CAMERA, STATUS_LOADING, STATUS_READY,
};
pub use interpreter::{
    count_extended_fingers, rotation_from_wrist, GestureInterpreter,
    InferenceThrottle, TickOutcome,
};
pub use sim::{GestureScript, ScriptStep, ScriptedCamera, ScriptedClassifier};
pub use source::{FrameSource, GestureClassifier};

/// Landmarks per tracked hand.
pub const LANDMARK_COUNT: usize = 21;

/// Fingertip landmark indices of the index, middle, ring, and little
/// fingers.
pub const FINGER_TIPS: [usize; 4] = [8, 12, 16, 20];

/// Middle-joint landmark indices matching [`FINGER_TIPS`].
pub const FINGER_PIPS: [usize; 4] = [6, 10, 14, 18];

/// Gesture classes reported by the classifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GestureCategory {
    /// Flat open hand.
    OpenPalm,
    /// Closed fist.
    ClosedFist,
    /// Thumb pointing up.
    ThumbUp,
    /// Thumb pointing down.
    ThumbDown,
    /// Index finger pointing up.
    PointingUp,
    /// Index and middle finger spread.
    Victory,
    /// Thumb, index, and little finger extended.
    ILoveYou,
    /// A hand is present but matches no class.
    Unrecognized,
    /// Any label this crate does not know.
    Other(String),
}

impl GestureCategory {
    /// Parse a classifier label such as `"Open_Palm"`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "Open_Palm" => Self::OpenPalm,
            "Closed_Fist" => Self::ClosedFist,
            "Thumb_Up" => Self::ThumbUp,
            "Thumb_Down" => Self::ThumbDown,
            "Pointing_Up" => Self::PointingUp,
            "Victory" => Self::Victory,
            "ILoveYou" => Self::ILoveYou,
            "None" | "" => Self::Unrecognized,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Classifier label of this category.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::OpenPalm => "Open_Palm",
            Self::ClosedFist => "Closed_Fist",
            Self::ThumbUp => "Thumb_Up",
            Self::ThumbDown => "Thumb_Down",
            Self::PointingUp => "Pointing_Up",
            Self::Victory => "Victory",
            Self::ILoveYou => "ILoveYou",
            Self::Unrecognized => "None",
            Self::Other(label) => label,
        }
    }
}

/// One classified hand from one inference tick.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureSample {
    /// Best gesture class.
    pub category: GestureCategory,
    /// Classifier confidence in `[0, 1]`.
    pub score: f32,
    /// Hand landmarks, [`LANDMARK_COUNT`] when complete.
    pub landmarks: Vec<Vec3>,
    /// Timestamp of the frame the sample came from.
    pub timestamp_ms: u64,
}

/// One captured video frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VideoFrame {
    /// Capture time in milliseconds on the source's clock.
    pub timestamp_ms: u64,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Packed pixel data; may be empty for synthetic sources.
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for label in [
            "Open_Palm",
            "Closed_Fist",
            "Thumb_Up",
            "Thumb_Down",
            "Pointing_Up",
            "Victory",
            "ILoveYou",
            "None",
            "Wave",
        ] {
            assert_eq!(GestureCategory::from_label(label).label(), label);
        }
    }

    #[test]
    fn empty_label_is_unrecognized() {
        assert_eq!(GestureCategory::from_label(""), GestureCategory::Unrecognized);
    }
}
