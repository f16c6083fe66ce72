//! Per-tick gesture interpretation: confidence gate, direct mappings,
//! cooldown-gated gallery triggers, and the rotation signal.

use glam::Vec3;

use super::{
    GestureCategory, GestureSample, FINGER_PIPS, FINGER_TIPS, LANDMARK_COUNT,
};
use crate::engine::command::SceneCommand;
use crate::options::GestureOptions;
use crate::scene::{GallerySelector, SceneMode};

// ---------------------------------------------------------------------------
// Throttle
// ---------------------------------------------------------------------------

/// Lets at most one inference run through per interval. Frames arriving
/// sooner are dropped, not queued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InferenceThrottle {
    interval_ms: u64,
    last_run: Option<u64>,
}

impl InferenceThrottle {
    /// Throttle admitting one run per `interval_ms`.
    #[must_use]
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_run: None,
        }
    }

    /// Whether a frame at `now_ms` may run inference. Admitting a frame
    /// starts a new interval.
    pub fn admit(&mut self, now_ms: u64) -> bool {
        let ready = self
            .last_run
            .is_none_or(|last| now_ms.saturating_sub(last) >= self.interval_ms);
        if ready {
            self.last_run = Some(now_ms);
        }
        ready
    }
}

// ---------------------------------------------------------------------------
// Interpreter
// ---------------------------------------------------------------------------

/// Everything one inference tick produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickOutcome {
    /// Commands for the scene state machine, in order.
    pub commands: Vec<SceneCommand>,
    /// A gallery trigger was accepted.
    pub play_sound: bool,
    /// New rotation speed, or `None` to keep the previous one.
    pub rotation: Option<f32>,
    /// Debug status line.
    pub status: Option<String>,
}

/// Stateful gesture-to-command mapping. Owns the gallery cooldown.
#[derive(Clone, Debug)]
pub struct GestureInterpreter {
    options: GestureOptions,
    page_count: u8,
    last_trigger: Option<u64>,
}

impl GestureInterpreter {
    /// Interpreter selecting gallery pages `1..=page_count` by finger
    /// count.
    #[must_use]
    pub fn new(options: GestureOptions, page_count: u8) -> Self {
        Self {
            options,
            page_count,
            last_trigger: None,
        }
    }

    /// Time of the last accepted gallery trigger.
    #[must_use]
    pub fn last_trigger(&self) -> Option<u64> {
        self.last_trigger
    }

    /// Interpret the best hand of one tick (`None` when no hand was
    /// detected) at time `now_ms`.
    pub fn process(
        &mut self,
        sample: Option<&GestureSample>,
        now_ms: u64,
    ) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        let Some(sample) = sample else {
            outcome.rotation = Some(0.0);
            return outcome;
        };

        if sample.score > self.options.min_confidence {
            self.act_on(sample, now_ms, &mut outcome);
        }

        if let Some(wrist) = sample.landmarks.first() {
            outcome.rotation = Some(rotation_from_wrist(
                wrist.x,
                self.options.rotation_gain,
                self.options.rotation_dead_zone,
            ));
        }
        outcome
    }

    fn act_on(
        &mut self,
        sample: &GestureSample,
        now_ms: u64,
        outcome: &mut TickOutcome,
    ) {
        match sample.category {
            GestureCategory::OpenPalm => {
                outcome.commands.push(SceneCommand::SetMode(SceneMode::Chaos));
            }
            GestureCategory::ClosedFist => {
                outcome.commands.push(SceneCommand::SetMode(SceneMode::Formed));
                outcome.commands.push(SceneCommand::ShowGallery(None));
            }
            _ => {}
        }

        if self.cooldown_elapsed(now_ms) {
            let triggered = match sample.category {
                GestureCategory::OpenPalm | GestureCategory::ClosedFist => false,
                GestureCategory::ThumbUp => {
                    outcome.commands.push(SceneCommand::ShowGallery(Some(
                        GallerySelector::Top,
                    )));
                    outcome.commands.push(SceneCommand::TriggerFireworks);
                    true
                }
                _ => {
                    let fingers = count_extended_fingers(&sample.landmarks);
                    match GallerySelector::page(fingers, self.page_count) {
                        Some(selector) => {
                            outcome
                                .commands
                                .push(SceneCommand::ShowGallery(Some(selector)));
                            true
                        }
                        None => false,
                    }
                }
            };
            if triggered {
                outcome.play_sound = true;
                self.last_trigger = Some(now_ms);
                log::debug!(
                    "gallery trigger: {} at {now_ms}ms",
                    sample.category.label()
                );
            }
        }

        if self.options.debug_status {
            outcome.status = Some(format!("gesture: {}", sample.category.label()));
        }
    }

    fn cooldown_elapsed(&self, now_ms: u64) -> bool {
        self.last_trigger.is_none_or(|last| {
            now_ms.saturating_sub(last) >= self.options.gallery_cooldown_ms
        })
    }
}

// ---------------------------------------------------------------------------
// Landmark helpers
// ---------------------------------------------------------------------------

/// Non-thumb fingers whose tip sits above (smaller `y`) its middle joint.
/// Incomplete landmark sets count as zero.
#[must_use]
pub fn count_extended_fingers(landmarks: &[Vec3]) -> usize {
    if landmarks.len() < LANDMARK_COUNT {
        return 0;
    }
    FINGER_TIPS
        .iter()
        .zip(FINGER_PIPS.iter())
        .filter(|&(&tip, &pip)| landmarks[tip].y < landmarks[pip].y)
        .count()
}

/// Rotation speed from the normalized wrist `x`: `(0.5 − x) · gain`, zeroed
/// when its magnitude is within `dead_zone` or the wrist is not finite.
#[must_use]
pub fn rotation_from_wrist(wrist_x: f32, gain: f32, dead_zone: f32) -> f32 {
    if !wrist_x.is_finite() {
        return 0.0;
    }
    let speed = (0.5 - wrist_x.clamp(0.0, 1.0)) * gain;
    if speed.abs() <= dead_zone {
        0.0
    } else {
        speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(fingers: usize, wrist_x: f32) -> Vec<Vec3> {
        let mut landmarks = vec![Vec3::new(wrist_x, 0.6, 0.0); LANDMARK_COUNT];
        landmarks[0] = Vec3::new(wrist_x, 0.9, 0.0);
        for (i, (&tip, &pip)) in FINGER_TIPS.iter().zip(&FINGER_PIPS).enumerate() {
            landmarks[pip].y = 0.5;
            landmarks[tip].y = if i < fingers { 0.3 } else { 0.65 };
        }
        landmarks
    }

    fn sample(label: &str, score: f32, fingers: usize) -> GestureSample {
        GestureSample {
            category: GestureCategory::from_label(label),
            score,
            landmarks: hand(fingers, 0.5),
            timestamp_ms: 0,
        }
    }

    fn interpreter() -> GestureInterpreter {
        GestureInterpreter::new(GestureOptions::default(), 4)
    }

    #[test]
    fn throttle_admits_one_per_interval() {
        let mut throttle = InferenceThrottle::new(100);
        let admitted: Vec<u64> = (0..=300)
            .step_by(16)
            .filter(|&t| throttle.admit(t))
            .collect();
        assert_eq!(admitted, vec![0, 112, 224]);
    }

    #[test]
    fn open_palm_scatters() {
        let out = interpreter().process(Some(&sample("Open_Palm", 0.9, 4)), 0);
        assert_eq!(out.commands, vec![SceneCommand::SetMode(SceneMode::Chaos)]);
        assert!(!out.play_sound);
    }

    #[test]
    fn closed_fist_forms_and_closes_gallery() {
        let out = interpreter().process(Some(&sample("Closed_Fist", 0.9, 0)), 0);
        assert_eq!(
            out.commands,
            vec![
                SceneCommand::SetMode(SceneMode::Formed),
                SceneCommand::ShowGallery(None),
            ]
        );
    }

    #[test]
    fn thumb_up_opens_cover_with_fireworks() {
        let out = interpreter().process(Some(&sample("Thumb_Up", 0.9, 3)), 0);
        assert_eq!(
            out.commands,
            vec![
                SceneCommand::ShowGallery(Some(GallerySelector::Top)),
                SceneCommand::TriggerFireworks,
            ]
        );
        assert!(out.play_sound);
    }

    #[test]
    fn low_confidence_is_ignored_but_still_steers() {
        let mut s = sample("Open_Palm", 0.5, 4);
        s.landmarks[0].x = 0.0;
        let out = interpreter().process(Some(&s), 0);
        assert!(out.commands.is_empty());
        assert_eq!(out.rotation, Some(0.05));
    }

    #[test]
    fn finger_counts_select_pages() {
        for fingers in 1..=4 {
            let out = interpreter().process(Some(&sample("None", 0.9, fingers)), 0);
            assert_eq!(
                out.commands,
                vec![SceneCommand::ShowGallery(Some(GallerySelector::Index(
                    fingers as u8
                )))]
            );
            assert!(out.play_sound);
        }
    }

    #[test]
    fn zero_fingers_never_trigger() {
        let mut interp = interpreter();
        let out = interp.process(Some(&sample("Pointing_Up", 0.9, 0)), 0);
        assert!(out.commands.is_empty());
        assert!(!out.play_sound);
        assert_eq!(interp.last_trigger(), None);
    }

    #[test]
    fn cooldown_suppresses_rapid_triggers() {
        let mut interp = interpreter();
        let three = sample("Victory", 0.9, 3);
        let expected = vec![SceneCommand::ShowGallery(Some(GallerySelector::Index(3)))];

        assert_eq!(interp.process(Some(&three), 0).commands, expected);
        let suppressed = interp.process(Some(&three), 500);
        assert!(suppressed.commands.is_empty());
        assert!(!suppressed.play_sound);
        assert_eq!(interp.process(Some(&three), 1001).commands, expected);
    }

    #[test]
    fn cooldown_boundary_is_inclusive() {
        let mut interp = interpreter();
        let thumb = sample("Thumb_Up", 0.9, 0);
        assert!(interp.process(Some(&thumb), 0).play_sound);
        assert!(!interp.process(Some(&thumb), 999).play_sound);
        assert!(interp.process(Some(&thumb), 1000).play_sound);
    }

    #[test]
    fn direct_mappings_ignore_cooldown() {
        let mut interp = interpreter();
        let _ = interp.process(Some(&sample("Thumb_Up", 0.9, 0)), 0);
        let out = interp.process(Some(&sample("Closed_Fist", 0.9, 0)), 10);
        assert_eq!(out.commands.len(), 2);
    }

    #[test]
    fn no_hand_zeroes_rotation() {
        let out = interpreter().process(None, 0);
        assert_eq!(out.rotation, Some(0.0));
        assert!(out.commands.is_empty());
    }

    #[test]
    fn missing_landmarks_keep_rotation() {
        let mut s = sample("Open_Palm", 0.9, 0);
        s.landmarks.clear();
        let out = interpreter().process(Some(&s), 0);
        assert_eq!(out.rotation, None);
        assert_eq!(out.commands.len(), 1);
    }

    #[test]
    fn rotation_dead_zone() {
        assert_eq!(rotation_from_wrist(0.5, 0.1, 0.02), 0.0);
        assert_eq!(rotation_from_wrist(0.35, 0.1, 0.02), 0.0);
        assert_eq!(rotation_from_wrist(0.65, 0.1, 0.02), 0.0);
        assert!((rotation_from_wrist(0.1, 0.1, 0.02) - 0.04).abs() < 1e-6);
        assert!((rotation_from_wrist(0.9, 0.1, 0.02) + 0.04).abs() < 1e-6);
    }

    #[test]
    fn dead_zone_sweep() {
        for i in 0..=100 {
            let x = i as f32 / 100.0;
            let v = rotation_from_wrist(x, 0.1, 0.02);
            if ((0.5 - x) * 0.1).abs() <= 0.02 {
                assert_eq!(v, 0.0, "x = {x}");
            } else {
                assert!(v != 0.0, "x = {x}");
            }
        }
    }

    #[test]
    fn non_finite_wrist_holds_still() {
        for x in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            assert_eq!(rotation_from_wrist(x, 0.1, 0.02), 0.0);
        }
        let mut s = sample("Unknown", 0.9, 0);
        s.landmarks[0].x = f32::NAN;
        let out = interpreter().process(Some(&s), 0);
        assert_eq!(out.rotation, Some(0.0));
    }

    #[test]
    fn finger_counting() {
        for n in 0..=4 {
            assert_eq!(count_extended_fingers(&hand(n, 0.5)), n);
        }
        assert_eq!(count_extended_fingers(&hand(4, 0.5)[..20]), 0);
    }

    #[test]
    fn debug_status_names_gesture() {
        let options = GestureOptions {
            debug_status: true,
            ..GestureOptions::default()
        };
        let mut interp = GestureInterpreter::new(options, 4);
        let out = interp.process(Some(&sample("Victory", 0.9, 2)), 0);
        assert_eq!(out.status.as_deref(), Some("gesture: Victory"));
        let quiet = interp.process(Some(&sample("Victory", 0.2, 2)), 2000);
        assert_eq!(quiet.status, None);
    }
}
