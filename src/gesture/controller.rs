//! Background inference thread.
//!
//! The render loop never waits on inference. Discrete results travel over
//! an `mpsc` channel of [`ControllerEvent`]s; the continuous rotation
//! signal is published through a triple buffer so the render loop always
//! reads the latest value without locking.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;

use super::{FrameSource, GestureClassifier, GestureInterpreter, InferenceThrottle};
use crate::engine::command::ControllerEvent;
use crate::error::GroveError;
use crate::options::GestureOptions;

/// Status line while the model loads.
pub const STATUS_LOADING: &str = "loading gesture model";
/// Status line while the camera starts.
pub const STATUS_CAMERA: &str = "starting camera";
/// Status line once inference is running.
pub const STATUS_READY: &str = "ready";

/// Handle to the running gesture pipeline. Dropping it stops the thread
/// and releases the frame source.
pub struct GestureController {
    running: Arc<AtomicBool>,
    events: mpsc::Receiver<ControllerEvent>,
    rotation: triple_buffer::Output<f32>,
    thread: Option<std::thread::JoinHandle<()>>,
}

impl GestureController {
    /// Spawn the pipeline. `load_model` runs on the new thread so a slow
    /// model load never blocks the caller. It receives
    /// `options.max_hands`, the number of hands the model should report.
    /// Its failure, like a camera failure, is reported as a status event
    /// and leaves the pipeline idle.
    ///
    /// [`Self::stop`] joins the thread, so `load_model` and the source
    /// must return within bounded time (see [`FrameSource`]).
    ///
    /// # Errors
    ///
    /// Returns [`GroveError::ThreadSpawn`] if the thread cannot be created.
    pub fn start<S, C, L>(
        options: GestureOptions,
        page_count: u8,
        source: S,
        load_model: L,
    ) -> Result<Self, GroveError>
    where
        S: FrameSource,
        C: GestureClassifier,
        L: FnOnce(usize) -> Result<C, GroveError> + Send + 'static,
    {
        let (event_tx, events) = mpsc::channel();
        let (rotation_input, rotation) = triple_buffer::triple_buffer(&0.0_f32);
        let running = Arc::new(AtomicBool::new(true));

        let worker = Worker {
            running: Arc::clone(&running),
            events: event_tx,
            rotation: rotation_input,
            interpreter: GestureInterpreter::new(options.clone(), page_count),
            throttle: InferenceThrottle::new(options.inference_interval_ms),
            max_hands: options.max_hands,
            last_status: None,
        };

        let thread = std::thread::Builder::new()
            .name("gesture-inference".into())
            .spawn(move || worker.run(source, load_model))
            .map_err(GroveError::ThreadSpawn)?;

        log::info!("gesture pipeline started");
        Ok(Self {
            running,
            events,
            rotation,
            thread: Some(thread),
        })
    }

    /// Events produced since the last poll, oldest first.
    pub fn poll_events(&self) -> Vec<ControllerEvent> {
        self.events.try_iter().collect()
    }

    /// Latest rotation signal.
    pub fn rotation_speed(&mut self) -> f32 {
        *self.rotation.read()
    }

    /// Whether the worker thread is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop issuing inference, release the source, and wait for the thread.
    /// Results still queued are discarded. Blocks until the current
    /// `next_frame` or model load returns.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
            log::info!("gesture pipeline stopped");
        }
        while self.events.try_recv().is_ok() {}
    }

    /// Wait for the source to end on its own. Queued events stay
    /// available to [`Self::poll_events`].
    pub fn wait(&mut self) {
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for GestureController {
    fn drop(&mut self) {
        self.stop();
    }
}

/// State owned by the inference thread.
struct Worker {
    running: Arc<AtomicBool>,
    events: mpsc::Sender<ControllerEvent>,
    rotation: triple_buffer::Input<f32>,
    interpreter: GestureInterpreter,
    throttle: InferenceThrottle,
    max_hands: usize,
    last_status: Option<String>,
}

impl Worker {
    fn run<S, C, L>(mut self, mut source: S, load_model: L)
    where
        S: FrameSource,
        C: GestureClassifier,
        L: FnOnce(usize) -> Result<C, GroveError>,
    {
        self.status(STATUS_LOADING);
        match load_model(self.max_hands) {
            Ok(mut classifier) => {
                self.status(STATUS_CAMERA);
                match source.open() {
                    Ok(()) => {
                        self.status(STATUS_READY);
                        self.inference_loop(&mut source, &mut classifier);
                    }
                    Err(e) => self.fail(&e),
                }
            }
            Err(e) => self.fail(&e),
        }
        source.close();
        self.rotation.write(0.0);
        log::debug!("gesture worker exiting");
    }

    fn inference_loop<S, C>(&mut self, source: &mut S, classifier: &mut C)
    where
        S: FrameSource,
        C: GestureClassifier,
    {
        while self.running.load(Ordering::Acquire) {
            let frame = match source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    log::info!("frame source ended");
                    break;
                }
                Err(e) => {
                    self.fail(&e);
                    break;
                }
            };
            if !self.throttle.admit(frame.timestamp_ms) {
                continue;
            }

            let samples = match classifier.recognize(&frame, frame.timestamp_ms) {
                Ok(samples) => samples,
                Err(e) => {
                    log::warn!("{e}");
                    self.status(&e.to_string());
                    continue;
                }
            };
            let outcome = self
                .interpreter
                .process(samples.first(), frame.timestamp_ms);

            // A stop request during inference discards the result.
            if !self.running.load(Ordering::Acquire) {
                break;
            }
            if let Some(speed) = outcome.rotation {
                self.rotation.write(speed);
            }
            for command in outcome.commands {
                self.send(ControllerEvent::Command(command));
            }
            if outcome.play_sound {
                self.send(ControllerEvent::PlayTriggerSound);
            }
            if let Some(status) = outcome.status {
                self.status(&status);
            }
        }
    }

    fn fail(&mut self, error: &GroveError) {
        if error.is_initialization() {
            log::error!("gesture pipeline: {error}");
        } else {
            log::warn!("gesture pipeline: {error}");
        }
        self.status(&error.to_string());
    }

    /// Emit a status line unless it repeats the previous one.
    fn status(&mut self, status: &str) {
        if self.last_status.as_deref() == Some(status) {
            return;
        }
        self.last_status = Some(status.to_owned());
        self.send(ControllerEvent::Status(status.to_owned()));
    }

    fn send(&self, event: ControllerEvent) {
        if self.events.send(event).is_err() {
            // Receiver gone: nobody is listening any more.
            self.running.store(false, Ordering::Release);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::command::SceneCommand;
    use crate::gesture::{
        GestureScript, GestureSample, ScriptStep, ScriptedCamera,
        ScriptedClassifier, VideoFrame,
    };
    use crate::scene::{GallerySelector, SceneMode};

    fn run_script(steps: Vec<ScriptStep>, duration_ms: u64) -> Vec<ControllerEvent> {
        let script = GestureScript::new(steps);
        let mut controller = GestureController::start(
            GestureOptions::default(),
            4,
            ScriptedCamera::new(30, Some(duration_ms), false),
            move |max_hands| Ok(ScriptedClassifier::new(script, max_hands)),
        )
        .unwrap();
        controller.wait();
        controller.poll_events()
    }

    fn commands(events: &[ControllerEvent]) -> Vec<SceneCommand> {
        events
            .iter()
            .filter_map(|e| match e {
                ControllerEvent::Command(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    fn statuses(events: &[ControllerEvent]) -> Vec<&str> {
        events
            .iter()
            .filter_map(|e| match e {
                ControllerEvent::Status(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn startup_reports_progress() {
        let events = run_script(Vec::new(), 100);
        assert_eq!(
            statuses(&events),
            vec![STATUS_LOADING, STATUS_CAMERA, STATUS_READY]
        );
    }

    #[test]
    fn held_gallery_gesture_triggers_once_per_cooldown() {
        // Two fingers held for 2.5 s at 10 Hz inference: triggers at 0,
        // 1000 and 2000 ms.
        let events =
            run_script(vec![ScriptStep::pose(0, "Victory", 2)], 2500);
        let page = SceneCommand::ShowGallery(Some(GallerySelector::Index(2)));
        assert_eq!(commands(&events), vec![page; 3]);
        let sounds = events
            .iter()
            .filter(|e| **e == ControllerEvent::PlayTriggerSound)
            .count();
        assert_eq!(sounds, 3);
    }

    #[test]
    fn fist_forms_tree() {
        let events =
            run_script(vec![ScriptStep::pose(0, "Closed_Fist", 0)], 0);
        assert_eq!(
            commands(&events),
            vec![
                SceneCommand::SetMode(SceneMode::Formed),
                SceneCommand::ShowGallery(None),
            ]
        );
    }

    #[test]
    fn rotation_signal_follows_hand_and_resets_on_exit() {
        let script = GestureScript::new(vec![
            ScriptStep::pose(0, "Unknown", 0).at_wrist(0.0),
        ]);
        let mut controller = GestureController::start(
            GestureOptions::default(),
            4,
            ScriptedCamera::new(30, None, true),
            move |max_hands| Ok(ScriptedClassifier::new(script, max_hands)),
        )
        .unwrap();
        let mut seen = 0.0;
        for _ in 0..200 {
            seen = controller.rotation_speed();
            if seen != 0.0 {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert!((seen - 0.05).abs() < 1e-6);
        controller.stop();
        assert!(!controller.is_running());
        assert_eq!(controller.rotation_speed(), 0.0);
        assert!(controller.poll_events().is_empty());
    }

    #[test]
    fn model_loader_receives_max_hands() {
        let script =
            GestureScript::new(vec![ScriptStep::pose(0, "Closed_Fist", 0)]);
        let options = GestureOptions {
            max_hands: 0,
            ..GestureOptions::default()
        };
        let mut controller = GestureController::start(
            options,
            4,
            ScriptedCamera::new(30, Some(300), false),
            move |max_hands| {
                assert_eq!(max_hands, 0);
                Ok(ScriptedClassifier::new(script, max_hands))
            },
        )
        .unwrap();
        controller.wait();
        let events = controller.poll_events();
        assert_eq!(statuses(&events).last().copied(), Some(STATUS_READY));
        assert!(commands(&events).is_empty());
    }

    #[test]
    fn stop_returns_while_source_streams_forever() {
        let mut controller = GestureController::start(
            GestureOptions::default(),
            4,
            ScriptedCamera::new(30, None, true),
            |_| Ok(ScriptedClassifier::default()),
        )
        .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(50));
        let started = std::time::Instant::now();
        controller.stop();
        assert!(!controller.is_running());
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }

    #[test]
    fn model_failure_is_a_status_not_a_crash() {
        let mut controller = GestureController::start(
            GestureOptions::default(),
            4,
            ScriptedCamera::new(30, None, false),
            |_| -> Result<ScriptedClassifier, GroveError> {
                Err(GroveError::ModelLoad("weights missing".into()))
            },
        )
        .unwrap();
        controller.wait();
        let events = controller.poll_events();
        assert_eq!(
            statuses(&events),
            vec![STATUS_LOADING, "model error: weights missing"]
        );
    }

    #[test]
    fn camera_denial_is_a_status_not_a_crash() {
        let mut controller = GestureController::start(
            GestureOptions::default(),
            4,
            ScriptedCamera::denied(),
            |_| Ok(ScriptedClassifier::default()),
        )
        .unwrap();
        controller.wait();
        let events = controller.poll_events();
        assert_eq!(
            statuses(&events).last().copied(),
            Some("camera error: permission denied")
        );
        assert!(commands(&events).is_empty());
    }

    struct Flaky;

    impl GestureClassifier for Flaky {
        fn recognize(
            &mut self,
            _frame: &VideoFrame,
            _timestamp_ms: u64,
        ) -> Result<Vec<GestureSample>, GroveError> {
            Err(GroveError::Inference("tensor shape".into()))
        }
    }

    #[test]
    fn inference_errors_are_reported_once_and_skipped() {
        let mut controller = GestureController::start(
            GestureOptions::default(),
            4,
            ScriptedCamera::new(30, Some(1000), false),
            |_| Ok(Flaky),
        )
        .unwrap();
        controller.wait();
        let events = controller.poll_events();
        let errors = statuses(&events)
            .into_iter()
            .filter(|s| s.starts_with("inference error"))
            .count();
        assert_eq!(errors, 1);
    }
}
