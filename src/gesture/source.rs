use super::{GestureSample, VideoFrame};
use crate::error::GroveError;

/// A capture device yielding timestamped frames.
///
/// `next_frame` may block until a frame is available, but only for about
/// one frame interval: the pipeline checks its stop flag between frames,
/// and stopping the controller waits for the current call to return. A
/// source that can stall indefinitely must time out on its own. Returning
/// `Ok(None)` ends the stream.
pub trait FrameSource: Send + 'static {
    /// Acquire the device.
    ///
    /// # Errors
    ///
    /// Returns [`GroveError::CameraUnavailable`] when the device cannot be
    /// opened (permission denied, no device).
    fn open(&mut self) -> Result<(), GroveError>;

    /// Next frame, or `None` once the stream has ended.
    ///
    /// # Errors
    ///
    /// Returns [`GroveError::CameraUnavailable`] if the device is lost.
    fn next_frame(&mut self) -> Result<Option<VideoFrame>, GroveError>;

    /// Release the device. Called exactly once when the pipeline exits,
    /// including after a failed `open`.
    fn close(&mut self);
}

/// Opaque hand-gesture inference model.
pub trait GestureClassifier: Send + 'static {
    /// Classify the hands in `frame`, best hand first.
    ///
    /// # Errors
    ///
    /// Returns [`GroveError::Inference`] when the model fails on this
    /// frame.
    fn recognize(
        &mut self,
        frame: &VideoFrame,
        timestamp_ms: u64,
    ) -> Result<Vec<GestureSample>, GroveError>;
}
