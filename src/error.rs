//! Crate-level error types.

use std::fmt;

/// Errors produced by the grove crate.
#[derive(Debug)]
pub enum GroveError {
    /// The gesture model could not be loaded.
    ModelLoad(String),
    /// The capture device could not be opened (missing, or permission
    /// denied).
    CameraUnavailable(String),
    /// A single inference call failed.
    Inference(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// A gesture script could not be parsed.
    Script(String),
}

impl fmt::Display for GroveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModelLoad(msg) => write!(f, "model error: {msg}"),
            Self::CameraUnavailable(msg) => write!(f, "camera error: {msg}"),
            Self::Inference(msg) => write!(f, "inference error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Script(msg) => write!(f, "gesture script error: {msg}"),
        }
    }
}

impl std::error::Error for GroveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GroveError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl GroveError {
    /// Whether this error ends the gesture session (as opposed to a
    /// per-tick failure that the pipeline shrugs off).
    #[must_use]
    pub fn is_initialization(&self) -> bool {
        matches!(self, Self::ModelLoad(_) | Self::CameraUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_match_status_strings() {
        let e = GroveError::CameraUnavailable("permission denied".into());
        assert_eq!(e.to_string(), "camera error: permission denied");
        let e = GroveError::ModelLoad("missing file".into());
        assert_eq!(e.to_string(), "model error: missing file");
    }

    #[test]
    fn only_setup_failures_are_initialization() {
        assert!(GroveError::ModelLoad(String::new()).is_initialization());
        assert!(
            GroveError::CameraUnavailable(String::new()).is_initialization()
        );
        assert!(!GroveError::Inference(String::new()).is_initialization());
    }

    #[test]
    fn io_errors_keep_their_source() {
        use std::error::Error;
        let e = GroveError::from(std::io::Error::other("boom"));
        assert!(e.source().is_some());
    }
}
