// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Gesture-driven point-cloud tree animation engine.
//!
//! Grove animates several thousand particles, photo ornaments, decorations
//! and lights between a scattered cloud and an assembled tree, and lays
//! photo subsets out on a spinning carousel. A hand-gesture pipeline
//! running on its own thread turns classified video frames into discrete
//! scene commands and a continuous camera rotation signal.
//!
//! # Key entry points
//!
//! - [`engine::TreeEngine`] - per-frame driver; call `update` then
//!   `frame_geometry`
//! - [`engine::command::SceneCommand`] - the complete command vocabulary
//! - [`gesture::GestureController`] - background inference thread
//! - [`formation`] - procedural scattered/tree/ring layouts
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! The inference thread owns the frame source and the classifier. It
//! throttles inference, interprets each result with a
//! [`gesture::GestureInterpreter`] and sends commands over an `mpsc`
//! channel; the rotation signal goes through a lock-free triple buffer.
//! The render loop drains both at the start of each frame, applies the
//! commands to the [`scene::SceneState`] machine, and advances every
//! entity toward the targets the [`formation`] module generated once at
//! startup. Rendering itself is left to the host, which receives packed
//! instance records.

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod formation;
pub mod gesture;
pub mod options;
pub mod scene;
pub mod util;

pub use engine::command::{ControllerEvent, Notification, SceneCommand};
pub use engine::TreeEngine;
pub use error::GroveError;
pub use options::Options;
