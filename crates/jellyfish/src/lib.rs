//! Tail-angle geometry and classification bookkeeping for jellyfish galaxies.
//!
//! The crate is split the same way the workflow is:
//! - `geom`: pure angle math (click angle, spherical offsets, BCG bearing,
//!   tail offset folding).
//! - `classify`: labels, prompt vocabulary, the per-galaxy dialogue state
//!   machine and the batch driver contract.
//! - `cutout`: survey cutout request and zoom model.
//! - `summary`: alignment histogram for post-processing.
//!
//! Nothing here touches the network, the terminal, or the filesystem; those
//! collaborators live in the `cli` crate and plug in through
//! [`classify::Classifier`].
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.

pub mod api;
pub mod classify;
pub mod cutout;
pub mod error;
pub mod geom;
pub mod summary;

pub use error::{Error, Result};

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::classify::{
        classify_batch, classify_columns, ClassificationResult, Classifier, Dialogue,
        DialogueState, Event, JellyfishFlag, Step, TailConfidence, Verdict,
    };
    pub use crate::cutout::{CutoutRequest, Zoom};
    pub use crate::geom::{
        bcg_bearing, extract_angle, spherical_offsets_to, tail_angle, tail_offset, Point2D,
        SkyPosition, TailOffset,
    };
    pub use crate::{Error, Result};
}
