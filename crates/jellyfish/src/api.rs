//! Curated internal API for the binary crate (UNSTABLE).
//!
//! Important
//! - This is not a public API. It is a convenience surface for the `cli` crate.
//!   Breaking changes are allowed and expected.

// Geometry
pub use crate::geom::{
    bcg_bearing, extract_angle, normalize_degrees, spherical_offsets_to, tail_angle, tail_offset,
    Point2D, SkyPosition, TailOffset,
};
// Classification
pub use crate::classify::{
    classify_batch, classify_columns, Accumulator, ClassificationResult, Classifier, Dialogue,
    DialogueState, Event, JellyfishFlag, Step, TailConfidence, TailSegment, Verdict,
};
// Cutouts
pub use crate::cutout::{CutoutRequest, Zoom, DEFAULT_BASE_URL, DEFAULT_LAYER};
// Post-processing
pub use crate::summary::{alignment_histogram, AlignmentHistogram};

/// Per-row BCG post-processing: bearing plus tail offset.
///
/// Pre: `result` came out of the batch for `galaxy`.
/// Post: returns `(bearing, offset)`; `offset` is a placeholder unless the row is a
/// confident jellyfish.
pub fn bcg_offset(
    result: &ClassificationResult,
    galaxy: &SkyPosition,
    bcg: &SkyPosition,
) -> (f64, TailOffset) {
    let bearing = bcg_bearing(bcg, galaxy);
    let offset = tail_offset(
        result.tail_angle(),
        bearing,
        result.flag(),
        result.confidence(),
    );
    (bearing, offset)
}
