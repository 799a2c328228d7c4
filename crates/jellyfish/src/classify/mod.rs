//! Per-galaxy classification: labels, prompt vocabulary, dialogue, batch driver.
//!
//! The operator-facing dialogue is a small state machine
//! (`AdjustingZoom → AwaitingLabel → [AwaitingConfidence → AwaitingTailPoints]
//! → AwaitingConfirmation → Committed`). A "no" at confirmation returns to
//! `AwaitingLabel` without touching the zoom. The batch driver only sees the
//! committed [`Verdict`] and turns it into a [`ClassificationResult`].

mod batch;
mod dialogue;
mod tokens;
mod types;

pub use batch::{classify_batch, classify_columns, Accumulator, Classifier};
pub use dialogue::{Dialogue, DialogueState, Event, Step};
pub use tokens::{parse_confidence, parse_point, Confirm, LabelToken, ZoomToken};
pub use types::{ClassificationResult, JellyfishFlag, TailConfidence, TailSegment, Verdict};

#[cfg(test)]
mod tests;
