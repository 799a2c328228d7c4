//! Alignment histogram over measured tails.

use crate::classify::{JellyfishFlag, TailConfidence};
use crate::geom::TailOffset;

pub const HISTOGRAM_BINS: usize = 6;
const RANGE_DEG: f64 = 180.0;

/// Counts of `alignment` in equal bins over [0, 180]. The last bin is closed.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignmentHistogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    /// Measured tails whose offset was undefined (galaxy on the BCG).
    pub undefined: usize,
}

impl AlignmentHistogram {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Histogram of confident jellyfish tails; placeholder rows never enter it.
pub fn alignment_histogram<I>(rows: I) -> AlignmentHistogram
where
    I: IntoIterator<Item = (JellyfishFlag, TailConfidence, TailOffset)>,
{
    let width = RANGE_DEG / HISTOGRAM_BINS as f64;
    let mut counts = vec![0usize; HISTOGRAM_BINS];
    let mut undefined = 0usize;
    for (flag, confidence, offset) in rows {
        if flag != JellyfishFlag::Jellyfish || !confidence.has_tail() {
            continue;
        }
        if offset.is_undefined() {
            undefined += 1;
            continue;
        }
        let bin = ((offset.alignment / width).floor() as usize).min(HISTOGRAM_BINS - 1);
        counts[bin] += 1;
    }
    AlignmentHistogram {
        edges: (0..=HISTOGRAM_BINS).map(|k| k as f64 * width).collect(),
        counts,
        undefined,
    }
}
