//! Batch driver: one verdict per galaxy, in input order.
//!
//! Policy on failure: the first collaborator error aborts the batch and the
//! partial results are dropped with it. Callers that want to keep work across
//! failures must persist outside this loop.

use super::types::{ClassificationResult, Verdict};
use crate::geom::SkyPosition;
use crate::{Error, Result};

/// External collaborator that owns image retrieval, display and the dialogue.
pub trait Classifier {
    fn classify(&mut self, index: usize, position: &SkyPosition) -> Result<Verdict>;
}

impl<F> Classifier for F
where
    F: FnMut(usize, &SkyPosition) -> Result<Verdict>,
{
    fn classify(&mut self, index: usize, position: &SkyPosition) -> Result<Verdict> {
        self(index, position)
    }
}

/// Append-only, single-writer result buffer.
#[derive(Debug, Default)]
pub struct Accumulator {
    results: Vec<ClassificationResult>,
}

impl Accumulator {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            results: Vec::with_capacity(n),
        }
    }

    /// Resolve `verdict` at the galaxy's declination and append it.
    pub fn push(&mut self, position: &SkyPosition, verdict: &Verdict) -> &ClassificationResult {
        self.results
            .push(ClassificationResult::from_verdict(verdict, position.dec()));
        &self.results[self.results.len() - 1]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn into_results(self) -> Vec<ClassificationResult> {
        self.results
    }
}

/// Classify every position in order. Output index `i` belongs to `positions[i]`.
pub fn classify_batch<C>(
    positions: &[SkyPosition],
    classifier: &mut C,
) -> Result<Vec<ClassificationResult>>
where
    C: Classifier + ?Sized,
{
    let mut acc = Accumulator::with_capacity(positions.len());
    for (index, position) in positions.iter().enumerate() {
        let verdict = classifier.classify(index, position)?;
        let result = acc.push(position, &verdict);
        tracing::info!(
            index,
            ra = position.ra(),
            dec = position.dec(),
            flag = result.flag().code(),
            confidence = result.confidence().code(),
            tail_angle = result.tail_angle(),
            "classified"
        );
    }
    Ok(acc.into_results())
}

/// Same as [`classify_batch`] for parallel RA/Dec columns.
///
/// Length and coordinate validity are checked before the classifier is invoked.
pub fn classify_columns<C>(
    ra: &[f64],
    dec: &[f64],
    classifier: &mut C,
) -> Result<Vec<ClassificationResult>>
where
    C: Classifier + ?Sized,
{
    if ra.len() != dec.len() {
        return Err(Error::LengthMismatch {
            ra: ra.len(),
            dec: dec.len(),
        });
    }
    let positions = ra
        .iter()
        .zip(dec)
        .map(|(&r, &d)| SkyPosition::new(r, d))
        .collect::<Result<Vec<_>>>()?;
    classify_batch(&positions, classifier)
}
