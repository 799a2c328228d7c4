//! Classification labels and per-galaxy results.

use crate::geom::{tail_angle, Point2D};

/// Jellyfish flag as stored in the output table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JellyfishFlag {
    Jellyfish,
    NotJellyfish,
    Merger,
    Unclassifiable,
}

impl JellyfishFlag {
    /// Integer code: 1, 0, -1, -2.
    pub fn code(self) -> i32 {
        match self {
            JellyfishFlag::Jellyfish => 1,
            JellyfishFlag::NotJellyfish => 0,
            JellyfishFlag::Merger => -1,
            JellyfishFlag::Unclassifiable => -2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(JellyfishFlag::Jellyfish),
            0 => Some(JellyfishFlag::NotJellyfish),
            -1 => Some(JellyfishFlag::Merger),
            -2 => Some(JellyfishFlag::Unclassifiable),
            _ => None,
        }
    }
}

/// How clearly a tail is visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TailConfidence {
    #[default]
    NoTail,
    Marginal,
    Clear,
}

impl TailConfidence {
    /// Out-of-range values are clamped, never rejected.
    pub fn clamped(value: i64) -> Self {
        match value {
            i64::MIN..=0 => TailConfidence::NoTail,
            1 => TailConfidence::Marginal,
            _ => TailConfidence::Clear,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            TailConfidence::NoTail => 0,
            TailConfidence::Marginal => 1,
            TailConfidence::Clear => 2,
        }
    }

    #[inline]
    pub fn has_tail(self) -> bool {
        self != TailConfidence::NoTail
    }
}

/// Two clicks: galaxy centre, then a point along the tail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TailSegment {
    pub centre: Point2D,
    pub tail_end: Point2D,
}

/// What the operator committed for one galaxy, before any angle math.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Verdict {
    pub flag: JellyfishFlag,
    pub confidence: TailConfidence,
    pub tail: Option<TailSegment>,
}

impl Verdict {
    /// Verdict for a label that carries no tail information.
    pub fn without_tail(flag: JellyfishFlag) -> Self {
        Self {
            flag,
            confidence: TailConfidence::NoTail,
            tail: None,
        }
    }
}

/// Final per-galaxy row. Built once, never mutated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassificationResult {
    flag: JellyfishFlag,
    confidence: TailConfidence,
    tail_angle: f64,
}

impl ClassificationResult {
    /// Resolve a verdict at declination `dec`.
    ///
    /// Confidence is forced to `NoTail` for non-jellyfish labels, and the angle is
    /// `0.0` unless a jellyfish with a visible tail came with two clicks.
    pub fn from_verdict(verdict: &Verdict, dec: f64) -> Self {
        let confidence = match verdict.flag {
            JellyfishFlag::Jellyfish => verdict.confidence,
            _ => TailConfidence::NoTail,
        };
        let tail_angle = match (verdict.flag, confidence.has_tail(), verdict.tail) {
            (JellyfishFlag::Jellyfish, true, Some(seg)) => {
                tail_angle(seg.centre, seg.tail_end, dec)
            }
            _ => 0.0,
        };
        Self {
            flag: verdict.flag,
            confidence,
            tail_angle,
        }
    }

    #[inline]
    pub fn flag(&self) -> JellyfishFlag {
        self.flag
    }

    #[inline]
    pub fn confidence(&self) -> TailConfidence {
        self.confidence
    }

    /// Tail angle in (-180, 180]; `0.0` when [`Self::has_measured_tail`] is false.
    #[inline]
    pub fn tail_angle(&self) -> f64 {
        self.tail_angle
    }

    #[inline]
    pub fn has_measured_tail(&self) -> bool {
        self.flag == JellyfishFlag::Jellyfish && self.confidence.has_tail()
    }
}
