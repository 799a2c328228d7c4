use crate::classify::{JellyfishFlag, TailConfidence};

/// Tail offset relative to the BCG direction.
///
/// - `deviation`: shortest circular distance between tail angle and bearing, in [0, 180].
///   A tail pointing straight away from the BCG has deviation 0.
/// - `alignment`: `180 - deviation`; a tail pointing at the BCG has alignment 0.
///
/// Rows that are not confident jellyfish get the placeholder `(0, 180)`. That pair
/// is not a measurement; filter on `confidence > 0` before using it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TailOffset {
    pub deviation: f64,
    pub alignment: f64,
}

impl TailOffset {
    pub const PLACEHOLDER: TailOffset = TailOffset {
        deviation: 0.0,
        alignment: 180.0,
    };
    pub const UNDEFINED: TailOffset = TailOffset {
        deviation: f64::NAN,
        alignment: f64::NAN,
    };

    #[inline]
    pub fn is_undefined(&self) -> bool {
        self.deviation.is_nan()
    }
}

/// Offset between a measured tail angle and the galaxy's BCG bearing.
///
/// Policy, in order:
/// 1. not a jellyfish, or no visible tail → [`TailOffset::PLACEHOLDER`];
/// 2. `bearing == 0.0` (galaxy is the BCG) → [`TailOffset::UNDEFINED`];
/// 3. otherwise the circular difference folded into [0, 180].
pub fn tail_offset(
    tail_angle: f64,
    bearing_angle: f64,
    flag: JellyfishFlag,
    confidence: TailConfidence,
) -> TailOffset {
    if flag != JellyfishFlag::Jellyfish || !confidence.has_tail() {
        return TailOffset::PLACEHOLDER;
    }
    if bearing_angle == 0.0 {
        return TailOffset::UNDEFINED;
    }
    let deviation = fold_circular(tail_angle - bearing_angle);
    TailOffset {
        deviation,
        alignment: 180.0 - deviation,
    }
}

/// Shortest distance around the circle for a signed difference, in [0, 180].
#[inline]
fn fold_circular(diff: f64) -> f64 {
    let d = diff.rem_euclid(360.0);
    if d > 180.0 {
        360.0 - d
    } else {
        d
    }
}
