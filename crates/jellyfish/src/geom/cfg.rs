//! Fixed tolerances (internal).

/// Offsets below this magnitude on both axes count as coincident points.
/// Units follow the inputs (pixels for clicks, degrees for sky offsets).
pub(crate) const COINCIDENT_EPS: f64 = 1e-8;
