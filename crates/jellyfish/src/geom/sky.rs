use nalgebra::{Rotation3, Vector3};

use super::angle::extract_angle;
use super::types::{Point2D, SkyPosition};

/// Offsets `(Δra, Δdec)` in degrees of `target` in the frame centred on `reference`.
///
/// The sphere is rotated so `reference` lands on (0, 0); the target's longitude
/// and latitude in that frame are the offsets. Unlike flat subtraction this stays
/// undistorted near the poles and across the RA wrap.
pub fn spherical_offsets_to(reference: &SkyPosition, target: &SkyPosition) -> Point2D {
    let to_frame = Rotation3::from_axis_angle(&Vector3::y_axis(), reference.dec().to_radians())
        * Rotation3::from_axis_angle(&Vector3::z_axis(), -reference.ra().to_radians());
    let v = to_frame * target.unit_vector();
    let lon = v.y.atan2(v.x);
    let lat = v.z.atan2(v.x.hypot(v.y));
    Point2D::new(lon.to_degrees(), lat.to_degrees())
}

/// Bearing from `bcg` toward `galaxy` in the tail-angle convention.
///
/// Increasing RA points left on the image, so Δra is negated before the angle is taken.
/// A galaxy coincident with the BCG (both offsets below 1e-8 deg) gets exactly `0.0`.
pub fn bcg_bearing(bcg: &SkyPosition, galaxy: &SkyPosition) -> f64 {
    let offsets = spherical_offsets_to(bcg, galaxy);
    extract_angle(Point2D::zeros(), Point2D::new(-offsets.x, offsets.y), None)
}
