use super::cfg::COINCIDENT_EPS;
use super::types::Point2D;

/// Polar angle of the directed segment `p_from → p_to`, in whole degrees in (-180, 180].
///
/// - `Some(dec)`: click mode. Δx is scaled by `cos(dec)`.
/// - `None`: no scaling; callers working in sky offsets flip the RA axis themselves.
///
/// Coincident endpoints (both |Δ| < 1e-8) give exactly `0.0`.
pub fn extract_angle(p_from: Point2D, p_to: Point2D, declination_deg: Option<f64>) -> f64 {
    let d = p_to - p_from;
    if d.x.abs() < COINCIDENT_EPS && d.y.abs() < COINCIDENT_EPS {
        return 0.0;
    }
    let dx = match declination_deg {
        Some(dec) => d.x * dec.to_radians().cos(),
        None => d.x,
    };
    normalize_degrees(d.y.atan2(dx).to_degrees().round())
}

/// Tail angle from two clicks on a cutout centred at declination `dec`.
#[inline]
pub fn tail_angle(centre: Point2D, tail_end: Point2D, dec: f64) -> f64 {
    extract_angle(centre, tail_end, Some(dec))
}

/// Wrap any finite angle into (-180, 180]. `-180` maps to `180`; `-0.0` to `0.0`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    let a = if a > 180.0 { a - 360.0 } else { a };
    a + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn cos_dec_compresses_horizontal_component() {
        // At dec=60°, cos=0.5: (10, 5) behaves like (5, 5) → 45°.
        let a = tail_angle(vector![0.0, 0.0], vector![10.0, 5.0], 60.0);
        assert_eq!(a, 45.0);
        // At the equator there is no compression.
        let b = tail_angle(vector![0.0, 0.0], vector![10.0, 5.0], 0.0);
        assert_eq!(b, (5.0f64).atan2(10.0).to_degrees().round());
    }

    #[test]
    fn unscaled_mode_is_plain_atan2() {
        assert_eq!(extract_angle(vector![0.0, 0.0], vector![1.0, 1.0], None), 45.0);
        assert_eq!(extract_angle(vector![0.0, 0.0], vector![-1.0, 1.0], None), 135.0);
        // Same as click mode at the equator.
        assert_eq!(
            extract_angle(vector![0.0, 0.0], vector![3.0, 1.0], None),
            extract_angle(vector![0.0, 0.0], vector![3.0, 1.0], Some(0.0))
        );
    }

    #[test]
    fn rounding_is_to_nearest_degree() {
        // atan2(1, 3) ≈ 18.43° → 18
        assert_eq!(extract_angle(vector![0.0, 0.0], vector![3.0, 1.0], Some(0.0)), 18.0);
        // atan2(2, 3) ≈ 33.69° → 34
        assert_eq!(extract_angle(vector![0.0, 0.0], vector![3.0, 2.0], Some(0.0)), 34.0);
    }

    #[test]
    fn normalize_keeps_half_open_range() {
        assert_eq!(normalize_degrees(-180.0), 180.0);
        assert_eq!(normalize_degrees(180.0), 180.0);
        assert_eq!(normalize_degrees(540.0), 180.0);
        assert_eq!(normalize_degrees(-190.0), 170.0);
        assert!(normalize_degrees(-0.0).is_sign_positive());
    }

    #[test]
    fn negative_pi_from_atan2_is_reported_as_180() {
        // dy = -0.0 with dx < 0 makes atan2 return -π.
        let a = extract_angle(vector![5.0, 0.0], vector![0.0, -0.0], Some(0.0));
        assert_eq!(a, 180.0);
    }
}
