//! Point and sky-position types.

use nalgebra::Vector2;

use crate::{Error, Result};

/// A 2D point: pixel coordinates of a click or tangent-plane offsets in degrees.
pub type Point2D = Vector2<f64>;

/// Position on the celestial sphere in decimal degrees.
///
/// RA is wrapped into [0, 360); Dec must lie in [-90, 90].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyPosition {
    ra: f64,
    dec: f64,
}

impl SkyPosition {
    pub fn new(ra: f64, dec: f64) -> Result<Self> {
        if !ra.is_finite() || !dec.is_finite() || dec.abs() > 90.0 {
            return Err(Error::InvalidPosition { ra, dec });
        }
        Ok(Self {
            ra: ra.rem_euclid(360.0),
            dec,
        })
    }

    #[inline]
    pub fn ra(&self) -> f64 {
        self.ra
    }

    #[inline]
    pub fn dec(&self) -> f64 {
        self.dec
    }

    /// Unit vector (x toward RA=0/Dec=0, z toward the north pole).
    pub(crate) fn unit_vector(&self) -> nalgebra::Vector3<f64> {
        let (ra, dec) = (self.ra.to_radians(), self.dec.to_radians());
        nalgebra::Vector3::new(dec.cos() * ra.cos(), dec.cos() * ra.sin(), dec.sin())
    }
}
