//! Survey cutout requests and the zoom model.
//!
//! A cutout is displayed on the frame [-128, 128] × [-128, 128] with the
//! galaxy at the origin. Zooming in halves the pixel scale, zooming out doubles it.

use crate::geom::SkyPosition;

/// Default cutout endpoint.
pub const DEFAULT_BASE_URL: &str = "http://legacysurvey.org/viewer/cutout.jpg";
/// Default survey layer.
pub const DEFAULT_LAYER: &str = "dr8";
/// Starting pixel scale for every galaxy.
pub const INITIAL_PIXSCALE: f64 = 0.25;
/// Half-width of the display frame.
pub const DISPLAY_EXTENT: f64 = 128.0;

/// Pixel scale of the current cutout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Zoom(f64);

impl Default for Zoom {
    fn default() -> Self {
        Zoom(INITIAL_PIXSCALE)
    }
}

impl Zoom {
    #[inline]
    pub fn pixscale(self) -> f64 {
        self.0
    }

    /// Smaller field of view.
    #[inline]
    pub fn zoom_in(self) -> Self {
        Zoom(self.0 / 2.0)
    }

    /// Larger field of view.
    #[inline]
    pub fn zoom_out(self) -> Self {
        Zoom(self.0 * 2.0)
    }
}

/// One cutout fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct CutoutRequest {
    pub position: SkyPosition,
    pub layer: String,
    pub zoom: Zoom,
}

impl CutoutRequest {
    pub fn new(position: SkyPosition, layer: impl Into<String>, zoom: Zoom) -> Self {
        Self {
            position,
            layer: layer.into(),
            zoom,
        }
    }

    /// `<base>?ra=..&dec=..&layer=..&pixscale=..`, six decimals per number.
    pub fn url(&self, base: &str) -> String {
        format!(
            "{}?ra={:.6}&dec={:.6}&layer={}&pixscale={:.6}",
            base,
            self.position.ra(),
            self.position.dec(),
            self.layer,
            self.zoom.pixscale()
        )
    }

    /// Stable file name for caching the fetched JPEG.
    pub fn file_name(&self) -> String {
        format!(
            "cutout_{:.6}_{:+.6}_{}_{:.6}.jpg",
            self.position.ra(),
            self.position.dec(),
            self.layer,
            self.zoom.pixscale()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_starts_at_quarter_and_steps_by_two() {
        let z = Zoom::default();
        assert_eq!(z.pixscale(), 0.25);
        assert_eq!(z.zoom_in().pixscale(), 0.125);
        assert_eq!(z.zoom_out().zoom_out().pixscale(), 1.0);
        assert_eq!(z.zoom_in().zoom_out(), z);
    }

    #[test]
    fn url_carries_all_query_parameters() {
        let pos = SkyPosition::new(194.953054, 27.980694).unwrap();
        let req = CutoutRequest::new(pos, DEFAULT_LAYER, Zoom::default());
        assert_eq!(
            req.url(DEFAULT_BASE_URL),
            "http://legacysurvey.org/viewer/cutout.jpg?ra=194.953054&dec=27.980694&layer=dr8&pixscale=0.250000"
        );
    }

    #[test]
    fn file_name_distinguishes_zoom_levels() {
        let pos = SkyPosition::new(10.0, -5.0).unwrap();
        let a = CutoutRequest::new(pos, "dr8", Zoom::default());
        let b = CutoutRequest::new(pos, "dr8", Zoom::default().zoom_in());
        assert_ne!(a.file_name(), b.file_name());
        assert!(a.file_name().contains("-5.000000"));
    }
}
