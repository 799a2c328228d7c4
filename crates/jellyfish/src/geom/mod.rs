//! Angle geometry for tail measurements.
//!
//! Purpose
//! - Turn two clicked points into a tail angle, and two sky positions into a
//!   bearing, using the same polar convention (0° along +x, counter-clockwise
//!   positive, whole degrees in (-180, 180]).
//! - Fold the difference between a tail angle and a bearing into the shortest
//!   circular distance.
//!
//! RA axis conventions
//! - Click mode scales Δx by `cos(dec)` (RA compression on the image).
//! - The BCG bearing negates Δra (RA increases to the left on the displayed image)
//!   and then takes the unscaled angle.
//!   Both are kept as-is so previously collected angles stay comparable.

mod angle;
pub(crate) mod cfg;
mod offset;
mod sky;
mod types;

pub use angle::{extract_angle, normalize_degrees, tail_angle};
pub use offset::{tail_offset, TailOffset};
pub use sky::{bcg_bearing, spherical_offsets_to};
pub use types::{Point2D, SkyPosition};
