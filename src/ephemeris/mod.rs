//! Ephemeris boundary - real-sky longitudes and their mapping onto the circle
//!
//! The engine consumes this interface for seeding and for sky predictions.
//! Providers return mean ecliptic longitudes for a calendar instant or
//! report failure; they never substitute defaults for missing data.

pub mod mean;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::error::Result;

pub use mean::MeanElements;

/// Ecliptic longitude assigned to hole 0 (degrees)
///
/// Hoyle orients the circle with 90 degrees of ecliptic longitude at the
/// first hole, so the summer-solstice Sun sits near the solstice anchor.
pub const DEFAULT_REFERENCE_DEG: f64 = 90.0;

/// Mean ecliptic longitudes for one instant, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EclipticLongitudes {
    pub sun_deg: f64,
    pub moon_deg: f64,
    /// Longitude of the ascending lunar node
    pub node_deg: f64,
}

/// Source of mean ecliptic longitudes for a calendar instant
///
/// Failures surface as `AubreyError::EphemerisUnavailable`; the engine
/// leaves its live state untouched when a query fails.
pub trait EphemerisProvider {
    fn longitudes(&self, instant: NaiveDateTime) -> Result<EclipticLongitudes>;
}

/// Map an ecliptic longitude onto the nearest hole
///
/// The longitude is taken relative to `reference_deg` (the longitude of
/// hole 0), divided by the hole width, rounded to the nearest hole, and
/// wrapped into `[0, num_holes)`.
pub fn longitude_to_position(longitude_deg: f64, num_holes: u16, reference_deg: f64) -> u16 {
    let hole_width = 360.0 / num_holes as f64;
    let relative = (longitude_deg - reference_deg).rem_euclid(360.0);
    ((relative / hole_width).round() as u16) % num_holes
}
