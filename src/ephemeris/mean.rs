//! Built-in mean-elements ephemeris
//!
//! Linear mean longitudes measured from the J2000.0 epoch. These are mean
//! elements, not apparent positions: good to a degree or two over historical
//! spans, which is ample at hole resolution (~6.4 degrees per hole), but not
//! suitable for precise astronomy.

use chrono::{Datelike, NaiveDateTime, Timelike};

use super::{EclipticLongitudes, EphemerisProvider};
use crate::core::error::Result;

/// Julian day of the J2000.0 epoch (2000-01-01 12:00)
const J2000_JD: f64 = 2_451_545.0;

/// Mean longitude of the Sun at J2000.0 (degrees) and its daily motion
const SUN_LONGITUDE_J2000: f64 = 280.46646;
const SUN_DAILY_MOTION: f64 = 0.985_647_36;

/// Mean longitude of the Moon at J2000.0 (degrees) and its daily motion
const MOON_LONGITUDE_J2000: f64 = 218.316_447_7;
const MOON_DAILY_MOTION: f64 = 13.176_396_48;

/// Mean longitude of the ascending lunar node at J2000.0 (degrees); the
/// node regresses, so its daily motion is negative
const NODE_LONGITUDE_J2000: f64 = 125.04452;
const NODE_DAILY_MOTION: f64 = -0.052_953_77;

/// Deterministic mean-longitude provider
///
/// Never fails: every representable instant yields a longitude triple.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanElements;

impl MeanElements {
    pub fn new() -> Self {
        Self
    }
}

/// Julian day for a proleptic-Gregorian calendar instant
pub fn julian_day(instant: NaiveDateTime) -> f64 {
    let whole_days = instant.date().num_days_from_ce() as f64;
    let day_fraction = instant.time().num_seconds_from_midnight() as f64 / 86_400.0;
    whole_days + 1_721_424.5 + day_fraction
}

impl EphemerisProvider for MeanElements {
    fn longitudes(&self, instant: NaiveDateTime) -> Result<EclipticLongitudes> {
        let d = julian_day(instant) - J2000_JD;
        Ok(EclipticLongitudes {
            sun_deg: (SUN_LONGITUDE_J2000 + SUN_DAILY_MOTION * d).rem_euclid(360.0),
            moon_deg: (MOON_LONGITUDE_J2000 + MOON_DAILY_MOTION * d).rem_euclid(360.0),
            node_deg: (NODE_LONGITUDE_J2000 + NODE_DAILY_MOTION * d).rem_euclid(360.0),
        })
    }
}
