//! The monument circle - hole count, cycle lengths, and circular arithmetic
//!
//! This module provides the constants and distance helpers shared by marker
//! movement, recalibration, and eclipse detection.

// ============================================================================
// Constants
// ============================================================================

/// Number of discrete positions (holes) on the circle
pub const NUM_HOLES: u16 = 56;

/// Length of the short movement cycle in days (Sun advances on completion)
pub const SHORT_CYCLE_DAYS: u8 = 13;

/// Length of the model year in days (nodes advance on completion)
pub const DAYS_PER_HOYLE_YEAR: u16 = 364;

/// Hole the Sun marker is anchored to at the summer solstice (model day 1)
pub const SUMMER_SOLSTICE_HOLE: u16 = 7;

/// Hole the Sun marker is anchored to at the winter solstice (model mid-year)
pub const WINTER_SOLSTICE_HOLE: u16 = 35;

/// Zero-based year-cycle position of the winter solstice (1-based day 183)
pub const WINTER_SOLSTICE_CYCLE_POSITION: u16 = DAYS_PER_HOYLE_YEAR / 2;

// ============================================================================
// Circular arithmetic
// ============================================================================

/// Position diametrically opposite `position` on a circle of `num_holes`
///
/// `num_holes` must be even; the canonical circle of 56 holes satisfies this
/// and `EngineConfig::validate` rejects odd counts.
pub fn opposite(position: u16, num_holes: u16) -> u16 {
    (position + num_holes / 2) % num_holes
}

/// Shortest distance between two positions measured around the circle
pub fn circular_distance(a: u16, b: u16, num_holes: u16) -> u16 {
    let d = a.abs_diff(b) % num_holes;
    d.min(num_holes - d)
}

/// Are two positions within `tolerance` holes of each other on the circle?
///
/// Only meaningful for `tolerance < num_holes / 2`; beyond that every pair
/// of positions is trivially aligned, so `EngineConfig::validate` rejects
/// such tolerances at configuration time.
pub fn circular_aligned(a: u16, b: u16, tolerance: u16, num_holes: u16) -> bool {
    circular_distance(a, b, num_holes) <= tolerance
}
