//! Eclipse detection - syzygy alignment inside the nodal influence band
//!
//! An eclipse is flagged when the Moon stands at syzygy (aligned with the
//! Sun, or with the point opposite it) while also sitting close enough to
//! one of the lunar nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::circle::{circular_aligned, opposite};
use crate::core::config::EngineConfig;
use crate::core::marker::MarkerSet;

/// An eclipse flagged by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Eclipse {
    /// New moon inside a nodal zone
    Solar,
    /// Full moon inside a nodal zone
    Lunar,
}

impl fmt::Display for Eclipse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eclipse::Solar => write!(f, "Solar Eclipse"),
            Eclipse::Lunar => write!(f, "Lunar Eclipse"),
        }
    }
}

/// Is `position` within the nodal influence band around `node_position`?
pub fn in_nodal_zone(position: u16, node_position: u16, config: &EngineConfig) -> bool {
    circular_aligned(
        position,
        node_position,
        config.nodal_influence_width,
        config.num_holes,
    )
}

/// Moon aligned with the Sun within the proximity threshold (new moon)
pub fn is_new_moon(markers: &MarkerSet, config: &EngineConfig) -> bool {
    circular_aligned(
        markers.moon.position(),
        markers.sun.position(),
        config.proximity_threshold,
        config.num_holes,
    )
}

/// Moon aligned with the anti-Sun point within the proximity threshold
/// (full moon)
pub fn is_full_moon(markers: &MarkerSet, config: &EngineConfig) -> bool {
    circular_aligned(
        markers.moon.position(),
        opposite(markers.sun.position(), config.num_holes),
        config.proximity_threshold,
        config.num_holes,
    )
}

/// Evaluate both eclipse conditions over the current marker positions
///
/// The conditions are independent: zero, one, or both may hold on the same
/// day.
pub fn detect_eclipses(markers: &MarkerSet, config: &EngineConfig) -> Vec<Eclipse> {
    let moon = markers.moon.position();
    let near_node = in_nodal_zone(moon, markers.ascending_node.position(), config)
        || in_nodal_zone(moon, markers.descending_node.position(), config);

    let mut eclipses = Vec::new();
    if near_node {
        if is_new_moon(markers, config) {
            eclipses.push(Eclipse::Solar);
        }
        if is_full_moon(markers, config) {
            eclipses.push(Eclipse::Lunar);
        }
    }
    eclipses
}
