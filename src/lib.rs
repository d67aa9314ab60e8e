//! Aubrey Circle - Hoyle eclipse-prediction engine
//!
//! Models Fred Hoyle's hypothesis that a 56-position monument circle can
//! mechanically predict eclipses: four markers (Sun, Moon, and the two
//! lunar nodes) move under fixed daily and periodic rules, snap back to
//! astronomically exact anchors, and flag an eclipse whenever the Moon
//! stands at syzygy inside a nodal zone.

pub mod core;
pub mod ephemeris;
pub mod simulation;
