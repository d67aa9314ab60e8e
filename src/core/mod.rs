pub mod calendar;
pub mod circle;
pub mod config;
pub mod error;
pub mod marker;

pub use calendar::{CalendarState, DayRollover};
pub use config::EngineConfig;
pub use error::{AubreyError, Result};
pub use marker::{Direction, Marker, MarkerName, MarkerPositions, MarkerSet};
