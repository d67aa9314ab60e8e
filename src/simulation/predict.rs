//! Prediction records and the forward-run over independent copies
//!
//! A prediction never touches the live engine: it builds its own calendar
//! and marker copies and runs the same daily step the live engine uses.
//! Side-effect freedom is by construction, not by save-and-restore.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::calendar::CalendarState;
use crate::core::circle::DAYS_PER_HOYLE_YEAR;
use crate::core::config::EngineConfig;
use crate::core::marker::{MarkerPositions, MarkerSet};
use crate::simulation::eclipse::{detect_eclipses, Eclipse};
use crate::simulation::step::{run_daily_step, CorrectionMuting};

/// What the model shows for the target date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelPrediction {
    pub positions: MarkerPositions,
    pub eclipses: Vec<Eclipse>,
}

/// What the real sky shows for the target date
///
/// Only produced when the engine carries an ephemeris seed. A failed query
/// is reported as such, never silently replaced with model output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkyPrediction {
    Observed {
        /// Gregorian instant derived from the seed instant plus the day
        /// offset to the target
        instant: NaiveDateTime,
        positions: MarkerPositions,
        eclipses: Vec<Eclipse>,
    },
    Unavailable {
        instant: NaiveDateTime,
        reason: String,
    },
}

/// Result of `SimulationEngine::predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub target_year: u32,
    pub target_day: u16,
    pub model: ModelPrediction,
    /// `None` when the engine was never seeded from an ephemeris
    pub sky: Option<SkyPrediction>,
}

/// Days separating `(year 1, day 1)` from the target coordinates
pub(crate) fn day_offset(target_year: u32, target_day: u16) -> u64 {
    (target_year as u64 - 1) * DAYS_PER_HOYLE_YEAR as u64 + (target_day as u64 - 1)
}

/// Run the daily rules `offset` days forward from `start`
///
/// Operates on a fresh calendar and its own marker copy; the caller's state
/// is never involved. The returned eclipses are those of the final day
/// (evaluated directly on `start` when the offset is zero).
pub(crate) fn run_model_forward(
    start: MarkerSet,
    offset: u64,
    config: &EngineConfig,
) -> ModelPrediction {
    let mut calendar = CalendarState::new(1, 1);
    let mut markers = start;
    let mut muting = CorrectionMuting::default();

    let mut eclipses = detect_eclipses(&markers, config);
    for _ in 0..offset {
        let outcome = run_daily_step(&mut calendar, &mut markers, &mut muting, config);
        eclipses = outcome.eclipses;
    }

    ModelPrediction {
        positions: markers.positions(),
        eclipses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::circle::NUM_HOLES;

    #[test]
    fn test_day_offset() {
        assert_eq!(day_offset(1, 1), 0);
        assert_eq!(day_offset(1, 364), 363);
        assert_eq!(day_offset(2, 1), 364);
        assert_eq!(day_offset(3, 10), 737);
    }

    #[test]
    fn test_zero_offset_returns_start() {
        let start = MarkerSet::canonical(NUM_HOLES);
        let config = EngineConfig::default();
        let model = run_model_forward(start, 0, &config);
        assert_eq!(model.positions, start.positions());
    }

    #[test]
    fn test_forward_run_matches_stepping() {
        let config = EngineConfig::default();
        let start = MarkerSet::canonical(NUM_HOLES);

        let mut calendar = CalendarState::new(1, 1);
        let mut markers = start;
        let mut muting = CorrectionMuting::default();
        for _ in 0..500 {
            run_daily_step(&mut calendar, &mut markers, &mut muting, &config);
        }

        let model = run_model_forward(start, 500, &config);
        assert_eq!(model.positions, markers.positions());
    }

    #[test]
    fn test_forward_run_does_not_consume_start() {
        let start = MarkerSet::canonical(NUM_HOLES);
        let config = EngineConfig::default();
        let before = start.positions();
        let _ = run_model_forward(start, 100, &config);
        assert_eq!(start.positions(), before);
    }
}
