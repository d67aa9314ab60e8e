//! Daily movement and auto-recalibration rules
//!
//! This is the core loop of the model, applied once per day:
//! calendar advance -> marker movement -> solar anchor -> lunar correction
//! -> eclipse detection.
//!
//! The step is a pure function over the state it is handed. The live engine
//! runs it against its own calendar and markers; prediction runs the same
//! function against independent copies, which is what keeps `predict`
//! side-effect-free.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::calendar::{CalendarState, DayRollover};
use crate::core::circle::{
    opposite, SUMMER_SOLSTICE_HOLE, WINTER_SOLSTICE_CYCLE_POSITION, WINTER_SOLSTICE_HOLE,
};
use crate::core::config::EngineConfig;
use crate::core::marker::{Direction, MarkerSet};
use crate::simulation::eclipse::{detect_eclipses, Eclipse};

/// Which solstice anchor a solar correction snapped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Solstice {
    Summer,
    Winter,
}

/// A recalibration applied during a daily step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recalibration {
    /// Sun forced onto a solstice anchor hole
    SunToSolstice { solstice: Solstice, hole: u16 },
    /// Moon forced onto exact opposition with the Sun (full moon)
    MoonToFullMoon { hole: u16 },
}

impl fmt::Display for Recalibration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recalibration::SunToSolstice {
                solstice: Solstice::Summer,
                hole,
            } => write!(f, "Sun recalibrated to summer solstice anchor (hole {})", hole),
            Recalibration::SunToSolstice {
                solstice: Solstice::Winter,
                hole,
            } => write!(f, "Sun recalibrated to winter solstice anchor (hole {})", hole),
            Recalibration::MoonToFullMoon { hole } => {
                write!(f, "Moon recalibrated to full-moon opposition (hole {})", hole)
            }
        }
    }
}

/// Suppression flags for recalibration reporting
///
/// A correction is reported only on the first day its condition holds; while
/// the condition persists the flag stays set and the report is muted. The
/// flag clears as soon as the condition lapses, so the next occurrence is
/// reported again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionMuting {
    pub solar: bool,
    pub lunar: bool,
}

/// Everything one daily step produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub rollover: DayRollover,
    pub recalibrations: Vec<Recalibration>,
    pub eclipses: Vec<Eclipse>,
}

/// Advance the calendar one day and apply the movement and recalibration
/// rules to the markers
pub fn run_daily_step(
    calendar: &mut CalendarState,
    markers: &mut MarkerSet,
    muting: &mut CorrectionMuting,
    config: &EngineConfig,
) -> StepOutcome {
    let n = config.num_holes;
    let rollover = calendar.advance_one_day();

    // The Moon moves every day; the Sun only on short-cycle completion.
    markers.moon.shift(2, n, Direction::Anticlockwise);
    if rollover.short_cycle_complete {
        markers.sun.shift(2, n, Direction::Anticlockwise);
    }

    // Nodes regress once per model year. The descending node is never moved
    // independently: forcing it opposite the ascending node keeps the
    // opposition invariant exact.
    if rollover.year_cycle_complete {
        markers.ascending_node.shift(3, n, Direction::Clockwise);
        let opp = opposite(markers.ascending_node.position(), n);
        markers.descending_node.snap_to(opp, n);
    }

    let mut recalibrations = Vec::new();
    apply_solar_anchor(calendar, markers, muting, config, &mut recalibrations);
    apply_lunar_correction(markers, muting, config, &mut recalibrations);

    let eclipses = detect_eclipses(markers, config);

    StepOutcome {
        rollover,
        recalibrations,
        eclipses,
    }
}

/// Snap the Sun onto its solstice anchor on the two anchor days of the
/// model year
///
/// Year-cycle position 0 is the first day of a model year (summer
/// solstice); position 182 is mid-year (winter solstice). Each fires once
/// per Hoyle year, overriding the incremental short-cycle drift with an
/// exact anchor.
fn apply_solar_anchor(
    calendar: &CalendarState,
    markers: &mut MarkerSet,
    muting: &mut CorrectionMuting,
    config: &EngineConfig,
    recalibrations: &mut Vec<Recalibration>,
) {
    let anchor = match calendar.cycle_position_year() {
        0 => Some((Solstice::Summer, SUMMER_SOLSTICE_HOLE)),
        WINTER_SOLSTICE_CYCLE_POSITION => Some((Solstice::Winter, WINTER_SOLSTICE_HOLE)),
        _ => None,
    };

    match anchor {
        Some((solstice, hole)) => {
            let hole = hole % config.num_holes;
            markers.sun.snap_to(hole, config.num_holes);
            if !muting.solar {
                muting.solar = true;
                recalibrations.push(Recalibration::SunToSolstice { solstice, hole });
            }
        }
        None => muting.solar = false,
    }
}

/// Snap the Moon onto exact opposition when the full-moon condition holds
///
/// The expected full-moon position is the point opposite the Sun; if the
/// Moon is within the proximity threshold of it, any drift is snapped away.
fn apply_lunar_correction(
    markers: &mut MarkerSet,
    muting: &mut CorrectionMuting,
    config: &EngineConfig,
    recalibrations: &mut Vec<Recalibration>,
) {
    let expected_moon = opposite(markers.sun.position(), config.num_holes);
    let at_full_moon = crate::core::circle::circular_aligned(
        markers.moon.position(),
        expected_moon,
        config.proximity_threshold,
        config.num_holes,
    );

    if at_full_moon {
        markers.moon.snap_to(expected_moon, config.num_holes);
        if !muting.lunar {
            muting.lunar = true;
            recalibrations.push(Recalibration::MoonToFullMoon {
                hole: expected_moon,
            });
        }
    } else {
        muting.lunar = false;
    }
}
