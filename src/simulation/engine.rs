//! Simulation engine - owns the calendar and markers and applies the rules
//!
//! The engine is an explicit value with lifecycle construct -> operate ->
//! drop: no process-wide singleton. It is a synchronous state machine; the
//! only I/O is the ephemeris query, which either succeeds or leaves the
//! engine untouched.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::core::calendar::CalendarState;
use crate::core::circle::{DAYS_PER_HOYLE_YEAR, SUMMER_SOLSTICE_HOLE};
use crate::core::config::EngineConfig;
use crate::core::error::{AubreyError, Result};
use crate::core::marker::{MarkerName, MarkerPositions, MarkerSet};
use crate::ephemeris::{
    longitude_to_position, EclipticLongitudes, EphemerisProvider, MeanElements,
    DEFAULT_REFERENCE_DEG,
};
use crate::simulation::eclipse::{detect_eclipses, Eclipse};
use crate::simulation::predict::{
    day_offset, run_model_forward, ModelPrediction, Prediction, SkyPrediction,
};
use crate::simulation::step::{run_daily_step, CorrectionMuting, Recalibration};

/// Result snapshot returned by each daily advance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayReport {
    pub day: u64,
    pub year: u32,
    pub positions: MarkerPositions,
    pub eclipses: Vec<Eclipse>,
    pub recalibrations: Vec<Recalibration>,
}

impl DayReport {
    /// The recalibrations rendered as human-readable log lines
    pub fn log_lines(&self) -> Vec<String> {
        self.recalibrations.iter().map(|r| r.to_string()).collect()
    }
}

/// Marker positions and originating instant recorded when the engine was
/// last seeded from real astronomical data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EphemerisSeed {
    pub positions: MarkerPositions,
    pub instant: NaiveDateTime,
}

/// The Hoyle model: four markers, one calendar, and the daily rules
pub struct SimulationEngine {
    config: EngineConfig,
    calendar: CalendarState,
    markers: MarkerSet,
    muting: CorrectionMuting,
    seed: Option<EphemerisSeed>,
    ephemeris: Box<dyn EphemerisProvider>,
}

impl SimulationEngine {
    /// Create an engine with the built-in mean-elements ephemeris
    ///
    /// Markers take the canonical Hoyle layout; the day-1 solstice anchor is
    /// not applied at construction (it is at `reset`).
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_provider(config, Box::new(MeanElements::new()))
    }

    /// Create an engine with a caller-supplied ephemeris provider
    pub fn with_provider(
        config: EngineConfig,
        ephemeris: Box<dyn EphemerisProvider>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            calendar: CalendarState::new(1, 1),
            markers: MarkerSet::canonical(config.num_holes),
            muting: CorrectionMuting::default(),
            seed: None,
            ephemeris,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn current_day(&self) -> u64 {
        self.calendar.current_day()
    }

    pub fn current_year(&self) -> u32 {
        self.calendar.current_year()
    }

    /// One-based day within the current model year
    pub fn day_of_year(&self) -> u16 {
        self.calendar.day_of_year()
    }

    /// Snapshot of the four marker positions
    pub fn current_positions(&self) -> MarkerPositions {
        self.markers.positions()
    }

    /// The ephemeris seed record, if the engine was seeded
    pub fn seed(&self) -> Option<&EphemerisSeed> {
        self.seed.as_ref()
    }

    /// Evaluate the eclipse predicates over the current positions without
    /// advancing
    pub fn check_eclipses(&self) -> Vec<Eclipse> {
        detect_eclipses(&self.markers, &self.config)
    }

    /// Force a single marker onto `position`
    ///
    /// Diagnostic escape hatch for tests and presentation tooling. Placing a
    /// node this way can break the node-opposition invariant until the next
    /// yearly node update or reset restores it.
    pub fn place_marker(&mut self, name: MarkerName, position: u16) -> Result<()> {
        if position >= self.config.num_holes {
            return Err(AubreyError::OutOfRange {
                position,
                num_holes: self.config.num_holes,
            });
        }
        self.markers.get_mut(name).snap_to(position, self.config.num_holes);
        Ok(())
    }

    /// Advance the simulation by one day and report what happened
    pub fn advance(&mut self) -> DayReport {
        let outcome = run_daily_step(
            &mut self.calendar,
            &mut self.markers,
            &mut self.muting,
            &self.config,
        );

        for correction in &outcome.recalibrations {
            tracing::info!(day = self.calendar.current_day(), "{}", correction);
        }
        for eclipse in &outcome.eclipses {
            tracing::info!(
                day = self.calendar.current_day(),
                year = self.calendar.current_year(),
                "{} flagged",
                eclipse
            );
        }
        tracing::debug!(
            day = self.calendar.current_day(),
            moon = self.markers.moon.position(),
            sun = self.markers.sun.position(),
            "advanced one day"
        );

        DayReport {
            day: self.calendar.current_day(),
            year: self.calendar.current_year(),
            positions: self.markers.positions(),
            eclipses: outcome.eclipses,
            recalibrations: outcome.recalibrations,
        }
    }

    /// Reinitialize the engine at the given calendar start
    ///
    /// Markers return to the canonical Hoyle layout, the reporting flags and
    /// any ephemeris seed are cleared, and the proximity threshold is
    /// replaced. A start landing on the first day of a model year applies
    /// the summer-solstice anchor immediately, since the daily rule would
    /// only fire on the next year-cycle completion.
    pub fn reset(
        &mut self,
        start_day: u64,
        start_year: u32,
        proximity_threshold: u16,
    ) -> Result<MarkerPositions> {
        let mut config = self.config;
        config.proximity_threshold = proximity_threshold;
        config.validate()?;

        self.config = config;
        self.calendar = CalendarState::new(start_day, start_year);
        self.markers = MarkerSet::canonical(self.config.num_holes);
        self.muting = CorrectionMuting::default();
        self.seed = None;

        if self.calendar.cycle_position_year() == 0 {
            let hole = SUMMER_SOLSTICE_HOLE % self.config.num_holes;
            self.markers.sun.snap_to(hole, self.config.num_holes);
            tracing::info!(day = start_day, "Sun anchored to summer solstice at reset");
        }

        Ok(self.current_positions())
    }

    /// Seed the markers from real longitudes at `instant`
    ///
    /// On success the instant becomes the new day-1 baseline and the seed
    /// record is stored; on failure the engine is left untouched. No
    /// solstice override is applied: the measured solar longitude is the
    /// seed's whole point.
    pub fn reset_from_ephemeris(&mut self, instant: NaiveDateTime) -> Result<MarkerPositions> {
        let longitudes = self.ephemeris.longitudes(instant)?;
        let markers = markers_from_longitudes(&longitudes, self.config.num_holes)?;

        self.markers = markers;
        self.calendar = CalendarState::new(1, 1);
        self.muting = CorrectionMuting::default();
        self.seed = Some(EphemerisSeed {
            positions: self.markers.positions(),
            instant,
        });

        tracing::info!(
            %instant,
            sun = self.markers.sun.position(),
            moon = self.markers.moon.position(),
            node = self.markers.ascending_node.position(),
            "engine seeded from ephemeris"
        );

        Ok(self.current_positions())
    }

    /// Seed from a Gregorian date, defaulting to local noon
    pub fn reset_from_ephemeris_date(
        &mut self,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<MarkerPositions> {
        let instant = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .ok_or_else(|| {
                AubreyError::EphemerisUnavailable(format!(
                    "invalid calendar date {:04}-{:02}-{:02}",
                    year, month, day
                ))
            })?;
        self.reset_from_ephemeris(instant)
    }

    /// Compute what the model (and, when seeded, the sky) shows for a target
    /// date without disturbing the live state
    ///
    /// Target coordinates are model-relative: `target_day` counts within the
    /// 364-day model year and `(1, 1)` is the engine's baseline. The live
    /// calendar and markers are read, never run: forward runs happen on
    /// independent copies.
    pub fn predict(&self, target_year: u32, target_day: u16) -> Result<Prediction> {
        if target_year == 0 {
            return Err(AubreyError::InvalidTarget(
                "target_year must be at least 1".into(),
            ));
        }
        if target_day == 0 || target_day > DAYS_PER_HOYLE_YEAR {
            return Err(AubreyError::InvalidTarget(format!(
                "target_day must be in 1..={}, got {}",
                DAYS_PER_HOYLE_YEAR, target_day
            )));
        }

        let offset = day_offset(target_year, target_day);

        // The target is the live state: read it directly. When seeded, the
        // live markers already embody the sky for this date, so no second
        // query is made.
        if target_year == self.calendar.current_year()
            && target_day == self.calendar.day_of_year()
        {
            let positions = self.markers.positions();
            let eclipses = detect_eclipses(&self.markers, &self.config);
            let sky = match &self.seed {
                Some(seed) => Some(SkyPrediction::Observed {
                    instant: shifted_instant(seed.instant, offset)?,
                    positions,
                    eclipses: eclipses.clone(),
                }),
                None => None,
            };
            return Ok(Prediction {
                target_year,
                target_day,
                model: ModelPrediction { positions, eclipses },
                sky,
            });
        }

        match &self.seed {
            // Seeded: fork from the seed positions, and ask the sky about
            // the shifted instant independently of the model run.
            Some(seed) => {
                let start = MarkerSet::from_positions(
                    seed.positions.sun,
                    seed.positions.moon,
                    seed.positions.ascending_node,
                    self.config.num_holes,
                )?;
                let model = run_model_forward(start, offset, &self.config);

                let instant = shifted_instant(seed.instant, offset)?;
                let sky = match self.ephemeris.longitudes(instant) {
                    Ok(longitudes) => {
                        let sky_markers =
                            markers_from_longitudes(&longitudes, self.config.num_holes)?;
                        SkyPrediction::Observed {
                            instant,
                            positions: sky_markers.positions(),
                            eclipses: detect_eclipses(&sky_markers, &self.config),
                        }
                    }
                    Err(e) => SkyPrediction::Unavailable {
                        instant,
                        reason: e.to_string(),
                    },
                };

                Ok(Prediction {
                    target_year,
                    target_day,
                    model,
                    sky: Some(sky),
                })
            }
            // Unseeded: fork from the canonical layout. The day-1 solstice
            // anchor only shows up when the target is the baseline itself.
            None => {
                let mut start = MarkerSet::canonical(self.config.num_holes);
                if offset == 0 {
                    let hole = SUMMER_SOLSTICE_HOLE % self.config.num_holes;
                    start.sun.snap_to(hole, self.config.num_holes);
                }
                let model = run_model_forward(start, offset, &self.config);
                Ok(Prediction {
                    target_year,
                    target_day,
                    model,
                    sky: None,
                })
            }
        }
    }
}

/// Resolve a longitude triple into a marker layout
fn markers_from_longitudes(longitudes: &EclipticLongitudes, num_holes: u16) -> Result<MarkerSet> {
    let sun = longitude_to_position(longitudes.sun_deg, num_holes, DEFAULT_REFERENCE_DEG);
    let moon = longitude_to_position(longitudes.moon_deg, num_holes, DEFAULT_REFERENCE_DEG);
    let node = longitude_to_position(longitudes.node_deg, num_holes, DEFAULT_REFERENCE_DEG);
    MarkerSet::from_positions(sun, moon, node, num_holes)
}

/// Seed instant plus a day offset, guarding against calendar overflow
fn shifted_instant(instant: NaiveDateTime, offset: u64) -> Result<NaiveDateTime> {
    i64::try_from(offset)
        .ok()
        .and_then(Duration::try_days)
        .and_then(|delta| instant.checked_add_signed(delta))
        .ok_or_else(|| {
            AubreyError::InvalidTarget(format!(
                "target is {} days past the seed instant, beyond the supported calendar range",
                offset
            ))
        })
}
