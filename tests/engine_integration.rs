//! Integration tests for the Aubrey-circle engine
//!
//! These tests verify the live simulation loop end to end:
//! - Daily marker movement and cycle-driven rules
//! - Eclipse detection over manually arranged positions
//! - Reset to the canonical layout with the day-1 solstice anchor
//! - Ephemeris seeding, including the failure path

use chrono::{NaiveDate, NaiveDateTime};

use aubrey_circle::core::circle::opposite;
use aubrey_circle::core::{AubreyError, EngineConfig, MarkerName, Result};
use aubrey_circle::ephemeris::{EclipticLongitudes, EphemerisProvider};
use aubrey_circle::simulation::{Eclipse, SimulationEngine};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("aubrey_circle=debug")
        .try_init();
}

/// Provider returning the same longitudes for every instant, or failing
/// when given none
struct FixedSky {
    longitudes: Option<EclipticLongitudes>,
}

impl EphemerisProvider for FixedSky {
    fn longitudes(&self, _instant: NaiveDateTime) -> Result<EclipticLongitudes> {
        self.longitudes
            .ok_or_else(|| AubreyError::EphemerisUnavailable("no data for instant".into()))
    }
}

fn noon(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

// ============================================================================
// Daily advance
// ============================================================================

#[test]
fn test_first_advance_moves_only_the_moon() {
    init_logging();
    let mut engine = SimulationEngine::new(EngineConfig::default()).unwrap();
    let start = engine.current_positions();
    assert_eq!(start.sun, 28);
    assert_eq!(start.moon, 0);
    assert_eq!(start.ascending_node, 0);
    assert_eq!(start.descending_node, 28);

    let report = engine.advance();
    assert_eq!(report.day, 2);
    assert_eq!(report.year, 1);
    assert_eq!(report.positions.moon, 2);
    assert_eq!(report.positions.sun, 28);
    assert_eq!(report.positions.ascending_node, 0);
    assert_eq!(report.positions.descending_node, 28);
    assert!(report.eclipses.is_empty());
}

#[test]
fn test_year_counter_rolls_after_364_days() {
    let mut engine = SimulationEngine::new(EngineConfig::default()).unwrap();
    for _ in 0..363 {
        engine.advance();
    }
    assert_eq!(engine.current_year(), 1);
    let report = engine.advance();
    assert_eq!(report.year, 2);
    assert_eq!(engine.day_of_year(), 1);
    // The year completion also anchors the Sun and regresses the nodes
    assert_eq!(report.positions.sun, 7);
    assert_eq!(report.positions.ascending_node, 53);
    assert_eq!(report.positions.descending_node, 25);
    assert!(report
        .log_lines()
        .iter()
        .any(|line| line.contains("summer solstice")));
}

#[test]
fn test_day_counter_is_monotonic() {
    let mut engine = SimulationEngine::new(EngineConfig::default()).unwrap();
    let mut last = engine.current_day();
    for _ in 0..800 {
        let report = engine.advance();
        assert!(report.day > last);
        last = report.day;
    }
}

// ============================================================================
// Eclipse checks over arranged positions
// ============================================================================

#[test]
fn test_solar_eclipse_when_new_moon_sits_on_node() {
    let mut engine = SimulationEngine::new(EngineConfig::default()).unwrap();
    engine.place_marker(MarkerName::Sun, 10).unwrap();
    engine.place_marker(MarkerName::Moon, 10).unwrap();
    engine.place_marker(MarkerName::AscendingNode, 10).unwrap();
    engine.place_marker(MarkerName::DescendingNode, 38).unwrap();

    assert_eq!(engine.check_eclipses(), vec![Eclipse::Solar]);
}

#[test]
fn test_lunar_eclipse_when_full_moon_sits_on_node() {
    let mut engine = SimulationEngine::new(EngineConfig::default()).unwrap();
    engine.place_marker(MarkerName::Sun, 0).unwrap();
    engine.place_marker(MarkerName::Moon, 28).unwrap();
    engine.place_marker(MarkerName::AscendingNode, 28).unwrap();
    engine.place_marker(MarkerName::DescendingNode, 0).unwrap();

    assert_eq!(engine.check_eclipses(), vec![Eclipse::Lunar]);
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn test_reset_applies_summer_anchor_on_day_one() {
    let mut engine = SimulationEngine::new(EngineConfig::default()).unwrap();
    for _ in 0..100 {
        engine.advance();
    }

    let positions = engine.reset(1, 1, 0).unwrap();
    assert_eq!(positions.sun, 7);
    assert_eq!(positions.moon, 0);
    assert_eq!(positions.ascending_node, 0);
    assert_eq!(positions.descending_node, 28);
    assert_eq!(engine.current_day(), 1);
    assert_eq!(engine.current_year(), 1);
}

#[test]
fn test_reset_off_year_start_skips_anchor() {
    let mut engine = SimulationEngine::new(EngineConfig::default()).unwrap();
    let positions = engine.reset(10, 1, 0).unwrap();
    // Day 10 is mid-cycle, so the canonical Sun position stands
    assert_eq!(positions.sun, 28);
    assert_eq!(engine.day_of_year(), 10);
}

#[test]
fn test_reset_clears_seed() {
    let sky = FixedSky {
        longitudes: Some(EclipticLongitudes {
            sun_deg: 93.0,
            moon_deg: 0.0,
            node_deg: 270.0,
        }),
    };
    let mut engine =
        SimulationEngine::with_provider(EngineConfig::default(), Box::new(sky)).unwrap();
    engine.reset_from_ephemeris(noon(1999, 8, 11)).unwrap();
    assert!(engine.seed().is_some());

    engine.reset(1, 1, 0).unwrap();
    assert!(engine.seed().is_none());
}

// ============================================================================
// Ephemeris seeding
// ============================================================================

#[test]
fn test_seeding_maps_longitudes_to_holes() {
    init_logging();
    let sky = FixedSky {
        longitudes: Some(EclipticLongitudes {
            sun_deg: 93.0,
            moon_deg: 0.0,
            node_deg: 270.0,
        }),
    };
    let mut engine =
        SimulationEngine::with_provider(EngineConfig::default(), Box::new(sky)).unwrap();

    let instant = noon(1999, 8, 11);
    let positions = engine.reset_from_ephemeris(instant).unwrap();
    assert_eq!(positions.sun, 0);
    assert_eq!(positions.moon, 42);
    assert_eq!(positions.ascending_node, 28);
    assert_eq!(positions.descending_node, 0);

    // The seeded instant becomes the new day-1 baseline
    assert_eq!(engine.current_day(), 1);
    assert_eq!(engine.current_year(), 1);
    let seed = engine.seed().unwrap();
    assert_eq!(seed.instant, instant);
    assert_eq!(seed.positions, positions);
}

#[test]
fn test_failed_seeding_leaves_engine_untouched() {
    let mut engine =
        SimulationEngine::with_provider(EngineConfig::default(), Box::new(FixedSky { longitudes: None }))
            .unwrap();
    for _ in 0..5 {
        engine.advance();
    }
    let day = engine.current_day();
    let positions = engine.current_positions();

    let err = engine.reset_from_ephemeris(noon(2020, 3, 1)).unwrap_err();
    assert!(matches!(err, AubreyError::EphemerisUnavailable(_)));
    assert_eq!(engine.current_day(), day);
    assert_eq!(engine.current_positions(), positions);
    assert!(engine.seed().is_none());
}

#[test]
fn test_seeding_rejects_invalid_date() {
    let mut engine = SimulationEngine::new(EngineConfig::default()).unwrap();
    assert!(engine.reset_from_ephemeris_date(2021, 2, 30).is_err());
}

#[test]
fn test_builtin_ephemeris_seeds_out_of_the_box() {
    let mut engine = SimulationEngine::new(EngineConfig::default()).unwrap();
    let positions = engine.reset_from_ephemeris_date(1999, 8, 11).unwrap();
    assert!(positions.sun < 56);
    assert!(positions.moon < 56);
    assert_eq!(
        positions.descending_node,
        opposite(positions.ascending_node, 56)
    );
}

// ============================================================================
// Node-opposition invariant
// ============================================================================

#[test]
fn test_node_opposition_holds_across_operations() {
    let sky = FixedSky {
        longitudes: Some(EclipticLongitudes {
            sun_deg: 10.0,
            moon_deg: 200.0,
            node_deg: 77.0,
        }),
    };
    let mut engine =
        SimulationEngine::with_provider(EngineConfig::default(), Box::new(sky)).unwrap();

    let check = |engine: &SimulationEngine| {
        let p = engine.current_positions();
        assert_eq!(p.descending_node, opposite(p.ascending_node, 56));
    };

    check(&engine);
    for _ in 0..400 {
        engine.advance();
        check(&engine);
    }
    engine.reset(1, 1, 1).unwrap();
    check(&engine);
    engine.reset_from_ephemeris(noon(2004, 10, 14)).unwrap();
    check(&engine);
    for _ in 0..400 {
        engine.advance();
        check(&engine);
    }
}
