//! Calendar state - absolute day/year counters and the two nested cycles
//!
//! The model runs on a 13-day short cycle and a 364-day "Hoyle year".
//! `advance_one_day` is the sole mutator; it reports which cycles completed
//! so the engine can apply the corresponding marker movements.

use serde::{Deserialize, Serialize};

use crate::core::circle::{DAYS_PER_HOYLE_YEAR, SHORT_CYCLE_DAYS};

/// Cycle-completion flags returned by each daily advance
///
/// 364 is not a multiple of 13, but nothing here assumes the flags are
/// mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRollover {
    /// The 13-day cycle completed on this advance
    pub short_cycle_complete: bool,
    /// The 364-day model year completed on this advance
    pub year_cycle_complete: bool,
}

/// Tracks simulation time with day/year granularity
///
/// `current_day` and `current_year` never decrease; the cycle counters are
/// zero-based progress within their modulus range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarState {
    current_day: u64,
    current_year: u32,
    cycle_position_short: u8,
    cycle_position_year: u16,
}

impl CalendarState {
    /// Create a calendar at the given start day and year
    ///
    /// The cycle counters are derived from the start day so that day 1 sits
    /// at position 0 of both cycles.
    pub fn new(start_day: u64, start_year: u32) -> Self {
        Self {
            current_day: start_day,
            current_year: start_year,
            cycle_position_short: ((start_day.saturating_sub(1)) % SHORT_CYCLE_DAYS as u64) as u8,
            cycle_position_year: ((start_day.saturating_sub(1)) % DAYS_PER_HOYLE_YEAR as u64)
                as u16,
        }
    }

    pub fn current_day(&self) -> u64 {
        self.current_day
    }

    pub fn current_year(&self) -> u32 {
        self.current_year
    }

    /// Zero-based progress within the 13-day cycle
    pub fn cycle_position_short(&self) -> u8 {
        self.cycle_position_short
    }

    /// Zero-based progress within the 364-day model year
    pub fn cycle_position_year(&self) -> u16 {
        self.cycle_position_year
    }

    /// One-based day within the current model year (1..=364)
    pub fn day_of_year(&self) -> u16 {
        self.cycle_position_year + 1
    }

    /// Advance the calendar by one day
    ///
    /// Both cycle counters move in lock-step with the absolute day; a cycle
    /// completes when its counter wraps to 0. Completing the year cycle also
    /// increments the year counter.
    pub fn advance_one_day(&mut self) -> DayRollover {
        self.current_day += 1;

        self.cycle_position_short = (self.cycle_position_short + 1) % SHORT_CYCLE_DAYS;
        let short_cycle_complete = self.cycle_position_short == 0;

        self.cycle_position_year = (self.cycle_position_year + 1) % DAYS_PER_HOYLE_YEAR;
        let year_cycle_complete = self.cycle_position_year == 0;
        if year_cycle_complete {
            self.current_year += 1;
        }

        DayRollover {
            short_cycle_complete,
            year_cycle_complete,
        }
    }
}

impl Default for CalendarState {
    fn default() -> Self {
        Self::new(1, 1)
    }
}
