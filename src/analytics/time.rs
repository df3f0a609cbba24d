//! Most frequent times of travel

use crate::analytics::mode::{mode, ModeStat};
use crate::filters::{DAY_NAMES, MONTH_NAMES};
use crate::loader::TripTable;
use serde::Serialize;

/// Analyzer for the month, weekday and hour trips start in
pub struct TimeAnalyzer {}

impl TimeAnalyzer {
    pub fn new() -> Self {
        Self {}
    }

    /// Months tie-break in calendar order, days monday first, hours numerically
    pub fn analyze(&self, table: &TripTable) -> TimeStats {
        let month = mode(table.iter().map(|r| r.month()))
            .map(|m| m.map(|month| MONTH_NAMES[(month - 1) as usize]));
        let day = mode(table.iter().map(|r| r.weekday()))
            .map(|m| m.map(|weekday| DAY_NAMES[weekday as usize]));
        let hour = mode(table.iter().map(|r| r.start_hour));

        TimeStats {
            most_common_month: month,
            most_common_day: day,
            most_common_start_hour: hour,
        }
    }
}

impl Default for TimeAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Results of time-of-travel analysis; every field is `None` for an empty table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    pub most_common_month: Option<ModeStat<&'static str>>,
    pub most_common_day: Option<ModeStat<&'static str>>,
    pub most_common_start_hour: Option<ModeStat<u32>>,
}

impl TimeStats {
    pub fn has_data(&self) -> bool {
        self.most_common_month.is_some()
    }
}
