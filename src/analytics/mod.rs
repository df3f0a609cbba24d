//! Statistics over a loaded trip table
//!
//! The four analyzers are independent, read-only passes over the same table.

pub mod duration;
pub mod mode;
pub mod stations;
pub mod time;
pub mod users;

pub use duration::{DurationAnalyzer, DurationStats};
pub use mode::{mode, ModeStat};
pub use stations::{StationAnalyzer, StationPair, StationStats};
pub use time::{TimeAnalyzer, TimeStats};
pub use users::{BirthYearStats, CategoryCounts, UserAnalyzer, UserStats};

use crate::filters::{City, Filter};
use crate::loader::TripTable;
use log::info;
use serde::Serialize;

/// Runs all four analyses
pub struct TripAnalyzer {
    time: TimeAnalyzer,
    stations: StationAnalyzer,
    durations: DurationAnalyzer,
    users: UserAnalyzer,
}

impl TripAnalyzer {
    pub fn new() -> Self {
        Self {
            time: TimeAnalyzer::new(),
            stations: StationAnalyzer::new(),
            durations: DurationAnalyzer::new(),
            users: UserAnalyzer::new(),
        }
    }

    pub fn analyze(&self, table: &TripTable) -> StatsReport {
        info!("Running analytics on {} trips", table.len());

        StatsReport {
            city: table.city(),
            filter: table.filter(),
            trip_count: table.len(),
            time: self.time.analyze(table),
            stations: self.stations.analyze(table),
            durations: self.durations.analyze(table),
            users: self.users.analyze(table),
        }
    }
}

impl Default for TripAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Every statistic for one city/month/day selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub city: City,
    pub filter: Filter,
    pub trip_count: usize,
    pub time: TimeStats,
    pub stations: StationStats,
    pub durations: Option<DurationStats>,
    pub users: UserStats,
}

impl StatsReport {
    pub fn is_empty(&self) -> bool {
        self.trip_count == 0
    }
}
