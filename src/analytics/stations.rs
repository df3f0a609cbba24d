//! Most popular stations and trips

use crate::analytics::mode::{mode, ModeStat};
use crate::loader::TripTable;
use serde::Serialize;

/// A start/end station combination
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StationPair {
    pub start: String,
    pub end: String,
}

impl std::fmt::Display for StationPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Analyzer for station popularity
pub struct StationAnalyzer {}

impl StationAnalyzer {
    pub fn new() -> Self {
        Self {}
    }

    /// Ties resolve to the lexicographically smallest station (or pair,
    /// compared by start station first)
    pub fn analyze(&self, table: &TripTable) -> StationStats {
        let start = mode(table.iter().map(|r| r.start_station.as_str()))
            .map(|m| m.map(str::to_string));
        let end = mode(table.iter().map(|r| r.end_station.as_str()))
            .map(|m| m.map(str::to_string));
        let trip = mode(
            table
                .iter()
                .map(|r| (r.start_station.as_str(), r.end_station.as_str())),
        )
        .map(|m| {
            m.map(|(start, end)| StationPair {
                start: start.to_string(),
                end: end.to_string(),
            })
        });

        StationStats {
            most_common_start_station: start,
            most_common_end_station: end,
            most_common_trip: trip,
        }
    }
}

impl Default for StationAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Results of station analysis; every field is `None` for an empty table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub most_common_start_station: Option<ModeStat<String>>,
    pub most_common_end_station: Option<ModeStat<String>>,
    pub most_common_trip: Option<ModeStat<StationPair>>,
}

impl StationStats {
    pub fn has_data(&self) -> bool {
        self.most_common_start_station.is_some()
    }
}
