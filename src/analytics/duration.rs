//! Total and average trip duration

use crate::loader::TripTable;
use serde::Serialize;

/// Analyzer for trip durations
pub struct DurationAnalyzer {}

impl DurationAnalyzer {
    pub fn new() -> Self {
        Self {}
    }

    /// Returns `None` for an empty table instead of a NaN mean
    pub fn analyze(&self, table: &TripTable) -> Option<DurationStats> {
        if table.is_empty() {
            return None;
        }

        let trip_count = table.len();
        let total_seconds: f64 = table.iter().map(|r| r.trip_duration).sum();

        Some(DurationStats {
            trip_count,
            total_seconds,
            mean_seconds: total_seconds / trip_count as f64,
        })
    }
}

impl Default for DurationAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Results of duration analysis, in seconds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub trip_count: usize,
    pub total_seconds: f64,
    pub mean_seconds: f64,
}
