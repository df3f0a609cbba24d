//! bikeshare-stats - descriptive statistics for US bike-share trip data
//!
//! Loads one city's trip records, narrows them by month and weekday, and
//! reports travel times, popular stations, trip durations and rider
//! demographics.

pub mod analytics;
pub mod error;
pub mod filters;
pub mod loader;
pub mod output;
pub mod parsers;
pub mod prompt;

// Re-export commonly used items
pub use analytics::{StatsReport, TripAnalyzer};
pub use error::{BikeshareError, Result, SelectionKind};
pub use filters::{City, Filter, Selection};
pub use loader::{TripLoader, TripTable};
pub use output::{JsonFormatter, TextFormatter};
pub use parsers::{ColumnPresence, TripParser, TripRecord};
pub use prompt::Prompter;
