//! Parsers for the per-city trip data files

pub mod trips;

pub use trips::{ColumnPresence, TripParser, TripRecord};
