//! Bike-share trip CSV parser

use crate::error::{invalid_value, missing_column, BikeshareError, Result};
use crate::filters::{day_name, month_name};
use chrono::{Datelike, NaiveDateTime, Timelike};
use csv::{ReaderBuilder, StringRecord};
use log::{debug, warn};
use serde::Serialize;
use std::io::Read;

const START_TIME: &str = "Start Time";
const END_TIME: &str = "End Time";
const TRIP_DURATION: &str = "Trip Duration";
const START_STATION: &str = "Start Station";
const END_STATION: &str = "End Station";
const USER_TYPE: &str = "User Type";
const GENDER: &str = "Gender";
const BIRTH_YEAR: &str = "Birth Year";

/// Header names the index column shows up under. A blank header only
/// counts as the index when it is the first column.
const TRIP_ID_HEADERS: [&str; 2] = ["unnamed: 0", "trip id"];

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

/// One trip, with the time-derived fields computed at load time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    pub trip_id: u64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub start_station: String,
    pub end_station: String,
    /// Seconds
    pub trip_duration: f64,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    pub month_name: &'static str,
    pub day_name: &'static str,
    pub start_hour: u32,
}

impl TripRecord {
    /// Build a record from its source fields and derive month, day and hour
    pub fn new(
        trip_id: u64,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        start_station: String,
        end_station: String,
        trip_duration: f64,
    ) -> Self {
        Self {
            trip_id,
            start_time,
            end_time,
            start_station,
            end_station,
            trip_duration,
            user_type: None,
            gender: None,
            birth_year: None,
            month_name: month_name(start_time.month()),
            day_name: day_name(start_time.weekday()),
            start_hour: start_time.hour(),
        }
    }

    pub fn with_user_type(mut self, user_type: Option<String>) -> Self {
        self.user_type = user_type;
        self
    }

    pub fn with_gender(mut self, gender: Option<String>) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_birth_year(mut self, birth_year: Option<i32>) -> Self {
        self.birth_year = birth_year;
        self
    }

    /// 1-based calendar month of the start time
    pub fn month(&self) -> u32 {
        self.start_time.month()
    }

    /// Days since monday of the start time
    pub fn weekday(&self) -> u32 {
        self.start_time.weekday().num_days_from_monday()
    }
}

/// Which optional columns the source actually carried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ColumnPresence {
    pub trip_id: bool,
    pub user_type: bool,
    pub gender: bool,
    pub birth_year: bool,
}

/// Resolved header positions
#[derive(Debug, Clone)]
struct ColumnIndex {
    trip_id: Option<usize>,
    start_time: usize,
    end_time: usize,
    trip_duration: usize,
    start_station: usize,
    end_station: usize,
    user_type: Option<usize>,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(city: &str, headers: &StringRecord) -> Result<Self> {
        let normalized: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |name: &str| {
            let name = name.to_lowercase();
            normalized.iter().position(|h| *h == name)
        };
        let require = |name: &str| find(name).ok_or_else(|| missing_column(city, name));

        Ok(Self {
            trip_id: TRIP_ID_HEADERS
                .iter()
                .find_map(|&name| find(name))
                .or_else(|| normalized.first().filter(|h| h.is_empty()).map(|_| 0)),
            start_time: require(START_TIME)?,
            end_time: require(END_TIME)?,
            trip_duration: require(TRIP_DURATION)?,
            start_station: require(START_STATION)?,
            end_station: require(END_STATION)?,
            user_type: find(USER_TYPE),
            gender: find(GENDER),
            birth_year: find(BIRTH_YEAR),
        })
    }

    fn presence(&self) -> ColumnPresence {
        ColumnPresence {
            trip_id: self.trip_id.is_some(),
            user_type: self.user_type.is_some(),
            gender: self.gender.is_some(),
            birth_year: self.birth_year.is_some(),
        }
    }
}

/// Parser for the bike-share trip CSV layout
pub struct TripParser {
    city: String,
}

impl TripParser {
    /// Create a parser; `city` only labels error messages
    pub fn new(city: &str) -> Self {
        Self {
            city: city.to_string(),
        }
    }

    /// Parse every row of a CSV source into trip records
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<(Vec<TripRecord>, ColumnPresence)> {
        let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = rdr.headers().map_err(|e| self.csv_error(e))?.clone();
        let columns = ColumnIndex::from_headers(&self.city, &headers)?;
        let presence = columns.presence();

        if !presence.gender {
            debug!("{} data has no {} column, leaving it unset", self.city, GENDER);
        }
        if !presence.birth_year {
            debug!("{} data has no {} column, leaving it unset", self.city, BIRTH_YEAR);
        }
        if !presence.trip_id {
            debug!("{} data has no trip id column, numbering rows", self.city);
        }

        let mut records = Vec::new();
        for (row_index, result) in rdr.records().enumerate() {
            let row = result.map_err(|e| self.csv_error(e))?;
            records.push(self.parse_row(&row, row_index as u64, &columns)?);
        }

        Ok((records, presence))
    }

    fn parse_row(&self, row: &StringRecord, row_index: u64, columns: &ColumnIndex) -> Result<TripRecord> {
        let line = row.position().map(|p| p.line());

        let trip_id = match columns.trip_id {
            Some(idx) => {
                let raw = field(row, idx);
                raw.parse::<u64>().unwrap_or_else(|_| {
                    warn!(
                        "{} trip id '{}' at line {:?} is not a number, using row index {}",
                        self.city, raw, line, row_index
                    );
                    row_index
                })
            }
            None => row_index,
        };

        let start_time = self.parse_timestamp(field(row, columns.start_time), START_TIME, line)?;
        let end_time = self.parse_timestamp(field(row, columns.end_time), END_TIME, line)?;
        let start_station = self.required_text(field(row, columns.start_station), START_STATION, line)?;
        let end_station = self.required_text(field(row, columns.end_station), END_STATION, line)?;

        let raw_duration = field(row, columns.trip_duration);
        let trip_duration = raw_duration
            .parse::<f64>()
            .ok()
            .filter(|d| d.is_finite() && *d >= 0.0)
            .ok_or_else(|| invalid_value(&self.city, TRIP_DURATION, line, raw_duration))?;

        if end_time < start_time {
            warn!(
                "{} trip {} ends before it starts ({} < {})",
                self.city, trip_id, end_time, start_time
            );
        }

        let birth_year = match columns.birth_year {
            Some(idx) => self.parse_birth_year(field(row, idx), line),
            None => None,
        };

        Ok(TripRecord::new(
            trip_id,
            start_time,
            end_time,
            start_station,
            end_station,
            trip_duration,
        )
        .with_user_type(columns.user_type.and_then(|idx| optional_text(row, idx)))
        .with_gender(columns.gender.and_then(|idx| optional_text(row, idx)))
        .with_birth_year(birth_year))
    }

    /// Parse a timestamp with or without fractional seconds
    fn parse_timestamp(&self, raw: &str, column: &str, line: Option<u64>) -> Result<NaiveDateTime> {
        for format in TIMESTAMP_FORMATS {
            if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
                return Ok(ts);
            }
        }

        Err(invalid_value(&self.city, column, line, raw))
    }

    /// Birth years are often stored as floats (`1992.0`). Values that are not
    /// a whole year are left unset.
    fn parse_birth_year(&self, raw: &str, line: Option<u64>) -> Option<i32> {
        if raw.is_empty() {
            return None;
        }

        let year = raw
            .parse::<f64>()
            .ok()
            .filter(|y| y.is_finite() && y.fract() == 0.0 && *y >= 0.0 && *y <= i32::MAX as f64)
            .map(|y| y as i32);

        if year.is_none() {
            warn!(
                "{} {} '{}' at line {:?} is not a year, leaving it unset",
                self.city, BIRTH_YEAR, raw, line
            );
        }
        year
    }

    fn required_text(&self, raw: &str, column: &str, line: Option<u64>) -> Result<String> {
        if raw.is_empty() {
            return Err(BikeshareError::MalformedData {
                city: self.city.clone(),
                column: column.to_string(),
                line,
                message: "value is empty".to_string(),
            });
        }
        Ok(raw.to_string())
    }

    fn csv_error(&self, source: csv::Error) -> BikeshareError {
        BikeshareError::Csv {
            city: self.city.clone(),
            source,
        }
    }
}

fn field(row: &StringRecord, idx: usize) -> &str {
    row.get(idx).unwrap_or("").trim()
}

fn optional_text(row: &StringRecord, idx: usize) -> Option<String> {
    let value = field(row, idx);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
