//! Fixed lookup tables and the typed city/month/day selection

use crate::error::{invalid_selection, BikeshareError, Result, SelectionKind};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Sentinel accepted by the month and day choices to mean "no constraint"
pub const ALL: &str = "all";

pub const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Weekday names, monday first (matches `chrono::Weekday::num_days_from_monday`)
pub const DAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// One of the three cities with a bundled trip dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lowercase name used in prompts and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// File name of the city's dataset inside the data directory
    pub fn data_file(&self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Look a city up by name. Case, surrounding whitespace and `-`/`_`
    /// separators are ignored so `New-York-City` resolves too.
    pub fn from_name(name: &str) -> Option<City> {
        let normalized = name.trim().to_lowercase().replace(['-', '_'], " ");
        City::ALL.into_iter().find(|city| city.name() == normalized)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for City {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self> {
        City::from_name(s).ok_or_else(|| BikeshareError::UnknownCity {
            city: s.to_string(),
        })
    }
}

/// Month and day constraints. `None` stands for "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Filter {
    pub month: Option<&'static str>,
    pub day: Option<&'static str>,
}

impl Filter {
    pub fn new(month: Option<&'static str>, day: Option<&'static str>) -> Self {
        Self { month, day }
    }

    /// Parse month and day choices such as `"june"` / `"all"`
    pub fn parse(month: &str, day: &str) -> Result<Self> {
        Ok(Self {
            month: parse_month(month)?,
            day: parse_day(day)?,
        })
    }

    pub fn is_unfiltered(&self) -> bool {
        self.month.is_none() && self.day.is_none()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "month: {}, day: {}",
            self.month.unwrap_or(ALL),
            self.day.unwrap_or(ALL)
        )
    }
}

/// A complete selection for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub city: City,
    pub filter: Filter,
}

impl Selection {
    pub fn new(city: City, filter: Filter) -> Self {
        Self { city, filter }
    }
}

/// Validate a city choice entered by the user
pub fn parse_city(input: &str) -> Result<City> {
    City::from_name(input).ok_or_else(|| invalid_selection(SelectionKind::City, input.trim()))
}

/// Validate a month choice; `Ok(None)` means "all"
pub fn parse_month(input: &str) -> Result<Option<&'static str>> {
    parse_choice(input, &MONTH_NAMES, SelectionKind::Month)
}

/// Validate a weekday choice; `Ok(None)` means "all"
pub fn parse_day(input: &str) -> Result<Option<&'static str>> {
    parse_choice(input, &DAY_NAMES, SelectionKind::Day)
}

fn parse_choice(
    input: &str,
    names: &[&'static str],
    kind: SelectionKind,
) -> Result<Option<&'static str>> {
    let choice = input.trim().to_lowercase();
    if choice == ALL {
        return Ok(None);
    }

    names
        .iter()
        .find(|name| **name == choice)
        .map(|name| Some(*name))
        .ok_or_else(|| invalid_selection(kind, input.trim()))
}

/// Lowercase month name for a 1-based month number
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[((month.clamp(1, 12)) - 1) as usize]
}

/// Lowercase weekday name for a chrono weekday
pub fn day_name(weekday: chrono::Weekday) -> &'static str {
    DAY_NAMES[weekday.num_days_from_monday() as usize]
}
