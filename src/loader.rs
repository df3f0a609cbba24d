//! Loading city datasets into immutable, filterable trip tables

use crate::error::{BikeshareError, Result};
use crate::filters::{City, Filter, Selection};
use crate::parsers::{ColumnPresence, TripParser, TripRecord};
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// The trips of one city, optionally narrowed by a month/day filter.
///
/// A table is never mutated after construction; filtering produces a new
/// table and leaves the source untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct TripTable {
    city: City,
    filter: Filter,
    columns: ColumnPresence,
    records: Vec<TripRecord>,
}

impl TripTable {
    /// Build an unfiltered table from already parsed records
    pub fn new(city: City, columns: ColumnPresence, records: Vec<TripRecord>) -> Self {
        Self {
            city,
            filter: Filter::default(),
            columns,
            records,
        }
    }

    /// Build a table with every optional column marked present
    pub fn from_records(city: City, records: Vec<TripRecord>) -> Self {
        let columns = ColumnPresence {
            trip_id: true,
            user_type: true,
            gender: true,
            birth_year: true,
        };
        Self::new(city, columns, records)
    }

    pub fn city(&self) -> City {
        self.city
    }

    /// Filter that produced this table
    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn columns(&self) -> ColumnPresence {
        self.columns
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripRecord> {
        self.records.iter()
    }

    /// Keep only trips starting in `month` (`None` keeps everything)
    pub fn filter_month(&self, month: Option<&'static str>) -> TripTable {
        let mut filter = self.filter;
        if month.is_some() {
            filter.month = month;
        }
        self.retain(filter, |record| month.map_or(true, |m| record.month_name == m))
    }

    /// Keep only trips starting on `day` (`None` keeps everything)
    pub fn filter_day(&self, day: Option<&'static str>) -> TripTable {
        let mut filter = self.filter;
        if day.is_some() {
            filter.day = day;
        }
        self.retain(filter, |record| day.map_or(true, |d| record.day_name == d))
    }

    /// Apply both constraints of a filter; they compose by logical AND
    pub fn apply(&self, filter: &Filter) -> TripTable {
        let filtered = self.filter_month(filter.month).filter_day(filter.day);
        debug!(
            "Filter ({}) retained {} of {} {} trips",
            filter,
            filtered.len(),
            self.len(),
            self.city
        );
        filtered
    }

    fn retain<F>(&self, filter: Filter, keep: F) -> TripTable
    where
        F: Fn(&TripRecord) -> bool,
    {
        TripTable {
            city: self.city,
            filter,
            columns: self.columns,
            records: self.records.iter().filter(|r| keep(*r)).cloned().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TripTable {
    type Item = &'a TripRecord;
    type IntoIter = std::slice::Iter<'a, TripRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Loads city datasets from a data directory
pub struct TripLoader {
    data_dir: PathBuf,
}

impl TripLoader {
    /// Create a loader reading `<data_dir>/<city file>.csv`
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the backing file for a city
    pub fn data_path(&self, city: City) -> PathBuf {
        self.data_dir.join(city.data_file())
    }

    /// Load a city by name and filter it by month and day names (or `"all"`)
    pub fn load(&self, city: &str, month: &str, day: &str) -> Result<TripTable> {
        let city: City = city.parse()?;
        let filter = Filter::parse(month, day)?;
        self.load_selection(&Selection::new(city, filter))
    }

    /// Load and filter a validated selection
    pub fn load_selection(&self, selection: &Selection) -> Result<TripTable> {
        let table = self.load_city(selection.city)?;
        if selection.filter.is_unfiltered() {
            return Ok(table);
        }
        Ok(table.apply(&selection.filter))
    }

    /// Load every trip of a city without filtering
    pub fn load_city(&self, city: City) -> Result<TripTable> {
        let path = self.data_path(city);
        debug!("Reading {} trips from {}", city, path.display());

        let file = File::open(&path).map_err(|source| BikeshareError::DataSource {
            city: city.name().to_string(),
            path: path.clone(),
            source,
        })?;

        let table = load_from_reader(city, BufReader::new(file))?;
        info!("Loaded {} trips for {}", table.len(), city);
        Ok(table)
    }
}

/// Parse a CSV source for `city` into an unfiltered table
pub fn load_from_reader<R: Read>(city: City, reader: R) -> Result<TripTable> {
    let parser = TripParser::new(city.name());
    let (records, columns) = parser.parse_reader(reader)?;
    Ok(TripTable::new(city, columns, records))
}
