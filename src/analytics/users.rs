//! Rider demographics: user types, genders and birth years

use crate::analytics::mode::{mode, ModeStat};
use crate::loader::TripTable;
use serde::Serialize;
use std::collections::BTreeMap;

/// Analyzer for user demographics
pub struct UserAnalyzer {}

impl UserAnalyzer {
    pub fn new() -> Self {
        Self {}
    }

    pub fn analyze(&self, table: &TripTable) -> UserStats {
        let columns = table.columns();

        let user_types = columns
            .user_type
            .then(|| CategoryCounts::from_values(table.iter().map(|r| r.user_type.as_deref())));
        let genders = columns
            .gender
            .then(|| CategoryCounts::from_values(table.iter().map(|r| r.gender.as_deref())));
        let birth_years = columns
            .birth_year
            .then(|| BirthYearStats::from_years(table.iter().filter_map(|r| r.birth_year)))
            .flatten();

        UserStats {
            user_types,
            genders,
            birth_years,
        }
    }
}

impl Default for UserAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Row counts per category. Rows without a value are not grouped; they are
/// only tallied in `unset`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CategoryCounts {
    pub counts: BTreeMap<String, usize>,
    pub unset: usize,
}

impl CategoryCounts {
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut result = CategoryCounts::default();
        for value in values {
            match value {
                Some(v) => *result.counts.entry(v.to_string()).or_insert(0) += 1,
                None => result.unset += 1,
            }
        }
        result
    }

    /// Number of rows that carried a value
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Earliest, most recent and most common year of birth
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    /// Ties go to the earliest year
    pub most_common: ModeStat<i32>,
}

impl BirthYearStats {
    /// `None` when no year is present
    pub fn from_years<I>(years: I) -> Option<Self>
    where
        I: IntoIterator<Item = i32>,
    {
        let years: Vec<i32> = years.into_iter().collect();
        let earliest = *years.iter().min()?;
        let most_recent = *years.iter().max()?;
        let most_common = mode(years)?;

        Some(Self {
            earliest,
            most_recent,
            most_common,
        })
    }
}

/// Results of user analysis.
///
/// `user_types` and `genders` are `None` when the city's source has no such
/// column; `birth_years` is `None` when no trip carries a birth year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub user_types: Option<CategoryCounts>,
    pub genders: Option<CategoryCounts>,
    pub birth_years: Option<BirthYearStats>,
}
