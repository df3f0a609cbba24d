//! Deterministic "most frequent value" computation

use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

/// The most frequent value of a column and how often it occurred
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeStat<T> {
    pub value: T,
    pub count: usize,
}

impl<T> ModeStat<T> {
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ModeStat<U> {
        ModeStat {
            value: f(self.value),
            count: self.count,
        }
    }
}

/// Count occurrences of each value
pub fn frequencies<T, I>(values: I) -> HashMap<T, usize>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut counts = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// Most frequent value, or `None` for an empty input.
///
/// Ties go to the smallest value in `Ord` order, so the result never depends
/// on row order or hash iteration order.
pub fn mode<T, I>(values: I) -> Option<ModeStat<T>>
where
    T: Eq + Hash + Ord,
    I: IntoIterator<Item = T>,
{
    frequencies(values)
        .into_iter()
        .max_by(|(a_value, a_count), (b_value, b_count)| {
            a_count.cmp(b_count).then_with(|| b_value.cmp(a_value))
        })
        .map(|(value, count)| ModeStat { value, count })
}
