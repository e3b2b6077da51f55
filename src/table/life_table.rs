//! Age-indexed life expectancy table

use std::collections::BTreeMap;

use chrono::{Datelike, Local, NaiveDate};

use super::entry::{Gender, LifeExpectancyEntry};
use crate::error::{LifeExpectancyError, Result};

/// Reference year used when none is configured
pub const DEFAULT_REFERENCE_YEAR: i32 = 2023;

/// Immutable life table keyed by age
///
/// Ages outside the table are clamped to the nearest tabulated age: younger
/// ages read the youngest row, older ages read the oldest (open-ended) row.
#[derive(Debug, Clone, PartialEq)]
pub struct LifeExpectancyTable {
    entries: BTreeMap<u32, LifeExpectancyEntry>,
    reference_year: i32,
    min_age: u32,
    max_age: u32,
}

impl LifeExpectancyTable {
    /// Build from a list of entries; later entries replace earlier ones with the same age
    pub fn new<I>(entries: I, reference_year: i32) -> Result<Self>
    where
        I: IntoIterator<Item = LifeExpectancyEntry>,
    {
        let map = entries.into_iter().map(|entry| (entry.age, entry)).collect();
        Self::from_map(map, reference_year)
    }

    /// Build from entries already keyed by age
    pub fn from_map(entries: BTreeMap<u32, LifeExpectancyEntry>, reference_year: i32) -> Result<Self> {
        let (min_age, max_age) = match (entries.keys().next(), entries.keys().next_back()) {
            (Some(&min), Some(&max)) => (min, max),
            _ => return Err(LifeExpectancyError::EmptyTable),
        };

        Ok(Self {
            entries,
            reference_year,
            min_age,
            max_age,
        })
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// Youngest tabulated age
    pub fn min_age(&self) -> u32 {
        self.min_age
    }

    /// Oldest tabulated age
    pub fn max_age(&self) -> u32 {
        self.max_age
    }

    /// `(min_age, max_age)`
    pub fn age_bounds(&self) -> (u32, u32) {
        (self.min_age, self.max_age)
    }

    /// Number of tabulated ages
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false, construction rejects empty tables
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for an exact age, without clamping
    pub fn get(&self, age: u32) -> Option<&LifeExpectancyEntry> {
        self.entries.get(&age)
    }

    /// All entries in ascending age order
    pub fn entries(&self) -> impl Iterator<Item = &LifeExpectancyEntry> {
        self.entries.values()
    }

    /// Age reached in the reference year
    ///
    /// The comparison date is the month/day of `reference_date` (today when
    /// `None`) placed in the table's reference year. One year is subtracted
    /// when the birthday falls later in the calendar year; the result never
    /// goes below zero.
    pub fn age_as_of(&self, birthdate: NaiveDate, reference_date: Option<NaiveDate>) -> u32 {
        let reference_date = reference_date.unwrap_or_else(|| Local::now().date_naive());

        let mut years = i64::from(self.reference_year) - i64::from(birthdate.year());
        if (birthdate.month(), birthdate.day()) > (reference_date.month(), reference_date.day()) {
            years -= 1;
        }

        years.max(0) as u32
    }

    /// Residual life expectancy at `age` for a gender name (`male`, `female`, `total`)
    pub fn get_expectancy(&self, age: u32, gender: &str) -> Result<f64> {
        self.expectancy(age, gender.parse()?)
    }

    /// Residual life expectancy at `age`, clamping to the tabulated age range
    pub fn expectancy(&self, age: u32, gender: Gender) -> Result<f64> {
        let target_age = age.clamp(self.min_age, self.max_age);
        self.entries
            .get(&target_age)
            .map(|entry| entry.for_gender(gender))
            .ok_or(LifeExpectancyError::MissingAgeEntry { age: target_age })
    }
}
