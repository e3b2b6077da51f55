//! Residual life expectancy for one person

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entry::Gender;
use super::life_table::LifeExpectancyTable;
use crate::error::{LifeExpectancyError, Result};

/// Outcome of a residual life expectancy query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeExpectancyResult {
    /// Normalized lowercase gender name
    pub gender: String,
    pub reference_year: i32,
    pub age_in_reference_year: u32,
    pub remaining_years: f64,
    /// Smallest whole number of years >= `remaining_years`
    pub remaining_years_ceiling: i64,
}

/// Remaining years of life for someone born on `birthdate`
///
/// Age is taken as of the table's reference year (see
/// [`LifeExpectancyTable::age_as_of`]); the rounded figure always rounds up,
/// so 19.01 years reports as 20.
pub fn compute_residual_life_expectancy(
    table: &LifeExpectancyTable,
    birthdate: NaiveDate,
    gender: &str,
    reference_date: Option<NaiveDate>,
) -> Result<LifeExpectancyResult> {
    let gender: Gender = gender.parse()?;
    let age_in_reference_year = table.age_as_of(birthdate, reference_date);
    let remaining_years = table.expectancy(age_in_reference_year, gender)?;

    Ok(LifeExpectancyResult {
        gender: gender.as_str().to_string(),
        reference_year: table.reference_year(),
        age_in_reference_year,
        remaining_years,
        remaining_years_ceiling: ceil_years(remaining_years),
    })
}

/// Round a number of years up to the next whole year
pub fn ceil_years(years: f64) -> i64 {
    years.ceil() as i64
}

/// Reject birthdates after `today`
pub fn ensure_birthdate_not_in_future(birthdate: NaiveDate, today: NaiveDate) -> Result<()> {
    if birthdate > today {
        return Err(LifeExpectancyError::BirthdateInFuture { birthdate, today });
    }
    Ok(())
}
