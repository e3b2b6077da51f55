//! Life table rows and the gender dimension

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LifeExpectancyError;

/// Residual life expectancy at one age
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifeExpectancyEntry {
    pub age: u32,
    /// Both sexes combined
    pub total: f64,
    pub male: f64,
    pub female: f64,
}

impl LifeExpectancyEntry {
    /// Expectancy column for the given gender
    pub fn for_gender(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
            Gender::Total => self.total,
        }
    }
}

/// Gender column of the life table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    /// Both sexes combined
    Total,
}

impl Gender {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Total => "total",
        }
    }

    /// Parse a gender allowing the short forms `m`, `f` and `all`
    pub fn from_alias(value: &str) -> Result<Self, LifeExpectancyError> {
        match value.trim().to_lowercase().as_str() {
            "m" => Ok(Gender::Male),
            "f" => Ok(Gender::Female),
            "all" => Ok(Gender::Total),
            _ => value.trim().parse(),
        }
    }
}

impl FromStr for Gender {
    type Err = LifeExpectancyError;

    /// Case-insensitive match on `male`, `female` or `total`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "total" => Ok(Gender::Total),
            _ => Err(LifeExpectancyError::InvalidGender(s.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
