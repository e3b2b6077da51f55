//! Life expectancy table and residual expectancy computation

mod entry;
mod life_table;
mod residual;

pub use entry::{Gender, LifeExpectancyEntry};
pub use life_table::{LifeExpectancyTable, DEFAULT_REFERENCE_YEAR};
pub use residual::{
    ceil_years, compute_residual_life_expectancy, ensure_birthdate_not_in_future,
    LifeExpectancyResult,
};
