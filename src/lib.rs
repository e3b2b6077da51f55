//! Life Expectancy - residual life expectancy lookups from an actuarial life table
//!
//! This library provides:
//! - XLSX workbook loading (zip container, shared strings, worksheet rows)
//! - An immutable age-indexed life table with clamped gender lookups
//! - Residual life expectancy as of the table's reference year
//! - JSON export/import of the table and a console grid for results

pub mod error;
pub mod workbook;
pub mod table;
pub mod loader;
pub mod export;
pub mod report;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use error::{LifeExpectancyError, Result};
pub use table::{
    compute_residual_life_expectancy, Gender, LifeExpectancyEntry, LifeExpectancyResult,
    LifeExpectancyTable, DEFAULT_REFERENCE_YEAR,
};
pub use loader::{ExcelLifeExpectancyLoader, LoaderConfig, DEFAULT_WORKBOOK_PATH};
pub use export::TableExport;
pub use report::{render_grid, GridPayload};
