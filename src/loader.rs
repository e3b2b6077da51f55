//! XLSX-based life table loader
//!
//! Loads the life expectancy table from the first worksheet of an `.xlsx`
//! workbook in one pass: open archive, read shared strings and rows, close
//! archive, build the table.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;
use crate::table::{LifeExpectancyTable, DEFAULT_REFERENCE_YEAR};
use crate::workbook::{
    parse_sheet_rows, parse_shared_strings, SpreadsheetContainer, SHARED_STRINGS_PART,
    WORKSHEET_PART,
};

/// Default workbook location, relative to the working directory
pub const DEFAULT_WORKBOOK_PATH: &str = "life_expectancy.xlsx";

/// Loader settings
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    /// Year the table's statistics are anchored to
    pub reference_year: i32,
    /// Worksheet part holding the table
    pub worksheet_part: String,
    /// Shared string part (optional in the archive)
    pub shared_strings_part: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            reference_year: DEFAULT_REFERENCE_YEAR,
            worksheet_part: WORKSHEET_PART.to_string(),
            shared_strings_part: SHARED_STRINGS_PART.to_string(),
        }
    }
}

impl LoaderConfig {
    /// Default parts with a specific reference year
    pub fn with_reference_year(reference_year: i32) -> Self {
        Self {
            reference_year,
            ..Self::default()
        }
    }
}

/// Loads a [`LifeExpectancyTable`] from an `.xlsx` workbook
#[derive(Debug, Clone)]
pub struct ExcelLifeExpectancyLoader {
    workbook_path: PathBuf,
    config: LoaderConfig,
}

impl ExcelLifeExpectancyLoader {
    /// Loader with default settings
    pub fn new<P: Into<PathBuf>>(workbook_path: P) -> Self {
        Self::with_config(workbook_path, LoaderConfig::default())
    }

    pub fn with_config<P: Into<PathBuf>>(workbook_path: P, config: LoaderConfig) -> Self {
        Self {
            workbook_path: workbook_path.into(),
            config,
        }
    }

    /// Loader for the default workbook location
    pub fn load_default() -> Result<LifeExpectancyTable> {
        Self::new(DEFAULT_WORKBOOK_PATH).load()
    }

    pub fn workbook_path(&self) -> &Path {
        &self.workbook_path
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Read the workbook and build the table
    pub fn load(&self) -> Result<LifeExpectancyTable> {
        let container = SpreadsheetContainer::open(&self.workbook_path)?;
        self.load_container(container)
    }

    /// Same as [`load`](Self::load) over an in-memory or already opened source
    pub fn load_from_reader<R: Read + Seek>(&self, reader: R) -> Result<LifeExpectancyTable> {
        let container = SpreadsheetContainer::from_reader(reader, self.workbook_path.clone())?;
        self.load_container(container)
    }

    fn load_container<R: Read + Seek>(&self, mut container: SpreadsheetContainer<R>) -> Result<LifeExpectancyTable> {
        let entries = {
            let shared_strings_xml = container.read_part(&self.config.shared_strings_part)?;
            let shared_strings = parse_shared_strings(
                shared_strings_xml.as_deref(),
                &self.config.shared_strings_part,
            )?;

            let sheet_xml = container.read_required_part(&self.config.worksheet_part)?;
            parse_sheet_rows(&sheet_xml, &self.config.worksheet_part, &shared_strings)?
        };
        // Archive is closed before the table is built
        drop(container);

        let table = LifeExpectancyTable::from_map(entries, self.config.reference_year)?;
        info!(
            "Loaded {} life expectancy entries (ages {}-{}) from {}",
            table.len(),
            table.min_age(),
            table.max_age(),
            self.workbook_path.display()
        );

        Ok(table)
    }
}

/// Load a table from `path` with the default settings
pub fn load_life_table<P: AsRef<Path>>(path: P) -> Result<LifeExpectancyTable> {
    ExcelLifeExpectancyLoader::new(path.as_ref()).load()
}

/// Loader helper for callers holding an open file
pub fn load_life_table_from_file(file: File, config: LoaderConfig) -> Result<LifeExpectancyTable> {
    ExcelLifeExpectancyLoader::with_config("<file>", config).load_from_reader(file)
}
