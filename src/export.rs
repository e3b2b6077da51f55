//! JSON export of a loaded life table
//!
//! Format: `{"referenceYear": 2023, "entries": [{"age", "total", "male", "female"}, ...]}`
//! with entries sorted by ascending age.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::table::{LifeExpectancyEntry, LifeExpectancyTable};

/// Serialized form of a [`LifeExpectancyTable`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableExport {
    pub reference_year: i32,
    pub entries: Vec<LifeExpectancyEntry>,
}

impl From<&LifeExpectancyTable> for TableExport {
    fn from(table: &LifeExpectancyTable) -> Self {
        Self {
            reference_year: table.reference_year(),
            entries: table.entries().copied().collect(),
        }
    }
}

impl TryFrom<TableExport> for LifeExpectancyTable {
    type Error = crate::error::LifeExpectancyError;

    fn try_from(export: TableExport) -> Result<Self> {
        LifeExpectancyTable::new(export.entries, export.reference_year)
    }
}

/// Write the table as pretty-printed JSON
pub fn write_json<W: Write>(table: &LifeExpectancyTable, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, &TableExport::from(table))?;
    Ok(())
}

/// Write the table to `path`, creating parent directories as needed
pub fn write_json_file<P: AsRef<Path>>(table: &LifeExpectancyTable, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    write_json(table, &mut writer)?;
    writer.flush()?;

    info!("Exported {} life expectancy entries to {}", table.len(), path.display());
    Ok(())
}

/// Rebuild a table from its JSON export
pub fn read_json<R: Read>(reader: R) -> Result<LifeExpectancyTable> {
    let export: TableExport = serde_json::from_reader(reader)?;
    LifeExpectancyTable::try_from(export)
}

/// Rebuild a table from a JSON export file
pub fn read_json_file<P: AsRef<Path>>(path: P) -> Result<LifeExpectancyTable> {
    let file = File::open(path)?;
    read_json(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifeExpectancyError;
    use crate::loader::ExcelLifeExpectancyLoader;
    use crate::test_support::sample_workbook;
    use std::io::Cursor;

    fn table() -> LifeExpectancyTable {
        ExcelLifeExpectancyLoader::new("memory.xlsx")
            .load_from_reader(Cursor::new(sample_workbook()))
            .unwrap()
    }

    #[test]
    fn test_export_shape() {
        let mut buf = Vec::new();
        write_json(&table(), &mut buf).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["referenceYear"], 2023);
        let entries = value["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0]["age"], 0);
        assert_eq!(entries[0]["total"], 80.5);
        assert_eq!(entries[0]["male"], 78.1);
        assert_eq!(entries[0]["female"], 82.9);
        assert_eq!(entries[5]["age"], 100);

        let ages: Vec<u64> = entries.iter().map(|e| e["age"].as_u64().unwrap()).collect();
        assert_eq!(ages, vec![0, 1, 2, 3, 50, 100]);

        // Two-space indentation
        assert!(String::from_utf8(buf).unwrap().contains("\n  \"referenceYear\": 2023"));
    }

    #[test]
    fn test_round_trip() {
        let original = table();
        let mut buf = Vec::new();
        write_json(&original, &mut buf).unwrap();

        let restored = read_json(buf.as_slice()).unwrap();
        assert_eq!(restored, original);
        assert_eq!(
            restored.entries().copied().collect::<Vec<_>>(),
            original.entries().copied().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frontend").join("data").join("life_expectancy_2023.json");

        let original = table();
        write_json_file(&original, &path).unwrap();
        assert!(path.is_file());

        let restored = read_json_file(&path).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_unsorted_input_is_sorted_on_import() {
        let json = r#"{"referenceYear": 2020, "entries": [
            {"age": 5, "total": 70.0, "male": 68.0, "female": 72.0},
            {"age": 1, "total": 74.0, "male": 72.0, "female": 76.0}
        ]}"#;
        let table = read_json(json.as_bytes()).unwrap();
        assert_eq!(table.reference_year(), 2020);
        assert_eq!(TableExport::from(&table).entries.iter().map(|e| e.age).collect::<Vec<_>>(), vec![1, 5]);
    }

    #[test]
    fn test_import_errors() {
        let err = read_json(r#"{"referenceYear": 2023, "entries": []}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, LifeExpectancyError::EmptyTable));

        let err = read_json("not json".as_bytes()).unwrap_err();
        assert!(matches!(err, LifeExpectancyError::Json(_)));

        let err = read_json_file("missing/export.json").unwrap_err();
        assert!(matches!(err, LifeExpectancyError::Io(_)));
    }
}
