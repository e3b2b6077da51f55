//! XLSX container access
//!
//! An `.xlsx` workbook is a zip archive of SpreadsheetML parts. This module
//! opens the archive, hands out raw part bytes, and parses the two parts the
//! life table needs: the shared string table and the first worksheet.

mod cell;
mod shared_strings;
mod sheet;

pub use cell::{column_of, CellValue, RawCell, SHARED_STRING_TYPE};
pub use shared_strings::parse_shared_strings;
pub use sheet::{parse_age_label, parse_sheet_rows};

use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{LifeExpectancyError, Result};

/// Conventional path of the first worksheet inside the archive
pub const WORKSHEET_PART: &str = "xl/worksheets/sheet1.xml";

/// Conventional path of the shared string table inside the archive
pub const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// An open XLSX archive
///
/// The archive handle lives exactly as long as this value; dropping it closes
/// the underlying file on every exit path.
pub struct SpreadsheetContainer<R: Read + Seek = File> {
    archive: ZipArchive<R>,
    path: PathBuf,
}

impl SpreadsheetContainer<File> {
    /// Open the workbook at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LifeExpectancyError::ContainerNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path)?;
        Self::from_reader(file, path)
    }
}

impl<R: Read + Seek> SpreadsheetContainer<R> {
    /// Wrap any seekable source; `label` is used in error messages only
    pub fn from_reader<P: Into<PathBuf>>(reader: R, label: P) -> Result<Self> {
        let path = label.into();
        let archive = ZipArchive::new(reader).map_err(|source| {
            LifeExpectancyError::InvalidArchive {
                path: path.clone(),
                source,
            }
        })?;

        Ok(Self { archive, path })
    }

    /// Path (or label) the container was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a part's bytes, `None` when the archive has no such part
    pub fn read_part(&mut self, name: &str) -> Result<Option<Vec<u8>>> {
        let mut part = match self.archive.by_name(name) {
            Ok(part) => part,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(source) => {
                return Err(LifeExpectancyError::Archive {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let mut bytes = Vec::with_capacity(part.size() as usize);
        part.read_to_end(&mut bytes)
            .map_err(|e| LifeExpectancyError::Archive {
                path: self.path.clone(),
                source: ZipError::Io(e),
            })?;

        Ok(Some(bytes))
    }

    /// Read a part that must be present
    pub fn read_required_part(&mut self, name: &str) -> Result<Vec<u8>> {
        self.read_part(name)?
            .ok_or_else(|| LifeExpectancyError::MissingRequiredPart {
                path: self.path.clone(),
                part: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::xlsx_bytes;
    use std::io::{Cursor, Write};

    #[test]
    fn test_open_missing_file() {
        let err = SpreadsheetContainer::open("does/not/exist.xlsx").err().unwrap();
        match err {
            LifeExpectancyError::ContainerNotFound { path } => {
                assert_eq!(path, PathBuf::from("does/not/exist.xlsx"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_open_directory_is_not_a_container() {
        let dir = tempfile::tempdir().unwrap();
        let err = SpreadsheetContainer::open(dir.path()).err().unwrap();
        assert!(matches!(err, LifeExpectancyError::ContainerNotFound { .. }));
    }

    #[test]
    fn test_open_non_zip_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a zip archive").unwrap();

        let err = SpreadsheetContainer::open(file.path()).err().unwrap();
        assert!(matches!(err, LifeExpectancyError::InvalidArchive { .. }));
    }

    #[test]
    fn test_read_parts() {
        let bytes = xlsx_bytes(&[(WORKSHEET_PART, "<worksheet/>")]);
        let mut container = SpreadsheetContainer::from_reader(Cursor::new(bytes), "memory.xlsx").unwrap();

        assert_eq!(container.path(), Path::new("memory.xlsx"));
        assert_eq!(container.read_part(WORKSHEET_PART).unwrap().unwrap(), b"<worksheet/>");
        assert!(container.read_part(SHARED_STRINGS_PART).unwrap().is_none());
    }

    #[test]
    fn test_required_part_missing() {
        let bytes = xlsx_bytes(&[(SHARED_STRINGS_PART, "<sst/>")]);
        let mut container = SpreadsheetContainer::from_reader(Cursor::new(bytes), "memory.xlsx").unwrap();

        let err = container.read_required_part(WORKSHEET_PART).unwrap_err();
        match err {
            LifeExpectancyError::MissingRequiredPart { path, part } => {
                assert_eq!(path, PathBuf::from("memory.xlsx"));
                assert_eq!(part, WORKSHEET_PART);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
