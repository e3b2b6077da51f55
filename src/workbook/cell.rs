//! Cell value resolution

use crate::error::{LifeExpectancyError, Result};

/// Cell type attribute marking a shared string reference
pub const SHARED_STRING_TYPE: &str = "s";

/// Resolved value of one worksheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Text taken from the shared string table
    Text(String),
    /// Numeric cell
    Number(f64),
    /// Cell without a value element
    Absent,
}

impl CellValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Column letters of a cell address, e.g. `"B14"` -> `"B"`
pub fn column_of(address: &str) -> &str {
    address.trim_end_matches(|c: char| c.is_ascii_digit())
}

/// Parse a finite number; `NaN`, `inf` and overflowing literals are rejected
pub(crate) fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// A `<c>` element as read from the worksheet, before resolution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCell {
    /// Address from the `r` attribute
    pub address: String,
    /// Type from the `t` attribute
    pub cell_type: Option<String>,
    /// Text of the `<v>` child, `None` when there is no value element
    pub value: Option<String>,
}

impl RawCell {
    pub fn column(&self) -> &str {
        column_of(&self.address)
    }

    /// Resolve against the shared string table
    pub fn resolve(&self, shared_strings: &[String]) -> Result<CellValue> {
        let Some(raw) = self.value.as_deref() else {
            return Ok(CellValue::Absent);
        };

        if self.cell_type.as_deref() == Some(SHARED_STRING_TYPE) {
            let index: usize = raw.trim().parse().map_err(|_| self.invalid(raw))?;
            return shared_strings
                .get(index)
                .map(|text| CellValue::Text(text.clone()))
                .ok_or_else(|| LifeExpectancyError::SharedStringIndexOutOfBounds {
                    cell: self.address.clone(),
                    index,
                    len: shared_strings.len(),
                });
        }

        parse_finite(raw)
            .map(CellValue::Number)
            .ok_or_else(|| self.invalid(raw))
    }

    fn invalid(&self, raw: &str) -> LifeExpectancyError {
        LifeExpectancyError::InvalidCellValue {
            cell: self.address.clone(),
            raw: raw.to_string(),
        }
    }
}
