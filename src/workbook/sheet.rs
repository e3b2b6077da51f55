//! Worksheet row parsing
//!
//! Expected layout: row 1 is a header and is ignored. Every later row holds an
//! age label in column A and the total, male and female residual expectancy in
//! columns B, C and D.

use std::collections::{BTreeMap, HashMap};

use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::cell::{parse_finite, CellValue, RawCell};
use crate::error::{LifeExpectancyError, Result};
use crate::table::LifeExpectancyEntry;

const AGE_COLUMN: &str = "A";
const TOTAL_COLUMN: &str = "B";
const MALE_COLUMN: &str = "C";
const FEMALE_COLUMN: &str = "D";

/// Extract the age from a label such as `"57"` or `"100 and over"`
///
/// The first run of ASCII digits wins. Returns `None` when the label has no
/// digits or the run does not fit in a `u32`.
pub fn parse_age_label(label: &str) -> Option<u32> {
    let start = label.find(|c: char| c.is_ascii_digit())?;
    let rest = &label[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

/// Cells collected for one data row
struct RowFields {
    address: String,
    values: HashMap<String, CellValue>,
}

impl RowFields {
    fn new(address: String) -> Self {
        Self {
            address,
            values: HashMap::new(),
        }
    }

    /// Build the entry for this row, `None` when column A is not an age label
    fn into_entry(self) -> Result<Option<LifeExpectancyEntry>> {
        let label = match self.values.get(AGE_COLUMN).and_then(CellValue::as_text) {
            Some(label) => label,
            None => {
                debug!("Skipping row {}: column A holds no age label", self.address);
                return Ok(None);
            }
        };

        let age = parse_age_label(label).ok_or_else(|| LifeExpectancyError::MalformedAgeLabel {
            row: self.address.clone(),
            label: label.to_string(),
        })?;

        Ok(Some(LifeExpectancyEntry {
            age,
            total: self.number(TOTAL_COLUMN)?,
            male: self.number(MALE_COLUMN)?,
            female: self.number(FEMALE_COLUMN)?,
        }))
    }

    /// Numeric value of a column; missing columns count as 0.0
    fn number(&self, column: &str) -> Result<f64> {
        match self.values.get(column) {
            None | Some(CellValue::Absent) => Ok(0.0),
            Some(CellValue::Number(value)) => Ok(*value),
            Some(CellValue::Text(text)) => {
                parse_finite(text).ok_or_else(|| LifeExpectancyError::InvalidCellValue {
                    cell: self.address.clone(),
                    raw: text.clone(),
                })
            }
        }
    }
}

/// Read an attribute by local name
fn attribute(e: &BytesStart, name: &[u8], part: &str) -> Result<Option<String>> {
    let xml_err = |source: quick_xml::Error| LifeExpectancyError::Xml {
        part: part.to_string(),
        source,
    };

    for attr in e.attributes() {
        let attr = attr.map_err(|err| xml_err(err.into()))?;
        if attr.key.local_name().as_ref() == name {
            let value = attr.unescape_value().map_err(xml_err)?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Parse the worksheet rows into entries keyed by age
///
/// Rows whose column A is missing or numeric are skipped (footnotes, blank
/// separators). When two rows carry the same age the later one wins.
pub fn parse_sheet_rows(
    xml: &[u8],
    part: &str,
    shared_strings: &[String],
) -> Result<BTreeMap<u32, LifeExpectancyEntry>> {
    let xml_err = |source| LifeExpectancyError::Xml {
        part: part.to_string(),
        source,
    };

    let mut reader = Reader::from_reader(xml);
    reader.trim_text(false);

    let mut entries = BTreeMap::new();
    let mut buf = Vec::new();

    let mut in_sheet_data = false;
    let mut rows_seen = 0usize;
    let mut row: Option<RowFields> = None;
    let mut cell: Option<RawCell> = None;
    let mut in_value = false;

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"sheetData" => in_sheet_data = true,
                b"row" if in_sheet_data => {
                    rows_seen += 1;
                    // First row is the header
                    if rows_seen > 1 {
                        let address = attribute(&e, b"r", part)?.unwrap_or_else(|| rows_seen.to_string());
                        row = Some(RowFields::new(address));
                    }
                }
                b"c" if row.is_some() => {
                    cell = Some(RawCell {
                        address: attribute(&e, b"r", part)?.unwrap_or_default(),
                        cell_type: attribute(&e, b"t", part)?,
                        value: None,
                    });
                }
                b"v" => {
                    if let Some(cell) = cell.as_mut() {
                        cell.value = Some(String::new());
                        in_value = true;
                    }
                }
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"row" if in_sheet_data => rows_seen += 1,
                b"v" => {
                    if let Some(cell) = cell.as_mut() {
                        cell.value = Some(String::new());
                    }
                }
                _ => {}
            },
            Event::Text(e) if in_value => {
                if let Some(value) = cell.as_mut().and_then(|c| c.value.as_mut()) {
                    value.push_str(&e.unescape().map_err(xml_err)?);
                }
            }
            Event::CData(e) if in_value => {
                if let Some(value) = cell.as_mut().and_then(|c| c.value.as_mut()) {
                    value.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"sheetData" => in_sheet_data = false,
                b"v" => in_value = false,
                b"c" => {
                    if let (Some(raw), Some(fields)) = (cell.take(), row.as_mut()) {
                        let value = raw.resolve(shared_strings)?;
                        if !value.is_absent() {
                            fields.values.insert(raw.column().to_string(), value);
                        }
                    }
                }
                b"row" => {
                    if let Some(entry) = row.take().map(RowFields::into_entry).transpose()?.flatten() {
                        if let Some(previous) = entries.insert(entry.age, entry) {
                            debug!("Age {} appears more than once, later row replaces {:?}", previous.age, previous);
                        }
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    debug!("Parsed {} entries from {} rows in {part}", entries.len(), rows_seen);
    Ok(entries)
}
