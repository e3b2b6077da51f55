//! In-memory XLSX fixtures for unit tests

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::workbook::{SHARED_STRINGS_PART, WORKSHEET_PART};

/// Zip the given `(part name, content)` pairs
pub(crate) fn xlsx_bytes(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (name, content) in parts {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Wrap row elements in a worksheet document
pub(crate) fn sheet_xml(rows: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><dimension ref="A1:D200"/><sheetData>{rows}</sheetData><pageMargins left="0.7" right="0.7"/></worksheet>"#
    )
}

/// Shared string table with one plain item per string
pub(crate) fn shared_strings_xml(items: &[&str]) -> String {
    let items: String = items
        .iter()
        .map(|item| format!(r#"<si><t xml:space="preserve">{item}</t></si>"#))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">{items}</sst>"#
    )
}

fn data_row(row: u32, label_index: usize, total: f64, male: f64, female: f64) -> String {
    format!(
        r#"<row r="{row}"><c r="A{row}" t="s"><v>{label_index}</v></c><c r="B{row}"><v>{total}</v></c><c r="C{row}"><v>{male}</v></c><c r="D{row}"><v>{female}</v></c></row>"#
    )
}

fn header_row() -> String {
    r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c><c r="C1" t="s"><v>2</v></c><c r="D1" t="s"><v>3</v></c></row>"#
        .to_string()
}

/// Header plus a single row: age "0", 80.5 / 78.1 / 82.9
pub(crate) fn minimal_workbook() -> Vec<u8> {
    let strings = shared_strings_xml(&["Age", "Total", "Male", "Female", "0"]);
    let sheet = sheet_xml(&format!("{}{}", header_row(), data_row(2, 4, 80.5, 78.1, 82.9)));
    xlsx_bytes(&[(SHARED_STRINGS_PART, strings.as_str()), (WORKSHEET_PART, sheet.as_str())])
}

/// Ages 0, 1, 2, 3, 50 and "100 and over", with a rich-text label, a blank
/// separator row and a numeric-only row in between
pub(crate) fn sample_workbook() -> Vec<u8> {
    let strings = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="10" uniqueCount="10">
<si><t>Age</t></si><si><t>Total</t></si><si><t>Male</t></si><si><t>Female</t></si>
<si><t>0</t></si><si><t>1</t></si><si><t>2</t></si>
<si><r><rPr><b/></rPr><t>3</t></r><r><t xml:space="preserve"> years</t></r></si>
<si><t>50</t></si><si><t>100 and over</t></si>
</sst>"#;

    let rows = [
        header_row(),
        data_row(2, 4, 80.5, 78.1, 82.9),
        data_row(3, 5, 79.8, 77.4, 82.1),
        data_row(4, 6, 78.8, 76.4, 81.1),
        data_row(5, 7, 77.8, 75.6, 80.1),
        r#"<row r="6"/>"#.to_string(),
        r#"<row r="7"><c r="A7"><v>7</v></c><c r="B7"><v>1.0</v></c></row>"#.to_string(),
        data_row(8, 8, 32.1, 30.2, 34.0),
        data_row(9, 9, 2.2, 2.0, 2.4),
    ]
    .concat();

    xlsx_bytes(&[
        ("[Content_Types].xml", r#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#),
        (SHARED_STRINGS_PART, strings),
        (WORKSHEET_PART, sheet_xml(&rows).as_str()),
    ])
}
