//! Shared string table (`xl/sharedStrings.xml`)

use log::debug;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{LifeExpectancyError, Result};

/// Parse the shared string table
///
/// Returns one string per `<si>` item, in document order. Rich-text items are
/// split into runs (`<r><t>..</t></r>`); all `<t>` texts of one item are
/// concatenated. A missing part yields an empty table.
pub fn parse_shared_strings(xml: Option<&[u8]>, part: &str) -> Result<Vec<String>> {
    let Some(xml) = xml else {
        debug!("No shared string part {part}, using an empty table");
        return Ok(Vec::new());
    };

    let xml_err = |source| LifeExpectancyError::Xml {
        part: part.to_string(),
        source,
    };

    let mut reader = Reader::from_reader(xml);
    reader.trim_text(false);

    let mut strings = Vec::new();
    let mut buf = Vec::new();
    let mut current = String::new();
    let mut in_si = false;
    let mut in_t = false;

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => {
                    in_si = true;
                    current.clear();
                }
                b"t" if in_si => in_t = true,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Event::End(e) => match e.local_name().as_ref() {
                b"si" => {
                    strings.push(std::mem::take(&mut current));
                    in_si = false;
                }
                b"t" => in_t = false,
                _ => {}
            },
            Event::Text(e) if in_t => current.push_str(&e.unescape().map_err(xml_err)?),
            Event::CData(e) if in_t => current.push_str(&String::from_utf8_lossy(&e.into_inner())),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    debug!("Parsed {} shared strings from {part}", strings.len());
    Ok(strings)
}
