//! Upload decoders turning raw bytes into [`RawRecord`]s.
//!
//! CSV uploads are read with a flexible reader: short rows simply omit their
//! trailing fields and cells beyond the header are dropped. JSON uploads must be
//! a single top-level array; its elements are passed through untouched so that
//! non-object entries fail validation at their own index.

use super::record::{RawRecord, RawValue};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

const UTF8_BOM: &str = "\u{feff}";

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Csv,
    Json,
}

impl ImportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ImportFormat::Csv => "csv",
            ImportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures that reject the whole upload before any record is processed.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("file is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("top-level value must be a list")]
    NotAList,
}

/// Decode an upload according to `format`.
pub fn decode(format: ImportFormat, bytes: &[u8]) -> Result<Vec<RawRecord>, DecodeError> {
    match format {
        ImportFormat::Csv => decode_csv(bytes),
        ImportFormat::Json => decode_json(bytes),
    }
}

fn decode_csv(bytes: &[u8]) -> Result<Vec<RawRecord>, DecodeError> {
    let text = std::str::from_utf8(bytes)?;
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        let fields = headers
            .iter()
            .zip(row.iter())
            .map(|(header, cell)| (header.to_string(), RawValue::Text(cell.to_string())))
            .collect();
        records.push(RawRecord::Fields(fields));
    }

    Ok(records)
}

fn decode_json(bytes: &[u8]) -> Result<Vec<RawRecord>, DecodeError> {
    let text = std::str::from_utf8(bytes)?;
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

    match serde_json::from_str::<Value>(text)? {
        Value::Array(items) => Ok(items.into_iter().map(RawRecord::from).collect()),
        _ => Err(DecodeError::NotAList),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(record: &RawRecord, field: &str) -> Option<String> {
        match record.field(field) {
            Some(RawValue::Text(value)) => Some(value.clone()),
            _ => None,
        }
    }

    #[test]
    fn csv_maps_cells_to_header_names() {
        let records =
            decode(ImportFormat::Csv, b"name,description\nAlice,Engineer\n,Manager\nBob,\n")
                .expect("csv decodes");

        assert_eq!(records.len(), 3);
        assert_eq!(text(&records[0], "name").as_deref(), Some("Alice"));
        assert_eq!(text(&records[0], "description").as_deref(), Some("Engineer"));
        assert_eq!(text(&records[1], "name").as_deref(), Some(""));
        assert_eq!(text(&records[2], "description").as_deref(), Some(""));
    }

    #[test]
    fn csv_short_rows_omit_fields_and_long_rows_drop_extras() {
        let records = decode(ImportFormat::Csv, b"name,description\nAlice\nBob,Dev,extra\n")
            .expect("ragged csv decodes");

        assert_eq!(records[0].field("description"), None);
        assert_eq!(text(&records[1], "description").as_deref(), Some("Dev"));
        match &records[1] {
            RawRecord::Fields(fields) => assert_eq!(fields.len(), 2),
            other => panic!("expected fields, got {other:?}"),
        }
    }

    #[test]
    fn csv_strips_byte_order_mark_from_header() {
        let records = decode(ImportFormat::Csv, "\u{feff}name\nAlice\n".as_bytes())
            .expect("csv with bom decodes");
        assert_eq!(text(&records[0], "name").as_deref(), Some("Alice"));
    }

    #[test]
    fn csv_rejects_invalid_utf8() {
        let err = decode(ImportFormat::Csv, b"name\n\xff\xfe\n").expect_err("bad encoding");
        assert!(matches!(err, DecodeError::Encoding(_)));
    }

    #[test]
    fn json_requires_top_level_list() {
        let err = decode(ImportFormat::Json, br#"{"foo":"bar"}"#).expect_err("object rejected");
        assert!(matches!(err, DecodeError::NotAList));
        assert_eq!(err.to_string(), "top-level value must be a list");
    }

    #[test]
    fn json_passes_non_object_elements_through() {
        let records = decode(ImportFormat::Json, br#"[{"name":"a"}, 42, "x", null]"#)
            .expect("list decodes");

        assert_eq!(records.len(), 4);
        assert!(matches!(records[0], RawRecord::Fields(_)));
        assert!(matches!(records[1], RawRecord::NotAnObject(RawValue::Number(_))));
        assert!(matches!(records[3], RawRecord::NotAnObject(RawValue::Null)));
    }

    #[test]
    fn json_syntax_errors_fail_the_batch() {
        let err = decode(ImportFormat::Json, b"[{\"name\": ").expect_err("truncated json");
        assert!(matches!(err, DecodeError::Json(_)));
    }
}
