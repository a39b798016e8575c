use std::collections::HashSet;
use std::fs;

use csv::{ByteRecord, ReaderBuilder};

use super::model::Table;
use crate::error::IngestError;
use crate::logging::LogContext;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a CSV dataset from a filesystem path or an `http(s)://` URL.
///
/// Header handling:
/// * an empty header cell at position `i` becomes `Unnamed: i`
/// * repeated names become `name`, `name.1`, `name.2`, ...
///
/// Short rows are padded with empty fields; a row with more fields than
/// the header, or a quoted field left open at end of input, is a parse error.
pub fn load(locator: &str, log: &LogContext) -> Result<Table, IngestError> {
    let result = fetch(locator).and_then(|bytes| parse(&bytes, locator, log));

    match &result {
        Ok(table) => log::debug!(
            target: log.name(),
            "Data loaded from {locator} ({} rows, {} columns)",
            table.len(),
            table.columns.len()
        ),
        Err(e @ IngestError::Parse { .. }) => {
            log::error!(target: log.name(), "Failed to parse the csv file: {e}")
        }
        Err(e) => log::error!(
            target: log.name(),
            "Unexpected error occurred while loading the data: {e}"
        ),
    }
    result
}

fn is_url(locator: &str) -> bool {
    locator.starts_with("http://") || locator.starts_with("https://")
}

fn fetch(locator: &str) -> Result<Vec<u8>, IngestError> {
    if is_url(locator) {
        let fetch_err = |source| IngestError::Fetch {
            url: locator.to_string(),
            source,
        };
        let response = reqwest::blocking::get(locator)
            .and_then(|r| r.error_for_status())
            .map_err(fetch_err)?;
        let bytes = response.bytes().map_err(fetch_err)?;
        Ok(bytes.to_vec())
    } else {
        fs::read(locator).map_err(|e| IngestError::io(locator, e))
    }
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

fn parse(input: &[u8], locator: &str, log: &LogContext) -> Result<Table, IngestError> {
    let parse_err = |message: String| IngestError::Parse {
        locator: locator.to_string(),
        message,
    };
    let csv_err = |e: csv::Error| {
        if e.is_io_error() {
            match e.into_kind() {
                csv::ErrorKind::Io(source) => IngestError::io(locator, source),
                other => parse_err(format!("{other:?}")),
            }
        } else {
            parse_err(e.to_string())
        }
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut records = reader.byte_records();
    let mut lossy_rows = 0usize;

    let header = match records.next() {
        Some(record) => record.map_err(csv_err)?,
        None => return Err(parse_err("no columns to parse from file".to_string())),
    };
    let columns = header_names(&decode(&header, &mut lossy_rows));

    let mut rows = Vec::new();
    let mut last_start = header.position().map(|p| (p.byte(), p.line()));
    for result in records {
        let record = result.map_err(csv_err)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        last_start = record.position().map(|p| (p.byte(), p.line()));

        if record.len() > columns.len() {
            return Err(parse_err(format!(
                "expected {} fields in line {line}, saw {}",
                columns.len(),
                record.len()
            )));
        }

        let mut fields = decode(&record, &mut lossy_rows);
        fields.resize(columns.len(), String::new());
        rows.push(fields);
    }

    // An open quote swallows everything up to EOF into the final record.
    if let Some((byte, line)) = last_start {
        let tail = input.get(byte as usize..).unwrap_or_default();
        if ends_inside_quotes(tail) {
            return Err(parse_err(format!(
                "EOF inside string starting at line {line}"
            )));
        }
    }

    if lossy_rows > 0 {
        log::warn!(
            target: log.name(),
            "{lossy_rows} row(s) in {locator} contained invalid UTF-8 and were decoded lossily"
        );
    }

    Ok(Table::new(columns, rows))
}

/// Whether a quoted field in `record` is still open at the end of the input.
///
/// Quotes only open a field at its first byte; `""` inside a quoted field is
/// an escaped quote.
fn ends_inside_quotes(record: &[u8]) -> bool {
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut bytes = record.iter().peekable();

    while let Some(&b) = bytes.next() {
        if in_quotes {
            if b == b'"' {
                if bytes.peek() == Some(&&b'"') {
                    bytes.next();
                } else {
                    in_quotes = false;
                }
            }
            continue;
        }
        match b {
            b'"' if at_field_start => {
                in_quotes = true;
                at_field_start = false;
            }
            b',' | b'\n' | b'\r' => at_field_start = true,
            _ => at_field_start = false,
        }
    }
    in_quotes
}

/// Decode a byte record field by field, counting records that needed lossy decoding.
fn decode(record: &ByteRecord, lossy_rows: &mut usize) -> Vec<String> {
    let mut lossy = false;
    let fields = record
        .iter()
        .map(|raw| match std::str::from_utf8(raw) {
            Ok(s) => s.to_string(),
            Err(_) => {
                lossy = true;
                String::from_utf8_lossy(raw).into_owned()
            }
        })
        .collect();
    if lossy {
        *lossy_rows += 1;
    }
    fields
}

/// Name empty header cells `Unnamed: i` and suffix duplicates with `.n`.
fn header_names(raw: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(raw.len());

    for (i, cell) in raw.iter().enumerate() {
        let base = if cell.is_empty() {
            format!("Unnamed: {i}")
        } else {
            cell.clone()
        };

        let mut name = base.clone();
        let mut n = 1;
        while seen.contains(&name) {
            name = format!("{base}.{n}");
            n += 1;
        }
        seen.insert(name.clone());
        names.push(name);
    }
    names
}
