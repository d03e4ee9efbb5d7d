//! Reading raw address tokens from CSV files and typed lists.

use std::io::Read;
use std::path::Path;

use addrpush::{AddrError, RawToken};
use anyhow::{Context as _, Result};
use csv::{ReaderBuilder, StringRecord, Trim};

/// Read `name,address` rows from a CSV file.
pub fn read_csv_file(path: &Path) -> Result<Vec<RawToken>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("cannot open {}", path.display()))?;
    read_csv(file).with_context(|| format!("reading {}", path.display()))
}

/// Read `name,address` rows.
///
/// - a row with only an address derives the name (`,10.1.1.1` or `10.1.1.1`)
/// - blank rows and `#` comments are skipped
/// - a leading `name,address` header is skipped
///
/// Addresses are trimmed; names are kept exactly as written so that stray
/// spaces are reported by the naming check.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<RawToken>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::None)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut tokens = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);

        if index == 0 && is_header(&record) {
            continue;
        }
        if let Some(token) = row_token(&record, line)? {
            tokens.push(token);
        }
    }
    Ok(tokens)
}

fn is_header(record: &StringRecord) -> bool {
    let field = |i| record.get(i).unwrap_or_default().trim();
    field(0).eq_ignore_ascii_case("name") && field(1).eq_ignore_ascii_case("address")
}

fn row_token(record: &StringRecord, line: u64) -> Result<Option<RawToken>, AddrError> {
    let fields: Vec<&str> = record.iter().collect();
    let used = fields.iter().rposition(|f| !f.trim().is_empty()).map_or(0, |i| i + 1);

    match used {
        0 => Ok(None),
        1 if fields.len() == 1 => Ok(Some(RawToken::new(None, fields[0]))),
        1 => Err(AddrError::Input(format!("line {line}: missing address after name"))),
        2 => Ok(Some(RawToken::new(Some(fields[0]), fields[1]))),
        n => Err(AddrError::Input(format!(
            "line {line}: expected name,address but found {n} columns"
        ))),
    }
}
