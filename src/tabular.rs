//! CSV uploads and templates.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{info, warn};

use crate::constants::{DIETARY_CSV_COLUMNS, HEALTH_CSV_COLUMNS, WORKOUT_CSV_COLUMNS};
use crate::error::{ClientError, Result};
use crate::samples;
use crate::types::{RawTabularRow, RecordKind};

/// Template column order for a table kind.
pub fn columns(kind: RecordKind) -> &'static [&'static str] {
    match kind {
        RecordKind::Health => HEALTH_CSV_COLUMNS,
        RecordKind::Dietary => DIETARY_CSV_COLUMNS,
        RecordKind::Workout => WORKOUT_CSV_COLUMNS,
    }
}

fn required_columns(kind: RecordKind) -> &'static [&'static str] {
    match kind {
        RecordKind::Health => HEALTH_CSV_COLUMNS,
        RecordKind::Dietary | RecordKind::Workout => &["date"],
    }
}

/// Read an uploaded CSV file into raw rows.
pub fn load_rows(path: &Path, kind: RecordKind) -> Result<Vec<RawTabularRow>> {
    let file = File::open(path)?;
    let rows = read_rows(file, kind)?;
    info!("Loaded {} {} row(s) from {}", rows.len(), kind, path.display());
    Ok(rows)
}

/// Read CSV from any reader. Headers are matched case-insensitively and
/// blank cells are treated as missing. Malformed lines are skipped.
pub fn read_rows<R: Read>(reader: R, kind: RecordKind) -> Result<Vec<RawTabularRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    for required in required_columns(kind) {
        if !headers.iter().any(|h| h == required) {
            return Err(ClientError::MissingColumn(required.to_string()));
        }
    }

    let mut rows = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping malformed CSV line {}: {}", line + 2, e);
                continue;
            }
        };

        let mut cells: BTreeMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(header, cell)| (header.clone(), cell.to_string()))
            .collect();

        let date = cells.remove("date").unwrap_or_default();
        let row = match kind {
            RecordKind::Health => RawTabularRow::Labeled {
                date,
                metric: cells.remove("metric").unwrap_or_default(),
                value: cells.remove("value").unwrap_or_default(),
            },
            RecordKind::Dietary | RecordKind::Workout => RawTabularRow::Named { date, fields: cells },
        };
        rows.push(row);
    }

    Ok(rows)
}

/// Write `rows` as CSV using the column layout of `kind`.
pub fn write_rows<W: Write>(writer: W, kind: RecordKind, rows: &[RawTabularRow]) -> Result<()> {
    let columns = columns(kind);
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(columns)?;
    for row in rows {
        let record: Vec<&str> = columns
            .iter()
            .map(|column| match *column {
                "date" => row.date(),
                other => row.field(other).unwrap_or(""),
            })
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the example table for `kind`.
pub fn write_template<W: Write>(writer: W, kind: RecordKind) -> Result<()> {
    write_rows(writer, kind, &samples::template_rows(kind))
}
