//! In-memory airport and aircraft collections backed by CSV files.
//!
//! The registries only hand out shared slices and snapshots to the planner;
//! all mutation happens here, through explicit programmatic entry points.

use std::fmt;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::planner_error::PlannerError;

pub mod aircraft;
pub mod airports;

/// A row that was present in a registry file but could not be loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

/// What happened while loading a registry file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedRow>,
    /// The file did not exist; the registry starts empty.
    pub missing_file: bool,
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.missing_file {
            return write!(f, "no existing data found");
        }
        write!(f, "{} loaded, {} skipped", self.loaded, self.skipped.len())
    }
}

/// Opens `path` for reading, mapping a missing file to `None`.
fn open_if_exists(path: &Path) -> Result<Option<File>, PlannerError> {
    match File::open(path) {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(PlannerError::from(e)),
    }
}

/// Reads every data row of a registry file into `T`.
///
/// The first row is the header. Lines starting with `/` are comments, blank lines
/// are ignored, and fields are trimmed. Rows that fail to deserialize or convert
/// are skipped and listed in the report; I/O failures abort the load.
fn read_rows<Rec, T, R>(reader: R) -> Result<(Vec<T>, LoadReport), PlannerError>
where
    Rec: DeserializeOwned + TryInto<T, Error = PlannerError>,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .comment(Some(b'/'))
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut report = LoadReport::default();

    for result in csv_reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(PlannerError::from(e)),
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                report.skipped.push(SkippedRow {
                    line,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let converted: Result<T, PlannerError> = record
            .deserialize::<Rec>(None)
            .map_err(PlannerError::from)
            .and_then(|rec: Rec| rec.try_into());

        match converted {
            Ok(row) => rows.push(row),
            Err(e) => report.skipped.push(SkippedRow {
                line,
                reason: e.to_string(),
            }),
        }
    }

    report.loaded = rows.len();
    Ok((rows, report))
}

/// Writes `header` followed by one line per row. The header is written even when there are no rows.
fn write_rows<Rec, W>(
    writer: W,
    header: &[&str],
    rows: impl IntoIterator<Item = Rec>,
) -> Result<(), PlannerError>
where
    Rec: Serialize,
    W: Write,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(header)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
