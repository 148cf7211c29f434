//! CSV loader for the daily and hourly rental datasets.

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, StringRecord, Trim};
use flate2::read::GzDecoder;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

use crate::analyzers::types::{DayRecord, HourRecord};

/// Columns the daily dataset must carry. Any other column is ignored.
pub const DAY_COLUMNS: &[&str] = &["dteday", "season", "weathersit", "cnt"];

/// Columns the hourly dataset must carry. Any other column is ignored.
pub const HOUR_COLUMNS: &[&str] = &["dteday", "hr", "cnt"];

/// Both rental datasets, loaded once and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub days: Vec<DayRecord>,
    pub hours: Vec<HourRecord>,
}

impl Dataset {
    /// Loads the daily and hourly CSV files. Either one failing aborts the load.
    #[tracing::instrument(skip_all, fields(day_path = %day_path.display(), hour_path = %hour_path.display()))]
    pub fn load(day_path: &Path, hour_path: &Path) -> Result<Self> {
        let days = load_days(day_path)?;
        let hours = load_hours(hour_path)?;
        debug!(days = days.len(), hours = hours.len(), "Datasets loaded");
        Ok(Dataset { days, hours })
    }
}

/// Opens `path`, transparently gunzipping files that end in `.gz`.
fn open(path: &Path) -> Result<Box<dyn Read>> {
    let file =
        File::open(path).with_context(|| format!("failed to open '{}'", path.display()))?;
    let reader = BufReader::new(file);

    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        Ok(Box::new(GzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}

pub fn load_days(path: &Path) -> Result<Vec<DayRecord>> {
    read_days(open(path)?, &path.display().to_string())
}

pub fn load_hours(path: &Path) -> Result<Vec<HourRecord>> {
    read_hours(open(path)?, &path.display().to_string())
}

/// Parses daily records from CSV. `source` only names the input in errors.
pub fn read_days<R: Read>(reader: R, source: &str) -> Result<Vec<DayRecord>> {
    read_records(reader, source, DAY_COLUMNS, |_| Ok(()))
}

/// Parses hourly records from CSV, rejecting any hour outside 0-23.
pub fn read_hours<R: Read>(reader: R, source: &str) -> Result<Vec<HourRecord>> {
    read_records(reader, source, HOUR_COLUMNS, |row: &HourRecord| {
        if row.hour > 23 {
            bail!("hour {} is outside 0-23", row.hour);
        }
        Ok(())
    })
}

/// Reads every record into `T`, running `check` on each one.
///
/// Errors name `source` and the physical line the record starts on, which
/// differs from the record index once a quoted field spans several lines.
fn read_records<R, T, F>(reader: R, source: &str, required: &[&str], check: F) -> Result<Vec<T>>
where
    R: Read,
    T: DeserializeOwned,
    F: Fn(&T) -> Result<()>,
{
    let mut rdr = ReaderBuilder::new().trim(Trim::Headers).from_reader(reader);

    let headers = rdr
        .headers()
        .with_context(|| format!("{source}: failed to read header row"))?
        .clone();

    for column in required {
        if !headers.iter().any(|h| h == *column) {
            bail!("{source}: missing required column '{column}'");
        }
    }

    let mut rows = Vec::new();
    let mut raw = StringRecord::new();
    loop {
        let line = rdr.position().line();
        let more = rdr
            .read_record(&mut raw)
            .with_context(|| format!("{source}: unreadable record near line {line}"))?;
        if !more {
            break;
        }

        let line = raw.position().map(|p| p.line()).unwrap_or(line);
        let record: T = raw
            .deserialize(Some(&headers))
            .with_context(|| format!("{source}: invalid row on line {line}"))?;
        if let Err(e) = check(&record) {
            bail!("{source}: {e} on line {line}");
        }
        rows.push(record);
    }

    debug!(source, rows = rows.len(), "CSV parsed");
    Ok(rows)
}
