//! Input file locations.
//!
//! Each path comes from the command line if given, otherwise from the
//! environment (a `.env` file is loaded at startup), otherwise a default
//! relative to the working directory:
//!
//! | Dataset | Env var         | Default         |
//! |---------|-----------------|-----------------|
//! | daily   | `DAY_CSV_PATH`  | `data/day.csv`  |
//! | hourly  | `HOUR_CSV_PATH` | `data/hour.csv` |

use std::path::PathBuf;

pub const DAY_CSV_ENV: &str = "DAY_CSV_PATH";
pub const HOUR_CSV_ENV: &str = "HOUR_CSV_PATH";
pub const DEFAULT_DAY_CSV: &str = "data/day.csv";
pub const DEFAULT_HOUR_CSV: &str = "data/hour.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub day: PathBuf,
    pub hour: PathBuf,
}

impl DataPaths {
    /// Resolves both paths from CLI flags, then the process environment.
    pub fn resolve(day: Option<PathBuf>, hour: Option<PathBuf>) -> Self {
        DataPaths {
            day: pick(day, std::env::var(DAY_CSV_ENV).ok(), DEFAULT_DAY_CSV),
            hour: pick(hour, std::env::var(HOUR_CSV_ENV).ok(), DEFAULT_HOUR_CSV),
        }
    }
}

fn pick(flag: Option<PathBuf>, env: Option<String>, default: &str) -> PathBuf {
    flag.or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(default))
}
