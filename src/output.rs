//! Presentation boundary for a computed [`Dashboard`].
//!
//! Supports a plain-text dashboard, JSON serialization, and CSV export of
//! each aggregate table. Hour labels (`"07.00"`) only exist here.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::fmt::{self, Write as _};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::analyzers::dashboard::Dashboard;
use crate::analyzers::highlight::Highlight;
use crate::analyzers::types::Totaled;

const BAR_WIDTH: usize = 40;
const RULE_WIDTH: usize = 70;

/// Renders the dashboard as JSON.
pub fn render_json(dashboard: &Dashboard) -> Result<String> {
    Ok(serde_json::to_string_pretty(dashboard)?)
}

/// Renders the dashboard as a text report with horizontal bar charts.
///
/// The highlighted (largest) row of each chart is marked with `*`.
pub fn render_text(dashboard: &Dashboard) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "BIKE SHARING DASHBOARD")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "Range: {}", dashboard.range)?;
    writeln!(out)?;

    section(&mut out, "DAILY RENTALS")?;
    writeln!(out, "Total Rentals:       {}", format_num(dashboard.total_rentals))?;
    writeln!(
        out,
        "Avg Rentals per Day: {}",
        dashboard
            .mean_rentals_per_day
            .map(|m| format!("{m:.2}"))
            .unwrap_or_else(|| "-".to_string())
    )?;
    writeln!(out)?;
    let daily: Vec<(String, u64)> = dashboard
        .daily
        .iter()
        .map(|d| (d.date.to_string(), d.total_customers))
        .collect();
    bars(&mut out, &daily, None)?;

    section(&mut out, "TOTAL RENTALS BY SEASON")?;
    let seasons: Vec<_> = dashboard
        .by_season
        .iter()
        .map(|s| (s.season.to_string(), s.total_customers))
        .collect();
    bars(&mut out, &seasons, Some(Highlight::select(&dashboard.by_season)))?;

    section(&mut out, "TOTAL RENTALS BY WEATHER CONDITION")?;
    let weather: Vec<_> = dashboard
        .by_weather
        .iter()
        .map(|w| (w.weather.to_string(), w.total_customers))
        .collect();
    bars(&mut out, &weather, Some(Highlight::select(&dashboard.by_weather)))?;

    section(&mut out, "TOTAL RENTALS BY HOUR")?;
    let hours: Vec<_> = dashboard
        .by_hour
        .iter()
        .map(|h| (h.label(), h.total_customers))
        .collect();
    bars(&mut out, &hours, Some(Highlight::select(&dashboard.by_hour)))?;

    section(&mut out, "TOTAL CUSTOMERS BY TIME BIN")?;
    let time_bins: Vec<_> = dashboard
        .by_time_bin
        .iter()
        .map(|b| (b.bin.to_string(), b.total_customers))
        .collect();
    bars(&mut out, &time_bins, Some(Highlight::select(&dashboard.by_time_bin)))?;

    Ok(out)
}

fn section(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

fn bars(out: &mut String, rows: &[(String, u64)], highlight: Option<Highlight>) -> fmt::Result {
    if rows.is_empty() {
        writeln!(out, "(no data in range)")?;
        return writeln!(out);
    }

    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let max = rows.iter().map(|(_, v)| *v).max().unwrap_or(0);

    for (i, (label, value)) in rows.iter().enumerate() {
        let len = if max == 0 {
            0
        } else {
            (*value as f64 / max as f64 * BAR_WIDTH as f64).round() as usize
        };
        let mark = match highlight {
            Some(h) if h.is_highlighted(i) => '*',
            _ => ' ',
        };
        writeln!(
            out,
            "{mark} {label:<label_width$} | {bar:<width$} {num}",
            bar = "█".repeat(len),
            num = format_num(*value),
            width = BAR_WIDTH
        )?;
    }
    writeln!(out)
}

/// Formats an integer with `,` thousands separators.
fn format_num(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Hour table row with the display label next to the numeric hour.
#[derive(Serialize)]
struct HourRow {
    hour: u8,
    hr: String,
    total_customers: u64,
}

/// Writes each aggregate table of `dashboard` to its own CSV file in `dir`.
///
/// Creates `dir` if needed and overwrites existing files. With `gzip`, each
/// file is compressed and gets a `.csv.gz` extension. Returns the written paths.
#[tracing::instrument(skip_all, fields(dir = %dir.display(), gzip = gzip))]
pub fn export_csv(dashboard: &Dashboard, dir: &Path, gzip: bool) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;

    let hours: Vec<HourRow> = dashboard
        .by_hour
        .iter()
        .map(|h| HourRow {
            hour: h.hour,
            hr: h.label(),
            total_customers: h.total_customers,
        })
        .collect();

    let written = vec![
        write_table(dir, "daily", &dashboard.daily, gzip)?,
        write_table(dir, "by_season", &dashboard.by_season, gzip)?,
        write_table(dir, "by_weather", &dashboard.by_weather, gzip)?,
        write_table(dir, "by_hour", &hours, gzip)?,
        write_table(dir, "by_time_bin", &dashboard.by_time_bin, gzip)?,
    ];

    info!(files = written.len(), "CSV export complete");
    Ok(written)
}

fn write_table<T: Serialize>(dir: &Path, name: &str, rows: &[T], gzip: bool) -> Result<PathBuf> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV for {}: {}", name, e))?;

    let (path, body) = if gzip {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&bytes)?;
        (dir.join(format!("{name}.csv.gz")), encoder.finish()?)
    } else {
        (dir.join(format!("{name}.csv")), bytes)
    };

    let mut file =
        File::create(&path).with_context(|| format!("failed to create '{}'", path.display()))?;
    file.write_all(&body)?;
    debug!(path = %path.display(), rows = rows.len(), "Table written");

    Ok(path)
}

/// Convenience for callers that only need the maximum row of a table.
pub fn highlighted<T: Totaled>(rows: &[T]) -> Option<&T> {
    Highlight::select(rows).index().map(|i| &rows[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::{DayRecord, HourRecord};
    use crate::filter::DateRange;
    use crate::loader::Dataset;
    use chrono::NaiveDate;
    use flate2::read::GzDecoder;
    use std::env;
    use std::io::Read;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2011, 1, d).unwrap()
    }

    fn dashboard() -> Dashboard {
        let data = Dataset {
            days: vec![
                DayRecord {
                    date: date(1),
                    season: 1,
                    weather: 1,
                    count: 10,
                },
                DayRecord {
                    date: date(2),
                    season: 1,
                    weather: 2,
                    count: 20,
                },
                DayRecord {
                    date: date(3),
                    season: 2,
                    weather: 1,
                    count: 30,
                },
            ],
            hours: vec![
                HourRecord {
                    date: date(1),
                    hour: 7,
                    count: 1200,
                },
                HourRecord {
                    date: date(2),
                    hour: 19,
                    count: 4,
                },
            ],
        };
        Dashboard::compute(&data, DateRange::new(date(1), date(3)))
    }

    fn empty_dashboard() -> Dashboard {
        Dashboard::compute(&Dataset::default(), DateRange::new(date(1), date(3)))
    }

    fn temp_dir(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    #[test]
    fn test_format_num() {
        assert_eq!(format_num(0), "0");
        assert_eq!(format_num(999), "999");
        assert_eq!(format_num(1000), "1,000");
        assert_eq!(format_num(3292679), "3,292,679");
    }

    #[test]
    fn test_render_text_marks_first_of_tied_seasons() {
        let text = render_text(&dashboard()).unwrap();

        assert!(text.contains("* Spring"), "{text}");
        assert!(text.contains("  Summer"), "{text}");
        assert!(text.contains("Total Rentals:       60"));
        assert!(text.contains("Avg Rentals per Day: 20.00"));
    }

    #[test]
    fn test_render_text_uses_hour_labels() {
        let text = render_text(&dashboard()).unwrap();
        assert!(text.contains("* 07.00"), "{text}");
        assert!(text.contains("  19.00"), "{text}");
        assert!(text.contains("* Pagi"), "{text}");
    }

    #[test]
    fn test_render_text_empty_range() {
        let text = render_text(&empty_dashboard()).unwrap();
        assert!(text.contains("Avg Rentals per Day: -"));
        assert!(text.contains("(no data in range)"));
        // time bins are always present
        assert!(text.contains("Malam"));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&dashboard()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["total_rentals"], 60);
        assert_eq!(value["mean_rentals_per_day"], 20.0);
        assert_eq!(value["by_time_bin"].as_array().unwrap().len(), 4);
        assert_eq!(value["by_time_bin"][1]["time_bin"], "Pagi");
        assert_eq!(value["range"]["start"], "2011-01-01");
    }

    #[test]
    fn test_render_json_empty_mean_is_null() {
        let json = render_json(&empty_dashboard()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["mean_rentals_per_day"].is_null());
        assert_eq!(value["total_rentals"], 0);
    }

    #[test]
    fn test_export_csv_writes_all_tables() {
        let dir = temp_dir("bike_sharing_dashboard_test_export");
        let _ = fs::remove_dir_all(&dir);

        let paths = export_csv(&dashboard(), &dir, false).unwrap();
        assert_eq!(paths.len(), 5);
        assert!(paths.iter().all(|p| p.exists()));

        let seasons = fs::read_to_string(dir.join("by_season.csv")).unwrap();
        let lines: Vec<_> = seasons.lines().collect();
        assert_eq!(lines[0], "season,season_name,total_customers");
        assert_eq!(lines[1], "1,Spring,30");
        assert_eq!(lines[2], "2,Summer,30");

        let hours = fs::read_to_string(dir.join("by_hour.csv")).unwrap();
        assert!(hours.lines().any(|l| l == "7,07.00,1200"), "{hours}");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_export_csv_gzip() {
        let dir = temp_dir("bike_sharing_dashboard_test_export_gz");
        let _ = fs::remove_dir_all(&dir);

        let paths = export_csv(&dashboard(), &dir, true).unwrap();
        assert!(
            paths
                .iter()
                .all(|p| p.to_string_lossy().ends_with(".csv.gz"))
        );

        let file = File::open(dir.join("daily.csv.gz")).unwrap();
        let mut content = String::new();
        GzDecoder::new(file).read_to_string(&mut content).unwrap();
        assert_eq!(
            content,
            "date,total_customers\n2011-01-01,10\n2011-01-02,20\n2011-01-03,30\n"
        );

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_highlighted() {
        let dash = dashboard();
        let top = highlighted(&dash.by_weather).unwrap();
        assert_eq!(top.weather.code(), 1);
        assert!(highlighted(&empty_dashboard().by_season).is_none());
    }
}
