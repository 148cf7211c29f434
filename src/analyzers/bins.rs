//! Buckets hour-of-day totals into the four fixed day segments.

use crate::analyzers::types::{HourAggregate, TimeBinAggregate};
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Segment of the day. Boundaries are half-open: `[0,6)`, `[6,12)`, `[12,18)`, `[18,24)`.
///
/// | Bin   | Hours  | Meaning   |
/// |-------|--------|-----------|
/// | Malam | 0-5    | night     |
/// | Pagi  | 6-11   | morning   |
/// | Siang | 12-17  | midday    |
/// | Sore  | 18-23  | evening   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TimeBin {
    Malam,
    Pagi,
    Siang,
    Sore,
}

impl TimeBin {
    /// Every bin, in display order.
    pub const ALL: [TimeBin; 4] = [TimeBin::Malam, TimeBin::Pagi, TimeBin::Siang, TimeBin::Sore];

    /// Returns the bin containing `hour`, or `None` for hours outside 0-23.
    pub fn for_hour(hour: u8) -> Option<TimeBin> {
        TimeBin::ALL
            .into_iter()
            .find(|bin| bin.hours().contains(&hour))
    }

    pub fn hours(self) -> Range<u8> {
        match self {
            TimeBin::Malam => 0..6,
            TimeBin::Pagi => 6..12,
            TimeBin::Siang => 12..18,
            TimeBin::Sore => 18..24,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeBin::Malam => "Malam",
            TimeBin::Pagi => "Pagi",
            TimeBin::Siang => "Siang",
            TimeBin::Sore => "Sore",
        }
    }
}

impl fmt::Display for TimeBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Re-aggregates hourly totals into exactly four rows, one per [`TimeBin`].
///
/// Bins are a closed partition, so a bin with no matching hours still
/// appears with a total of zero.
pub fn bin_hours(by_hour: &[HourAggregate]) -> Vec<TimeBinAggregate> {
    let mut totals = [0u64; 4];

    for row in by_hour {
        match TimeBin::for_hour(row.hour) {
            Some(bin) => totals[bin as usize] += row.total_customers,
            None => tracing::warn!(hour = row.hour, "Hour outside 0-23 skipped during binning"),
        }
    }

    TimeBin::ALL
        .into_iter()
        .zip(totals)
        .map(|(bin, total_customers)| TimeBinAggregate {
            bin,
            total_customers,
        })
        .collect()
}
