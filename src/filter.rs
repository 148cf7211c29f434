//! Inclusive date-range selection over the loaded datasets.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::analyzers::types::Dated;
use crate::loader::Dataset;

/// An inclusive `[start, end]` range of calendar dates.
///
/// A range with `start > end` is not an error; it simply selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Intersects this range with `bounds`, the span of dates actually loaded.
    pub fn clamp_to(&self, bounds: DateRange) -> DateRange {
        DateRange {
            start: self.start.max(bounds.start),
            end: self.end.min(bounds.end),
        }
    }

    /// Builds the range a caller asked for. Missing ends default to `bounds`
    /// and the result is clamped to `bounds`.
    ///
    /// Returns `None` if an end is missing and there are no bounds to fall back on.
    pub fn requested(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        bounds: Option<DateRange>,
    ) -> Option<DateRange> {
        match bounds {
            Some(b) => Some(
                DateRange {
                    start: start.unwrap_or(b.start),
                    end: end.unwrap_or(b.end),
                }
                .clamp_to(b),
            ),
            None => Some(DateRange {
                start: start?,
                end: end?,
            }),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

/// Keeps the records dated inside `range`, preserving their original order.
pub fn filter_range<T: Dated + Clone>(records: &[T], range: DateRange) -> Vec<T> {
    records
        .iter()
        .filter(|r| range.contains(r.date()))
        .cloned()
        .collect()
}

impl Dataset {
    /// Restricts both collections with the same bounds so they stay consistent.
    pub fn filter(&self, range: DateRange) -> Dataset {
        Dataset {
            days: filter_range(&self.days, range),
            hours: filter_range(&self.hours, range),
        }
    }

    /// Earliest and latest date in the daily dataset, or `None` when it is empty.
    pub fn date_bounds(&self) -> Option<DateRange> {
        let start = self.days.iter().map(|d| d.date).min()?;
        let end = self.days.iter().map(|d| d.date).max()?;
        Some(DateRange { start, end })
    }
}
