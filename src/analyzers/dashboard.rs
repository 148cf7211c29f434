use serde::Serialize;
use tracing::{info, warn};

use crate::analyzers::aggregate::{by_hour, by_season, by_weather, daily};
use crate::analyzers::bins::bin_hours;
use crate::analyzers::types::{
    DailyAggregate, HourAggregate, SeasonAggregate, TimeBinAggregate, WeatherAggregate,
};
use crate::analyzers::utility::{mean, round2};
use crate::filter::DateRange;
use crate::loader::Dataset;

/// Every table and metric shown for one date range.
///
/// Rebuilt from scratch whenever the range changes; nothing is carried over
/// from a previous computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub range: DateRange,
    pub total_rentals: u64,
    /// `None` when the range selects no days.
    pub mean_rentals_per_day: Option<f64>,
    pub daily: Vec<DailyAggregate>,
    pub by_season: Vec<SeasonAggregate>,
    pub by_weather: Vec<WeatherAggregate>,
    pub by_hour: Vec<HourAggregate>,
    pub by_time_bin: Vec<TimeBinAggregate>,
}

impl Dashboard {
    /// Filters `data` to `range` and computes all aggregates over the result.
    #[tracing::instrument(skip_all, fields(range = %range))]
    pub fn compute(data: &Dataset, range: DateRange) -> Self {
        let filtered = data.filter(range);
        if filtered.days.is_empty() {
            warn!("No daily records in range");
        }

        let daily = daily(&filtered.days);
        let by_hour = by_hour(&filtered.hours);
        let by_time_bin = bin_hours(&by_hour);

        let total_rentals: u64 = daily.iter().map(|d| d.total_customers).sum();
        let per_day: Vec<f64> = daily.iter().map(|d| d.total_customers as f64).collect();
        let mean_rentals_per_day = mean(&per_day).map(round2);

        info!(
            days = filtered.days.len(),
            hours = filtered.hours.len(),
            total_rentals,
            "Dashboard recomputed"
        );

        Dashboard {
            range,
            total_rentals,
            mean_rentals_per_day,
            by_season: by_season(&filtered.days),
            by_weather: by_weather(&filtered.days),
            daily,
            by_hour,
            by_time_bin,
        }
    }
}
