//! Data types used by the aggregation pipeline.

use crate::analyzers::bins::TimeBin;
use crate::analyzers::labels::{Season, Weather};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single row deserialized from the daily dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DayRecord {
    #[serde(rename = "dteday")]
    pub date: NaiveDate,
    pub season: u8,
    #[serde(rename = "weathersit")]
    pub weather: u8,
    #[serde(rename = "cnt")]
    pub count: u32,
}

/// A single row deserialized from the hourly dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HourRecord {
    #[serde(rename = "dteday")]
    pub date: NaiveDate,
    #[serde(rename = "hr")]
    pub hour: u8,
    #[serde(rename = "cnt")]
    pub count: u32,
}

/// Records that carry a calendar date and can be range-filtered.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for DayRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for HourRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Rows that carry a summed rental count, so a highlight can be picked among them.
pub trait Totaled {
    fn total_customers(&self) -> u64;
}

/// Total rentals on one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub total_customers: u64,
}

/// Total rentals for one season code present in the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonAggregate {
    pub season: Season,
    pub season_name: Option<&'static str>,
    pub total_customers: u64,
}

/// Total rentals for one weather code present in the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherAggregate {
    #[serde(rename = "weathersit")]
    pub weather: Weather,
    pub weather_condition: Option<&'static str>,
    pub total_customers: u64,
}

/// Total rentals for one hour of the day, summed across every date in range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourAggregate {
    pub hour: u8,
    pub total_customers: u64,
}

impl HourAggregate {
    /// Display form of the hour, e.g. `7` becomes `"07.00"`.
    pub fn label(&self) -> String {
        format!("{:02}.00", self.hour)
    }
}

/// Total rentals for one [`TimeBin`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeBinAggregate {
    #[serde(rename = "time_bin")]
    pub bin: TimeBin,
    pub total_customers: u64,
}

macro_rules! impl_totaled {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Totaled for $ty {
                fn total_customers(&self) -> u64 {
                    self.total_customers
                }
            }
        )*
    };
}

impl_totaled!(
    DailyAggregate,
    SeasonAggregate,
    WeatherAggregate,
    HourAggregate,
    TimeBinAggregate,
);
