use crate::analyzers::labels::{Season, Weather};
use crate::analyzers::types::{
    DailyAggregate, DayRecord, HourAggregate, HourRecord, SeasonAggregate, WeatherAggregate,
};
use std::collections::BTreeMap;

/// Sums `value` per `key`, returning groups in ascending key order.
///
/// Only keys that occur in `rows` are emitted; nothing is zero-filled.
fn sum_by<T, K, F, V>(rows: &[T], key: F, value: V) -> BTreeMap<K, u64>
where
    K: Ord,
    F: Fn(&T) -> K,
    V: Fn(&T) -> u32,
{
    let mut groups = BTreeMap::new();
    for row in rows {
        *groups.entry(key(row)).or_insert(0u64) += u64::from(value(row));
    }
    groups
}

/// Total rentals per calendar date, ordered by date.
pub fn daily(days: &[DayRecord]) -> Vec<DailyAggregate> {
    sum_by(days, |r| r.date, |r| r.count)
        .into_iter()
        .map(|(date, total_customers)| DailyAggregate {
            date,
            total_customers,
        })
        .collect()
}

/// Total rentals per season code present in `days`, ordered by code.
pub fn by_season(days: &[DayRecord]) -> Vec<SeasonAggregate> {
    sum_by(days, |r| r.season, |r| r.count)
        .into_iter()
        .map(|(code, total_customers)| {
            let season = Season::from_code(code);
            if season.label().is_none() {
                tracing::warn!(code, "Season code outside 1-4, row left unlabeled");
            }
            SeasonAggregate {
                season,
                season_name: season.label(),
                total_customers,
            }
        })
        .collect()
}

/// Total rentals per weather code present in `days`, ordered by code.
pub fn by_weather(days: &[DayRecord]) -> Vec<WeatherAggregate> {
    sum_by(days, |r| r.weather, |r| r.count)
        .into_iter()
        .map(|(code, total_customers)| {
            let weather = Weather::from_code(code);
            if weather.label().is_none() {
                tracing::warn!(code, "Weather code outside 1-4, row left unlabeled");
            }
            WeatherAggregate {
                weather,
                weather_condition: weather.label(),
                total_customers,
            }
        })
        .collect()
}

/// Total rentals per hour of day across all dates in `hours`, ordered by hour.
pub fn by_hour(hours: &[HourRecord]) -> Vec<HourAggregate> {
    sum_by(hours, |r| r.hour, |r| r.count)
        .into_iter()
        .map(|(hour, total_customers)| HourAggregate {
            hour,
            total_customers,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2011, 1, d).unwrap()
    }

    fn day(d: u32, season: u8, weather: u8, count: u32) -> DayRecord {
        DayRecord {
            date: date(d),
            season,
            weather,
            count,
        }
    }

    fn hour(d: u32, hour: u8, count: u32) -> HourRecord {
        HourRecord {
            date: date(d),
            hour,
            count,
        }
    }

    #[test]
    fn test_season_example_with_tie() {
        let days = vec![day(1, 1, 1, 10), day(2, 1, 1, 20), day(3, 2, 1, 30)];

        let seasons = by_season(&days);

        assert_eq!(
            seasons,
            vec![
                SeasonAggregate {
                    season: Season::Spring,
                    season_name: Some("Spring"),
                    total_customers: 30,
                },
                SeasonAggregate {
                    season: Season::Summer,
                    season_name: Some("Summer"),
                    total_customers: 30,
                },
            ]
        );
    }

    #[test]
    fn test_season_groups_sorted_by_code() {
        let days = vec![day(1, 4, 1, 1), day(2, 2, 1, 2), day(3, 3, 1, 3)];
        let codes: Vec<u8> = by_season(&days).iter().map(|s| s.season.code()).collect();
        assert_eq!(codes, vec![2, 3, 4]);
    }

    #[test]
    fn test_unknown_season_kept_unlabeled() {
        let days = vec![day(1, 1, 1, 5), day(2, 9, 1, 7)];
        let seasons = by_season(&days);

        assert_eq!(seasons.len(), 2);
        assert_eq!(seasons[1].season, Season::Unknown(9));
        assert_eq!(seasons[1].season_name, None);
        assert_eq!(seasons[1].total_customers, 7);
    }

    #[test]
    fn test_unknown_weather_kept_unlabeled() {
        let days = vec![day(1, 1, 2, 5), day(2, 1, 6, 7), day(3, 1, 6, 1)];
        let weather = by_weather(&days);

        assert_eq!(weather.len(), 2);
        assert_eq!(weather[0].weather, Weather::Mist);
        assert_eq!(weather[1].weather, Weather::Unknown(6));
        assert_eq!(weather[1].weather_condition, None);
        assert_eq!(weather[1].total_customers, 8);
    }

    #[test]
    fn test_weather_only_present_codes() {
        let days = vec![day(1, 1, 1, 100), day(2, 1, 3, 5), day(3, 1, 1, 50)];
        let weather = by_weather(&days);

        assert_eq!(weather.len(), 2);
        assert_eq!(weather[0].weather, Weather::Clear);
        assert_eq!(weather[0].total_customers, 150);
        assert_eq!(weather[1].weather, Weather::LightPrecipitation);
        assert_eq!(weather[1].total_customers, 5);
    }

    #[test]
    fn test_daily_is_ordered_and_not_zero_filled() {
        let days = vec![day(5, 1, 1, 3), day(1, 1, 1, 1), day(3, 1, 1, 2)];
        let totals = daily(&days);

        let dates: Vec<_> = totals.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date(1), date(3), date(5)]);
    }

    #[test]
    fn test_daily_sum_matches_records() {
        let days = vec![day(1, 1, 1, 985), day(2, 1, 2, 801), day(3, 1, 1, 1349)];
        let total: u64 = daily(&days).iter().map(|d| d.total_customers).sum();
        assert_eq!(total, 985 + 801 + 1349);
    }

    #[test]
    fn test_by_hour_sums_across_dates() {
        let hours = vec![hour(1, 0, 16), hour(1, 1, 40), hour(2, 0, 17), hour(2, 1, 3)];
        let totals = by_hour(&hours);

        assert_eq!(
            totals,
            vec![
                HourAggregate {
                    hour: 0,
                    total_customers: 33,
                },
                HourAggregate {
                    hour: 1,
                    total_customers: 43,
                },
            ]
        );
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let days = vec![day(1, 1, 2, 10), day(2, 3, 1, 20)];
        assert_eq!(daily(&days), daily(&days));
        assert_eq!(by_season(&days), by_season(&days));
        assert_eq!(by_weather(&days), by_weather(&days));
    }

    #[test]
    fn test_empty_input_yields_empty_tables() {
        assert!(daily(&[]).is_empty());
        assert!(by_season(&[]).is_empty());
        assert!(by_weather(&[]).is_empty());
        assert!(by_hour(&[]).is_empty());
    }
}
