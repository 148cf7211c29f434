//! Human-readable labels for the integer category codes in the daily dataset.

use serde::Serialize;
use std::fmt;

/// Season of the year, decoded from the `season` column.
///
/// | Code | Season |
/// |------|--------|
/// | 1    | Spring |
/// | 2    | Summer |
/// | 3    | Fall   |
/// | 4    | Winter |
///
/// Any other code is kept as [`Season::Unknown`] so the row still shows up
/// in aggregates, just without a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
    Unknown(u8),
}

impl Season {
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Season::Spring,
            2 => Season::Summer,
            3 => Season::Fall,
            4 => Season::Winter,
            other => Season::Unknown(other),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Season::Spring => 1,
            Season::Summer => 2,
            Season::Fall => 3,
            Season::Winter => 4,
            Season::Unknown(code) => code,
        }
    }

    /// Returns the display label, or `None` for an out-of-domain code.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Season::Spring => Some("Spring"),
            Season::Summer => Some("Summer"),
            Season::Fall => Some("Fall"),
            Season::Winter => Some("Winter"),
            Season::Unknown(_) => None,
        }
    }
}

impl From<Season> for u8 {
    fn from(season: Season) -> u8 {
        season.code()
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => f.write_str(label),
            None => write!(f, "Unknown({})", self.code()),
        }
    }
}

/// Weather situation, decoded from the `weathersit` column.
///
/// Codes run from the clearest conditions (1) to the most severe (4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Weather {
    Clear,
    Mist,
    LightPrecipitation,
    HeavyPrecipitation,
    Unknown(u8),
}

impl Weather {
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Weather::Clear,
            2 => Weather::Mist,
            3 => Weather::LightPrecipitation,
            4 => Weather::HeavyPrecipitation,
            other => Weather::Unknown(other),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Weather::Clear => 1,
            Weather::Mist => 2,
            Weather::LightPrecipitation => 3,
            Weather::HeavyPrecipitation => 4,
            Weather::Unknown(code) => code,
        }
    }

    pub fn label(self) -> Option<&'static str> {
        match self {
            Weather::Clear => Some("Clear, Few clouds, Partly cloudy"),
            Weather::Mist => Some("Mist + Cloudy, Mist + Broken clouds, Mist + Few clouds, Mist"),
            Weather::LightPrecipitation => {
                Some("Light Snow, Light Rain + Thunderstorm + Scattered clouds")
            }
            Weather::HeavyPrecipitation => {
                Some("Heavy Rain + Ice Pallets + Thunderstorm + Mist, Snow + Fog")
            }
            Weather::Unknown(_) => None,
        }
    }
}

impl From<Weather> for u8 {
    fn from(weather: Weather) -> u8 {
        weather.code()
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => f.write_str(label),
            None => write!(f, "Unknown({})", self.code()),
        }
    }
}
