//! Weather schedule. Rain changes the backdrop and soaks passengers who
//! came without an umbrella.

use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WeatherKind {
    #[default]
    Sunny,
    Raining,
}

impl FromStr for WeatherKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "SUNNY" => Ok(WeatherKind::Sunny),
            "RAINING" => Ok(WeatherKind::Raining),
            other => Err(format!("unknown weather {other:?}")),
        }
    }
}

impl fmt::Display for WeatherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherKind::Sunny => f.write_str("SUNNY"),
            WeatherKind::Raining => f.write_str("RAINING"),
        }
    }
}

/// A weather window covering frames `start..=end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeatherCondition {
    pub kind: WeatherKind,
    pub start: u32,
    pub end: u32,
}

impl WeatherCondition {
    pub fn is_active(&self, frame: u32) -> bool {
        (self.start..=self.end).contains(&frame)
    }
}

/// Weather for `frame`: the first window in schedule order that covers it.
/// Overlapping windows resolve to the earlier row.
pub fn resolve(schedule: &[WeatherCondition], frame: u32) -> Option<WeatherKind> {
    schedule.iter().find(|c| c.is_active(frame)).map(|c| c.kind)
}
