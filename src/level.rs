//! Level data: the object rows and the weather schedule, both plain
//! comma-separated text.
//!
//! ```text
//! TAXI,360,600
//! DRIVER,300,600
//! PASSENGER,500,300,3,560,200,1
//! COIN,480,-400
//! INVINCIBLE_POWER,620,-900
//! ```
//!
//! Passenger fields after the position are priority, destination x,
//! vertical distance to the destination and an umbrella flag (`1` = yes).

use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::error::LoadError;
use crate::geometry::Point;
use crate::weather::{WeatherCondition, WeatherKind};

#[derive(Clone, Debug, PartialEq)]
pub struct PassengerRow {
    pub position: Point,
    pub priority: u8,
    pub destination_x: f64,
    pub vertical_distance: f64,
    pub has_umbrella: bool,
}

impl PassengerRow {
    /// The matching trip-end flag sits `vertical_distance` above the
    /// passenger's starting position.
    pub fn flag_position(&self) -> Point {
        Point::new(self.destination_x, self.position.y - self.vertical_distance)
    }
}

/// Everything a fresh game is built from. Immutable once loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    pub taxi: Point,
    pub driver: Point,
    /// Row order is the pairing order with trip-end flags.
    pub passengers: Vec<PassengerRow>,
    pub coins: Vec<Point>,
    pub invincible_powers: Vec<Point>,
    pub weather: Vec<WeatherCondition>,
}

impl Level {
    pub fn load(objects: &Path, weather: Option<&Path>) -> Result<Level, LoadError> {
        let mut level = Level::parse_objects(&read(objects)?, objects)?;
        if let Some(path) = weather {
            level.weather = parse_weather(&read(path)?, path)?;
        }
        info!(
            passengers = level.passengers.len(),
            coins = level.coins.len(),
            powers = level.invincible_powers.len(),
            weather_windows = level.weather.len(),
            "level loaded"
        );
        Ok(level)
    }

    /// Parse object rows. `path` only labels errors. Blank lines are skipped.
    pub fn parse_objects(text: &str, path: &Path) -> Result<Level, LoadError> {
        let mut taxi = None;
        let mut driver = None;
        let mut passengers = Vec::new();
        let mut coins = Vec::new();
        let mut invincible_powers = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let row = Row::new(line, path, index + 1);
            match row.tag() {
                "TAXI" => taxi = Some(row.point(1)?),
                "DRIVER" => driver = Some(row.point(1)?),
                "COIN" => coins.push(row.point(1)?),
                "INVINCIBLE_POWER" => invincible_powers.push(row.point(1)?),
                "PASSENGER" => passengers.push(PassengerRow {
                    position: row.point(1)?,
                    priority: row.field(3)?,
                    destination_x: row.field(4)?,
                    vertical_distance: row.field(5)?,
                    has_umbrella: row.raw(6)? == "1",
                }),
                other => return Err(row.error(format!("unknown object type {other:?}"))),
            }
        }

        Ok(Level {
            taxi: taxi.ok_or(LoadError::Missing("TAXI"))?,
            driver: driver.ok_or(LoadError::Missing("DRIVER"))?,
            passengers,
            coins,
            invincible_powers,
            weather: Vec::new(),
        })
    }
}

/// Parse `KIND,start,end` rows, keeping file order.
pub fn parse_weather(text: &str, path: &Path) -> Result<Vec<WeatherCondition>, LoadError> {
    let mut schedule = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row = Row::new(line, path, index + 1);
        let kind = WeatherKind::from_str(row.tag()).map_err(|e| row.error(e))?;
        schedule.push(WeatherCondition { kind, start: row.field(1)?, end: row.field(2)? });
    }
    Ok(schedule)
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })
}

struct Row<'a> {
    fields: Vec<&'a str>,
    path: &'a Path,
    line: usize,
}

impl<'a> Row<'a> {
    fn new(line: &'a str, path: &'a Path, number: usize) -> Self {
        Row { fields: line.split(',').map(str::trim).collect(), path, line: number }
    }

    fn tag(&self) -> &'a str {
        self.fields[0]
    }

    fn error(&self, reason: impl Into<String>) -> LoadError {
        LoadError::Parse { path: self.path.to_path_buf(), line: self.line, reason: reason.into() }
    }

    fn raw(&self, index: usize) -> Result<&'a str, LoadError> {
        self.fields
            .get(index)
            .copied()
            .ok_or_else(|| self.error(format!("missing field {}", index + 1)))
    }

    fn field<T: FromStr>(&self, index: usize) -> Result<T, LoadError> {
        let raw = self.raw(index)?;
        raw.parse()
            .map_err(|_| self.error(format!("bad value {raw:?} in field {}", index + 1)))
    }

    fn point(&self, first: usize) -> Result<Point, LoadError> {
        Ok(Point::new(self.field(first)?, self.field(first + 1)?))
    }
}
