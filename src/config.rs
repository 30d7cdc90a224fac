//! Read-only game settings.
//!
//! Loaded once from JSON at startup; any missing field falls back to the
//! built-in default, so `{}` is a complete settings file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::geometry::Point;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: Window,
    pub taxi: VehicleSettings,
    pub driver: WalkerSettings,
    pub passenger: WalkerSettings,
    pub car: BodySettings,
    pub enemy_car: BodySettings,
    pub fireball: FireballSettings,
    pub coin: BodySettings,
    pub invincible_power: BodySettings,
    pub trip_end_flag: BodySettings,
    pub lanes: Lanes,
    pub trip: TripRates,
    pub gameplay: Gameplay,
    pub layout: Layout,
    pub messages: Messages,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Settings, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Window {
    pub width: f64,
    pub height: f64,
}

impl Default for Window {
    fn default() -> Self {
        Window { width: 1024.0, height: 768.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleSettings {
    pub radius: f64,
    /// Sideways steering per frame.
    pub speed_x: f64,
}

impl Default for VehicleSettings {
    fn default() -> Self {
        VehicleSettings { radius: 40.0, speed_x: 5.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkerSettings {
    pub radius: f64,
    pub walk_speed_x: f64,
    pub walk_speed_y: f64,
}

impl Default for WalkerSettings {
    fn default() -> Self {
        WalkerSettings { radius: 20.0, walk_speed_x: 1.0, walk_speed_y: 1.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodySettings {
    pub radius: f64,
}

impl Default for BodySettings {
    fn default() -> Self {
        BodySettings { radius: 30.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireballSettings {
    pub radius: f64,
    /// Upward travel per frame.
    pub speed: f64,
}

impl Default for FireballSettings {
    fn default() -> Self {
        FireballSettings { radius: 10.0, speed: 7.0 }
    }
}

/// Lane centre x-coordinates, left to right.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lanes {
    pub centers: [f64; 3],
}

impl Default for Lanes {
    fn default() -> Self {
        Lanes { centers: [360.0, 480.0, 620.0] }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripRates {
    pub per_y: f64,
    /// Fare bonus for priority 1, 2 and 3.
    pub priority: [f64; 3],
    pub penalty_per_y: f64,
}

impl Default for TripRates {
    fn default() -> Self {
        TripRates { per_y: 0.1, priority: [30.0, 20.0, 10.0], penalty_per_y: 0.06 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gameplay {
    pub target_score: f64,
    pub max_frames: u32,
    /// World scroll per frame while Up is held.
    pub scroll_speed: f64,
    pub taxi_respawn_min_y: f64,
    pub taxi_respawn_max_y: f64,
    pub car_variants: u8,
}

impl Default for Gameplay {
    fn default() -> Self {
        Gameplay {
            target_score: 500.0,
            max_frames: 15_000,
            scroll_speed: 5.0,
            taxi_respawn_min_y: -200.0,
            taxi_respawn_max_y: -50.0,
            car_variants: 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub home_title_y: f64,
    pub home_instruction_y: f64,
    pub player_name_y: f64,
    pub player_name_input_y: f64,
    pub player_start_y: f64,
    pub earnings: Point,
    pub target: Point,
    pub remaining_frames: Point,
    pub taxi_health: Point,
    pub driver_health: Point,
    pub passenger_health: Point,
    pub coin_power: Point,
    pub trip_info: Point,
    pub end_status_y: f64,
    pub end_scores_y: f64,
    pub line_height: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            home_title_y: 250.0,
            home_instruction_y: 440.0,
            player_name_y: 200.0,
            player_name_input_y: 280.0,
            player_start_y: 400.0,
            earnings: Point::new(800.0, 50.0),
            target: Point::new(800.0, 80.0),
            remaining_frames: Point::new(800.0, 110.0),
            taxi_health: Point::new(35.0, 50.0),
            driver_health: Point::new(35.0, 80.0),
            passenger_health: Point::new(35.0, 110.0),
            coin_power: Point::new(800.0, 140.0),
            trip_info: Point::new(35.0, 600.0),
            end_status_y: 200.0,
            end_scores_y: 400.0,
            line_height: 30.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub home_title: String,
    pub home_instruction: String,
    pub player_name: String,
    pub player_start: String,
    pub earnings: String,
    pub target: String,
    pub remaining_frames: String,
    pub taxi_health: String,
    pub driver_health: String,
    pub passenger_health: String,
    pub ongoing_trip: String,
    pub completed_trip: String,
    pub expected_earning: String,
    pub priority: String,
    pub penalty: String,
    pub won: String,
    pub lost: String,
    pub highest_scores: String,
    pub end_continue: String,
}

impl Default for Messages {
    fn default() -> Self {
        Messages {
            home_title: "SHADOW TAXI".into(),
            home_instruction: "PRESS ENTER TO START".into(),
            player_name: "ENTER YOUR NAME".into(),
            player_start: "PRESS ENTER TO START\nTHE GAME".into(),
            earnings: "PAY  ".into(),
            target: "TARGET  ".into(),
            remaining_frames: "FRAMES REMAINING  ".into(),
            taxi_health: "TAXI  ".into(),
            driver_health: "DRIVER  ".into(),
            passenger_health: "PASSENGER  ".into(),
            ongoing_trip: "Current Trip".into(),
            completed_trip: "Last Trip".into(),
            expected_earning: "Expected Earning".into(),
            priority: "Priority".into(),
            penalty: "Penalty".into(),
            won: "CONGRATULATIONS - YOU WON!".into(),
            lost: "GAME OVER - YOU LOST!".into(),
            highest_scores: "TOP 5 SCORES".into(),
            end_continue: "PRESS SPACE TO CONTINUE".into(),
        }
    }
}
