//! Random arrivals: traffic, enemy traffic and replacement taxis.
//!
//! Every roll goes through the injected `rng`, so a seeded generator
//! replays a game exactly.

use rand::Rng;
use tracing::debug;

use crate::config::Settings;
use crate::entities::{Car, CarKind, Taxi, TaxiId};
use crate::geometry::Point;

/// One in this many frames a traffic car appears.
pub const CAR_CHANCE: u32 = 200;
/// One in this many frames an enemy car appears.
pub const ENEMY_CAR_CHANCE: u32 = 400;
/// Spawn band reaches this far above the top edge.
pub const SPAWN_ABOVE_TOP: f64 = 50.0;

/// `true` with probability `1 / n`.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, n: u32) -> bool {
    rng.gen_ratio(1, n)
}

/// Coin flip between two values.
pub fn pick<R: Rng + ?Sized>(rng: &mut R, a: f64, b: f64) -> f64 {
    if rng.gen_bool(0.5) {
        a
    } else {
        b
    }
}

/// Two-stage lane pick: first between `first` and `second`, then between
/// that winner and `third`. `third` therefore comes up half the time.
pub fn pick_lane<R: Rng + ?Sized>(rng: &mut R, first: f64, second: f64, third: f64) -> f64 {
    let winner = pick(rng, first, second);
    pick(rng, winner, third)
}

fn spawn_y<R: Rng + ?Sized>(rng: &mut R, settings: &Settings) -> f64 {
    rng.gen_range(-SPAWN_ABOVE_TOP..=settings.window.height)
}

/// Traffic favours the middle lane.
pub fn spawn_car<R: Rng + ?Sized>(rng: &mut R, settings: &Settings) -> Car {
    let [left, middle, right] = settings.lanes.centers;
    let x = pick_lane(rng, left, right, middle);
    let y = spawn_y(rng, settings);
    let variant = rng.gen_range(1..=settings.gameplay.car_variants.max(1));
    let speed = Car::random_speed(rng);
    debug!(x, y, variant, "traffic car spawned");
    Car::new(CarKind::Traffic, variant, Point::new(x, y), settings.car.radius, speed)
}

/// Enemy traffic favours the left lane.
pub fn spawn_enemy_car<R: Rng + ?Sized>(rng: &mut R, settings: &Settings) -> Car {
    let [left, middle, right] = settings.lanes.centers;
    let x = pick_lane(rng, middle, right, left);
    let y = spawn_y(rng, settings);
    let speed = Car::random_speed(rng);
    debug!(x, y, "enemy car spawned");
    Car::new(CarKind::Enemy, 1, Point::new(x, y), settings.enemy_car.radius, speed)
}

/// Fresh driverless taxi in a lane ahead of the visible road.
pub fn spawn_taxi<R: Rng + ?Sized>(rng: &mut R, settings: &Settings, id: TaxiId) -> Taxi {
    let [left, middle, right] = settings.lanes.centers;
    let x = pick_lane(rng, left, right, middle);
    let gameplay = &settings.gameplay;
    let (lo, hi) = if gameplay.taxi_respawn_min_y <= gameplay.taxi_respawn_max_y {
        (gameplay.taxi_respawn_min_y, gameplay.taxi_respawn_max_y)
    } else {
        (gameplay.taxi_respawn_max_y, gameplay.taxi_respawn_min_y)
    };
    let y = rng.gen_range(lo..=hi);
    Taxi::new(id, Point::new(x, y), &settings.taxi)
}
