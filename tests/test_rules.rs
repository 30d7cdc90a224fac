use shadow_taxi::config::{Messages, Settings, TripRates};
use shadow_taxi::geometry::{collides, step_toward, Point, Step};
use shadow_taxi::spawn::{chance, pick_lane, spawn_car, CAR_CHANCE, SPAWN_ABOVE_TOP};
use shadow_taxi::trip::{expected_earnings, fare, penalty, TripSummary};
use shadow_taxi::weather::{resolve, WeatherCondition, WeatherKind};

use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rates() -> TripRates {
    TripRates { per_y: 0.1, priority: [5.0, 3.0, 1.0], penalty_per_y: 0.2 }
}

fn window(kind: WeatherKind, start: u32, end: u32) -> WeatherCondition {
    WeatherCondition { kind, start, end }
}

// ── Geometry ─────────────────────────────────────────────────────────────────

#[test]
fn touching_circles_do_not_collide() {
    // distance 10 == 5 + 5
    assert!(!collides(Point::new(0.0, 0.0), 5.0, Point::new(10.0, 0.0), 5.0));
    assert!(collides(Point::new(0.0, 0.0), 5.0, Point::new(9.9, 0.0), 5.0));
}

#[test]
fn zero_radius_never_collides() {
    let p = Point::new(3.0, 4.0);
    assert!(!collides(p, 0.0, p, 0.0));
}

#[test]
fn step_is_clamped_per_axis() {
    let s = step_toward(Point::new(0.0, 0.0), Point::new(10.0, -0.5), 1.0, 1.0);
    assert_eq!(s, Step::Moving(Point::new(1.0, -0.5)));
}

#[test]
fn step_snaps_when_close() {
    let target = Point::new(0.5, 0.5);
    assert_eq!(step_toward(Point::default(), target, 1.0, 1.0), Step::Arrived(target));
}

// ── Weather ──────────────────────────────────────────────────────────────────

#[test]
fn window_bounds_are_inclusive() {
    let w = window(WeatherKind::Raining, 10, 20);
    assert!(!w.is_active(9));
    assert!(w.is_active(10));
    assert!(w.is_active(20));
    assert!(!w.is_active(21));
}

#[test]
fn first_match_wins_on_overlap() {
    let schedule = [window(WeatherKind::Raining, 0, 100), window(WeatherKind::Sunny, 50, 150)];
    assert_eq!(resolve(&schedule, 75), Some(WeatherKind::Raining));
    assert_eq!(resolve(&schedule, 120), Some(WeatherKind::Sunny));
    assert_eq!(resolve(&schedule, 151), None);
}

#[test]
fn weather_parses_file_names() {
    assert_eq!("RAINING".parse::<WeatherKind>(), Ok(WeatherKind::Raining));
    assert!("FOGGY".parse::<WeatherKind>().is_err());
}

// ── Trip ─────────────────────────────────────────────────────────────────────

#[test]
fn priority_tiers_index_from_one() {
    assert_eq!(expected_earnings(0.0, 1, &rates()), 5.0);
    assert_eq!(expected_earnings(0.0, 3, &rates()), 1.0);
}

#[test]
fn no_penalty_before_overshooting_flag() {
    assert_eq!(penalty(100.0, 150.0, &rates()), 0.0);
    assert_eq!(penalty(100.0, 100.0, &rates()), 0.0);
}

#[test]
fn overshooting_flag_costs_per_unit() {
    assert!((penalty(100.0, 50.0, &rates()) - 10.0).abs() < 1e-9);
}

#[test]
fn fare_floors_at_zero() {
    assert_eq!(fare(5.0, 12.0), 0.0);
}

#[test]
fn summary_reports_shortfall() {
    let s = TripSummary { expected: 21.0, priority: 3, fare: 11.0 };
    let lines = s.lines(&Messages::default());
    assert_eq!(lines.len(), 4);
    assert!(lines[3].ends_with("10.00"));
}

// ── Spawning ─────────────────────────────────────────────────────────────────

#[test]
fn lane_pick_only_yields_lane_centres() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let x = pick_lane(&mut rng, 1.0, 2.0, 3.0);
        assert!([1.0, 2.0, 3.0].contains(&x));
    }
}

#[test]
fn lane_pick_biases_third_lane() {
    let mut rng = StdRng::seed_from_u64(11);
    let n = 20_000;
    let third = (0..n).filter(|_| pick_lane(&mut rng, 1.0, 2.0, 3.0) == 3.0).count();
    let share = third as f64 / n as f64;
    assert!((0.45..0.55).contains(&share), "share = {share}");
}

#[test]
fn chance_never_fires_on_max_rolls() {
    let mut rng = StepRng::new(u64::MAX, 0);
    assert!(!(0..1000).any(|_| chance(&mut rng, CAR_CHANCE)));
}

#[test]
fn spawned_car_is_inside_spawn_band() {
    let settings = Settings::default();
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        let car = spawn_car(&mut rng, &settings);
        assert!(car.position.y >= -SPAWN_ABOVE_TOP);
        assert!(car.position.y <= settings.window.height);
        assert!((2.0..5.0).contains(&car.speed));
    }
}
