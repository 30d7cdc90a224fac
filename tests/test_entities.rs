use shadow_taxi::capability::*;
use shadow_taxi::config::{FireballSettings, Settings, Window};
use shadow_taxi::entities::*;
use shadow_taxi::geometry::Point;
use shadow_taxi::input::{FrameInput, Key};
use shadow_taxi::weather::WeatherKind;

use rand::rngs::mock::StepRng;

fn taxi_at(x: f64, y: f64) -> Taxi {
    Taxi::new(TaxiId(7), Point::new(x, y), &Settings::default().taxi)
}

fn driven_taxi() -> Taxi {
    let mut taxi = taxi_at(360.0, 600.0);
    taxi.has_driver = true;
    taxi
}

fn driver_at(x: f64, y: f64) -> Driver {
    Driver::new(Point::new(x, y), &Settings::default().driver)
}

fn passenger(priority: u8, umbrella: bool) -> Passenger {
    Passenger::new(
        Point::new(500.0, 300.0),
        priority,
        500.0,
        200.0,
        umbrella,
        &Settings::default().passenger,
    )
}

fn car_at(x: f64, y: f64) -> Car {
    Car::new(CarKind::Traffic, 1, Point::new(x, y), 30.0, 3.0)
}

// ── Impact timers ────────────────────────────────────────────────────────────

#[test]
fn collision_timeout_blocks_second_hit() {
    let mut taxi = driven_taxi();
    let hit = Contact::hazard(Point::new(360.0, 620.0), CAR_DAMAGE);

    assert!(taxi.handle_collision(&hit));
    assert_eq!(taxi.health, 50.0);
    assert!(!taxi.handle_collision(&hit));
    assert_eq!(taxi.health, 50.0);
    assert_eq!(taxi.impact.timeout(), COLLISION_TIMEOUT);
}

#[test]
fn hit_taxi_is_knocked_away_then_settles() {
    let mut taxi = driven_taxi();
    taxi.handle_collision(&Contact::hazard(Point::new(360.0, 620.0), CAR_DAMAGE));

    for _ in 0..COLLISION_TIMEOUT {
        taxi.update();
    }
    assert_eq!(taxi.position, Point::new(360.0, 600.0 - f64::from(KNOCKBACK_FRAMES)));
    assert!(taxi.impact.is_idle());
    assert!(taxi.handle_collision(&Contact::hazard(taxi.position, CAR_DAMAGE)));
}

#[test]
fn impact_nudges_then_recovers_once() {
    let mut impact = Impact::default();
    impact.strike((0.0, -1.0));

    let mut nudges = 0;
    let mut recoveries = 0;
    for _ in 0..COLLISION_TIMEOUT + 5 {
        let a = impact.advance();
        nudges += usize::from(a.nudge.is_some());
        recoveries += usize::from(a.recovered);
    }
    assert_eq!(nudges, KNOCKBACK_FRAMES as usize);
    assert_eq!(recoveries, 1);
    assert!(impact.is_idle());
}

#[test]
fn idle_impact_does_nothing() {
    let mut impact = Impact::default();
    assert_eq!(impact.advance(), Advance::default());
}

#[test]
fn power_ups_land_during_collision_timeout() {
    let mut taxi = driven_taxi();
    taxi.handle_collision(&Contact::hazard(Point::new(360.0, 620.0), CAR_DAMAGE));
    assert!(!taxi.impact.is_idle());

    assert!(taxi.handle_collision(&Contact::power_up(taxi.position, PowerEffect::CoinPower)));
    assert!(taxi.handle_collision(&Contact::power_up(taxi.position, PowerEffect::Invincibility)));
    assert!(taxi.has_coin_power());
    assert!(taxi.is_invincible());

    let mut driver = driver_at(200.0, 600.0);
    driver.impact.strike((1.0, 0.0));
    assert!(driver.handle_collision(&Contact::power_up(driver.position, PowerEffect::Invincibility)));
    assert!(driver.is_invincible());
}

#[test]
fn knocked_back_taxi_ignores_steering() {
    let mut taxi = driven_taxi();
    taxi.handle_collision(&Contact::hazard(Point::new(360.0, 620.0), CAR_DAMAGE));
    taxi.steer(&FrameInput::holding(&[Key::Right]), 1024.0);
    assert_eq!(taxi.position.x, 360.0);
    assert!(taxi.moving);
}

// ── Taxi ─────────────────────────────────────────────────────────────────────

#[test]
fn invincible_taxi_takes_no_damage() {
    let mut taxi = driven_taxi();
    taxi.empower(PowerEffect::Invincibility);
    taxi.take_damage(80.0);
    assert_eq!(taxi.health, TAXI_HEALTH);

    for _ in 0..INVINCIBILITY_FRAMES {
        taxi.update();
    }
    assert!(!taxi.is_invincible());
    taxi.take_damage(80.0);
    assert_eq!(taxi.health, 20.0);
}

#[test]
fn destroyed_taxi_loses_its_driver() {
    let mut taxi = driven_taxi();
    taxi.take_damage(60.0);
    assert!(taxi.has_driver);
    taxi.take_damage(60.0);
    assert!(taxi.is_damaged());
    assert!(taxi.is_destroyed());
    assert!(!taxi.has_driver);
}

#[test]
fn driverless_taxi_ignores_steering_but_scrolls() {
    let mut taxi = taxi_at(360.0, 600.0);
    taxi.steer(&FrameInput::holding(&[Key::Left, Key::Up]), 1024.0);
    assert!(!taxi.moving);
    taxi.scroll(5.0);
    assert_eq!(taxi.position, Point::new(360.0, 605.0));

    let mut driven = driven_taxi();
    driven.scroll(5.0);
    assert_eq!(driven.position.y, 600.0);
}

#[test]
fn steering_stays_on_screen() {
    let mut taxi = driven_taxi();
    taxi.position.x = 2.0;
    taxi.steer(&FrameInput::holding(&[Key::Left]), 1024.0);
    assert_eq!(taxi.position.x, 0.0);
}

#[test]
fn pickup_needs_a_stopped_driven_empty_taxi() {
    let mut taxi = driven_taxi();
    taxi.moving = true;
    assert!(!taxi.pickup(PassengerId(0)));

    taxi.moving = false;
    assert!(taxi.pickup(PassengerId(0)));
    assert!(!taxi.pickup(PassengerId(1)));
    assert_eq!(taxi.current_passenger, Some(PassengerId(0)));
}

#[test]
fn drop_off_when_level_with_or_past_the_flag() {
    let flag = TripEndFlag::new(Point::new(500.0, 100.0), 30.0);
    let mut taxi = driven_taxi();
    taxi.current_passenger = Some(PassengerId(0));

    taxi.position = Point::new(360.0, 300.0);
    assert!(!taxi.can_drop_off(&flag));

    taxi.position = Point::new(360.0, 100.0);
    assert!(taxi.can_drop_off(&flag));

    taxi.position = Point::new(360.0, 40.0);
    assert!(taxi.can_drop_off(&flag));

    taxi.position = Point::new(500.0, 125.0);
    assert!(taxi.can_drop_off(&flag));

    taxi.moving = true;
    assert!(!taxi.can_drop_off(&flag));

    taxi.moving = false;
    assert_eq!(taxi.drop_off(), Some(PassengerId(0)));
    assert!(!taxi.can_drop_off(&flag));
}

#[test]
fn coin_power_counts_down() {
    let mut taxi = driven_taxi();
    taxi.empower(PowerEffect::CoinPower);
    assert_eq!(taxi.coin_power_frames, COIN_POWER_FRAMES);
    taxi.update();
    assert_eq!(taxi.coin_power_frames, COIN_POWER_FRAMES - 1);
}

// ── Driver ───────────────────────────────────────────────────────────────────

#[test]
fn driver_enters_only_an_intact_taxi_in_reach() {
    let mut taxi = taxi_at(360.0, 600.0);

    let mut far = driver_at(360.0 + BOARDING_DISTANCE + 1.0, 600.0);
    assert!(!far.enter(&mut taxi));

    let mut near = driver_at(360.0 + BOARDING_DISTANCE, 600.0);
    taxi.health = 0.0;
    assert!(!near.enter(&mut taxi));

    taxi.health = TAXI_HEALTH;
    assert!(near.enter(&mut taxi));
    assert_eq!(near.current_taxi, Some(TaxiId(7)));
    assert_eq!(near.position, taxi.position);
    assert!(taxi.has_driver);
    assert!(!near.enter(&mut taxi));
}

#[test]
fn driver_exit_lands_beside_taxi_and_staggers() {
    let mut taxi = taxi_at(360.0, 600.0);
    let mut driver = driver_at(360.0, 600.0);
    driver.enter(&mut taxi);

    driver.exit(&mut taxi, -50.0);
    assert!(!driver.is_in_taxi());
    assert!(!taxi.has_driver);
    assert_eq!(driver.position, Point::new(310.0, 600.0));
    assert!(driver.impact.is_knocked_back());

    driver.update();
    assert_eq!(driver.position, Point::new(308.0, 602.0));
}

#[test]
fn exit_without_a_taxi_is_a_no_op() {
    let mut taxi = taxi_at(360.0, 600.0);
    let mut driver = driver_at(100.0, 100.0);
    driver.exit(&mut taxi, -50.0);
    assert_eq!(driver.position, Point::new(100.0, 100.0));
    assert!(driver.impact.is_idle());
}

#[test]
fn driver_walks_within_window() {
    let window = Window::default();
    let mut driver = driver_at(0.5, 300.0);
    driver.walk(&FrameInput::holding(&[Key::Left, Key::Down]), &window);
    assert_eq!(driver.position, Point::new(0.0, 301.0));
}

#[test]
fn seated_driver_does_not_walk() {
    let mut taxi = taxi_at(360.0, 600.0);
    let mut driver = driver_at(360.0, 600.0);
    driver.enter(&mut taxi);
    driver.walk(&FrameInput::holding(&[Key::Up]), &Window::default());
    assert_eq!(driver.position, Point::new(360.0, 600.0));
}

#[test]
fn driver_hit_by_car_is_pushed_away() {
    let mut driver = driver_at(300.0, 600.0);
    assert!(driver.handle_collision(&car_at(320.0, 610.0).contact()));
    assert_eq!(driver.health, DRIVER_HEALTH - CAR_DAMAGE);
    driver.update();
    assert_eq!(driver.position, Point::new(298.0, 598.0));
}

#[test]
fn invincible_driver_still_staggers() {
    let mut driver = driver_at(300.0, 600.0);
    driver.empower(PowerEffect::Invincibility);
    assert!(driver.handle_collision(&Contact::hazard(Point::new(310.0, 600.0), CAR_DAMAGE)));
    assert_eq!(driver.health, DRIVER_HEALTH);
    assert!(!driver.impact.is_idle());
}

#[test]
fn coin_means_nothing_to_driver() {
    let mut driver = driver_at(300.0, 600.0);
    driver.empower(PowerEffect::CoinPower);
    assert!(!driver.is_invincible());
}

// ── Passenger ────────────────────────────────────────────────────────────────

#[test]
fn priority_is_raised_once() {
    let mut p = passenger(3, true);
    assert!(p.increase_priority());
    assert_eq!(p.priority, 2);
    assert!(!p.increase_priority());
    assert_eq!(p.priority, 2);
}

#[test]
fn top_priority_cannot_rise() {
    let mut p = passenger(1, true);
    assert!(!p.increase_priority());
    assert_eq!(p.priority, 1);
}

#[test]
fn priority_is_clamped_on_construction() {
    assert_eq!(passenger(0, true).priority, 1);
    assert_eq!(passenger(9, true).priority, 3);
}

#[test]
fn rain_soaks_passengers_without_umbrella() {
    let mut wet = passenger(3, false);
    let mut dry = passenger(3, true);
    wet.apply_weather(WeatherKind::Raining);
    dry.apply_weather(WeatherKind::Raining);
    assert_eq!(wet.priority, 1);
    assert_eq!(dry.priority, 3);

    let mut sunny = passenger(3, false);
    sunny.apply_weather(WeatherKind::Sunny);
    assert_eq!(sunny.priority, 3);
}

#[test]
fn expected_earnings_follow_priority() {
    let rates = Settings::default().trip;
    let p = passenger(3, true);
    assert_eq!(p.expected_earnings(&rates), 200.0 * rates.per_y + rates.priority[2]);
}

#[test]
fn exposure_by_state() {
    let mut p = passenger(2, true);
    assert!(p.is_exposed());
    p.state = PassengerState::PickedUp;
    assert!(!p.is_exposed());
    p.state = PassengerState::DroppedOff;
    assert!(!p.is_exposed());
    p.state = PassengerState::FollowingDriver;
    assert!(p.is_exposed());
    assert!(p.is_walking());
}

#[test]
fn knocked_back_passenger_holds_still() {
    let mut p = passenger(2, true);
    p.handle_collision(&car_at(520.0, 310.0).contact());
    assert_eq!(p.health, PASSENGER_HEALTH - CAR_DAMAGE);
    let before = p.position;
    p.walk_toward(Point::new(0.0, 0.0));
    assert_eq!(p.position, before);
}

#[test]
fn passenger_ignores_power_ups() {
    let mut p = passenger(2, true);
    let coin = Coin::new(p.position, 30.0);
    assert!(!p.handle_collision(&coin.contact()));
    assert_eq!(p.health, PASSENGER_HEALTH);
}

// ── Traffic ──────────────────────────────────────────────────────────────────

#[test]
fn idle_car_drives_up_the_screen() {
    let mut car = car_at(480.0, 400.0);
    let mut rng = StepRng::new(0, 0);
    car.advance(5.0, &mut rng);
    assert_eq!(car.position.y, 402.0);
    assert_eq!(car.speed, 3.0);
}

#[test]
fn car_rerolls_speed_after_recovering() {
    let mut car = car_at(480.0, 400.0);
    car.handle_collision(&Contact::hazard(Point::new(480.0, 420.0), TAXI_DAMAGE));
    assert_eq!(car.health, CAR_HEALTH - TAXI_DAMAGE);

    let mut rng = StepRng::new(0, 0);
    for _ in 0..COLLISION_TIMEOUT - 1 {
        car.advance(0.0, &mut rng);
        assert_eq!(car.speed, 3.0);
    }
    car.advance(0.0, &mut rng);
    assert_eq!(car.speed, 2.0);
    assert!(car.impact.is_idle());
}

#[test]
fn two_hits_destroy_a_car() {
    let mut car = car_at(480.0, 400.0);
    car.take_damage(CAR_DAMAGE);
    assert!(!car.is_destroyed());
    car.take_damage(CAR_DAMAGE);
    assert!(car.is_destroyed());
}

#[test]
fn only_enemy_cars_fire() {
    let settings = FireballSettings::default();
    let mut always = StepRng::new(0, 0);

    assert!(car_at(360.0, 300.0).try_fire(&settings, &mut always).is_none());

    let enemy = Car::new(CarKind::Enemy, 1, Point::new(360.0, 300.0), 30.0, 3.0);
    let fireball = enemy.try_fire(&settings, &mut always).expect("fires");
    assert_eq!(fireball.position, enemy.position);

    let mut never = StepRng::new(u64::MAX, 0);
    assert!(enemy.try_fire(&settings, &mut never).is_none());
}

#[test]
fn fireball_flies_up() {
    let mut fireball = Fireball::new(Point::new(0.0, 100.0), &FireballSettings::default());
    fireball.advance();
    assert_eq!(fireball.position.y, 93.0);
    assert_eq!(fireball.contact().damage, Some(FIREBALL_DAMAGE));
}

// ── Pickups and effects ──────────────────────────────────────────────────────

#[test]
fn coin_is_collected_once() {
    let mut taxi = driven_taxi();
    let mut coin = Coin::new(taxi.position, 30.0);
    coin.apply_effect(&mut taxi);
    assert!(taxi.has_coin_power());
    assert!(!coin.is_active());

    taxi.coin_power_frames = 0;
    coin.apply_effect(&mut taxi);
    assert!(!taxi.has_coin_power());
    assert!(!coin.handle_collision(&taxi.contact()));
}

#[test]
fn invincible_power_contact_carries_its_effect() {
    let power = InvinciblePower::new(Point::new(1.0, 2.0), 30.0);
    let contact = power.contact();
    assert_eq!(contact.power, Some(PowerEffect::Invincibility));
    assert_eq!(contact.damage, None);
}

#[test]
fn effect_expires_after_its_frames() {
    let mut effect = CollisionEffect::new(EffectKind::Smoke, Point::default());
    for _ in 0..EFFECT_FRAMES - 1 {
        assert!(effect.tick());
    }
    assert!(!effect.tick());
    assert!(!effect.tick());
}

#[test]
fn flag_starts_hidden() {
    let mut flag = TripEndFlag::new(Point::new(500.0, 100.0), 30.0);
    assert!(!flag.visible);
    flag.scroll(5.0);
    assert_eq!(flag.position.y, 105.0);
}
