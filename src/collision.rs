//! The per-frame collision pass.
//!
//! Every pair class is checked independently by brute force. Each side of a
//! pair reacts only to the [`Contact`](crate::capability::Contact) the other side exposes, so the same
//! entity code handles cars, fireballs and power-ups alike.

use tracing::{debug, info};

use crate::capability::{Body, Collidable, Damageable, PowerUp};
use crate::compute::GameState;
use crate::entities::{Car, CollisionEffect, EffectKind, Passenger, PassengerId};
use crate::geometry::Point;

/// Outcome of one collision pass that the caller has to act on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Collisions {
    /// The active taxi crossed into the damaged state this frame.
    pub taxi_wrecked: bool,
}

/// Both sides react to each other. Returns which side registered a hit.
pub fn exchange<A, B>(a: &mut A, b: &mut B) -> (bool, bool)
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    if !a.collides_with(&*b) {
        return (false, false);
    }
    let (a_contact, b_contact) = (a.contact(), b.contact());
    (a.handle_collision(&b_contact), b.handle_collision(&a_contact))
}

/// Only `target` reacts; `source` is untouched.
pub fn strike<T, S>(target: &mut T, source: &S) -> bool
where
    T: Collidable + ?Sized,
    S: Collidable + ?Sized,
{
    target.collides_with(source) && target.handle_collision(&source.contact())
}

fn effect(effects: &mut Vec<CollisionEffect>, kind: EffectKind, at: Point) {
    effects.push(CollisionEffect::new(kind, at));
}

pub fn resolve(state: &mut GameState) -> Collisions {
    let was_damaged = state.taxi.is_damaged();

    taxi_pass(state);
    fireball_pass(state);
    driver_pass(state);
    passenger_pass(state);
    traffic_pass(&mut state.cars, &mut state.effects);

    let taxi_wrecked = !was_damaged && state.taxi.is_damaged();
    if taxi_wrecked {
        info!(taxi = state.taxi.id.0, "taxi wrecked");
        effect(&mut state.effects, EffectKind::Fire, state.taxi.position);
    }
    Collisions { taxi_wrecked }
}

// ── Taxi ─────────────────────────────────────────────────────────────────────

fn taxi_pass(state: &mut GameState) {
    let taxi = &mut state.taxi;
    if taxi.is_damaged() {
        return;
    }

    for car in state.cars.iter_mut() {
        if !taxi.collides_with(&*car) {
            continue;
        }
        let (taxi_hit, car_hit) = exchange(taxi, car);
        if taxi_hit || car_hit {
            debug!(health = taxi.health, "taxi hit by {:?} car", car.kind);
            effect(&mut state.effects, EffectKind::Smoke, taxi.position);
        }
    }

    for coin in state.coins.iter_mut() {
        if !coin.is_active() || !taxi.collides_with(&*coin) {
            continue;
        }
        let (collected, _) = exchange(taxi, coin);
        if !collected {
            continue;
        }
        if let Some(PassengerId(i)) = taxi.current_passenger {
            if let Some(passenger) = state.passengers.get_mut(i) {
                if passenger.increase_priority() {
                    debug!(passenger = i, priority = passenger.priority, "priority raised");
                }
            }
        }
    }
    state.coins.retain(|c| c.is_active());

    for power in state.invincible_powers.iter_mut() {
        if power.is_active() && taxi.collides_with(&*power) {
            exchange(taxi, power);
        }
    }
    state.invincible_powers.retain(|p| p.is_active());
}

// ── Fireballs ────────────────────────────────────────────────────────────────

/// Fireball-centric: each fireball hits the first thing it overlaps, in the
/// order taxi, driver on foot, passengers in the street. A hit spends it.
fn fireball_pass(state: &mut GameState) {
    let fireballs = std::mem::take(&mut state.fireballs);
    for mut fireball in fireballs {
        let hit = fireball.contact();
        let target = if !state.taxi.is_damaged() && state.taxi.collides_with(&fireball) {
            state.taxi.handle_collision(&hit);
            effect(&mut state.effects, EffectKind::Smoke, state.taxi.position);
            Some(state.taxi.contact())
        } else if !state.driver.is_in_taxi() && state.driver.collides_with(&fireball) {
            state.driver.handle_collision(&hit);
            effect(&mut state.effects, EffectKind::Blood, state.driver.position);
            Some(state.driver.contact())
        } else if let Some(p) = state
            .passengers
            .iter_mut()
            .find(|p| p.is_exposed() && p.collides_with(&fireball))
        {
            p.handle_collision(&hit);
            effect(&mut state.effects, EffectKind::Blood, p.position);
            Some(p.contact())
        } else {
            None
        };

        match target {
            Some(contact) if fireball.handle_collision(&contact) => {}
            _ => state.fireballs.push(fireball),
        }
    }
}

// ── People on foot ───────────────────────────────────────────────────────────

fn driver_pass(state: &mut GameState) {
    let driver = &mut state.driver;
    if driver.is_in_taxi() {
        return;
    }

    for car in &state.cars {
        if strike(driver, car) {
            debug!(health = driver.health, "driver hit");
            effect(&mut state.effects, EffectKind::Blood, driver.position);
        }
    }

    for power in state.invincible_powers.iter_mut() {
        if power.is_active() && driver.collides_with(&*power) {
            exchange(driver, power);
        }
    }
    state.invincible_powers.retain(|p| p.is_active());
}

fn passenger_pass(state: &mut GameState) {
    for passenger in state.passengers.iter_mut().filter(|p| p.is_exposed()) {
        hit_by_traffic(passenger, &state.cars, &mut state.effects);
    }
}

fn hit_by_traffic(passenger: &mut Passenger, cars: &[Car], effects: &mut Vec<CollisionEffect>) {
    for car in cars {
        if strike(passenger, car) {
            effect(effects, EffectKind::Blood, passenger.position);
        }
    }
}

// ── Traffic ──────────────────────────────────────────────────────────────────

/// Car against car, each unordered pair once, then clear the wrecks.
pub fn traffic_pass(cars: &mut Vec<Car>, effects: &mut Vec<CollisionEffect>) {
    for i in 0..cars.len() {
        let (head, tail) = cars.split_at_mut(i + 1);
        let first = &mut head[i];
        for second in tail.iter_mut() {
            let (a, b) = exchange(first, second);
            if a || b {
                effect(effects, EffectKind::Smoke, first.position);
            }
        }
    }

    cars.retain(|car| {
        if car.is_destroyed() {
            debug!(kind = ?car.kind, "car destroyed");
            effects.push(CollisionEffect::new(EffectKind::Fire, car.position));
            return false;
        }
        true
    });
}
