//! Game orchestration: the screen state machine and the per-frame
//! simulation.
//!
//! Every public function takes the current [`GameState`] by reference and
//! returns the next one. Side effects are limited to the injected RNG and,
//! when a game ends, the injected score store.

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::collision;
use crate::config::{Settings, Window};
use crate::entities::{
    Car, Coin, CollisionEffect, Driver, Fireball, InvinciblePower, Passenger, PassengerId,
    PassengerState, Taxi, TaxiId, TripEndFlag, PASSENGER_HEALTH,
};
use crate::geometry::{Point, Step};
use crate::input::{Controls, Key};
use crate::level::Level;
use crate::scores::{top_scores, ScoreEntry, ScoreStore, TOP_SCORES};
use crate::spawn;
use crate::trip::{self, TripSummary};
use crate::weather::{self, WeatherKind};

/// A waiting passenger notices a stopped taxi this close.
pub const PICKUP_DISTANCE: f64 = 100.0;
/// A walking passenger climbs in this close.
pub const ENTER_DISTANCE: f64 = 5.0;
/// A passenger walking to the flag has arrived this close.
pub const DROP_OFF_DISTANCE: f64 = 1.0;
/// Where occupants land, relative to a wrecked taxi's x.
pub const PASSENGER_EJECT_OFFSET: f64 = -100.0;
pub const DRIVER_EJECT_OFFSET: f64 = -50.0;
/// Background tiles wrap once they pass this many window heights.
const BACKGROUND_WRAP: f64 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Home,
    PlayerInfo,
    Gameplay,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub screen: Screen,
    pub player_name: String,
    pub frame: u32,
    pub score: f64,
    pub is_win: bool,
    pub last_trip: Option<TripSummary>,
    pub weather: WeatherKind,
    /// Centre y of the two stacked background tiles.
    pub background: [f64; 2],
    pub taxi: Taxi,
    /// Previous taxi, kept for drawing until it scrolls away.
    pub wreck: Option<Taxi>,
    pub driver: Driver,
    pub passengers: Vec<Passenger>,
    /// Paired with `passengers` by index.
    pub flags: Vec<TripEndFlag>,
    /// Traffic and enemy traffic.
    pub cars: Vec<Car>,
    pub fireballs: Vec<Fireball>,
    pub coins: Vec<Coin>,
    pub invincible_powers: Vec<InvinciblePower>,
    pub effects: Vec<CollisionEffect>,
    /// Filled on entering the end screen.
    pub high_scores: Vec<ScoreEntry>,
    pub level: Arc<Level>,
    pub next_taxi_id: u32,
}

// ── Constructors ─────────────────────────────────────────────────────────────

impl GameState {
    /// Fresh game on the home screen.
    pub fn new(level: Arc<Level>, settings: &Settings) -> GameState {
        let height = settings.window.height;
        GameState {
            screen: Screen::Home,
            player_name: String::new(),
            frame: 0,
            score: 0.0,
            is_win: false,
            last_trip: None,
            weather: WeatherKind::default(),
            background: [height / 2.0, -height / 2.0],
            taxi: Taxi::new(TaxiId(0), level.taxi, &settings.taxi),
            wreck: None,
            driver: Driver::new(level.driver, &settings.driver),
            passengers: level
                .passengers
                .iter()
                .map(|row| {
                    Passenger::new(
                        row.position,
                        row.priority,
                        row.destination_x,
                        row.vertical_distance,
                        row.has_umbrella,
                        &settings.passenger,
                    )
                })
                .collect(),
            flags: level
                .passengers
                .iter()
                .map(|row| TripEndFlag::new(row.flag_position(), settings.trip_end_flag.radius))
                .collect(),
            cars: Vec::new(),
            fireballs: Vec::new(),
            coins: level
                .coins
                .iter()
                .map(|&p| Coin::new(p, settings.coin.radius))
                .collect(),
            invincible_powers: level
                .invincible_powers
                .iter()
                .map(|&p| InvinciblePower::new(p, settings.invincible_power.radius))
                .collect(),
            effects: Vec::new(),
            high_scores: Vec::new(),
            level,
            next_taxi_id: 1,
        }
    }

    pub fn current_passenger(&self) -> Option<&Passenger> {
        self.taxi
            .current_passenger
            .and_then(|PassengerId(i)| self.passengers.get(i))
    }

    /// The carried passenger's health, or the lowest across everyone when
    /// the taxi is empty.
    pub fn min_passenger_health(&self) -> f64 {
        match self.current_passenger() {
            Some(p) => p.health,
            None => self
                .passengers
                .iter()
                .map(|p| p.health)
                .fold(PASSENGER_HEALTH, f64::min),
        }
    }

    pub fn remaining_frames(&self, settings: &Settings) -> u32 {
        settings.gameplay.max_frames.saturating_sub(self.frame)
    }
}

/// Back to the home screen with everything rebuilt from the level.
pub fn reset(state: &GameState, settings: &Settings) -> GameState {
    GameState::new(Arc::clone(&state.level), settings)
}

// ── Screen state machine ─────────────────────────────────────────────────────

/// Advance whichever screen is showing by one frame.
pub fn step<C, R, S>(
    state: &GameState,
    settings: &Settings,
    input: &C,
    rng: &mut R,
    scores: &mut S,
) -> GameState
where
    C: Controls + ?Sized,
    R: Rng + ?Sized,
    S: ScoreStore + ?Sized,
{
    match state.screen {
        Screen::Home => home(state, input),
        Screen::PlayerInfo => player_info(state, input),
        Screen::Gameplay => {
            let next = tick(state, settings, input, rng);
            if next.screen == Screen::End {
                record_score(next, scores)
            } else {
                next
            }
        }
        Screen::End => {
            if input.was_pressed(Key::Space) {
                info!("restarting");
                reset(state, settings)
            } else {
                state.clone()
            }
        }
    }
}

pub fn home<C: Controls + ?Sized>(state: &GameState, input: &C) -> GameState {
    if !input.was_pressed(Key::Enter) {
        return state.clone();
    }
    GameState { screen: Screen::PlayerInfo, ..state.clone() }
}

/// Name entry: letters append, Backspace deletes, Enter starts once the
/// name is non-empty.
pub fn player_info<C: Controls + ?Sized>(state: &GameState, input: &C) -> GameState {
    let mut player_name = state.player_name.clone();
    player_name.extend(input.typed().into_iter().filter(char::is_ascii_alphabetic));
    if input.was_pressed(Key::Backspace) {
        player_name.pop();
    }

    let screen = if input.was_pressed(Key::Enter) && !player_name.is_empty() {
        info!(player = %player_name, "game started");
        Screen::Gameplay
    } else {
        Screen::PlayerInfo
    };
    GameState { screen, player_name, ..state.clone() }
}

fn record_score<S: ScoreStore + ?Sized>(mut state: GameState, scores: &mut S) -> GameState {
    let entry = ScoreEntry::new(state.player_name.clone(), state.score);
    if let Err(e) = scores.append(&entry) {
        warn!("could not save score: {e}");
    }
    state.high_scores = match scores.load() {
        Ok(entries) => top_scores(entries, TOP_SCORES),
        Err(e) => {
            warn!("could not read scores: {e}");
            vec![entry]
        }
    };
    state
}

// ── Per-frame tick (nearly pure, RNG is injected) ────────────────────────────

/// Advance gameplay by one frame.
pub fn tick<C, R>(state: &GameState, settings: &Settings, input: &C, rng: &mut R) -> GameState
where
    C: Controls + ?Sized,
    R: Rng + ?Sized,
{
    let mut next = state.clone();
    next.frame += 1;

    // ── 1. Weather ───────────────────────────────────────────────────────────
    if let Some(kind) = weather::resolve(&next.level.weather, next.frame) {
        next.weather = kind;
    }

    // ── 2. Background ────────────────────────────────────────────────────────
    let scroll = if input.is_down(Key::Up) { settings.gameplay.scroll_speed } else { 0.0 };
    scroll_background(&mut next.background, scroll, settings.window.height);

    // ── 3. Movement ──────────────────────────────────────────────────────────
    move_entities(&mut next, settings, input, scroll, rng);
    board_or_replace_taxi(&mut next, settings, rng);

    // ── 4. Spawning ──────────────────────────────────────────────────────────
    if spawn::chance(rng, spawn::CAR_CHANCE) {
        next.cars.push(spawn::spawn_car(rng, settings));
    }
    if spawn::chance(rng, spawn::ENEMY_CAR_CHANCE) {
        next.cars.push(spawn::spawn_enemy_car(rng, settings));
    }

    // ── 5. Collisions ────────────────────────────────────────────────────────
    if collision::resolve(&mut next).taxi_wrecked {
        eject_occupants(&mut next);
    }

    // ── 6. Pickup and drop-off ───────────────────────────────────────────────
    handle_pickup(&mut next);
    handle_drop_off(&mut next, settings);

    // ── 7. End conditions ────────────────────────────────────────────────────
    check_end(&mut next, settings);
    next
}

pub fn scroll_background(tiles: &mut [f64; 2], scroll: f64, height: f64) {
    if scroll == 0.0 {
        return;
    }
    tiles[0] += scroll;
    tiles[1] += scroll;
    if tiles[0] >= height * BACKGROUND_WRAP {
        tiles[0] = tiles[1] - height;
    }
    if tiles[1] >= height * BACKGROUND_WRAP {
        tiles[1] = tiles[0] - height;
    }
}

fn in_play_area(position: Point, window: &Window) -> bool {
    position.y >= -window.height && position.y <= window.height * 2.0
}

fn move_entities<C, R>(next: &mut GameState, settings: &Settings, input: &C, scroll: f64, rng: &mut R)
where
    C: Controls + ?Sized,
    R: Rng + ?Sized,
{
    let window = &settings.window;

    next.taxi.steer(input, window.width);
    next.taxi.scroll(scroll);
    next.taxi.update();

    if let Some(wreck) = next.wreck.as_mut() {
        wreck.scroll(scroll);
    }
    if next.wreck.as_ref().is_some_and(|w| w.position.y - w.radius > window.height) {
        debug!("wreck left the road");
        next.wreck = None;
    }

    next.driver.walk(input, window);
    next.driver.update();
    if next.driver.is_in_taxi() {
        next.driver.position = next.taxi.position;
    }

    let driver_position = next.driver.position;
    let taxi_position = next.taxi.position;
    for passenger in next.passengers.iter_mut() {
        passenger.update();
        match passenger.state {
            PassengerState::FollowingDriver => {
                passenger.walk_toward(driver_position);
            }
            PassengerState::PickedUp => passenger.position = taxi_position,
            _ => passenger.scroll(scroll),
        }
        passenger.apply_weather(next.weather);
    }

    let mut fired = Vec::new();
    for car in next.cars.iter_mut() {
        car.advance(scroll, rng);
        fired.extend(car.try_fire(&settings.fireball, rng));
    }
    next.fireballs.extend(fired);

    next.coins.iter_mut().for_each(|c| c.scroll(scroll));
    next.invincible_powers.iter_mut().for_each(|p| p.scroll(scroll));
    next.flags.iter_mut().for_each(|f| f.scroll(scroll));
    next.fireballs.iter_mut().for_each(Fireball::advance);
    next.effects.iter_mut().for_each(|e| e.scroll(scroll));

    next.cars.retain(|c| in_play_area(c.position, window));
    next.fireballs.retain(|f| in_play_area(f.position, window));
    next.effects.retain_mut(CollisionEffect::tick);
}

/// Driver on foot climbs into an intact taxi within reach, bringing along
/// any passenger who was following. A wrecked taxi with nobody aboard is
/// replaced by a fresh one further up the road.
fn board_or_replace_taxi<R: Rng + ?Sized>(next: &mut GameState, settings: &Settings, rng: &mut R) {
    if next.driver.enter(&mut next.taxi) {
        info!(taxi = next.taxi.id.0, "driver boarded taxi");
        if let Some(i) = next.passengers.iter().position(Passenger::is_following_driver) {
            next.passengers[i].state = PassengerState::PickedUp;
            next.passengers[i].position = next.taxi.position;
            next.taxi.current_passenger = Some(PassengerId(i));
        }
    }

    if next.taxi.is_damaged() && !next.driver.is_in_taxi() {
        let id = TaxiId(next.next_taxi_id);
        next.next_taxi_id += 1;
        let fresh = spawn::spawn_taxi(rng, settings, id);
        info!(taxi = id.0, x = fresh.position.x, y = fresh.position.y, "replacement taxi");
        next.wreck = Some(std::mem::replace(&mut next.taxi, fresh));
    }
}

/// The taxi just wrecked: passenger and driver are put out on the road.
pub fn eject_occupants(next: &mut GameState) {
    let taxi = &mut next.taxi;
    if let Some(PassengerId(i)) = taxi.drop_off() {
        if let Some(passenger) = next.passengers.get_mut(i) {
            passenger.state = PassengerState::FollowingDriver;
            passenger.position = taxi.position.offset(PASSENGER_EJECT_OFFSET, 0.0);
        }
    }
    next.driver.exit(taxi, DRIVER_EJECT_OFFSET);
}

// ── Pickup / drop-off ────────────────────────────────────────────────────────

fn handle_pickup(next: &mut GameState) {
    let taxi = &mut next.taxi;
    if taxi.current_passenger.is_none() && !taxi.moving && taxi.has_driver {
        for (i, passenger) in next.passengers.iter_mut().enumerate() {
            let distance = taxi.position.distance_to(passenger.position);
            if distance > PICKUP_DISTANCE {
                continue;
            }
            match passenger.state {
                PassengerState::Waiting => {
                    passenger.state = PassengerState::WalkingToTaxi { target: taxi.position };
                }
                PassengerState::WalkingToTaxi { .. } if distance <= ENTER_DISTANCE => {
                    if taxi.pickup(PassengerId(i)) {
                        passenger.state = PassengerState::PickedUp;
                        if let Some(flag) = next.flags.get_mut(i) {
                            flag.visible = true;
                        }
                        info!(passenger = i, priority = passenger.priority, "passenger picked up");
                        break;
                    }
                }
                _ => {}
            }
        }
    }

    for passenger in next.passengers.iter_mut() {
        if let PassengerState::WalkingToTaxi { target } = passenger.state {
            if let Step::Arrived(_) = passenger.walk_toward(target) {
                if passenger.position.distance_to(taxi.position) > ENTER_DISTANCE {
                    passenger.state = PassengerState::Waiting;
                }
            }
        }
    }
}

fn handle_drop_off(next: &mut GameState, settings: &Settings) {
    if let Some(PassengerId(i)) = next.taxi.current_passenger {
        let ready = next.flags.get(i).is_some_and(|flag| next.taxi.can_drop_off(flag));
        if ready {
            next.taxi.drop_off();
            if let Some(passenger) = next.passengers.get_mut(i) {
                passenger.state = PassengerState::WalkingToDestination;
            }
        }
    }

    let taxi_y = next.taxi.position.y;
    for (i, passenger) in next.passengers.iter_mut().enumerate() {
        if passenger.state != PassengerState::WalkingToDestination {
            continue;
        }
        let Some(flag) = next.flags.get_mut(i) else {
            continue;
        };
        passenger.walk_toward(flag.position);
        if passenger.position.distance_to(flag.position) >= DROP_OFF_DISTANCE {
            continue;
        }

        passenger.position = flag.position;
        passenger.state = PassengerState::DroppedOff;
        flag.visible = false;

        let expected = passenger.expected_earnings(&settings.trip);
        let penalty = trip::penalty(flag.position.y, taxi_y, &settings.trip);
        let fare = trip::fare(expected, penalty);
        next.score += fare;
        next.last_trip = Some(TripSummary { expected, priority: passenger.priority, fare });
        info!(passenger = i, fare, score = next.score, "trip completed");
    }
}

// ── End conditions ───────────────────────────────────────────────────────────

/// Driver on foot has fallen behind a taxi that already left the screen.
fn stranded(state: &GameState, window: &Window) -> bool {
    !state.driver.is_in_taxi()
        && state.taxi.position.y >= window.height
        && state.driver.position.y < state.taxi.position.y
}

fn check_end(next: &mut GameState, settings: &Settings) {
    let gameplay = &settings.gameplay;
    if next.score >= gameplay.target_score {
        next.is_win = true;
    } else if next.frame >= gameplay.max_frames
        || next.driver.health <= 0.0
        || next.min_passenger_health() <= 0.0
        || stranded(next, &settings.window)
    {
        next.is_win = false;
    } else {
        return;
    }
    next.screen = Screen::End;
    info!(won = next.is_win, score = next.score, frame = next.frame, "game over");
}
