//! Rendering layer.
//!
//! Each function receives a [`Canvas`] and an immutable view of the game
//! state. No game logic is performed; this module only translates a state
//! snapshot into sprite and text draw calls. The canvas decides what a
//! sprite looks like.

use crate::compute::{GameState, Screen};
use crate::config::Settings;
use crate::entities::{CarKind, EffectKind, Passenger, PassengerState};
use crate::geometry::Point;
use crate::weather::WeatherKind;

/// Every image the game draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    HomeBackground,
    PlayerInfoBackground,
    EndBackground,
    Road(WeatherKind),
    Taxi,
    DamagedTaxi,
    Driver,
    Passenger,
    Umbrella,
    /// Traffic paint job, 1-based.
    Car(u8),
    EnemyCar,
    Fireball,
    Coin,
    InvinciblePower,
    TripEndFlag,
    Smoke,
    Fire,
    Blood,
}

/// Font role; the canvas maps each to a size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextStyle {
    Title,
    Instruction,
    Hud,
    Info,
    EndStatus,
}

impl TextStyle {
    /// Nominal font size in window pixels.
    pub fn size(self) -> f64 {
        match self {
            TextStyle::Title => 64.0,
            TextStyle::Instruction => 24.0,
            TextStyle::Hud => 24.0,
            TextStyle::Info => 20.0,
            TextStyle::EndStatus => 40.0,
        }
    }
}

pub trait Canvas {
    /// Drawable area in window pixels.
    fn size(&self) -> (f64, f64);
    fn draw_sprite(&mut self, sprite: Sprite, at: Point);
    /// `at` is the left end of the text baseline.
    fn draw_text(&mut self, text: &str, at: Point, style: TextStyle);

    fn text_width(&self, text: &str, style: TextStyle) -> f64 {
        text.chars().count() as f64 * style.size() * 0.5
    }
}

// ── Public entry point ───────────────────────────────────────────────────────

/// Draw one complete frame of whichever screen is showing.
pub fn render<C: Canvas + ?Sized>(canvas: &mut C, state: &GameState, settings: &Settings) {
    match state.screen {
        Screen::Home => draw_home(canvas, settings),
        Screen::PlayerInfo => draw_player_info(canvas, state, settings),
        Screen::Gameplay => {
            draw_world(canvas, state, settings);
            draw_hud(canvas, state, settings);
        }
        Screen::End => draw_end(canvas, state, settings),
    }
}

fn centre<C: Canvas + ?Sized>(canvas: &mut C, text: &str, y: f64, style: TextStyle) {
    let (width, _) = canvas.size();
    let x = (width - canvas.text_width(text, style)) / 2.0;
    canvas.draw_text(text, Point::new(x, y), style);
}

/// Multi-line messages are split on `\n`, one line-height apart.
fn centre_lines<C: Canvas + ?Sized>(
    canvas: &mut C,
    text: &str,
    y: f64,
    line_height: f64,
    style: TextStyle,
) {
    for (i, line) in text.lines().enumerate() {
        centre(canvas, line, y + i as f64 * line_height, style);
    }
}

fn backdrop<C: Canvas + ?Sized>(canvas: &mut C, sprite: Sprite) {
    let (width, height) = canvas.size();
    canvas.draw_sprite(sprite, Point::new(width / 2.0, height / 2.0));
}

// ── Menus ────────────────────────────────────────────────────────────────────

fn draw_home<C: Canvas + ?Sized>(canvas: &mut C, settings: &Settings) {
    let (layout, messages) = (&settings.layout, &settings.messages);
    backdrop(canvas, Sprite::HomeBackground);
    centre(canvas, &messages.home_title, layout.home_title_y, TextStyle::Title);
    centre_lines(
        canvas,
        &messages.home_instruction,
        layout.home_instruction_y,
        layout.line_height,
        TextStyle::Instruction,
    );
}

fn draw_player_info<C: Canvas + ?Sized>(canvas: &mut C, state: &GameState, settings: &Settings) {
    let (layout, messages) = (&settings.layout, &settings.messages);
    backdrop(canvas, Sprite::PlayerInfoBackground);
    centre(canvas, &messages.player_name, layout.player_name_y, TextStyle::Instruction);
    centre(canvas, &state.player_name, layout.player_name_input_y, TextStyle::Instruction);
    centre_lines(
        canvas,
        &messages.player_start,
        layout.player_start_y,
        layout.line_height,
        TextStyle::Instruction,
    );
}

fn draw_end<C: Canvas + ?Sized>(canvas: &mut C, state: &GameState, settings: &Settings) {
    let (layout, messages) = (&settings.layout, &settings.messages);
    backdrop(canvas, Sprite::EndBackground);

    let status = if state.is_win { &messages.won } else { &messages.lost };
    centre_lines(canvas, status, layout.end_status_y, layout.line_height, TextStyle::EndStatus);

    centre(canvas, &messages.highest_scores, layout.end_scores_y, TextStyle::Instruction);
    for (i, entry) in state.high_scores.iter().enumerate() {
        let y = layout.end_scores_y + (i + 1) as f64 * layout.line_height;
        centre(canvas, &entry.label(), y, TextStyle::Instruction);
    }

    let (_, height) = canvas.size();
    centre(canvas, &messages.end_continue, height - layout.line_height, TextStyle::Info);
}

// ── World ────────────────────────────────────────────────────────────────────

fn draw_world<C: Canvas + ?Sized>(canvas: &mut C, state: &GameState, settings: &Settings) {
    let (width, _) = canvas.size();
    for &y in &state.background {
        canvas.draw_sprite(Sprite::Road(state.weather), Point::new(width / 2.0, y));
    }

    for flag in state.flags.iter().filter(|f| f.visible) {
        canvas.draw_sprite(Sprite::TripEndFlag, flag.position);
    }
    for coin in &state.coins {
        canvas.draw_sprite(Sprite::Coin, coin.position);
    }
    for power in &state.invincible_powers {
        canvas.draw_sprite(Sprite::InvinciblePower, power.position);
    }

    for passenger in state.passengers.iter().filter(|p| !p.is_picked_up()) {
        draw_passenger(canvas, passenger, settings);
    }

    if let Some(wreck) = &state.wreck {
        canvas.draw_sprite(Sprite::DamagedTaxi, wreck.position);
    }
    let taxi_sprite = if state.taxi.is_damaged() { Sprite::DamagedTaxi } else { Sprite::Taxi };
    canvas.draw_sprite(taxi_sprite, state.taxi.position);
    if !state.driver.is_in_taxi() {
        canvas.draw_sprite(Sprite::Driver, state.driver.position);
    }

    for car in &state.cars {
        let sprite = match car.kind {
            CarKind::Traffic => Sprite::Car(car.variant),
            CarKind::Enemy => Sprite::EnemyCar,
        };
        canvas.draw_sprite(sprite, car.position);
    }
    for fireball in &state.fireballs {
        canvas.draw_sprite(Sprite::Fireball, fireball.position);
    }

    for effect in &state.effects {
        let sprite = match effect.kind {
            EffectKind::Smoke => Sprite::Smoke,
            EffectKind::Fire => Sprite::Fire,
            EffectKind::Blood => Sprite::Blood,
        };
        canvas.draw_sprite(sprite, effect.position);
    }
}

/// Waiting passengers advertise their priority and fare beside them.
fn draw_passenger<C: Canvas + ?Sized>(canvas: &mut C, passenger: &Passenger, settings: &Settings) {
    canvas.draw_sprite(Sprite::Passenger, passenger.position);
    if passenger.has_umbrella {
        canvas.draw_sprite(Sprite::Umbrella, passenger.position.offset(0.0, -passenger.radius));
    }
    if matches!(passenger.state, PassengerState::Waiting | PassengerState::WalkingToTaxi { .. }) {
        let p = passenger.position;
        canvas.draw_text(
            &passenger.priority.to_string(),
            p.offset(-30.0, 0.0),
            TextStyle::Info,
        );
        canvas.draw_text(
            &format!("{:.1}", passenger.expected_earnings(&settings.trip)),
            p.offset(-100.0, 0.0),
            TextStyle::Info,
        );
    }
}

// ── HUD ──────────────────────────────────────────────────────────────────────

/// HUD text for the current frame, paired with where it goes. Kept separate
/// from drawing so the wording can be checked without a canvas.
pub fn hud_lines(state: &GameState, settings: &Settings) -> Vec<(String, Point)> {
    let (layout, messages) = (&settings.layout, &settings.messages);
    let mut lines = vec![
        (format!("{}{:.2}", messages.earnings, state.score), layout.earnings),
        (format!("{}{:.2}", messages.target, settings.gameplay.target_score), layout.target),
        (
            format!("{}{}", messages.remaining_frames, state.remaining_frames(settings)),
            layout.remaining_frames,
        ),
        (format!("{}{:.2}", messages.taxi_health, state.taxi.health), layout.taxi_health),
        (format!("{}{:.2}", messages.driver_health, state.driver.health), layout.driver_health),
        (
            format!("{}{:.2}", messages.passenger_health, state.min_passenger_health()),
            layout.passenger_health,
        ),
    ];
    if state.taxi.has_coin_power() {
        lines.push((state.taxi.coin_power_frames.to_string(), layout.coin_power));
    }

    let trip = match (state.current_passenger(), &state.last_trip) {
        (Some(p), _) => vec![
            messages.ongoing_trip.clone(),
            format!("{} {:.1}", messages.expected_earning, p.expected_earnings(&settings.trip)),
            format!("{} {}", messages.priority, p.priority),
        ],
        (None, Some(summary)) => summary.lines(messages),
        (None, None) => Vec::new(),
    };
    for (i, text) in trip.into_iter().enumerate() {
        let at = layout.trip_info.offset(0.0, i as f64 * layout.line_height);
        lines.push((text, at));
    }
    lines
}

fn draw_hud<C: Canvas + ?Sized>(canvas: &mut C, state: &GameState, settings: &Settings) {
    for (text, at) in hud_lines(state, settings) {
        canvas.draw_text(&text, at, TextStyle::Hud);
    }
}
