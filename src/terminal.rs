//! Terminal host: crossterm implementations of [`Canvas`] and [`Controls`].
//!
//! World coordinates are scaled onto the terminal grid, one glyph per
//! sprite.

use std::collections::{HashMap, HashSet};
use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::display::{Canvas, Sprite, TextStyle};
use crate::geometry::Point;
use crate::input::{Controls, Key};
use crate::weather::WeatherKind;

// ── Input ────────────────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events.
pub const HOLD_WINDOW: u64 = 4;

fn key_for(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

/// Keyboard state rebuilt from the terminal's event stream.
///
/// Terminals with keyboard enhancement send proper `Release` events and keys
/// drop out immediately. Classic terminals only repeat `Press`, so a key
/// expires after [`HOLD_WINDOW`] frames of silence.
#[derive(Debug, Default)]
pub struct KeyState {
    frame: u64,
    /// Each held key → the frame it was last seen (press or repeat).
    key_frame: HashMap<Key, u64>,
    pressed: HashSet<Key>,
    typed: Vec<char>,
    interrupted: bool,
}

impl KeyState {
    pub fn new() -> Self {
        KeyState::default()
    }

    /// Start a new frame: forget last frame's presses and typing.
    pub fn begin_frame(&mut self) {
        self.frame += 1;
        self.pressed.clear();
        self.typed.clear();
    }

    pub fn handle(&mut self, event: &Event) {
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = *event else {
            return;
        };
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.interrupted = true;
            return;
        }

        match kind {
            KeyEventKind::Press => {
                if let KeyCode::Char(c) = code {
                    self.typed.push(c);
                }
                if let Some(key) = key_for(code) {
                    self.key_frame.insert(key, self.frame);
                    self.pressed.insert(key);
                }
            }
            KeyEventKind::Repeat => {
                if let Some(key) = key_for(code) {
                    self.key_frame.insert(key, self.frame);
                }
            }
            KeyEventKind::Release => {
                if let Some(key) = key_for(code) {
                    self.key_frame.remove(&key);
                }
            }
        }
    }

    /// Ctrl-C was seen.
    pub fn interrupted(&self) -> bool {
        self.interrupted
    }
}

impl Controls for KeyState {
    fn is_down(&self, key: Key) -> bool {
        self.key_frame
            .get(&key)
            .is_some_and(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
    }

    fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn typed(&self) -> Vec<char> {
        self.typed.clone()
    }
}

// ── Colour palette ───────────────────────────────────────────────────────────

const C_TAXI: Color = Color::Yellow;
const C_WRECK: Color = Color::DarkGrey;
const C_DRIVER: Color = Color::White;
const C_PASSENGER: Color = Color::Cyan;
const C_CAR: Color = Color::Blue;
const C_ENEMY: Color = Color::Red;
const C_FIREBALL: Color = Color::DarkYellow;
const C_PICKUP: Color = Color::Green;
const C_FLAG: Color = Color::Magenta;
const C_RAIN: Color = Color::DarkBlue;
const C_TEXT: Color = Color::White;
const C_HUD: Color = Color::Yellow;

fn glyph(sprite: Sprite) -> Option<(&'static str, Color)> {
    let g = match sprite {
        Sprite::HomeBackground
        | Sprite::PlayerInfoBackground
        | Sprite::EndBackground
        | Sprite::Road(WeatherKind::Sunny) => return None,
        Sprite::Road(WeatherKind::Raining) => ("╎", C_RAIN),
        Sprite::Taxi => ("▣", C_TAXI),
        Sprite::DamagedTaxi => ("▣", C_WRECK),
        Sprite::Driver => ("☺", C_DRIVER),
        Sprite::Passenger => ("☻", C_PASSENGER),
        Sprite::Umbrella => ("☂", C_PASSENGER),
        Sprite::Car(_) => ("▲", C_CAR),
        Sprite::EnemyCar => ("▲", C_ENEMY),
        Sprite::Fireball => ("•", C_FIREBALL),
        Sprite::Coin => ("$", C_PICKUP),
        Sprite::InvinciblePower => ("✚", C_PICKUP),
        Sprite::TripEndFlag => ("⚑", C_FLAG),
        Sprite::Smoke => ("░", Color::Grey),
        Sprite::Fire => ("✹", Color::Red),
        Sprite::Blood => ("✱", Color::DarkRed),
    };
    Some(g)
}

// ── Canvas ───────────────────────────────────────────────────────────────────

/// Draws onto a `cols × rows` terminal grid standing in for a
/// `world.0 × world.1` window.
///
/// Draw calls are queued; I/O errors are kept and reported by
/// [`TerminalCanvas::present`].
pub struct TerminalCanvas<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    world: (f64, f64),
    error: Option<io::Error>,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W, cols: u16, rows: u16, world: (f64, f64)) -> Self {
        TerminalCanvas { out, cols: cols.max(1), rows: rows.max(1), world, error: None }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
    }

    /// Clear for a new frame.
    pub fn begin(&mut self) -> io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    /// Flush the frame and surface the first error any draw call hit.
    pub fn present(&mut self) -> io::Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }

    fn col_width(&self) -> f64 {
        self.world.0 / f64::from(self.cols)
    }

    /// Grid cell for a world point, `None` when off screen.
    pub fn cell(&self, at: Point) -> Option<(u16, u16)> {
        let col = (at.x / self.col_width()).floor();
        let row = (at.y * f64::from(self.rows) / self.world.1).floor();
        let on_screen = (0.0..f64::from(self.cols)).contains(&col)
            && (0.0..f64::from(self.rows)).contains(&row);
        on_screen.then_some((col as u16, row as u16))
    }

    fn put(&mut self, col: u16, row: u16, text: &str, color: Color) {
        if self.error.is_some() {
            return;
        }
        let room = usize::from(self.cols - col);
        let clipped: String = text.chars().take(room).collect();
        let result = self
            .out
            .queue(cursor::MoveTo(col, row))
            .and_then(|o| o.queue(style::SetForegroundColor(color)))
            .and_then(|o| o.queue(Print(clipped)))
            .map(|_| ());
        self.error = result.err();
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn size(&self) -> (f64, f64) {
        self.world
    }

    fn draw_sprite(&mut self, sprite: Sprite, at: Point) {
        let Some((text, color)) = glyph(sprite) else {
            return;
        };
        if let Some((col, row)) = self.cell(at) {
            self.put(col, row, text, color);
        }
    }

    fn draw_text(&mut self, text: &str, at: Point, style: TextStyle) {
        let color = if style == TextStyle::Hud { C_HUD } else { C_TEXT };
        if let Some((col, row)) = self.cell(at) {
            self.put(col, row, text, color);
        }
    }

    /// One cell per character.
    fn text_width(&self, text: &str, _style: TextStyle) -> f64 {
        text.chars().count() as f64 * self.col_width()
    }
}
