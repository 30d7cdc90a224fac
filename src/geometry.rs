//! Plane geometry shared by every entity.
//!
//! Coordinates are window pixels: x grows rightward, y grows downward, so
//! "driving forward" means the world scrolls toward larger y.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Overlap test between two circles: strictly closer than the sum of radii.
///
/// Zero-radius pairs never overlap because a distance is never below zero.
pub fn collides(a: Point, a_radius: f64, b: Point, b_radius: f64) -> bool {
    a.distance_to(b) < a_radius + b_radius
}

/// Result of one bounded walking step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Still on the way; carries the new position.
    Moving(Point),
    /// Within one unit on both axes; snapped onto the target.
    Arrived(Point),
}

/// Move `from` toward `to`, each axis clamped to its own speed.
///
/// The step on an axis never exceeds the remaining gap on that axis, so the
/// walker cannot overshoot.
pub fn step_toward(from: Point, to: Point, speed_x: f64, speed_y: f64) -> Step {
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    if dx.abs() < 1.0 && dy.abs() < 1.0 {
        return Step::Arrived(to);
    }

    let move_x = dx.signum() * dx.abs().min(speed_x);
    let move_y = dy.signum() * dy.abs().min(speed_y);
    Step::Moving(from.offset(move_x, move_y))
}

/// Unit-ish push away from `other`: -1 on an axis when `me` is smaller there.
pub fn away_from(me: Point, other: Point, magnitude: f64) -> (f64, f64) {
    let x = if me.x < other.x { -magnitude } else { magnitude };
    let y = if me.y < other.y { -magnitude } else { magnitude };
    (x, y)
}
