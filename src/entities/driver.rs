use super::{Taxi, TaxiId, INVINCIBILITY_FRAMES};
use crate::capability::{
    Body, Collidable, Contact, Damageable, Empowerable, Impact, PowerEffect,
};
use crate::config::{Window, WalkerSettings};
use crate::geometry::{away_from, Point};
use crate::input::{Controls, Key};

pub const DRIVER_HEALTH: f64 = 100.0;
/// How close the driver must stand to climb into a taxi.
pub const BOARDING_DISTANCE: f64 = 10.0;
const KNOCKBACK_STEP: f64 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Driver {
    pub position: Point,
    pub radius: f64,
    pub walk_speed_x: f64,
    pub walk_speed_y: f64,
    pub health: f64,
    pub impact: Impact,
    pub invincibility_frames: u32,
    /// Weak link to the taxi being driven.
    pub current_taxi: Option<TaxiId>,
}

impl Driver {
    pub fn new(position: Point, settings: &WalkerSettings) -> Self {
        Driver {
            position,
            radius: settings.radius,
            walk_speed_x: settings.walk_speed_x,
            walk_speed_y: settings.walk_speed_y,
            health: DRIVER_HEALTH,
            impact: Impact::default(),
            invincibility_frames: 0,
            current_taxi: None,
        }
    }

    pub fn is_in_taxi(&self) -> bool {
        self.current_taxi.is_some()
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility_frames > 0
    }

    /// Walking on foot, clamped to the window.
    pub fn walk<C: Controls + ?Sized>(&mut self, input: &C, window: &Window) {
        if self.is_in_taxi() || self.impact.is_knocked_back() {
            return;
        }
        let p = &mut self.position;
        if input.is_down(Key::Left) {
            p.x = (p.x - self.walk_speed_x).max(0.0);
        }
        if input.is_down(Key::Right) {
            p.x = (p.x + self.walk_speed_x).min(window.width);
        }
        if input.is_down(Key::Up) {
            p.y = (p.y - self.walk_speed_y).max(0.0);
        }
        if input.is_down(Key::Down) {
            p.y = (p.y + self.walk_speed_y).min(window.height);
        }
    }

    pub fn update(&mut self) {
        self.invincibility_frames = self.invincibility_frames.saturating_sub(1);
        if let Some((dx, dy)) = self.impact.advance().nudge {
            self.position = self.position.offset(dx, dy);
        }
    }

    /// Sit in `taxi` when it is intact and within reach.
    pub fn enter(&mut self, taxi: &mut Taxi) -> bool {
        if self.is_in_taxi()
            || taxi.is_damaged()
            || self.position.distance_to(taxi.position) > BOARDING_DISTANCE
        {
            return false;
        }
        self.current_taxi = Some(taxi.id);
        self.position = taxi.position;
        taxi.has_driver = true;
        true
    }

    /// Climb out next to `taxi` and stagger away from it.
    pub fn exit(&mut self, taxi: &mut Taxi, offset_x: f64) {
        if self.current_taxi.take().is_none() {
            return;
        }
        taxi.has_driver = false;
        self.position = taxi.position.offset(offset_x, 0.0);
        self.impact.strike(away_from(self.position, taxi.position, KNOCKBACK_STEP));
    }
}

impl Body for Driver {
    fn position(&self) -> Point {
        self.position
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

impl Damageable for Driver {
    fn health(&self) -> f64 {
        self.health
    }

    fn damage(&self) -> f64 {
        0.0
    }

    fn take_damage(&mut self, amount: f64) {
        if !self.is_invincible() {
            self.health -= amount;
        }
    }
}

impl Empowerable for Driver {
    fn empower(&mut self, effect: PowerEffect) {
        if effect == PowerEffect::Invincibility {
            self.invincibility_frames = INVINCIBILITY_FRAMES;
        }
    }
}

impl Collidable for Driver {
    fn contact(&self) -> Contact {
        Contact::hazard(self.position, 0.0)
    }

    fn handle_collision(&mut self, other: &Contact) -> bool {
        if let Some(effect) = other.power {
            self.empower(effect);
            return true;
        }
        if !self.impact.is_idle() {
            return false;
        }
        if let Some(damage) = other.damage {
            self.take_damage(damage);
            self.impact
                .strike(away_from(self.position, other.position, KNOCKBACK_STEP));
            return true;
        }
        false
    }
}
