use tracing::debug;

use super::{PassengerId, TaxiId, TripEndFlag};
use crate::capability::{
    Body, Collidable, Contact, Damageable, Empowerable, Impact, PowerEffect,
};
use crate::config::VehicleSettings;
use crate::geometry::Point;
use crate::input::{Controls, Key};

pub const TAXI_HEALTH: f64 = 100.0;
pub const TAXI_DAMAGE: f64 = 25.0;
pub const INVINCIBILITY_FRAMES: u32 = 1000;
pub const COIN_POWER_FRAMES: u32 = 500;

#[derive(Clone, Debug, PartialEq)]
pub struct Taxi {
    pub id: TaxiId,
    pub position: Point,
    pub radius: f64,
    pub speed_x: f64,
    pub health: f64,
    pub impact: Impact,
    pub invincibility_frames: u32,
    /// Remaining coin-power frames; zero when inactive.
    pub coin_power_frames: u32,
    pub has_driver: bool,
    /// Recomputed from input every frame.
    pub moving: bool,
    pub current_passenger: Option<PassengerId>,
}

impl Taxi {
    pub fn new(id: TaxiId, position: Point, settings: &VehicleSettings) -> Self {
        Taxi {
            id,
            position,
            radius: settings.radius,
            speed_x: settings.speed_x,
            health: TAXI_HEALTH,
            impact: Impact::default(),
            invincibility_frames: 0,
            coin_power_frames: 0,
            has_driver: false,
            moving: false,
            current_passenger: None,
        }
    }

    pub fn is_damaged(&self) -> bool {
        self.health <= 0.0
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility_frames > 0
    }

    pub fn has_coin_power(&self) -> bool {
        self.coin_power_frames > 0
    }

    /// Player steering. Only a driven taxi responds; Up counts as moving
    /// because the world scrolls underneath.
    pub fn steer<C: Controls + ?Sized>(&mut self, input: &C, window_width: f64) {
        self.moving = false;
        if !self.has_driver {
            return;
        }

        let left = input.is_down(Key::Left);
        let right = input.is_down(Key::Right);
        self.moving = left || right || input.is_down(Key::Up);

        if self.impact.is_knocked_back() {
            return;
        }
        if left {
            self.position.x = (self.position.x - self.speed_x).max(0.0);
        }
        if right {
            self.position.x = (self.position.x + self.speed_x).min(window_width);
        }
    }

    /// A driverless taxi is part of the scenery and scrolls with it.
    pub fn scroll(&mut self, dy: f64) {
        if !self.has_driver {
            self.position.y += dy;
        }
    }

    /// Per-frame timers.
    pub fn update(&mut self) {
        if let Some((dx, dy)) = self.impact.advance().nudge {
            self.position = self.position.offset(dx, dy);
        }
        self.invincibility_frames = self.invincibility_frames.saturating_sub(1);
        self.coin_power_frames = self.coin_power_frames.saturating_sub(1);
    }

    pub fn pickup(&mut self, passenger: PassengerId) -> bool {
        if self.current_passenger.is_none() && !self.moving && self.has_driver {
            self.current_passenger = Some(passenger);
            return true;
        }
        false
    }

    /// Stationary and level with (or past) the flag, or parked on it.
    pub fn can_drop_off(&self, flag: &TripEndFlag) -> bool {
        if self.current_passenger.is_none() || self.moving {
            return false;
        }
        self.position.y <= flag.position.y
            || self.position.distance_to(flag.position) <= flag.radius
    }

    pub fn drop_off(&mut self) -> Option<PassengerId> {
        self.current_passenger.take()
    }
}

impl Body for Taxi {
    fn position(&self) -> Point {
        self.position
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

impl Damageable for Taxi {
    fn health(&self) -> f64 {
        self.health
    }

    fn damage(&self) -> f64 {
        TAXI_DAMAGE
    }

    fn take_damage(&mut self, amount: f64) {
        if self.is_invincible() {
            return;
        }
        let was_damaged = self.is_damaged();
        self.health -= amount;
        if self.is_damaged() && !was_damaged {
            self.has_driver = false;
        }
    }
}

impl Empowerable for Taxi {
    fn empower(&mut self, effect: PowerEffect) {
        debug!(taxi = self.id.0, ?effect, "taxi collected power-up");
        match effect {
            PowerEffect::Invincibility => self.invincibility_frames = INVINCIBILITY_FRAMES,
            PowerEffect::CoinPower => self.coin_power_frames = COIN_POWER_FRAMES,
        }
    }
}

impl Collidable for Taxi {
    fn contact(&self) -> Contact {
        Contact::hazard(self.position, TAXI_DAMAGE)
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
            let dy = if self.position.y < other.position.y { -1.0 } else { 1.0 };
            self.impact.strike((0.0, dy));
            return true;
        }
        false
    }
}
