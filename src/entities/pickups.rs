use crate::capability::{Body, Collidable, Contact, PowerEffect, PowerUp};
use crate::geometry::Point;

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Coin {
    pub position: Point,
    pub radius: f64,
    pub active: bool,
}

impl Coin {
    pub fn new(position: Point, radius: f64) -> Self {
        Coin { position, radius, active: true }
    }

    pub fn scroll(&mut self, dy: f64) {
        self.position.y += dy;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InvinciblePower {
    pub position: Point,
    pub radius: f64,
    pub active: bool,
}

impl InvinciblePower {
    pub fn new(position: Point, radius: f64) -> Self {
        InvinciblePower { position, radius, active: true }
    }

    pub fn scroll(&mut self, dy: f64) {
        self.position.y += dy;
    }
}

macro_rules! power_up {
    ($ty:ty, $effect:expr) => {
        impl PowerUp for $ty {
            fn effect(&self) -> PowerEffect {
                $effect
            }

            fn is_active(&self) -> bool {
                self.active
            }

            fn deactivate(&mut self) {
                self.active = false;
            }
        }

        impl Body for $ty {
            fn position(&self) -> Point {
                self.position
            }

            fn radius(&self) -> f64 {
                self.radius
            }
        }

        impl Collidable for $ty {
            fn contact(&self) -> Contact {
                Contact::power_up(self.position, $effect)
            }

            /// Being collected is the only reaction; once spent it ignores
            /// further contact.
            fn handle_collision(&mut self, _other: &Contact) -> bool {
                let was_active = self.active;
                self.deactivate();
                was_active
            }
        }
    };
}

power_up!(Coin, PowerEffect::CoinPower);
power_up!(InvinciblePower, PowerEffect::Invincibility);

// ── Trip-end flag ─────────────────────────────────────────────────────────────

/// Drop-off marker, paired by index with its passenger.
#[derive(Clone, Debug, PartialEq)]
pub struct TripEndFlag {
    pub position: Point,
    pub radius: f64,
    pub visible: bool,
}

impl TripEndFlag {
    pub fn new(position: Point, radius: f64) -> Self {
        TripEndFlag { position, radius, visible: false }
    }

    pub fn scroll(&mut self, dy: f64) {
        self.position.y += dy;
    }
}
