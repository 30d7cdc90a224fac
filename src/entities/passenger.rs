use crate::capability::{Body, Collidable, Contact, Damageable, Impact};
use crate::config::{TripRates, WalkerSettings};
use crate::geometry::{away_from, step_toward, Point, Step};
use crate::trip;
use crate::weather::WeatherKind;

pub const PASSENGER_HEALTH: f64 = 100.0;
const KNOCKBACK_STEP: f64 = 2.0;

/// Where a passenger is in its trip. Exactly one state drives movement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PassengerState {
    Waiting,
    WalkingToTaxi { target: Point },
    PickedUp,
    WalkingToDestination,
    DroppedOff,
    /// Taxi was wrecked mid-trip; trails the driver until re-boarding.
    FollowingDriver,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Passenger {
    pub position: Point,
    pub radius: f64,
    pub walk_speed_x: f64,
    pub walk_speed_y: f64,
    /// 1 pays best, 3 least.
    pub priority: u8,
    pub priority_increased: bool,
    pub destination_x: f64,
    pub vertical_distance: f64,
    pub has_umbrella: bool,
    pub health: f64,
    pub impact: Impact,
    pub state: PassengerState,
}

impl Passenger {
    pub fn new(
        position: Point,
        priority: u8,
        destination_x: f64,
        vertical_distance: f64,
        has_umbrella: bool,
        settings: &WalkerSettings,
    ) -> Self {
        Passenger {
            position,
            radius: settings.radius,
            walk_speed_x: settings.walk_speed_x,
            walk_speed_y: settings.walk_speed_y,
            priority: priority.clamp(1, 3),
            priority_increased: false,
            destination_x,
            vertical_distance,
            has_umbrella,
            health: PASSENGER_HEALTH,
            impact: Impact::default(),
            state: PassengerState::Waiting,
        }
    }

    pub fn is_picked_up(&self) -> bool {
        self.state == PassengerState::PickedUp
    }

    pub fn is_dropped_off(&self) -> bool {
        self.state == PassengerState::DroppedOff
    }

    pub fn is_following_driver(&self) -> bool {
        self.state == PassengerState::FollowingDriver
    }

    pub fn is_walking(&self) -> bool {
        matches!(
            self.state,
            PassengerState::WalkingToTaxi { .. }
                | PassengerState::WalkingToDestination
                | PassengerState::FollowingDriver
        )
    }

    /// Standing in the street: neither riding nor delivered.
    pub fn is_exposed(&self) -> bool {
        !self.is_picked_up() && !self.is_dropped_off()
    }

    pub fn expected_earnings(&self, rates: &TripRates) -> f64 {
        trip::expected_earnings(self.vertical_distance, self.priority, rates)
    }

    /// Bump toward priority 1. Only the first call per passenger counts.
    pub fn increase_priority(&mut self) -> bool {
        if self.priority > 1 && !self.priority_increased {
            self.priority -= 1;
            self.priority_increased = true;
            return true;
        }
        false
    }

    /// Rain soaks anyone without an umbrella down to priority 1.
    pub fn apply_weather(&mut self, weather: WeatherKind) {
        if weather == WeatherKind::Raining && !self.has_umbrella {
            self.priority = 1;
        }
    }

    pub fn scroll(&mut self, dy: f64) {
        self.position.y += dy;
    }

    pub fn update(&mut self) {
        if let Some((dx, dy)) = self.impact.advance().nudge {
            self.position = self.position.offset(dx, dy);
        }
    }

    /// One bounded step toward `target`. A knocked-back passenger holds
    /// still and reports `Moving`.
    pub fn walk_toward(&mut self, target: Point) -> Step {
        if self.impact.is_knocked_back() {
            return Step::Moving(self.position);
        }
        let step = step_toward(self.position, target, self.walk_speed_x, self.walk_speed_y);
        self.position = match step {
            Step::Moving(p) | Step::Arrived(p) => p,
        };
        step
    }
}

impl Body for Passenger {
    fn position(&self) -> Point {
        self.position
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

impl Damageable for Passenger {
    fn health(&self) -> f64 {
        self.health
    }

    fn damage(&self) -> f64 {
        0.0
    }

    fn take_damage(&mut self, amount: f64) {
        self.health -= amount;
    }
}

impl Collidable for Passenger {
    fn contact(&self) -> Contact {
        Contact::hazard(self.position, 0.0)
    }

    fn handle_collision(&mut self, other: &Contact) -> bool {
        if !self.impact.is_idle() {
            return false;
        }
        let Some(damage) = other.damage else {
            return false;
        };
        self.take_damage(damage);
        self.impact
            .strike(away_from(self.position, other.position, KNOCKBACK_STEP));
        true
    }
}
