use rand::Rng;

use crate::capability::{Body, Collidable, Contact, Damageable, Impact};
use crate::config::FireballSettings;
use crate::geometry::Point;

pub const CAR_HEALTH: f64 = 100.0;
pub const CAR_DAMAGE: f64 = 50.0;
pub const FIREBALL_DAMAGE: f64 = 20.0;

const MIN_SPEED: f64 = 2.0;
const MAX_SPEED: f64 = 5.0;
/// One in this many frames an enemy car fires.
const FIREBALL_CHANCE: u32 = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarKind {
    Traffic,
    Enemy,
}

/// Other road users. Enemy cars share everything but also shoot.
#[derive(Clone, Debug, PartialEq)]
pub struct Car {
    pub kind: CarKind,
    /// Paint job, 1-based; purely visual.
    pub variant: u8,
    pub position: Point,
    pub radius: f64,
    /// Own upward speed, re-rolled after every recovered hit.
    pub speed: f64,
    pub health: f64,
    pub impact: Impact,
}

impl Car {
    pub fn new(kind: CarKind, variant: u8, position: Point, radius: f64, speed: f64) -> Self {
        Car {
            kind,
            variant,
            position,
            radius,
            speed,
            health: CAR_HEALTH,
            impact: Impact::default(),
        }
    }

    pub fn random_speed<R: Rng + ?Sized>(rng: &mut R) -> f64 {
        rng.gen_range(MIN_SPEED..MAX_SPEED)
    }

    /// Scroll with the world, then either drive or get knocked back.
    pub fn advance<R: Rng + ?Sized>(&mut self, scroll: f64, rng: &mut R) {
        self.position.y += scroll;

        let step = self.impact.advance();
        match step.nudge {
            Some((dx, dy)) => self.position = self.position.offset(dx, dy),
            None => self.position.y -= self.speed,
        }
        if step.recovered {
            self.speed = Car::random_speed(rng);
        }
    }

    /// Roll for a fireball. Plain traffic never fires.
    pub fn try_fire<R: Rng + ?Sized>(
        &self,
        settings: &FireballSettings,
        rng: &mut R,
    ) -> Option<Fireball> {
        if self.kind != CarKind::Enemy || !rng.gen_ratio(1, FIREBALL_CHANCE) {
            return None;
        }
        Some(Fireball::new(self.position, settings))
    }
}

impl Body for Car {
    fn position(&self) -> Point {
        self.position
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

impl Damageable for Car {
    fn health(&self) -> f64 {
        self.health
    }

    fn damage(&self) -> f64 {
        CAR_DAMAGE
    }

    fn take_damage(&mut self, amount: f64) {
        self.health -= amount;
    }
}

impl Collidable for Car {
    fn contact(&self) -> Contact {
        Contact::hazard(self.position, CAR_DAMAGE)
    }

    fn handle_collision(&mut self, other: &Contact) -> bool {
        if !self.impact.is_idle() {
            return false;
        }
        let Some(damage) = other.damage else {
            return false;
        };
        self.take_damage(damage);
        let dy = if self.position.y < other.position.y { -1.0 } else { 1.0 };
        self.impact.strike((0.0, dy));
        true
    }
}

/// Enemy projectile. Has no health: it disappears on its first hit or when
/// it leaves the play area.
#[derive(Clone, Debug, PartialEq)]
pub struct Fireball {
    pub position: Point,
    pub radius: f64,
    pub speed: f64,
}

impl Fireball {
    pub fn new(position: Point, settings: &FireballSettings) -> Self {
        Fireball { position, radius: settings.radius, speed: settings.speed }
    }

    pub fn advance(&mut self) {
        self.position.y -= self.speed;
    }
}

impl Body for Fireball {
    fn position(&self) -> Point {
        self.position
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}

impl Collidable for Fireball {
    fn contact(&self) -> Contact {
        Contact::hazard(self.position, FIREBALL_DAMAGE)
    }

    /// Any contact spends the fireball.
    fn handle_collision(&mut self, _other: &Contact) -> bool {
        true
    }
}
