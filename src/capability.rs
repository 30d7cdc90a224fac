//! Capabilities an entity can expose to the collision pass.
//!
//! Collision response is dispatched on what the *other* side exposes, never
//! on its concrete type: a [`Contact`] carries an optional damage profile and
//! an optional power-up effect, and each entity decides what to do with them.

use crate::geometry::{collides, Point};

/// Frames during which a hit entity ignores further collision responses.
pub const COLLISION_TIMEOUT: u32 = 200;

/// Frames of positional nudge applied right after a hit.
pub const KNOCKBACK_FRAMES: u32 = 10;

pub trait Body {
    fn position(&self) -> Point;
    fn radius(&self) -> f64;

    fn collides_with<B: Body + ?Sized>(&self, other: &B) -> bool {
        collides(self.position(), self.radius(), other.position(), other.radius())
    }
}

pub trait Damageable {
    fn health(&self) -> f64;
    /// Damage this entity inflicts on whatever it hits.
    fn damage(&self) -> f64;
    fn take_damage(&mut self, amount: f64);

    fn is_destroyed(&self) -> bool {
        self.health() <= 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerEffect {
    Invincibility,
    CoinPower,
}

/// Receiver side of a power-up.
pub trait Empowerable {
    fn empower(&mut self, effect: PowerEffect);
}

/// One-shot pickups.
pub trait PowerUp {
    fn effect(&self) -> PowerEffect;
    fn is_active(&self) -> bool;
    fn deactivate(&mut self);

    fn apply_effect<T: Empowerable + ?Sized>(&mut self, target: &mut T) {
        if self.is_active() {
            target.empower(self.effect());
            self.deactivate();
        }
    }
}

/// What one party of a collision exposes to the other.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub position: Point,
    pub damage: Option<f64>,
    pub power: Option<PowerEffect>,
}

impl Contact {
    pub fn hazard(position: Point, damage: f64) -> Self {
        Contact { position, damage: Some(damage), power: None }
    }

    pub fn power_up(position: Point, effect: PowerEffect) -> Self {
        Contact { position, damage: None, power: Some(effect) }
    }
}

pub trait Collidable: Body {
    fn contact(&self) -> Contact;

    /// React to an overlap. Returns `true` when the hit registered, `false`
    /// when it was ignored (collision timeout, nothing applicable).
    fn handle_collision(&mut self, other: &Contact) -> bool;
}

/// Collision-timeout and knockback timers carried by every damageable
/// collidable.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Impact {
    timeout: u32,
    knockback_frames: u32,
    knockback: (f64, f64),
}

/// Outcome of advancing an [`Impact`] by one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Advance {
    pub nudge: Option<(f64, f64)>,
    /// Set on the single frame the timeout drops to zero.
    pub recovered: bool,
}

impl Impact {
    pub fn is_idle(&self) -> bool {
        self.timeout == 0
    }

    pub fn timeout(&self) -> u32 {
        self.timeout
    }

    pub fn knockback_frames(&self) -> u32 {
        self.knockback_frames
    }

    pub fn is_knocked_back(&self) -> bool {
        self.timeout > 0 && self.knockback_frames > 0
    }

    /// Start the post-hit window with the given per-frame push.
    pub fn strike(&mut self, push: (f64, f64)) {
        self.timeout = COLLISION_TIMEOUT;
        self.knockback_frames = KNOCKBACK_FRAMES;
        self.knockback = push;
    }

    pub fn advance(&mut self) -> Advance {
        let mut out = Advance::default();
        if self.timeout == 0 {
            return out;
        }

        self.timeout -= 1;
        if self.knockback_frames > 0 {
            out.nudge = Some(self.knockback);
            self.knockback_frames -= 1;
        }
        out.recovered = self.timeout == 0;
        out
    }
}
