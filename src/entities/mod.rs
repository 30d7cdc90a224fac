//! Game entity types: one struct per kind, composed from the capability
//! traits in [`crate::capability`].

mod driver;
mod effect;
mod passenger;
mod pickups;
mod taxi;
mod traffic;

pub use driver::{Driver, BOARDING_DISTANCE, DRIVER_HEALTH};
pub use effect::{CollisionEffect, EffectKind, EFFECT_FRAMES};
pub use passenger::{Passenger, PassengerState, PASSENGER_HEALTH};
pub use pickups::{Coin, InvinciblePower, TripEndFlag};
pub use taxi::{Taxi, COIN_POWER_FRAMES, INVINCIBILITY_FRAMES, TAXI_DAMAGE, TAXI_HEALTH};
pub use traffic::{Car, CarKind, Fireball, CAR_DAMAGE, CAR_HEALTH, FIREBALL_DAMAGE};

/// Index of a passenger in the game's passenger list. Also indexes the
/// matching trip-end flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PassengerId(pub usize);

/// Identity of one taxi instance; a replacement taxi gets a fresh id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaxiId(pub u32);
