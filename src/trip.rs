//! Trip economics.

use crate::config::{Messages, TripRates};

/// Fare promised to a passenger of the given priority (1..=3).
pub fn expected_earnings(vertical_distance: f64, priority: u8, rates: &TripRates) -> f64 {
    let tier = usize::from(priority.clamp(1, 3)) - 1;
    vertical_distance * rates.per_y + rates.priority[tier]
}

/// Charged when the taxi has driven past the flag (is above it on screen)
/// at drop-off. Zero otherwise.
pub fn penalty(flag_y: f64, taxi_y: f64, rates: &TripRates) -> f64 {
    ((flag_y - taxi_y) * rates.penalty_per_y).max(0.0)
}

/// What is actually paid. Never negative.
pub fn fare(expected: f64, penalty: f64) -> f64 {
    (expected - penalty).max(0.0)
}

/// Figures of the last completed trip, kept for the HUD.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TripSummary {
    pub expected: f64,
    pub priority: u8,
    pub fare: f64,
}

impl TripSummary {
    /// Shortfall between the promise and the payout.
    pub fn penalty(&self) -> f64 {
        self.expected - self.fare
    }

    pub fn lines(&self, messages: &Messages) -> Vec<String> {
        vec![
            messages.completed_trip.clone(),
            format!("{} {:.1}", messages.expected_earning, self.expected),
            format!("{} {}", messages.priority, self.priority),
            format!("{} {:.2}", messages.penalty, self.penalty()),
        ]
    }
}
