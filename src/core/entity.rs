//! Health primitive shared by the player and every enemy.

use serde::{Deserialize, Serialize};

/// Current and maximum health. `current` never exceeds `max` and never
/// goes below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    current: u32,
    max: u32,
}

impl Vitals {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Remaining health as a fraction of max, 0.0 for a zero-max entity.
    pub fn fraction(&self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f64 / self.max as f64
        }
    }

    /// Removes up to `amount` health. Returns how much was actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.current);
        self.current -= lost;
        lost
    }

    /// Restores up to `amount` health without exceeding max. Returns how much
    /// was actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max - self.current);
        self.current += restored;
        restored
    }

    /// Raises max health and heals by the same amount.
    pub fn raise_max(&mut self, amount: u32) {
        self.max = self.max.saturating_add(amount);
        self.heal(amount);
    }
}
