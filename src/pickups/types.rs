//! Gold drops and health packs left behind by dead enemies.

use crate::core::constants::*;
use crate::core::{Rect, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldDrop {
    pub position: Vec2,
    pub value: u32,
    /// Seconds since the drop appeared.
    pub age: f64,
    pub active: bool,
}

impl GoldDrop {
    pub fn new(position: Vec2, value: u32) -> Self {
        Self {
            position,
            value,
            age: 0.0,
            active: true,
        }
    }

    pub fn update(&mut self, delta_time: f64) {
        if !self.active {
            return;
        }
        self.age += delta_time;
        if self.age >= GOLD_DROP_LIFETIME {
            self.active = false;
        }
    }

    /// Player centre within the drop radius plus pickup reach.
    pub fn in_reach(&self, player_position: Vec2) -> bool {
        self.active && self.position.distance(player_position) < GOLD_DROP_RADIUS + GOLD_PICKUP_REACH
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthPack {
    pub position: Vec2,
    pub heal_amount: u32,
    /// Seconds left before the pack disappears.
    pub lifetime: f64,
    pub active: bool,
}

impl HealthPack {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            heal_amount: HEALTH_PACK_HEAL,
            lifetime: HEALTH_PACK_LIFETIME,
            active: true,
        }
    }

    pub fn update(&mut self, delta_time: f64) {
        if !self.active {
            return;
        }
        self.lifetime -= delta_time;
        if self.lifetime <= 0.0 {
            self.lifetime = 0.0;
            self.active = false;
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.position, HEALTH_PACK_SIZE)
    }
}
