//! Owner of every pickup on the ground.

use super::types::{GoldDrop, HealthPack};
use crate::character::damage::roll_chance;
use crate::character::Player;
use crate::core::constants::HEALTH_PACK_DROP_CHANCE;
use crate::core::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What the player picked up this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupReport {
    pub gold_collected: u32,
    pub health_restored: u32,
    pub packs_collected: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PickupField {
    gold: Vec<GoldDrop>,
    health_packs: Vec<HealthPack>,
}

impl PickupField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gold(&self) -> &[GoldDrop] {
        &self.gold
    }

    pub fn health_packs(&self) -> &[HealthPack] {
        &self.health_packs
    }

    pub fn drop_gold(&mut self, position: Vec2, value: u32) {
        if value > 0 {
            self.gold.push(GoldDrop::new(position, value));
        }
    }

    pub fn drop_health_pack(&mut self, position: Vec2) {
        self.health_packs.push(HealthPack::new(position));
    }

    /// Rolls the health-pack drop for a dead enemy. Returns whether one dropped.
    pub fn roll_health_pack(&mut self, position: Vec2, drop_luck: f64, rng: &mut impl Rng) -> bool {
        if roll_chance(HEALTH_PACK_DROP_CHANCE + drop_luck, rng) {
            self.drop_health_pack(position);
            true
        } else {
            false
        }
    }

    /// Ages every pickup, hands the player whatever they are touching and
    /// drops the spent ones.
    pub fn update(&mut self, delta_time: f64, player: &mut Player) -> PickupReport {
        let mut report = PickupReport::default();
        let player_bounds = player.bounds();

        for drop in self.gold.iter_mut() {
            drop.update(delta_time);
            if drop.in_reach(player.position) {
                report.gold_collected += player.collect_gold(drop.value);
                drop.active = false;
            }
        }

        for pack in self.health_packs.iter_mut() {
            pack.update(delta_time);
            if pack.active && player_bounds.intersects(&pack.bounds()) {
                report.health_restored += player.heal(pack.heal_amount);
                report.packs_collected += 1;
                pack.active = false;
            }
        }

        self.gold.retain(|g| g.active);
        self.health_packs.retain(|p| p.active);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_collects_gold_in_reach() {
        let mut player = Player::new();
        let mut field = PickupField::new();
        field.drop_gold(player.position + Vec2::new(20.0, 0.0), 10);
        field.drop_gold(player.position + Vec2::new(200.0, 0.0), 10);

        let report = field.update(0.016, &mut player);
        assert_eq!(report.gold_collected, 10);
        assert_eq!(player.gold(), 10);
        assert_eq!(field.gold().len(), 1);
    }

    #[test]
    fn test_health_pack_overlap_heals() {
        let mut player = Player::new();
        player.vitals.take_damage(40);
        let mut field = PickupField::new();
        field.drop_health_pack(player.position + Vec2::new(30.0, 0.0));
        field.drop_health_pack(player.position + Vec2::new(40.0, 0.0));

        let report = field.update(0.016, &mut player);
        assert_eq!(report.packs_collected, 1);
        assert_eq!(report.health_restored, 25);
        assert_eq!(player.health(), 85);
        assert_eq!(field.health_packs().len(), 1);
    }

    #[test]
    fn test_expired_pickups_removed() {
        let mut player = Player::new();
        let mut field = PickupField::new();
        field.drop_gold(Vec2::new(10.0, 10.0), 3);
        field.drop_health_pack(Vec2::new(10.0, 10.0));
        field.update(31.0, &mut player);
        assert!(field.gold().is_empty());
        assert!(field.health_packs().is_empty());
    }

    #[test]
    fn test_zero_gold_not_dropped() {
        let mut field = PickupField::new();
        field.drop_gold(Vec2::ZERO, 0);
        assert!(field.gold().is_empty());
    }

    #[test]
    fn test_drop_luck_guarantees_pack() {
        let mut rng = test_rng();
        let mut field = PickupField::new();
        for _ in 0..10 {
            assert!(field.roll_health_pack(Vec2::ZERO, 0.9, &mut rng));
        }
        assert_eq!(field.health_packs().len(), 10);
    }
}
