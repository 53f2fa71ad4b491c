//! The player's accumulated stat modifiers.
//!
//! Talents and shop purchases only ever push these upward during a run; every
//! adder ignores negative input so the set is monotonically non-decreasing.
//! Weapons read the outgoing side (damage, crit, attack speed) and the
//! damage-intake path reads the defensive side (dodge, armor, shield).

use crate::core::constants::{ARMOR_HALVING_POINT, BASE_CRIT_MULTIPLIER};
use serde::{Deserialize, Serialize};

/// Rechargeable damage absorber granted by the Shield talent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shield {
    pub capacity: f64,
    pub current: f64,
    pub recharge_per_second: f64,
}

impl Shield {
    pub fn is_active(&self) -> bool {
        self.capacity > 0.0
    }

    /// Soaks as much of `damage` as the shield holds. Returns the remainder
    /// that still reaches health.
    pub fn absorb(&mut self, damage: u32) -> u32 {
        if self.current <= 0.0 || damage == 0 {
            return damage;
        }
        let soaked = (damage as f64).min(self.current);
        self.current -= soaked;
        // Round the remainder so 0.4 of a point never slips through
        (damage as f64 - soaked).round() as u32
    }

    pub fn recharge(&mut self, delta_time: f64) {
        if self.is_active() {
            self.current = (self.current + self.recharge_per_second * delta_time).min(self.capacity);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatModifiers {
    pub damage_multiplier: f64,
    /// Additive; cooldowns are divided by `1 + attack_speed_multiplier`.
    pub attack_speed_multiplier: f64,
    /// Probability in `[0, 1]`.
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    /// Fraction of damage dealt returned as healing.
    pub life_steal: f64,
    pub armor: f64,
    /// Fraction of max health restored per second.
    pub regen_rate: f64,
    pub experience_multiplier: f64,
    pub gold_multiplier: f64,
    /// Probability in `[0, 1]`.
    pub dodge_chance: f64,
    pub move_speed_multiplier: f64,

    pub double_strike_chance: f64,
    /// Health fraction under which berserk kicks in. Zero means inactive.
    pub berserk_threshold: f64,
    pub berserk_bonus: f64,
    /// Target health fraction under which execute kicks in. Zero means inactive.
    pub execute_threshold: f64,
    pub execute_multiplier: f64,
    /// Extra chance for a dying enemy to leave a health pack.
    pub drop_luck: f64,
    pub shield: Shield,

    /// Fractional regen carried between frames.
    pub regen_accumulator: f64,
}

impl Default for StatModifiers {
    fn default() -> Self {
        Self {
            damage_multiplier: 1.0,
            attack_speed_multiplier: 0.0,
            crit_chance: 0.0,
            crit_multiplier: BASE_CRIT_MULTIPLIER,
            life_steal: 0.0,
            armor: 0.0,
            regen_rate: 0.0,
            experience_multiplier: 1.0,
            gold_multiplier: 1.0,
            dodge_chance: 0.0,
            move_speed_multiplier: 1.0,
            double_strike_chance: 0.0,
            berserk_threshold: 0.0,
            berserk_bonus: 0.0,
            execute_threshold: 0.0,
            execute_multiplier: 1.0,
            drop_luck: 0.0,
            shield: Shield::default(),
            regen_accumulator: 0.0,
        }
    }
}

impl StatModifiers {
    // ── Adders ─────────────────────────────────────────────────────────

    pub fn add_damage_multiplier(&mut self, amount: f64) {
        self.damage_multiplier += amount.max(0.0);
    }

    pub fn add_attack_speed_multiplier(&mut self, amount: f64) {
        self.attack_speed_multiplier += amount.max(0.0);
    }

    pub fn add_crit_chance(&mut self, amount: f64) {
        self.crit_chance = (self.crit_chance + amount.max(0.0)).min(1.0);
    }

    pub fn add_crit_multiplier(&mut self, amount: f64) {
        self.crit_multiplier += amount.max(0.0);
    }

    /// Lifts the crit multiplier to at least `floor`.
    pub fn raise_crit_multiplier(&mut self, floor: f64) {
        self.crit_multiplier = self.crit_multiplier.max(floor);
    }

    pub fn add_life_steal(&mut self, amount: f64) {
        self.life_steal += amount.max(0.0);
    }

    pub fn add_armor(&mut self, amount: f64) {
        self.armor += amount.max(0.0);
    }

    pub fn add_regen_rate(&mut self, amount: f64) {
        self.regen_rate += amount.max(0.0);
    }

    pub fn add_experience_multiplier(&mut self, amount: f64) {
        self.experience_multiplier += amount.max(0.0);
    }

    pub fn add_gold_multiplier(&mut self, amount: f64) {
        self.gold_multiplier += amount.max(0.0);
    }

    pub fn add_dodge_chance(&mut self, amount: f64) {
        self.dodge_chance = (self.dodge_chance + amount.max(0.0)).min(1.0);
    }

    pub fn add_move_speed_multiplier(&mut self, amount: f64) {
        self.move_speed_multiplier += amount.max(0.0);
    }

    /// Multiplies movement speed. Factors below 1.0 are ignored.
    pub fn scale_move_speed(&mut self, factor: f64) {
        if factor > 1.0 {
            self.move_speed_multiplier *= factor;
        }
    }

    pub fn add_double_strike_chance(&mut self, amount: f64) {
        self.double_strike_chance = (self.double_strike_chance + amount.max(0.0)).min(1.0);
    }

    pub fn add_berserk(&mut self, threshold: f64, bonus: f64) {
        self.berserk_threshold = self.berserk_threshold.max(threshold.clamp(0.0, 1.0));
        self.berserk_bonus += bonus.max(0.0);
    }

    pub fn add_execute(&mut self, threshold: f64, multiplier_bonus: f64) {
        self.execute_threshold = self.execute_threshold.max(threshold.clamp(0.0, 1.0));
        self.execute_multiplier += multiplier_bonus.max(0.0);
    }

    pub fn add_drop_luck(&mut self, amount: f64) {
        self.drop_luck += amount.max(0.0);
    }

    /// Grows shield capacity and tops it up by the same amount.
    pub fn add_shield(&mut self, capacity: f64, recharge_per_second: f64) {
        let capacity = capacity.max(0.0);
        self.shield.capacity += capacity;
        self.shield.current = (self.shield.current + capacity).min(self.shield.capacity);
        self.shield.recharge_per_second += recharge_per_second.max(0.0);
    }

    // ── Derived values ─────────────────────────────────────────────────

    /// Cooldown after attack-speed bonuses: `base / (1 + attack_speed)`.
    pub fn modified_cooldown(&self, base_cooldown: f64) -> f64 {
        base_cooldown / (1.0 + self.attack_speed_multiplier)
    }

    /// Diminishing-returns armor: `armor / (armor + 100)`.
    pub fn armor_reduction(&self) -> f64 {
        if self.armor <= 0.0 {
            0.0
        } else {
            self.armor / (self.armor + ARMOR_HALVING_POINT)
        }
    }

    /// Berserk factor for the given player health fraction.
    pub fn berserk_factor(&self, health_fraction: f64) -> f64 {
        if self.berserk_threshold > 0.0 && health_fraction < self.berserk_threshold {
            1.0 + self.berserk_bonus
        } else {
            1.0
        }
    }

    /// Execute factor for the given target health fraction.
    pub fn execute_factor(&self, target_health_fraction: f64) -> f64 {
        if self.execute_threshold > 0.0 && target_health_fraction < self.execute_threshold {
            self.execute_multiplier
        } else {
            1.0
        }
    }

    /// Feeds `delta_time` of regeneration into the accumulator and drains the
    /// whole points that are ready.
    pub fn drain_regen(&mut self, max_health: u32, delta_time: f64) -> u32 {
        if self.regen_rate <= 0.0 || delta_time <= 0.0 {
            return 0;
        }
        self.regen_accumulator += self.regen_rate * max_health as f64 * delta_time;
        let whole = self.regen_accumulator.floor();
        self.regen_accumulator -= whole;
        whole as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_values() {
        let m = StatModifiers::default();
        assert_eq!(m.damage_multiplier, 1.0);
        assert_eq!(m.crit_chance, 0.0);
        assert_eq!(m.armor, 0.0);
        assert_eq!(m.dodge_chance, 0.0);
        assert_eq!(m.modified_cooldown(1.0), 1.0);
        assert_eq!(m.armor_reduction(), 0.0);
    }

    #[test]
    fn test_adders_ignore_negative_input() {
        let mut m = StatModifiers::default();
        m.add_damage_multiplier(-0.5);
        m.add_armor(-10.0);
        m.add_dodge_chance(-1.0);
        m.scale_move_speed(0.5);
        assert_eq!(m, StatModifiers::default());
    }

    #[test]
    fn test_chances_capped_at_one() {
        let mut m = StatModifiers::default();
        m.add_crit_chance(0.8);
        m.add_crit_chance(0.8);
        m.add_dodge_chance(2.0);
        assert_eq!(m.crit_chance, 1.0);
        assert_eq!(m.dodge_chance, 1.0);
    }

    #[test]
    fn test_modified_cooldown() {
        let mut m = StatModifiers::default();
        m.add_attack_speed_multiplier(1.0);
        assert!((m.modified_cooldown(0.8) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_armor_reduction_halves_at_100() {
        let mut m = StatModifiers::default();
        m.add_armor(100.0);
        assert!((m.armor_reduction() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_regen_accumulates_fractions() {
        let mut m = StatModifiers::default();
        m.add_regen_rate(0.01);
        // 1% of 100 HP per second = 1 HP/s; 0.25s frames need four frames
        let healed: u32 = (0..4).map(|_| m.drain_regen(100, 0.25)).sum();
        assert_eq!(healed, 1);
        assert!(m.regen_accumulator < 1e-9);
    }

    #[test]
    fn test_regen_inactive_without_rate() {
        let mut m = StatModifiers::default();
        assert_eq!(m.drain_regen(100, 10.0), 0);
        assert_eq!(m.regen_accumulator, 0.0);
    }

    #[test]
    fn test_shield_absorbs_then_recharges() {
        let mut m = StatModifiers::default();
        m.add_shield(50.0, 5.0);
        assert_eq!(m.shield.absorb(30), 0);
        assert_eq!(m.shield.absorb(30), 10);
        assert_eq!(m.shield.current, 0.0);
        m.shield.recharge(2.0);
        assert!((m.shield.current - 10.0).abs() < 1e-9);
        m.shield.recharge(100.0);
        assert_eq!(m.shield.current, 50.0);
    }

    #[test]
    fn test_berserk_and_execute_factors() {
        let mut m = StatModifiers::default();
        assert_eq!(m.berserk_factor(0.1), 1.0);
        assert_eq!(m.execute_factor(0.1), 1.0);

        m.add_berserk(0.3, 0.5);
        m.add_execute(0.2, 1.0);
        assert_eq!(m.berserk_factor(0.29), 1.5);
        assert_eq!(m.berserk_factor(0.5), 1.0);
        assert_eq!(m.execute_factor(0.1), 2.0);
        assert_eq!(m.execute_factor(0.2), 1.0);
    }
}
