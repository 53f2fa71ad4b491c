//! Damage math shared by weapons, enemies and the player.
//!
//! These are pure functions over a `StatModifiers` snapshot. The only side
//! effect is advancing the RNG, so weapon code can call them while the player
//! struct that owns the modifiers is split-borrowed.

use super::modifiers::StatModifiers;
use rand::Rng;

/// Result of rolling one outgoing hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRoll {
    /// Damage after multipliers and crit.
    pub damage: u32,
    pub is_crit: bool,
}

/// Attacker-side inputs a weapon needs to roll damage.
#[derive(Debug, Clone, Copy)]
pub struct AttackContext<'a> {
    pub modifiers: &'a StatModifiers,
    /// Player health as a fraction of max, for berserk.
    pub attacker_health_fraction: f64,
}

/// Single Bernoulli trial with probability `chance`.
///
/// Non-positive chances never fire and chances of 1.0 or more always do.
pub fn roll_chance(chance: f64, rng: &mut impl Rng) -> bool {
    if chance <= 0.0 {
        return false;
    }
    rng.gen::<f64>() < chance
}

/// Base damage times the damage multiplier, then one crit roll.
///
/// # Arguments
/// * `modifiers` - damage multiplier, crit chance and crit multiplier
/// * `base_damage` - weapon damage before modifiers
/// * `rng` - random number generator for the crit roll
///
/// # Returns
/// HitRoll with final rounded damage and the crit flag
pub fn calculate_modified_damage(
    modifiers: &StatModifiers,
    base_damage: u32,
    rng: &mut impl Rng,
) -> HitRoll {
    let mut damage = base_damage as f64 * modifiers.damage_multiplier;
    let is_crit = roll_chance(modifiers.crit_chance, rng);
    if is_crit {
        damage *= modifiers.crit_multiplier;
    }
    HitRoll {
        damage: damage.round().max(0.0) as u32,
        is_crit,
    }
}

/// Modified damage against one specific target, layering berserk (low player
/// health) and execute (low target health) on top of the crit roll.
pub fn damage_against(
    ctx: &AttackContext<'_>,
    base_damage: u32,
    target_health_fraction: f64,
    rng: &mut impl Rng,
) -> HitRoll {
    let roll = calculate_modified_damage(ctx.modifiers, base_damage, rng);
    let factor = ctx.modifiers.berserk_factor(ctx.attacker_health_fraction)
        * ctx.modifiers.execute_factor(target_health_fraction);
    if factor == 1.0 {
        return roll;
    }
    HitRoll {
        damage: (roll.damage as f64 * factor).round() as u32,
        is_crit: roll.is_crit,
    }
}

/// Incoming damage after armor: `round(amount * (1 - armor / (armor + 100)))`.
pub fn mitigate_incoming(modifiers: &StatModifiers, amount: u32) -> u32 {
    let reduction = modifiers.armor_reduction();
    (amount as f64 * (1.0 - reduction)).round() as u32
}

/// Healing granted by life-steal for `damage_dealt`.
pub fn life_steal_amount(modifiers: &StatModifiers, damage_dealt: u32) -> u32 {
    if modifiers.life_steal <= 0.0 {
        return 0;
    }
    (damage_dealt as f64 * modifiers.life_steal) as u32
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
    fn test_baseline_damage_is_unchanged() {
        let mods = StatModifiers::default();
        let mut rng = test_rng();
        for _ in 0..100 {
            let hit = calculate_modified_damage(&mods, 100, &mut rng);
            assert_eq!(hit.damage, 100);
            assert!(!hit.is_crit);
        }
    }

    #[test]
    fn test_guaranteed_crit() {
        let mut mods = StatModifiers::default();
        mods.add_crit_chance(1.0);
        mods.raise_crit_multiplier(2.0);
        let hit = calculate_modified_damage(&mods, 25, &mut test_rng());
        assert!(hit.is_crit);
        assert_eq!(hit.damage, 50);
    }

    #[test]
    fn test_damage_multiplier_applies_before_crit() {
        let mut mods = StatModifiers::default();
        mods.add_damage_multiplier(0.5);
        let hit = calculate_modified_damage(&mods, 10, &mut test_rng());
        assert_eq!(hit.damage, 15);
    }

    #[test]
    fn test_crit_rate_is_roughly_the_chance() {
        let mut mods = StatModifiers::default();
        mods.add_crit_chance(0.25);
        let mut rng = test_rng();
        let crits = (0..4000)
            .filter(|_| calculate_modified_damage(&mods, 10, &mut rng).is_crit)
            .count();
        assert!((800..1200).contains(&crits), "crits: {crits}");
    }

    #[test]
    fn test_damage_against_execute_and_berserk() {
        let mut mods = StatModifiers::default();
        mods.add_execute(0.2, 1.0);
        mods.add_berserk(0.3, 0.5);
        let mut rng = test_rng();

        let healthy = AttackContext {
            modifiers: &mods,
            attacker_health_fraction: 1.0,
        };
        assert_eq!(damage_against(&healthy, 20, 1.0, &mut rng).damage, 20);
        assert_eq!(damage_against(&healthy, 20, 0.1, &mut rng).damage, 40);

        let wounded = AttackContext {
            modifiers: &mods,
            attacker_health_fraction: 0.1,
        };
        assert_eq!(damage_against(&wounded, 20, 1.0, &mut rng).damage, 30);
        assert_eq!(damage_against(&wounded, 20, 0.1, &mut rng).damage, 60);
    }

    #[test]
    fn test_mitigate_incoming() {
        let mut mods = StatModifiers::default();
        assert_eq!(mitigate_incoming(&mods, 37), 37);
        mods.add_armor(100.0);
        assert_eq!(mitigate_incoming(&mods, 100), 50);
        assert_eq!(mitigate_incoming(&mods, 0), 0);
    }

    #[test]
    fn test_life_steal_amount() {
        let mut mods = StatModifiers::default();
        assert_eq!(life_steal_amount(&mods, 100), 0);
        mods.add_life_steal(0.1);
        assert_eq!(life_steal_amount(&mods, 100), 10);
        assert_eq!(life_steal_amount(&mods, 9), 0);
    }

    #[test]
    fn test_roll_chance_edges() {
        let mut rng = test_rng();
        assert!((0..100).all(|_| !roll_chance(0.0, &mut rng)));
        assert!((0..100).all(|_| roll_chance(1.0, &mut rng)));
    }
}
