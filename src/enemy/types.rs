//! Enemy data types: variant tags, stat tables and per-variant state.

use crate::core::constants::*;
use crate::core::{Rect, Vec2, Vitals};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The six enemy variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyVariant {
    Grunt,
    Scout,
    Brute,
    Assassin,
    Sniper,
    Swarm,
}

/// Fixed per-variant numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub max_health: u32,
    pub speed: f64,
    pub damage: u32,
    pub attack_range: f64,
    pub attack_cooldown: f64,
    pub direction_change_interval: f64,
    /// Side of the square bounding box.
    pub size: f64,
    /// Chase weight out of 100 used when re-rolling a wander/chase target.
    pub chase_percent: u32,
    pub xp_reward: u64,
    pub gold_reward: u32,
}

impl EnemyVariant {
    pub const ALL: [EnemyVariant; 6] = [
        EnemyVariant::Grunt,
        EnemyVariant::Scout,
        EnemyVariant::Brute,
        EnemyVariant::Assassin,
        EnemyVariant::Sniper,
        EnemyVariant::Swarm,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EnemyVariant::Grunt => "Grunt",
            EnemyVariant::Scout => "Scout",
            EnemyVariant::Brute => "Brute",
            EnemyVariant::Assassin => "Assassin",
            EnemyVariant::Sniper => "Sniper",
            EnemyVariant::Swarm => "Swarm",
        }
    }

    pub fn stats(&self) -> EnemyStats {
        match self {
            EnemyVariant::Grunt => EnemyStats {
                max_health: 80,
                speed: 150.0,
                damage: 10,
                attack_range: 45.0,
                attack_cooldown: 1.2,
                direction_change_interval: 1.0,
                size: 40.0,
                chase_percent: DEFAULT_CHASE_PERCENT,
                xp_reward: 20,
                gold_reward: 5,
            },
            EnemyVariant::Scout => EnemyStats {
                max_health: 40,
                speed: 280.0,
                damage: 8,
                attack_range: 35.0,
                attack_cooldown: 0.8,
                direction_change_interval: 0.5,
                size: 25.0,
                chase_percent: SCOUT_CHASE_PERCENT,
                xp_reward: 15,
                gold_reward: 4,
            },
            EnemyVariant::Brute => EnemyStats {
                max_health: 150,
                speed: 80.0,
                damage: 25,
                attack_range: 70.0,
                attack_cooldown: 2.0,
                direction_change_interval: 2.0,
                size: 60.0,
                chase_percent: BRUTE_CHASE_PERCENT,
                xp_reward: 40,
                gold_reward: 12,
            },
            EnemyVariant::Assassin => EnemyStats {
                max_health: 60,
                speed: 220.0,
                damage: 20,
                attack_range: 25.0,
                attack_cooldown: 0.6,
                direction_change_interval: 0.8,
                size: 30.0,
                chase_percent: ASSASSIN_CHASE_PERCENT,
                xp_reward: 30,
                gold_reward: 9,
            },
            EnemyVariant::Sniper => EnemyStats {
                max_health: 50,
                speed: 100.0,
                damage: 40,
                attack_range: SNIPER_RANGE,
                attack_cooldown: 4.0,
                direction_change_interval: 3.0,
                size: 35.0,
                chase_percent: DEFAULT_CHASE_PERCENT,
                xp_reward: 35,
                gold_reward: 10,
            },
            EnemyVariant::Swarm => EnemyStats {
                max_health: 30,
                speed: 200.0,
                damage: 6,
                attack_range: 30.0,
                attack_cooldown: 0.7,
                direction_change_interval: 0.3,
                size: 20.0,
                chase_percent: DEFAULT_CHASE_PERCENT,
                xp_reward: 10,
                gold_reward: 2,
            },
        }
    }

    /// Whether the variant fires from range instead of waiting for contact.
    pub fn attacks_from_range(&self) -> bool {
        matches!(self, EnemyVariant::Sniper)
    }
}

/// Variant tag plus the state only that variant carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    Grunt,
    Scout,
    Brute {
        is_charging: bool,
    },
    Assassin {
        is_stealthed: bool,
        /// Seconds spent in the current visibility phase.
        stealth_timer: f64,
    },
    Sniper {
        is_aiming: bool,
        aim_timer: f64,
    },
    Swarm {
        orbit_angle: f64,
        orbit_radius: f64,
    },
}

impl EnemyKind {
    /// Fresh state for `variant`. Swarm members start at a random orbit angle.
    pub fn new(variant: EnemyVariant, rng: &mut impl Rng) -> Self {
        match variant {
            EnemyVariant::Grunt => EnemyKind::Grunt,
            EnemyVariant::Scout => EnemyKind::Scout,
            EnemyVariant::Brute => EnemyKind::Brute { is_charging: false },
            EnemyVariant::Assassin => EnemyKind::Assassin {
                is_stealthed: false,
                stealth_timer: 0.0,
            },
            EnemyVariant::Sniper => EnemyKind::Sniper {
                is_aiming: false,
                aim_timer: 0.0,
            },
            EnemyVariant::Swarm => EnemyKind::Swarm {
                orbit_angle: (rng.gen_range(0..360) as f64).to_radians(),
                orbit_radius: SWARM_START_RADIUS,
            },
        }
    }

    pub fn variant(&self) -> EnemyVariant {
        match self {
            EnemyKind::Grunt => EnemyVariant::Grunt,
            EnemyKind::Scout => EnemyVariant::Scout,
            EnemyKind::Brute { .. } => EnemyVariant::Brute,
            EnemyKind::Assassin { .. } => EnemyVariant::Assassin,
            EnemyKind::Sniper { .. } => EnemyVariant::Sniper,
            EnemyKind::Swarm { .. } => EnemyVariant::Swarm,
        }
    }
}

/// A hostile agent in the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u64,
    pub kind: EnemyKind,
    pub position: Vec2,
    pub vitals: Vitals,
    pub speed: f64,
    pub damage: u32,
    pub attack_range: f64,
    pub attack_cooldown: f64,
    /// Seconds since the last attack; an attack needs this to reach the cooldown.
    pub attack_timer: f64,
    /// Current movement target.
    pub target: Vec2,
    pub direction_change_interval: f64,
    /// Seconds since the last wander/chase re-roll.
    pub direction_change_timer: f64,
    pub size: f64,
}

impl Enemy {
    pub fn new(id: u64, variant: EnemyVariant, position: Vec2, rng: &mut impl Rng) -> Self {
        let stats = variant.stats();
        Self {
            id,
            kind: EnemyKind::new(variant, rng),
            position,
            vitals: Vitals::new(stats.max_health),
            speed: stats.speed,
            damage: stats.damage,
            attack_range: stats.attack_range,
            attack_cooldown: stats.attack_cooldown,
            attack_timer: 0.0,
            target: position,
            direction_change_interval: stats.direction_change_interval,
            direction_change_timer: 0.0,
            size: stats.size,
        }
    }

    pub fn variant(&self) -> EnemyVariant {
        self.kind.variant()
    }

    pub fn is_alive(&self) -> bool {
        self.vitals.is_alive()
    }

    pub fn world_position(&self) -> Vec2 {
        self.position
    }

    /// Bounding box for the driver's overlap test.
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.position, self.size)
    }

    pub fn health(&self) -> u32 {
        self.vitals.current()
    }

    pub fn max_health(&self) -> u32 {
        self.vitals.max()
    }

    /// Applies damage, never dropping health below zero. Returns health lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.vitals.take_damage(amount)
    }

    pub fn is_charging(&self) -> bool {
        matches!(self.kind, EnemyKind::Brute { is_charging: true })
    }

    pub fn is_stealthed(&self) -> bool {
        matches!(
            self.kind,
            EnemyKind::Assassin {
                is_stealthed: true,
                ..
            }
        )
    }

    pub fn is_aiming(&self) -> bool {
        matches!(self.kind, EnemyKind::Sniper { is_aiming: true, .. })
    }

    /// Speed used by the next movement step.
    pub fn current_speed(&self) -> f64 {
        if self.is_charging() {
            BRUTE_CHARGE_SPEED
        } else {
            self.speed
        }
    }

    pub fn attack_ready(&self) -> bool {
        self.attack_timer >= self.attack_cooldown
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
    fn test_new_enemy_uses_variant_stats() {
        let mut rng = test_rng();
        for variant in EnemyVariant::ALL {
            let enemy = Enemy::new(1, variant, Vec2::new(100.0, 100.0), &mut rng);
            let stats = variant.stats();
            assert_eq!(enemy.variant(), variant);
            assert_eq!(enemy.health(), stats.max_health);
            assert_eq!(enemy.speed, stats.speed);
            assert_eq!(enemy.attack_range, stats.attack_range);
            assert!(enemy.is_alive());
        }
    }

    #[test]
    fn test_enemy_take_damage_no_underflow() {
        let mut enemy = Enemy::new(1, EnemyVariant::Swarm, Vec2::ZERO, &mut test_rng());
        assert_eq!(enemy.take_damage(1000), 30);
        assert_eq!(enemy.health(), 0);
        assert!(!enemy.is_alive());
    }

    #[test]
    fn test_swarm_starts_with_valid_orbit() {
        let mut rng = test_rng();
        for _ in 0..20 {
            let enemy = Enemy::new(1, EnemyVariant::Swarm, Vec2::ZERO, &mut rng);
            match enemy.kind {
                EnemyKind::Swarm {
                    orbit_angle,
                    orbit_radius,
                } => {
                    assert!((0.0..std::f64::consts::TAU).contains(&orbit_angle));
                    assert_eq!(orbit_radius, SWARM_START_RADIUS);
                }
                other => panic!("expected swarm state, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_bounds_centered_on_position() {
        let enemy = Enemy::new(1, EnemyVariant::Brute, Vec2::new(500.0, 500.0), &mut test_rng());
        let b = enemy.bounds();
        assert_eq!(b.left, 470.0);
        assert_eq!(b.top, 470.0);
        assert_eq!(b.width, 60.0);
    }

    #[test]
    fn test_only_sniper_attacks_from_range() {
        let ranged: Vec<_> = EnemyVariant::ALL
            .iter()
            .filter(|v| v.attacks_from_range())
            .collect();
        assert_eq!(ranged, vec![&EnemyVariant::Sniper]);
    }

    #[test]
    fn test_charging_brute_uses_charge_speed() {
        let mut enemy = Enemy::new(1, EnemyVariant::Brute, Vec2::ZERO, &mut test_rng());
        assert_eq!(enemy.current_speed(), 80.0);
        enemy.kind = EnemyKind::Brute { is_charging: true };
        assert_eq!(enemy.current_speed(), BRUTE_CHARGE_SPEED);
    }
}
