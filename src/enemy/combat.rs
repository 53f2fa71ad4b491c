//! Enemy attacks against the player.

use super::types::{Enemy, EnemyKind, EnemyVariant};
use crate::character::player::{DamageIntake, Player};
use crate::core::constants::BRUTE_CHARGE_DAMAGE_MULTIPLIER;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One landed (or dodged) enemy attack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStrike {
    pub enemy_id: u64,
    pub variant: EnemyVariant,
    /// Damage the enemy swung for, before dodge/armor/shield.
    pub raw_damage: u32,
    pub intake: DamageIntake,
}

impl Enemy {
    /// Damage the next attack would deal. Charging brutes hit harder.
    pub fn strike_damage(&self) -> u32 {
        if self.is_charging() {
            (self.damage as f64 * BRUTE_CHARGE_DAMAGE_MULTIPLIER).round() as u32
        } else {
            self.damage
        }
    }

    /// Attempts an attack. Needs the cooldown to have elapsed, the player
    /// within attack range and, for snipers, a finished aim. A successful
    /// attack pushes the damage through the player's intake pipeline and
    /// restarts the cooldown.
    pub fn attack(&mut self, player: &mut Player, rng: &mut impl Rng) -> Option<EnemyStrike> {
        if !self.is_alive() || !player.is_alive() || !self.attack_ready() {
            return None;
        }
        if let EnemyKind::Sniper {
            is_aiming: false, ..
        } = self.kind
        {
            return None;
        }
        if self.position.distance(player.position) >= self.attack_range {
            return None;
        }

        let raw_damage = self.strike_damage();
        let intake = player.take_damage(raw_damage, rng);
        self.attack_timer = 0.0;

        if let EnemyKind::Sniper {
            is_aiming,
            aim_timer,
        } = &mut self.kind
        {
            *is_aiming = false;
            *aim_timer = 0.0;
        }

        Some(EnemyStrike {
            enemy_id: self.id,
            variant: self.variant(),
            raw_damage,
            intake,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Vec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn player_at(x: f64, y: f64) -> Player {
        let mut player = Player::new();
        player.position = Vec2::new(x, y);
        player
    }

    #[test]
    fn test_attack_needs_cooldown() {
        let mut rng = test_rng();
        let mut player = player_at(1000.0, 1000.0);
        let mut grunt = Enemy::new(1, EnemyVariant::Grunt, Vec2::new(1020.0, 1000.0), &mut rng);

        assert!(grunt.attack(&mut player, &mut rng).is_none());
        assert_eq!(player.health(), 100);

        grunt.attack_timer = grunt.attack_cooldown;
        let strike = grunt.attack(&mut player, &mut rng).unwrap();
        assert_eq!(strike.raw_damage, 10);
        assert_eq!(strike.intake, DamageIntake::Taken { amount: 10 });
        assert_eq!(player.health(), 90);
        assert_eq!(grunt.attack_timer, 0.0);
    }

    #[test]
    fn test_attack_out_of_range_keeps_cooldown() {
        let mut rng = test_rng();
        let mut player = player_at(1000.0, 1000.0);
        let mut grunt = Enemy::new(1, EnemyVariant::Grunt, Vec2::new(1100.0, 1000.0), &mut rng);
        grunt.attack_timer = 5.0;
        assert!(grunt.attack(&mut player, &mut rng).is_none());
        assert_eq!(grunt.attack_timer, 5.0);
        assert_eq!(player.health(), 100);
    }

    #[test]
    fn test_attack_range_is_exclusive() {
        let mut rng = test_rng();
        let mut player = player_at(1000.0, 1000.0);
        let mut grunt = Enemy::new(1, EnemyVariant::Grunt, Vec2::new(1045.0, 1000.0), &mut rng);
        assert_eq!(grunt.attack_range, 45.0);
        grunt.attack_timer = grunt.attack_cooldown;
        assert!(grunt.attack(&mut player, &mut rng).is_none());

        grunt.position = Vec2::new(1044.5, 1000.0);
        assert!(grunt.attack(&mut player, &mut rng).is_some());
        assert_eq!(player.health(), 90);
    }

    #[test]
    fn test_charging_brute_hits_harder() {
        let mut rng = test_rng();
        let mut player = player_at(1000.0, 1000.0);
        let mut brute = Enemy::new(1, EnemyVariant::Brute, Vec2::new(1050.0, 1000.0), &mut rng);
        brute.kind = EnemyKind::Brute { is_charging: true };
        brute.attack_timer = brute.attack_cooldown;
        let strike = brute.attack(&mut player, &mut rng).unwrap();
        assert_eq!(strike.raw_damage, 38);
        assert_eq!(player.health(), 62);
    }

    #[test]
    fn test_sniper_waits_for_aim() {
        let mut rng = test_rng();
        let mut player = player_at(1180.0, 1000.0);
        let mut sniper = Enemy::new(1, EnemyVariant::Sniper, Vec2::new(1000.0, 1000.0), &mut rng);
        sniper.attack_timer = 10.0;
        assert!(sniper.attack(&mut player, &mut rng).is_none());

        sniper.kind = EnemyKind::Sniper {
            is_aiming: true,
            aim_timer: 2.5,
        };
        let strike = sniper.attack(&mut player, &mut rng).unwrap();
        assert_eq!(strike.raw_damage, 40);
        assert_eq!(player.health(), 60);
        assert_eq!(sniper.attack_timer, 0.0);
        assert!(!sniper.is_aiming());
        assert_eq!(
            sniper.kind,
            EnemyKind::Sniper {
                is_aiming: false,
                aim_timer: 0.0
            }
        );
    }

    #[test]
    fn test_dead_enemy_cannot_attack() {
        let mut rng = test_rng();
        let mut player = player_at(1000.0, 1000.0);
        let mut grunt = Enemy::new(1, EnemyVariant::Grunt, Vec2::new(1010.0, 1000.0), &mut rng);
        grunt.attack_timer = 10.0;
        grunt.take_damage(500);
        assert!(grunt.attack(&mut player, &mut rng).is_none());
        assert_eq!(player.health(), 100);
    }

    #[test]
    fn test_dodging_player_takes_nothing() {
        let mut rng = test_rng();
        let mut player = player_at(1000.0, 1000.0);
        player.modifiers.add_dodge_chance(1.0);
        let mut grunt = Enemy::new(1, EnemyVariant::Grunt, Vec2::new(1010.0, 1000.0), &mut rng);
        grunt.attack_timer = 10.0;
        let strike = grunt.attack(&mut player, &mut rng).unwrap();
        assert_eq!(strike.intake, DamageIntake::Dodged);
        assert_eq!(player.health(), 100);
        assert_eq!(grunt.attack_timer, 0.0);
    }
}
