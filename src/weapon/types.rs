//! Weapon configuration, runtime state and projectiles.

use crate::core::constants::*;
use crate::core::Vec2;
use serde::{Deserialize, Serialize};

/// Broad weapon family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponClass {
    Melee,
    Ranged,
}

/// A live ranged-weapon shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Seconds left before the projectile fizzles.
    pub lifetime: f64,
    pub active: bool,
}

impl Projectile {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            lifetime: PROJECTILE_LIFETIME,
            active: true,
        }
    }

    /// Moves one step and burns lifetime. Deactivates once lifetime runs out.
    pub fn advance(&mut self, delta_time: f64) {
        if !self.active {
            return;
        }
        self.position += self.velocity * delta_time;
        self.lifetime -= delta_time;
        if self.lifetime <= 0.0 {
            self.lifetime = 0.0;
            self.active = false;
        }
    }
}

/// Per-class runtime state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WeaponKind {
    Melee {
        swing_duration: f64,
        /// Seconds left in the current swing; zero when idle.
        swing_timer: f64,
        /// Unit vector toward the enemy that triggered the swing.
        swing_direction: Vec2,
    },
    Ranged {
        projectile_speed: f64,
        projectiles: Vec<Projectile>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub damage: u32,
    /// Base cooldown in seconds, before attack-speed bonuses.
    pub cooldown: f64,
    pub range: f64,
    /// Seconds until the next attack is allowed.
    pub cooldown_timer: f64,
    pub kind: WeaponKind,
}

impl Weapon {
    pub fn melee(
        name: impl Into<String>,
        damage: u32,
        cooldown: f64,
        range: f64,
        swing_duration: f64,
    ) -> Self {
        Self {
            name: name.into(),
            damage,
            cooldown,
            range,
            cooldown_timer: 0.0,
            kind: WeaponKind::Melee {
                swing_duration,
                swing_timer: 0.0,
                swing_direction: Vec2::ZERO,
            },
        }
    }

    pub fn ranged(
        name: impl Into<String>,
        damage: u32,
        cooldown: f64,
        range: f64,
        projectile_speed: f64,
    ) -> Self {
        Self {
            name: name.into(),
            damage,
            cooldown,
            range,
            cooldown_timer: 0.0,
            kind: WeaponKind::Ranged {
                projectile_speed,
                projectiles: Vec::with_capacity(PROJECTILE_POOL_CAPACITY),
            },
        }
    }

    pub fn sword() -> Self {
        Self::melee("Sword", 25, 0.8, 60.0, 0.3)
    }

    pub fn dagger() -> Self {
        Self::melee("Dagger", 15, 0.5, 45.0, 0.2)
    }

    pub fn bow() -> Self {
        Self::ranged("Bow", 20, 1.0, 250.0, 350.0)
    }

    pub fn crossbow() -> Self {
        Self::ranged("Crossbow", 35, 1.5, 300.0, 500.0)
    }

    pub fn class(&self) -> WeaponClass {
        match self.kind {
            WeaponKind::Melee { .. } => WeaponClass::Melee,
            WeaponKind::Ranged { .. } => WeaponClass::Ranged,
        }
    }

    pub fn is_swinging(&self) -> bool {
        matches!(self.kind, WeaponKind::Melee { swing_timer, .. } if swing_timer > 0.0)
    }

    /// Live projectiles; always empty for melee weapons.
    pub fn projectiles(&self) -> &[Projectile] {
        match &self.kind {
            WeaponKind::Ranged { projectiles, .. } => projectiles,
            WeaponKind::Melee { .. } => &[],
        }
    }
}

/// Named starting weapons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponPreset {
    Sword,
    Dagger,
    Bow,
    Crossbow,
}

impl WeaponPreset {
    pub fn build(self) -> Weapon {
        match self {
            WeaponPreset::Sword => Weapon::sword(),
            WeaponPreset::Dagger => Weapon::dagger(),
            WeaponPreset::Bow => Weapon::bow(),
            WeaponPreset::Crossbow => Weapon::crossbow(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let sword = Weapon::sword();
        assert_eq!(sword.class(), WeaponClass::Melee);
        assert_eq!(sword.damage, 25);
        assert_eq!(sword.range, 60.0);

        let crossbow = Weapon::crossbow();
        assert_eq!(crossbow.class(), WeaponClass::Ranged);
        assert!(matches!(
            crossbow.kind,
            WeaponKind::Ranged { projectile_speed, .. } if projectile_speed == 500.0
        ));
    }

    #[test]
    fn test_projectile_expires_after_lifetime() {
        let mut p = Projectile::new(Vec2::ZERO, Vec2::new(100.0, 0.0));
        p.advance(2.5);
        assert!(p.active);
        assert!((p.position.x - 250.0).abs() < 1e-9);
        p.advance(0.5);
        assert!(!p.active);
        let frozen = p.position;
        p.advance(1.0);
        assert_eq!(p.position, frozen);
    }

    #[test]
    fn test_melee_has_no_projectiles() {
        assert!(Weapon::dagger().projectiles().is_empty());
        assert!(!Weapon::dagger().is_swinging());
    }

    #[test]
    fn test_preset_build_matches_constructor() {
        assert_eq!(WeaponPreset::Bow.build(), Weapon::bow());
    }
}
