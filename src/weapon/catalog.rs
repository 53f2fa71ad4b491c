//! Weapon tier catalog: per-category stat lines for each tier plus the
//! upgrade ladder on top of them.
//!
//! The catalog is built once and passed by reference to whatever needs it
//! (the shop, the simulator). It is never mutated after construction.

use super::types::{Weapon, WeaponClass};
use crate::core::constants::{DEFAULT_PROJECTILE_SPEED, DEFAULT_SWING_DURATION};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeaponCategory {
    Sword,
    Dagger,
    Bow,
    Crossbow,
    Axe,
    Staff,
    Hammer,
    Spear,
    Wand,
    Cannon,
    Chainsaw,
    RocketLauncher,
}

impl WeaponCategory {
    pub const ALL: [WeaponCategory; 12] = [
        WeaponCategory::Sword,
        WeaponCategory::Dagger,
        WeaponCategory::Bow,
        WeaponCategory::Crossbow,
        WeaponCategory::Axe,
        WeaponCategory::Staff,
        WeaponCategory::Hammer,
        WeaponCategory::Spear,
        WeaponCategory::Wand,
        WeaponCategory::Cannon,
        WeaponCategory::Chainsaw,
        WeaponCategory::RocketLauncher,
    ];

    /// Which weapon family this category builds, if any.
    pub fn weapon_class(&self) -> Option<WeaponClass> {
        match self {
            WeaponCategory::Sword
            | WeaponCategory::Dagger
            | WeaponCategory::Axe
            | WeaponCategory::Hammer
            | WeaponCategory::Spear => Some(WeaponClass::Melee),
            WeaponCategory::Bow
            | WeaponCategory::Crossbow
            | WeaponCategory::Staff
            | WeaponCategory::Wand
            | WeaponCategory::Cannon => Some(WeaponClass::Ranged),
            WeaponCategory::Chainsaw | WeaponCategory::RocketLauncher => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeaponTier {
    Basic,
    Advanced,
    Legendary,
}

impl WeaponTier {
    pub const ALL: [WeaponTier; 3] = [WeaponTier::Basic, WeaponTier::Advanced, WeaponTier::Legendary];
}

/// One catalog line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub damage: u32,
    pub cooldown: f64,
    pub range: f64,
    pub cost: u32,
    pub name: String,
    pub description: String,
}

impl WeaponStats {
    fn new(damage: u32, cooldown: f64, range: f64, cost: u32, name: &str, description: &str) -> Self {
        Self {
            damage,
            cooldown,
            range,
            cost,
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

/// Highest upgrade level a catalog weapon can reach.
pub const MAX_UPGRADE_LEVEL: u8 = 3;

/// (damage ×, cooldown ×, range ×, extra cost) per upgrade level.
const UPGRADE_LADDER: [(f64, f64, f64, u32); 4] = [
    (1.0, 1.0, 1.0, 0),
    (1.3, 0.9, 1.1, 100),
    (1.6, 0.8, 1.2, 250),
    (2.0, 0.7, 1.3, 500),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("no {tier:?} entry for {category:?}")]
    MissingEntry {
        category: WeaponCategory,
        tier: WeaponTier,
    },
    #[error("{0:?} has no buildable weapon")]
    UnsupportedCategory(WeaponCategory),
    #[error("upgrade level {0} is above the maximum of {MAX_UPGRADE_LEVEL}")]
    InvalidUpgrade(u8),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Clone, Default)]
pub struct WeaponCatalog {
    entries: HashMap<(WeaponCategory, WeaponTier), WeaponStats>,
}

impl WeaponCatalog {
    /// An empty catalog; every lookup fails until entries are inserted.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard three-tier catalog.
    pub fn standard() -> Self {
        use WeaponCategory::*;
        use WeaponTier::*;

        let mut catalog = Self::empty();
        let rows: [(WeaponCategory, [WeaponStats; 3]); 12] = [
            (Sword, [
                WeaponStats::new(25, 1.0, 60.0, 0, "Rusty Sword", "A worn blade from humble beginnings"),
                WeaponStats::new(45, 0.8, 70.0, 150, "Steel Sword", "A well-crafted blade of quality steel"),
                WeaponStats::new(80, 0.6, 80.0, 500, "Legendary Blade", "A masterwork of steel and magic"),
            ]),
            (Dagger, [
                WeaponStats::new(15, 0.6, 40.0, 0, "Simple Dagger", "Quick strikes with a basic blade"),
                WeaponStats::new(28, 0.4, 45.0, 120, "Assassin's Blade", "Swift and deadly precision weapon"),
                WeaponStats::new(50, 0.3, 50.0, 400, "Shadowfang", "A dagger forged in darkness itself"),
            ]),
            (Bow, [
                WeaponStats::new(20, 1.2, 200.0, 0, "Wooden Bow", "A simple bow for hunting"),
                WeaponStats::new(35, 1.0, 250.0, 180, "Composite Bow", "Enhanced range and power"),
                WeaponStats::new(65, 0.8, 300.0, 600, "Elven Longbow", "Crafted by master elven artisans"),
            ]),
            (Crossbow, [
                WeaponStats::new(30, 1.8, 180.0, 0, "Light Crossbow", "Mechanical precision in a compact form"),
                WeaponStats::new(55, 1.5, 220.0, 200, "Heavy Crossbow", "Devastating power with slower reload"),
                WeaponStats::new(95, 1.2, 280.0, 700, "Siege Breaker", "A crossbow that can pierce any armor"),
            ]),
            (Axe, [
                WeaponStats::new(35, 1.5, 50.0, 80, "Woodcutter's Axe", "Heavy but effective melee weapon"),
                WeaponStats::new(60, 1.2, 55.0, 250, "War Axe", "Designed for battle, not trees"),
                WeaponStats::new(110, 1.0, 60.0, 800, "Berserker's Fury", "An axe that thirsts for blood"),
            ]),
            (Staff, [
                WeaponStats::new(18, 1.0, 150.0, 100, "Apprentice Staff", "Channel basic magical energies"),
                WeaponStats::new(32, 0.8, 180.0, 300, "Wizard's Staff", "Enhanced magical focus and power"),
                WeaponStats::new(60, 0.6, 220.0, 900, "Archmage's Rod", "Ultimate magical weapon of destruction"),
            ]),
            (Hammer, [
                WeaponStats::new(40, 2.0, 45.0, 120, "Smith's Hammer", "Heavy impact, slow swing"),
                WeaponStats::new(70, 1.6, 50.0, 350, "War Hammer", "Crushes armor and bone alike"),
                WeaponStats::new(120, 1.3, 55.0, 1000, "Thunder Maul", "Strikes with the force of lightning"),
            ]),
            (Spear, [
                WeaponStats::new(22, 1.1, 80.0, 60, "Pike", "Extended reach for keeping enemies at bay"),
                WeaponStats::new(38, 0.9, 90.0, 220, "Halberd", "Versatile polearm for experienced warriors"),
                WeaponStats::new(70, 0.7, 100.0, 750, "Gungnir", "The spear that never misses its target"),
            ]),
            (Wand, [
                WeaponStats::new(12, 0.5, 120.0, 80, "Magic Wand", "Quick magical projectiles"),
                WeaponStats::new(22, 0.4, 140.0, 280, "Enchanted Wand", "Rapid-fire magical attacks"),
                WeaponStats::new(40, 0.3, 160.0, 850, "Wand of Wonder", "Incredible speed and magical power"),
            ]),
            (Cannon, [
                WeaponStats::new(60, 3.0, 250.0, 400, "Hand Cannon", "Explosive projectiles with area damage"),
                WeaponStats::new(100, 2.5, 300.0, 800, "Dragon Cannon", "Devastating explosive weapon"),
                WeaponStats::new(180, 2.0, 350.0, 1500, "Annihilator", "Ultimate destruction in portable form"),
            ]),
            (Chainsaw, [
                WeaponStats::new(50, 0.8, 35.0, 300, "Rusty Chainsaw", "Needs oil badly"),
                WeaponStats::new(85, 0.6, 40.0, 600, "Demon Ripper", "Tears through anything with ease"),
                WeaponStats::new(140, 0.4, 45.0, 1200, "Soul Shredder", "The screams are part of the damage"),
            ]),
            (RocketLauncher, [
                WeaponStats::new(80, 2.5, 300.0, 500, "RPG-Basic", "Point, shoot, boom"),
                WeaponStats::new(130, 2.0, 350.0, 1000, "Devastator", "Levels everything in sight"),
                WeaponStats::new(220, 1.5, 400.0, 2000, "Planet Buster", "May cause continental drift"),
            ]),
        ];

        for (category, tiers) in rows {
            for (tier, stats) in [Basic, Advanced, Legendary].into_iter().zip(tiers) {
                catalog.insert(category, tier, stats);
            }
        }
        catalog
    }

    pub fn insert(&mut self, category: WeaponCategory, tier: WeaponTier, stats: WeaponStats) {
        self.entries.insert((category, tier), stats);
    }

    /// Categories with at least one entry, in declaration order.
    pub fn categories(&self) -> Vec<WeaponCategory> {
        WeaponCategory::ALL
            .into_iter()
            .filter(|c| WeaponTier::ALL.iter().any(|t| self.entries.contains_key(&(*c, *t))))
            .collect()
    }

    pub fn stats(&self, category: WeaponCategory, tier: WeaponTier) -> CatalogResult<&WeaponStats> {
        self.entries
            .get(&(category, tier))
            .ok_or(CatalogError::MissingEntry { category, tier })
    }

    /// Catalog line with `upgrade_level` applied: scaled damage, cooldown and
    /// range, a "+N" name suffix and the upgrade cost added on.
    pub fn upgraded_stats(
        &self,
        category: WeaponCategory,
        tier: WeaponTier,
        upgrade_level: u8,
    ) -> CatalogResult<WeaponStats> {
        let base = self.stats(category, tier)?;
        let (damage_mult, cooldown_mult, range_mult, extra_cost) = UPGRADE_LADDER
            .get(upgrade_level as usize)
            .copied()
            .ok_or(CatalogError::InvalidUpgrade(upgrade_level))?;

        if upgrade_level == 0 {
            return Ok(base.clone());
        }

        Ok(WeaponStats {
            damage: (base.damage as f64 * damage_mult) as u32,
            cooldown: base.cooldown * cooldown_mult,
            range: base.range * range_mult,
            cost: base.cost + extra_cost,
            name: format!("{} +{}", base.name, upgrade_level),
            description: base.description.clone(),
        })
    }

    /// Builds a playable weapon from a catalog line.
    pub fn create_weapon(
        &self,
        category: WeaponCategory,
        tier: WeaponTier,
        upgrade_level: u8,
    ) -> CatalogResult<Weapon> {
        let class = category
            .weapon_class()
            .ok_or(CatalogError::UnsupportedCategory(category))?;
        let stats = self.upgraded_stats(category, tier, upgrade_level)?;

        Ok(match class {
            WeaponClass::Melee => Weapon::melee(
                stats.name,
                stats.damage,
                stats.cooldown,
                stats.range,
                DEFAULT_SWING_DURATION,
            ),
            WeaponClass::Ranged => Weapon::ranged(
                stats.name,
                stats.damage,
                stats.cooldown,
                stats.range,
                DEFAULT_PROJECTILE_SPEED,
            ),
        })
    }
}
