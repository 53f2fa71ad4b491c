//! Shop stock: weapon listings built from the tier catalog plus the fixed
//! stat boosts.

use crate::character::Player;
use crate::weapon::{WeaponCatalog, WeaponCategory, WeaponTier};
use crate::weapon::catalog::MAX_UPGRADE_LEVEL;
use serde::{Deserialize, Serialize};

/// Permanent stat upgrades sold by the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatBoost {
    GoldMagnet,
    BattleFrenzy,
    TreasureHunter,
    WeaponMaster,
    BerserkerRage,
    LuckyStrike,
    ShieldBearer,
    SwiftFeet,
}

impl StatBoost {
    pub const ALL: [StatBoost; 8] = [
        StatBoost::GoldMagnet,
        StatBoost::BattleFrenzy,
        StatBoost::TreasureHunter,
        StatBoost::WeaponMaster,
        StatBoost::BerserkerRage,
        StatBoost::LuckyStrike,
        StatBoost::ShieldBearer,
        StatBoost::SwiftFeet,
    ];

    pub fn id(&self) -> u32 {
        match self {
            StatBoost::GoldMagnet => 101,
            StatBoost::BattleFrenzy => 102,
            StatBoost::TreasureHunter => 103,
            StatBoost::WeaponMaster => 104,
            StatBoost::BerserkerRage => 105,
            StatBoost::LuckyStrike => 106,
            StatBoost::ShieldBearer => 107,
            StatBoost::SwiftFeet => 108,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StatBoost::GoldMagnet => "Gold Magnet",
            StatBoost::BattleFrenzy => "Battle Frenzy",
            StatBoost::TreasureHunter => "Treasure Hunter",
            StatBoost::WeaponMaster => "Weapon Master",
            StatBoost::BerserkerRage => "Berserker Rage",
            StatBoost::LuckyStrike => "Lucky Strike",
            StatBoost::ShieldBearer => "Shield Bearer",
            StatBoost::SwiftFeet => "Swift Feet",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StatBoost::GoldMagnet => "50% more gold from every pickup",
            StatBoost::BattleFrenzy => "Attacks 30% faster",
            StatBoost::TreasureHunter => "Double gold from enemies",
            StatBoost::WeaponMaster => "Weapon cooldowns recover 25% faster",
            StatBoost::BerserkerRage => "Deal 50% more damage",
            StatBoost::LuckyStrike => "15% chance to deal critical damage",
            StatBoost::ShieldBearer => "Heavy armor against incoming hits",
            StatBoost::SwiftFeet => "Increases movement speed by 30%",
        }
    }

    pub fn price(&self) -> u32 {
        match self {
            StatBoost::GoldMagnet => 100,
            StatBoost::BattleFrenzy => 150,
            StatBoost::TreasureHunter => 200,
            StatBoost::WeaponMaster => 175,
            StatBoost::BerserkerRage => 250,
            StatBoost::LuckyStrike => 300,
            StatBoost::ShieldBearer => 350,
            StatBoost::SwiftFeet => 200,
        }
    }

    pub fn apply(&self, player: &mut Player) {
        match self {
            StatBoost::GoldMagnet => player.add_gold_multiplier(0.5),
            StatBoost::BattleFrenzy => player.add_attack_speed_multiplier(0.3),
            StatBoost::TreasureHunter => player.add_gold_multiplier(1.0),
            StatBoost::WeaponMaster => player.add_attack_speed_multiplier(0.25),
            StatBoost::BerserkerRage => player.add_damage_multiplier(0.5),
            StatBoost::LuckyStrike => player.add_crit_chance(0.15),
            StatBoost::ShieldBearer => player.add_armor(20.0),
            StatBoost::SwiftFeet => player.multiply_speed(1.3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShopItemKind {
    Weapon {
        category: WeaponCategory,
        tier: WeaponTier,
        upgrade_level: u8,
    },
    Stat(StatBoost),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopItem {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub price: u32,
    pub kind: ShopItemKind,
}

/// First id handed to weapon listings. Kept clear of the stat-boost ids.
pub const FIRST_WEAPON_ITEM_ID: u32 = 1001;

/// Everything on sale. Weapon listings are numbered in tier-major order;
/// stat boosts keep their fixed ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopStock {
    weapons: Vec<ShopItem>,
    boosts: Vec<ShopItem>,
}

impl ShopStock {
    pub fn new(catalog: &WeaponCatalog) -> Self {
        let mut weapons = Vec::new();
        let mut next_id = FIRST_WEAPON_ITEM_ID;

        for tier in WeaponTier::ALL {
            for category in catalog.categories() {
                if category.weapon_class().is_none() {
                    continue;
                }
                for upgrade_level in 0..=MAX_UPGRADE_LEVEL {
                    let Ok(stats) = catalog.upgraded_stats(category, tier, upgrade_level) else {
                        continue;
                    };
                    weapons.push(ShopItem {
                        id: next_id,
                        name: stats.name,
                        description: stats.description,
                        price: stats.cost,
                        kind: ShopItemKind::Weapon {
                            category,
                            tier,
                            upgrade_level,
                        },
                    });
                    next_id += 1;
                }
            }
        }

        let boosts = StatBoost::ALL
            .into_iter()
            .map(|boost| ShopItem {
                id: boost.id(),
                name: boost.name().to_string(),
                description: boost.description().to_string(),
                price: boost.price(),
                kind: ShopItemKind::Stat(boost),
            })
            .collect();

        Self { weapons, boosts }
    }

    pub fn weapons(&self) -> &[ShopItem] {
        &self.weapons
    }

    pub fn boosts(&self) -> &[ShopItem] {
        &self.boosts
    }

    pub fn item(&self, id: u32) -> Option<&ShopItem> {
        self.weapons.iter().chain(self.boosts.iter()).find(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.weapons.len() + self.boosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_size() {
        let stock = ShopStock::new(&WeaponCatalog::standard());
        // 10 buildable categories, 3 tiers, 4 upgrade levels each
        assert_eq!(stock.weapons().len(), 120);
        assert_eq!(stock.boosts().len(), 8);
        assert_eq!(stock.len(), 128);
    }

    #[test]
    fn test_first_listings() {
        let stock = ShopStock::new(&WeaponCatalog::standard());
        let first = stock.item(FIRST_WEAPON_ITEM_ID).unwrap();
        assert_eq!(first.name, "Rusty Sword");
        assert_eq!(first.price, 0);
        let plus_three = stock.item(FIRST_WEAPON_ITEM_ID + 3).unwrap();
        assert_eq!(plus_three.name, "Rusty Sword +3");
        assert_eq!(plus_three.price, 500);
    }

    #[test]
    fn test_unsupported_categories_not_listed() {
        let stock = ShopStock::new(&WeaponCatalog::standard());
        assert!(stock.weapons().iter().all(|item| !matches!(
            item.kind,
            ShopItemKind::Weapon {
                category: WeaponCategory::Chainsaw | WeaponCategory::RocketLauncher,
                ..
            }
        )));
    }

    #[test]
    fn test_boost_lookup() {
        let stock = ShopStock::new(&WeaponCatalog::standard());
        let item = stock.item(107).unwrap();
        assert_eq!(item.kind, ShopItemKind::Stat(StatBoost::ShieldBearer));
        assert_eq!(item.price, 350);
        assert!(stock.item(999).is_none());
    }

    #[test]
    fn test_boost_effects() {
        let mut player = Player::new();
        StatBoost::SwiftFeet.apply(&mut player);
        assert!((player.modifiers.move_speed_multiplier - 1.3).abs() < 1e-9);
        StatBoost::BerserkerRage.apply(&mut player);
        assert!((player.modifiers.damage_multiplier - 1.5).abs() < 1e-9);
        StatBoost::ShieldBearer.apply(&mut player);
        assert_eq!(player.modifiers.armor, 20.0);
        StatBoost::TreasureHunter.apply(&mut player);
        assert!((player.modifiers.gold_multiplier - 2.0).abs() < 1e-9);
    }
}
