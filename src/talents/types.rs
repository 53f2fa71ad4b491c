//! Talent definitions and their stat effects.

use crate::character::modifiers::StatModifiers;
use crate::core::Vitals;
use serde::{Deserialize, Serialize};

/// Column of the talent grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TalentCategory {
    Combat,
    Defensive,
    Utility,
}

impl TalentCategory {
    /// Column order, left to right.
    pub const ALL: [TalentCategory; 3] = [
        TalentCategory::Combat,
        TalentCategory::Defensive,
        TalentCategory::Utility,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TalentCategory::Combat => "Combat",
            TalentCategory::Defensive => "Defensive",
            TalentCategory::Utility => "Utility",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TalentRarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl TalentRarity {
    pub fn name(&self) -> &'static str {
        match self {
            TalentRarity::Common => "Common",
            TalentRarity::Uncommon => "Uncommon",
            TalentRarity::Rare => "Rare",
            TalentRarity::Epic => "Epic",
            TalentRarity::Legendary => "Legendary",
        }
    }
}

/// What a talent does. Each one writes into the player's modifier set
/// (and, for Health Boost, max health).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TalentEffect {
    // Combat
    DamageBoost,
    AttackSpeed,
    CriticalStrike,
    Vampirism,
    WeaponMastery,
    DoubleStrike,
    Berserk,
    Executioner,
    // Defensive
    HealthBoost,
    Armor,
    Regeneration,
    Shield,
    Dodge,
    // Utility
    SpeedBoost,
    ExperienceBoost,
    GoldFind,
    LuckyDrops,
}

impl TalentEffect {
    pub const ALL: [TalentEffect; 17] = [
        TalentEffect::DamageBoost,
        TalentEffect::AttackSpeed,
        TalentEffect::CriticalStrike,
        TalentEffect::Vampirism,
        TalentEffect::WeaponMastery,
        TalentEffect::DoubleStrike,
        TalentEffect::Berserk,
        TalentEffect::Executioner,
        TalentEffect::HealthBoost,
        TalentEffect::Armor,
        TalentEffect::Regeneration,
        TalentEffect::Shield,
        TalentEffect::Dodge,
        TalentEffect::SpeedBoost,
        TalentEffect::ExperienceBoost,
        TalentEffect::GoldFind,
        TalentEffect::LuckyDrops,
    ];

    pub fn category(&self) -> TalentCategory {
        match self {
            TalentEffect::DamageBoost
            | TalentEffect::AttackSpeed
            | TalentEffect::CriticalStrike
            | TalentEffect::Vampirism
            | TalentEffect::WeaponMastery
            | TalentEffect::DoubleStrike
            | TalentEffect::Berserk
            | TalentEffect::Executioner => TalentCategory::Combat,
            TalentEffect::HealthBoost
            | TalentEffect::Armor
            | TalentEffect::Regeneration
            | TalentEffect::Shield
            | TalentEffect::Dodge => TalentCategory::Defensive,
            TalentEffect::SpeedBoost
            | TalentEffect::ExperienceBoost
            | TalentEffect::GoldFind
            | TalentEffect::LuckyDrops => TalentCategory::Utility,
        }
    }

    /// Pool rarity at level 1.
    pub fn base_rarity(&self) -> TalentRarity {
        match self {
            TalentEffect::DamageBoost
            | TalentEffect::AttackSpeed
            | TalentEffect::HealthBoost
            | TalentEffect::Armor
            | TalentEffect::SpeedBoost
            | TalentEffect::ExperienceBoost => TalentRarity::Common,
            TalentEffect::CriticalStrike
            | TalentEffect::WeaponMastery
            | TalentEffect::Regeneration
            | TalentEffect::GoldFind => TalentRarity::Uncommon,
            TalentEffect::Vampirism
            | TalentEffect::DoubleStrike
            | TalentEffect::Shield
            | TalentEffect::LuckyDrops => TalentRarity::Rare,
            TalentEffect::Berserk
            | TalentEffect::Executioner
            | TalentEffect::Dodge => TalentRarity::Epic,
        }
    }

    /// Display name at level 1.
    pub fn name(&self) -> &'static str {
        match self {
            TalentEffect::DamageBoost => "Damage Boost",
            TalentEffect::AttackSpeed => "Attack Speed",
            TalentEffect::CriticalStrike => "Critical Strike",
            TalentEffect::Vampirism => "Vampirism",
            TalentEffect::WeaponMastery => "Weapon Mastery",
            TalentEffect::DoubleStrike => "Double Strike",
            TalentEffect::Berserk => "Berserk",
            TalentEffect::Executioner => "Executioner",
            TalentEffect::HealthBoost => "Health Boost",
            TalentEffect::Armor => "Armor",
            TalentEffect::Regeneration => "Regeneration",
            TalentEffect::Shield => "Shield",
            TalentEffect::Dodge => "Dodge",
            TalentEffect::SpeedBoost => "Speed Boost",
            TalentEffect::ExperienceBoost => "Experience Boost",
            TalentEffect::GoldFind => "Gold Find",
            TalentEffect::LuckyDrops => "Lucky Drops",
        }
    }

    /// Display name once the talent has been upgraded past level 1.
    pub fn upgrade_name(&self) -> &'static str {
        match self {
            TalentEffect::DamageBoost => "Enhanced Damage",
            TalentEffect::AttackSpeed => "Lightning Strikes",
            TalentEffect::CriticalStrike => "Lethal Precision",
            TalentEffect::Vampirism => "Blood Drinker",
            TalentEffect::WeaponMastery => "Master Combatant",
            TalentEffect::DoubleStrike => "Flurry of Blows",
            TalentEffect::Berserk => "Unstoppable Rage",
            TalentEffect::Executioner => "Angel of Death",
            TalentEffect::HealthBoost => "Vitality",
            TalentEffect::Armor => "Plate Armor",
            TalentEffect::Regeneration => "Fast Healing",
            TalentEffect::Shield => "Energy Shield",
            TalentEffect::Dodge => "Evasion Master",
            TalentEffect::SpeedBoost => "Swift Movement",
            TalentEffect::ExperienceBoost => "Scholar",
            TalentEffect::GoldFind => "Treasure Hunter",
            TalentEffect::LuckyDrops => "Fortune's Favor",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TalentEffect::DamageBoost => "Increases weapon damage by 15%",
            TalentEffect::AttackSpeed => "Increases attack speed by 15%",
            TalentEffect::CriticalStrike => "10% chance for 2x damage critical hits",
            TalentEffect::Vampirism => "Heal for 10% of damage dealt",
            TalentEffect::WeaponMastery => "Increases weapon damage by 25%",
            TalentEffect::DoubleStrike => "15% chance to strike twice",
            TalentEffect::Berserk => "+50% damage when below 30% health",
            TalentEffect::Executioner => "Double damage to enemies below 20% health",
            TalentEffect::HealthBoost => "Increases maximum health by 25",
            TalentEffect::Armor => "Reduces incoming damage",
            TalentEffect::Regeneration => "Regenerate 1% of max health per second",
            TalentEffect::Shield => "Absorbs 50 damage, recharging over time",
            TalentEffect::Dodge => "10% chance to avoid an attack",
            TalentEffect::SpeedBoost => "Increases movement speed by 20%",
            TalentEffect::ExperienceBoost => "Gain 25% more experience",
            TalentEffect::GoldFind => "Find 30% more gold",
            TalentEffect::LuckyDrops => "Enemies drop health packs more often",
        }
    }
}

/// Mutable player state a talent is allowed to touch.
pub struct TalentTarget<'a> {
    pub modifiers: &'a mut StatModifiers,
    pub vitals: &'a mut Vitals,
}

/// Highest level any talent can reach.
pub const TALENT_MAX_LEVEL: u8 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Talent {
    pub effect: TalentEffect,
    /// Zero until the talent is first taken.
    pub level: u8,
    pub max_level: u8,
}

impl Talent {
    pub fn new(effect: TalentEffect) -> Self {
        Self {
            effect,
            level: 0,
            max_level: TALENT_MAX_LEVEL,
        }
    }

    pub fn category(&self) -> TalentCategory {
        self.effect.category()
    }

    /// Rarity climbs one band per upgrade.
    pub fn rarity(&self) -> TalentRarity {
        let base = self.effect.base_rarity();
        match (base, self.level) {
            (_, 0 | 1) => base,
            (TalentRarity::Common, _) => TalentRarity::Uncommon,
            (TalentRarity::Uncommon, _) => TalentRarity::Rare,
            (TalentRarity::Rare, _) => TalentRarity::Epic,
            _ => TalentRarity::Legendary,
        }
    }

    pub fn name(&self) -> &'static str {
        if self.level >= 2 {
            self.effect.upgrade_name()
        } else {
            self.effect.name()
        }
    }

    pub fn description(&self) -> &'static str {
        self.effect.description()
    }

    pub fn can_level_up(&self) -> bool {
        self.level < self.max_level
    }

    /// Takes the talent for the first time and applies its base effect.
    /// Taking an already-taken talent does nothing.
    pub fn apply(&mut self, target: &mut TalentTarget<'_>) -> bool {
        if self.level > 0 {
            return false;
        }
        self.level = 1;
        apply_base(self.effect, target);
        true
    }

    /// Raises the level by one and applies the per-level increment.
    pub fn level_up(&mut self, target: &mut TalentTarget<'_>) -> bool {
        if self.level == 0 {
            return self.apply(target);
        }
        if !self.can_level_up() {
            return false;
        }
        self.level += 1;
        self.on_level_up(target);
        true
    }

    fn on_level_up(&self, target: &mut TalentTarget<'_>) {
        let mods = &mut *target.modifiers;
        match self.effect {
            TalentEffect::DamageBoost => mods.add_damage_multiplier(0.05),
            TalentEffect::AttackSpeed => mods.add_attack_speed_multiplier(0.10),
            TalentEffect::CriticalStrike => {
                mods.add_crit_chance(0.05);
                mods.add_crit_multiplier(0.25);
            }
            TalentEffect::Vampirism => mods.add_life_steal(0.05),
            TalentEffect::WeaponMastery => mods.add_damage_multiplier(0.10),
            TalentEffect::DoubleStrike => mods.add_double_strike_chance(0.05),
            TalentEffect::Berserk => mods.add_berserk(0.0, 0.1),
            TalentEffect::Executioner => mods.add_execute(0.0, 0.25),
            TalentEffect::HealthBoost => target.vitals.raise_max(15),
            TalentEffect::Armor => mods.add_armor(1.0),
            TalentEffect::Regeneration => mods.add_regen_rate(0.005),
            TalentEffect::Shield => mods.add_shield(25.0, 0.0),
            TalentEffect::Dodge => mods.add_dodge_chance(0.05),
            TalentEffect::SpeedBoost => mods.add_move_speed_multiplier(0.10),
            TalentEffect::ExperienceBoost => mods.add_experience_multiplier(0.15),
            TalentEffect::GoldFind => mods.add_gold_multiplier(0.20),
            TalentEffect::LuckyDrops => mods.add_drop_luck(0.05),
        }
    }
}

fn apply_base(effect: TalentEffect, target: &mut TalentTarget<'_>) {
    let mods = &mut *target.modifiers;
    match effect {
        TalentEffect::DamageBoost => mods.add_damage_multiplier(0.15),
        TalentEffect::AttackSpeed => mods.add_attack_speed_multiplier(0.15),
        TalentEffect::CriticalStrike => {
            mods.add_crit_chance(0.10);
            mods.raise_crit_multiplier(2.0);
        }
        TalentEffect::Vampirism => mods.add_life_steal(0.10),
        TalentEffect::WeaponMastery => mods.add_damage_multiplier(0.25),
        TalentEffect::DoubleStrike => mods.add_double_strike_chance(0.15),
        TalentEffect::Berserk => mods.add_berserk(0.30, 0.5),
        TalentEffect::Executioner => mods.add_execute(0.20, 1.0),
        TalentEffect::HealthBoost => target.vitals.raise_max(25),
        TalentEffect::Armor => mods.add_armor(2.0),
        TalentEffect::Regeneration => mods.add_regen_rate(0.01),
        TalentEffect::Shield => mods.add_shield(50.0, 5.0),
        TalentEffect::Dodge => mods.add_dodge_chance(0.10),
        TalentEffect::SpeedBoost => mods.add_move_speed_multiplier(0.20),
        TalentEffect::ExperienceBoost => mods.add_experience_multiplier(0.25),
        TalentEffect::GoldFind => mods.add_gold_multiplier(0.30),
        TalentEffect::LuckyDrops => mods.add_drop_luck(0.15),
    }
}
