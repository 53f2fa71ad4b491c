//! The player: vitals, weapons, modifiers, experience and the talent tree.

use super::damage::{
    calculate_modified_damage, life_steal_amount, mitigate_incoming, roll_chance, AttackContext,
    HitRoll,
};
use super::modifiers::StatModifiers;
use crate::core::constants::*;
use crate::core::geometry::{wrap_position, Rect, Vec2};
use crate::core::Vitals;
use crate::enemy::Enemy;
use crate::talents::{TalentTarget, TalentTree};
use crate::weapon::{AttackOutcome, Weapon, WeaponHit};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How an incoming hit was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageIntake {
    /// Avoided entirely by the dodge roll.
    Dodged,
    /// Soaked completely by the shield.
    Absorbed,
    /// Health actually lost.
    Taken { amount: u32 },
}

/// Everything the player's weapons did in one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeaponReport {
    /// Hits landed by projectiles already in flight.
    pub projectile_hits: Vec<WeaponHit>,
    /// Present when the current weapon tried to attack.
    pub attack: Option<AttackOutcome>,
    /// Health restored by life-steal across all damage events.
    pub healed: u32,
}

impl WeaponReport {
    pub fn damage_dealt(&self) -> u32 {
        let projectile: u32 = self.projectile_hits.iter().map(|h| h.damage).sum();
        let swing = match &self.attack {
            Some(AttackOutcome::Swing { total_damage, .. }) => *total_damage,
            _ => 0,
        };
        projectile + swing
    }

    /// Every individual hit, projectile and melee alike.
    pub fn hits(&self) -> impl Iterator<Item = &WeaponHit> {
        let swing_hits = match &self.attack {
            Some(AttackOutcome::Swing { hits, .. }) => hits.as_slice(),
            _ => &[],
        };
        self.projectile_hits.iter().chain(swing_hits.iter())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec2,
    pub vitals: Vitals,
    pub modifiers: StatModifiers,
    pub auto_attack: bool,
    weapons: Vec<Weapon>,
    current_weapon: usize,
    level: u32,
    experience: u64,
    pending_level_ups: u32,
    gold: u32,
    talent_tree: TalentTree,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// A fresh player in the middle of the world with a sword and a bow and
    /// the default talent layout.
    pub fn new() -> Self {
        Self::with_talent_tree(TalentTree::default())
    }

    /// A fresh player with a randomly generated talent tree.
    pub fn generate(rng: &mut impl Rng) -> Self {
        Self::with_talent_tree(TalentTree::generate(rng))
    }

    pub fn with_talent_tree(talent_tree: TalentTree) -> Self {
        Self {
            position: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            vitals: Vitals::new(PLAYER_START_HEALTH),
            modifiers: StatModifiers::default(),
            auto_attack: true,
            weapons: vec![Weapon::sword(), Weapon::bow()],
            current_weapon: 0,
            level: 1,
            experience: 0,
            pending_level_ups: 0,
            gold: 0,
            talent_tree,
        }
    }

    // ── Health ─────────────────────────────────────────────────────────

    pub fn health(&self) -> u32 {
        self.vitals.current()
    }

    pub fn max_health(&self) -> u32 {
        self.vitals.max()
    }

    pub fn is_alive(&self) -> bool {
        self.vitals.is_alive()
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.position, PLAYER_SIZE)
    }

    /// Incoming damage pipeline: dodge roll, then armor, then shield, then
    /// health.
    pub fn take_damage(&mut self, amount: u32, rng: &mut impl Rng) -> DamageIntake {
        if roll_chance(self.modifiers.dodge_chance, rng) {
            return DamageIntake::Dodged;
        }
        let mitigated = mitigate_incoming(&self.modifiers, amount);
        let remainder = self.modifiers.shield.absorb(mitigated);
        if mitigated > 0 && remainder == 0 {
            return DamageIntake::Absorbed;
        }
        DamageIntake::Taken {
            amount: self.vitals.take_damage(remainder),
        }
    }

    pub fn heal(&mut self, amount: u32) -> u32 {
        self.vitals.heal(amount)
    }

    /// Heals for the life-steal share of `damage_dealt`. Returns the amount
    /// actually restored.
    pub fn apply_life_steal(&mut self, damage_dealt: u32) -> u32 {
        let amount = life_steal_amount(&self.modifiers, damage_dealt);
        if amount == 0 {
            return 0;
        }
        self.vitals.heal(amount)
    }

    /// Shield recharge plus fractional health regen. Returns health restored.
    pub fn regenerate(&mut self, delta_time: f64) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        self.modifiers.shield.recharge(delta_time);
        let points = self.modifiers.drain_regen(self.vitals.max(), delta_time);
        self.vitals.heal(points)
    }

    // ── Damage helpers ─────────────────────────────────────────────────

    pub fn calculate_modified_damage(&self, base_damage: u32, rng: &mut impl Rng) -> HitRoll {
        calculate_modified_damage(&self.modifiers, base_damage, rng)
    }

    pub fn calculate_modified_cooldown(&self, base_cooldown: f64) -> f64 {
        self.modifiers.modified_cooldown(base_cooldown)
    }

    // ── Movement ───────────────────────────────────────────────────────

    /// Moves along `direction` (normalized here) at the modified speed,
    /// wrapping at the world edge. A zero direction stands still.
    pub fn move_player(&mut self, direction: Vec2, delta_time: f64) {
        let Some(dir) = direction.normalized() else {
            return;
        };
        let speed = PLAYER_BASE_SPEED * self.modifiers.move_speed_multiplier;
        self.position = wrap_position(self.position + dir * speed * delta_time);
    }

    // ── Experience ─────────────────────────────────────────────────────

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u64 {
        self.experience
    }

    pub fn experience_to_next_level(&self) -> u64 {
        self.level as u64 * XP_PER_LEVEL
    }

    pub fn pending_level_ups(&self) -> u32 {
        self.pending_level_ups
    }

    /// Adds experience scaled by the experience multiplier and resolves every
    /// threshold it crosses. Returns the number of levels gained.
    pub fn gain_experience(&mut self, amount: u64) -> u32 {
        let scaled = (amount as f64 * self.modifiers.experience_multiplier) as u64;
        self.experience += scaled;

        let mut gained = 0;
        loop {
            let needed = self.experience_to_next_level();
            if self.experience < needed {
                break;
            }
            self.experience -= needed;
            self.level += 1;
            self.pending_level_ups += 1;
            gained += 1;
            log::debug!("reached level {}", self.level);
        }
        gained
    }

    pub fn needs_level_up(&self) -> bool {
        self.pending_level_ups > 0
    }

    /// Consumes one pending level-up. The first one also opens the talent
    /// tree's top row.
    pub fn process_level_up(&mut self) -> bool {
        if self.pending_level_ups == 0 {
            return false;
        }
        self.pending_level_ups -= 1;
        self.enter_talent_tree();
        true
    }

    /// Opens the talent tree once the player has levelled at least once.
    /// Returns true only on the call that actually opened it.
    pub fn enter_talent_tree(&mut self) -> bool {
        if self.level <= 1 || self.talent_tree.is_entered() {
            return false;
        }
        self.talent_tree.unlock_top_row();
        log::debug!("talent tree unlocked at level {}", self.level);
        true
    }

    pub fn select_talent(&mut self, index: usize) -> bool {
        let mut target = TalentTarget {
            modifiers: &mut self.modifiers,
            vitals: &mut self.vitals,
        };
        self.talent_tree.select_talent(index, &mut target)
    }

    pub fn talent_tree(&self) -> &TalentTree {
        &self.talent_tree
    }

    // ── Gold ───────────────────────────────────────────────────────────

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Adds a gold pickup's value after the gold multiplier. Returns the
    /// amount credited.
    pub fn collect_gold(&mut self, value: u32) -> u32 {
        let amount = (value as f64 * self.modifiers.gold_multiplier).round() as u32;
        self.add_gold(amount);
        amount
    }

    pub fn spend_gold(&mut self, amount: u32) -> bool {
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        true
    }

    // ── Purchased upgrades ─────────────────────────────────────────────

    pub fn add_damage_multiplier(&mut self, amount: f64) {
        self.modifiers.add_damage_multiplier(amount);
    }

    pub fn add_attack_speed_multiplier(&mut self, amount: f64) {
        self.modifiers.add_attack_speed_multiplier(amount);
    }

    pub fn add_crit_chance(&mut self, amount: f64) {
        self.modifiers.add_crit_chance(amount);
    }

    pub fn add_armor(&mut self, amount: f64) {
        self.modifiers.add_armor(amount);
    }

    pub fn add_gold_multiplier(&mut self, amount: f64) {
        self.modifiers.add_gold_multiplier(amount);
    }

    /// Scales movement speed, compounding with earlier boosts.
    pub fn multiply_speed(&mut self, factor: f64) {
        self.modifiers.scale_move_speed(factor);
    }

    // ── Weapons ────────────────────────────────────────────────────────

    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    pub fn add_weapon(&mut self, weapon: Weapon) {
        log::debug!("added weapon {}", weapon.name);
        self.weapons.push(weapon);
    }

    pub fn clear_weapons(&mut self) {
        self.weapons.clear();
        self.current_weapon = 0;
    }

    pub fn current_weapon_index(&self) -> usize {
        self.current_weapon
    }

    pub fn current_weapon(&self) -> Option<&Weapon> {
        self.weapons.get(self.current_weapon)
    }

    /// Equips weapon `index`. Out-of-range indices are ignored.
    pub fn switch_weapon(&mut self, index: usize) {
        if index < self.weapons.len() {
            self.current_weapon = index;
        }
    }

    pub fn next_weapon(&mut self) {
        if !self.weapons.is_empty() {
            self.current_weapon = (self.current_weapon + 1) % self.weapons.len();
        }
    }

    pub fn previous_weapon(&mut self) {
        if !self.weapons.is_empty() {
            let len = self.weapons.len();
            self.current_weapon = (self.current_weapon + len - 1) % len;
        }
    }

    /// Advances every weapon's swing and projectiles, then lets the equipped
    /// weapon attack if it is ready and either auto-attack sees a target in
    /// range or `manual_attack` is pressed. Life-steal is applied once per
    /// projectile hit and once per swing on the swing's total rolled damage.
    pub fn update_weapons(
        &mut self,
        delta_time: f64,
        enemies: &mut [Enemy],
        manual_attack: bool,
        rng: &mut impl Rng,
    ) -> WeaponReport {
        let mut report = WeaponReport::default();
        if !self.is_alive() {
            return report;
        }

        let ctx = AttackContext {
            modifiers: &self.modifiers,
            attacker_health_fraction: self.vitals.fraction(),
        };
        for weapon in self.weapons.iter_mut() {
            report
                .projectile_hits
                .extend(weapon.update(delta_time, enemies, &ctx, rng));
        }

        let origin = self.position;
        if let Some(weapon) = self.weapons.get_mut(self.current_weapon) {
            let ready = weapon.can_attack(delta_time);
            let wants_attack =
                manual_attack || (self.auto_attack && weapon.has_enemies_in_range(origin, enemies));
            if ready && wants_attack {
                report.attack = Some(weapon.attack(origin, enemies, &ctx, rng));
            }
        }

        let projectile_rolls: Vec<u32> = report.projectile_hits.iter().map(|h| h.rolled).collect();
        for rolled in projectile_rolls {
            report.healed += self.apply_life_steal(rolled);
        }
        let swing_rolled: u32 = match &report.attack {
            Some(AttackOutcome::Swing { hits, .. }) => hits.iter().map(|h| h.rolled).sum(),
            _ => 0,
        };
        if swing_rolled > 0 {
            report.healed += self.apply_life_steal(swing_rolled);
        }
        report
    }
}
