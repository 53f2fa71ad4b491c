//! Weapon attack resolution: targeting, melee splash and the projectile sweep.
//!
//! Weapons never touch the player directly. Damage is rolled from an
//! `AttackContext` snapshot of the player's modifiers, and hits are returned
//! so the owner can apply life-steal once per damage event. Life-steal reads
//! the rolled damage, which an overkill does not cap.

use super::types::{Projectile, Weapon, WeaponKind};
use crate::character::damage::{damage_against, roll_chance, AttackContext};
use crate::core::constants::PROJECTILE_HIT_RADIUS;
use crate::core::Vec2;
use crate::enemy::Enemy;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Damage dealt to one enemy by one swing or projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponHit {
    pub enemy_id: u64,
    /// Health the enemy actually lost.
    pub damage: u32,
    /// Modified damage as rolled, before the enemy's remaining health caps it.
    pub rolled: u32,
    pub is_crit: bool,
    /// The hit landed twice.
    pub double_strike: bool,
    pub killed: bool,
}

/// What a call to `Weapon::attack` did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttackOutcome {
    /// Cooldown or swing still running; nothing happened.
    NotReady,
    /// Ready, but no living enemy within range.
    NoTarget,
    Swing {
        direction: Vec2,
        hits: Vec<WeaponHit>,
        total_damage: u32,
    },
    Fired {
        target_id: u64,
    },
}

impl AttackOutcome {
    /// Whether the attack went off and started a cooldown.
    pub fn triggered(&self) -> bool {
        matches!(self, AttackOutcome::Swing { .. } | AttackOutcome::Fired { .. })
    }
}

/// Index of the strictly-closest living enemy nearer than `range`.
///
/// Equal distances keep the first enemy in iteration order.
pub fn find_closest_enemy(origin: Vec2, range: f64, enemies: &[Enemy]) -> Option<usize> {
    let mut closest = None;
    let mut closest_distance = range;
    for (index, enemy) in enemies.iter().enumerate() {
        if !enemy.is_alive() {
            continue;
        }
        let distance = origin.distance(enemy.position);
        if distance < closest_distance {
            closest_distance = distance;
            closest = Some(index);
        }
    }
    closest
}

/// Rolls and applies one hit (twice on a double strike) to `enemy`.
fn strike_enemy(
    enemy: &mut Enemy,
    base_damage: u32,
    ctx: &AttackContext<'_>,
    rng: &mut impl Rng,
) -> WeaponHit {
    let first = damage_against(ctx, base_damage, enemy.vitals.fraction(), rng);
    let mut rolled = first.damage;
    let mut dealt = enemy.take_damage(first.damage);
    let mut is_crit = first.is_crit;

    let double_strike = enemy.is_alive() && roll_chance(ctx.modifiers.double_strike_chance, rng);
    if double_strike {
        let second = damage_against(ctx, base_damage, enemy.vitals.fraction(), rng);
        rolled += second.damage;
        dealt += enemy.take_damage(second.damage);
        is_crit |= second.is_crit;
    }

    WeaponHit {
        enemy_id: enemy.id,
        damage: dealt,
        rolled,
        is_crit,
        double_strike,
        killed: !enemy.is_alive(),
    }
}

impl Weapon {
    pub fn find_closest_enemy(&self, origin: Vec2, enemies: &[Enemy]) -> Option<usize> {
        find_closest_enemy(origin, self.range, enemies)
    }

    /// Auto-attack gate: any living enemy strictly inside range.
    pub fn has_enemies_in_range(&self, origin: Vec2, enemies: &[Enemy]) -> bool {
        self.find_closest_enemy(origin, enemies).is_some()
    }

    /// Both gates clear: cooldown elapsed and no swing in progress.
    pub fn is_ready(&self) -> bool {
        self.cooldown_timer <= 0.0 && !self.is_swinging()
    }

    /// Ticks the cooldown down by `delta_time` (clamped at zero) and reports
    /// whether an attack is allowed.
    pub fn can_attack(&mut self, delta_time: f64) -> bool {
        self.cooldown_timer = (self.cooldown_timer - delta_time).max(0.0);
        self.is_ready()
    }

    /// Attacks from `origin`. A no-op while cooling down or mid-swing.
    ///
    /// Melee damages every living enemy within range (inclusive); the closest
    /// one only sets the swing direction. Ranged fires one projectile at the
    /// closest enemy and deals nothing until it connects.
    pub fn attack(
        &mut self,
        origin: Vec2,
        enemies: &mut [Enemy],
        ctx: &AttackContext<'_>,
        rng: &mut impl Rng,
    ) -> AttackOutcome {
        if !self.is_ready() {
            return AttackOutcome::NotReady;
        }
        let Some(target_index) = self.find_closest_enemy(origin, enemies) else {
            return AttackOutcome::NoTarget;
        };
        let target_pos = enemies[target_index].position;
        let target_id = enemies[target_index].id;
        let modified_cooldown = ctx.modifiers.modified_cooldown(self.cooldown);
        let range = self.range;
        let base_damage = self.damage;

        match &mut self.kind {
            WeaponKind::Melee {
                swing_duration,
                swing_timer,
                swing_direction,
            } => {
                *swing_timer = *swing_duration;
                *swing_direction = (target_pos - origin).normalized().unwrap_or(Vec2::ZERO);
                let direction = *swing_direction;
                self.cooldown_timer = modified_cooldown;

                let mut hits = Vec::new();
                for enemy in enemies.iter_mut() {
                    if enemy.is_alive() && origin.distance(enemy.position) <= range {
                        hits.push(strike_enemy(enemy, base_damage, ctx, rng));
                    }
                }
                let total_damage = hits.iter().map(|h| h.damage).sum();
                AttackOutcome::Swing {
                    direction,
                    hits,
                    total_damage,
                }
            }
            WeaponKind::Ranged {
                projectile_speed,
                projectiles,
            } => {
                let Some(direction) = (target_pos - origin).normalized() else {
                    return AttackOutcome::NoTarget;
                };
                projectiles.push(Projectile::new(origin, direction * *projectile_speed));
                self.cooldown_timer = modified_cooldown;
                AttackOutcome::Fired { target_id }
            }
        }
    }

    /// Advances the swing timer or the projectiles. Returns every projectile
    /// hit landed this step.
    pub fn update(
        &mut self,
        delta_time: f64,
        enemies: &mut [Enemy],
        ctx: &AttackContext<'_>,
        rng: &mut impl Rng,
    ) -> Vec<WeaponHit> {
        let base_damage = self.damage;
        match &mut self.kind {
            WeaponKind::Melee { swing_timer, .. } => {
                *swing_timer = (*swing_timer - delta_time).max(0.0);
                Vec::new()
            }
            WeaponKind::Ranged { projectiles, .. } => {
                update_projectiles(projectiles, delta_time, enemies, base_damage, ctx, rng)
            }
        }
    }
}

/// Moves every projectile, resolves at most one hit each, then compacts the
/// list in place.
fn update_projectiles(
    projectiles: &mut Vec<Projectile>,
    delta_time: f64,
    enemies: &mut [Enemy],
    base_damage: u32,
    ctx: &AttackContext<'_>,
    rng: &mut impl Rng,
) -> Vec<WeaponHit> {
    let mut hits = Vec::new();

    for projectile in projectiles.iter_mut() {
        projectile.advance(delta_time);
        if !projectile.active {
            continue;
        }
        if let Some(enemy) = enemies.iter_mut().find(|e| {
            e.is_alive() && projectile.position.distance(e.position) < PROJECTILE_HIT_RADIUS
        }) {
            hits.push(strike_enemy(enemy, base_damage, ctx, rng));
            projectile.active = false;
        }
    }

    projectiles.retain(|p| p.active);
    hits
}
