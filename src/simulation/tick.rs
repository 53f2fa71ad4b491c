//! The per-frame orchestration function.
//!
//! `step_frame` advances a [`World`] by one fixed step in a set order and
//! returns a [`FrameResult`] describing what happened. Nothing here renders
//! or reads input devices; the caller maps events to whatever output it
//! wants.

use super::world::{FrameInput, World};
use crate::character::DamageIntake;
use crate::core::Vec2;
use crate::enemy::EnemyVariant;
use crate::weapon::{AttackOutcome, WeaponHit};
use serde::{Deserialize, Serialize};

/// A single event produced by a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FrameEvent {
    // ── Flow ────────────────────────────────────────────────────
    /// The world is paused until pending level-ups are resolved.
    LevelUpPending { pending: u32 },

    // ── Spawning ────────────────────────────────────────────────
    EnemySpawned { enemy_id: u64, variant: EnemyVariant },

    // ── Player offence ──────────────────────────────────────────
    /// A melee swing went off.
    WeaponSwing {
        weapon: String,
        direction: Vec2,
        targets_hit: usize,
        total_damage: u32,
    },
    /// A ranged weapon launched a projectile.
    ProjectileFired { weapon: String, target_id: u64 },
    /// One enemy took damage from a swing or a projectile.
    EnemyHit {
        enemy_id: u64,
        damage: u32,
        was_crit: bool,
        double_strike: bool,
    },
    LifeSteal { healed: u32 },

    // ── Player defence ──────────────────────────────────────────
    EnemyAttack {
        enemy_id: u64,
        variant: EnemyVariant,
        raw_damage: u32,
        intake: DamageIntake,
    },
    PlayerDied,

    // ── Rewards ─────────────────────────────────────────────────
    EnemyKilled {
        enemy_id: u64,
        variant: EnemyVariant,
        xp: u64,
        gold: u32,
    },
    HealthPackDropped { position: Vec2 },
    GoldCollected { amount: u32 },
    HealthPackCollected { healed: u32 },

    // ── Progression ─────────────────────────────────────────────
    /// Player levelled up (may occur several times in one frame).
    LeveledUp { new_level: u32 },
    /// The talent tree's top row just opened.
    TalentTreeUnlocked,

    // ── World ───────────────────────────────────────────────────
    ShopRelocated { position: Vec2 },
}

impl FrameEvent {
    /// Combat log line for events worth logging, plus whether it was a crit
    /// and whether the player caused it.
    pub fn log_line(&self) -> Option<(String, bool, bool)> {
        match self {
            FrameEvent::EnemyHit {
                enemy_id,
                damage,
                was_crit,
                double_strike,
            } => {
                let mut message = format!("Hit enemy #{} for {}", enemy_id, damage);
                if *was_crit {
                    message.push_str(" (critical)");
                }
                if *double_strike {
                    message.push_str(" (double strike)");
                }
                Some((message, *was_crit, true))
            }
            FrameEvent::EnemyAttack {
                variant, intake, ..
            } => {
                let message = match intake {
                    DamageIntake::Dodged => format!("Dodged a {} attack", variant.name()),
                    DamageIntake::Absorbed => {
                        format!("Shield absorbed a {} attack", variant.name())
                    }
                    DamageIntake::Taken { amount } => {
                        format!("{} hits you for {}", variant.name(), amount)
                    }
                };
                Some((message, false, false))
            }
            FrameEvent::EnemyKilled {
                variant, xp, gold, ..
            } => Some((
                format!("{} defeated (+{} XP, +{} gold)", variant.name(), xp, gold),
                false,
                true,
            )),
            FrameEvent::LeveledUp { new_level } => {
                Some((format!("Reached level {}", new_level), false, true))
            }
            FrameEvent::PlayerDied => Some(("You have fallen".to_string(), false, false)),
            _ => None,
        }
    }
}

/// Result of processing a single frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameResult {
    /// Events produced during this frame, in order.
    pub events: Vec<FrameEvent>,
    /// True when the frame did nothing because a level-up is pending or the
    /// player is dead.
    pub paused: bool,
}

fn push_hit(result: &mut FrameResult, hit: &WeaponHit) {
    result.events.push(FrameEvent::EnemyHit {
        enemy_id: hit.enemy_id,
        damage: hit.damage,
        was_crit: hit.is_crit,
        double_strike: hit.double_strike,
    });
}

/// Advances the world by `delta_time` seconds.
///
/// Order within a frame:
/// 1. player movement, weapon switch and regeneration
/// 2. roster spawning
/// 3. enemy AI and movement
/// 4. weapon update and projectile sweep, then the auto/manual attack
/// 5. contact and ranged enemy attacks
/// 6. pickups and the shop clock
/// 7. rewards for dead enemies, then their removal
/// 8. talent tree entry after the first level-up
pub fn step_frame(world: &mut World, input: &FrameInput, delta_time: f64) -> FrameResult {
    let mut result = FrameResult::default();

    if !world.player.is_alive() {
        result.paused = true;
        return result;
    }
    if world.player.needs_level_up() {
        result.paused = true;
        result.events.push(FrameEvent::LevelUpPending {
            pending: world.player.pending_level_ups(),
        });
        return result;
    }

    // ── 1. Player movement and regen ────────────────────────────
    if let Some(index) = input.switch_weapon {
        world.player.switch_weapon(index);
    }
    world.player.move_player(input.movement, delta_time);
    let regenerated = world.player.regenerate(delta_time);
    world.counters.health_regenerated += regenerated as u64;

    // ── 2. Spawning ─────────────────────────────────────────────
    let spawned = world
        .roster
        .update_spawning(world.player.position, delta_time, &mut world.rng);
    for (enemy_id, variant) in spawned {
        world.counters.enemies_spawned += 1;
        result
            .events
            .push(FrameEvent::EnemySpawned { enemy_id, variant });
    }

    // ── 3. Enemy AI and movement ────────────────────────────────
    world
        .roster
        .update_all(world.player.position, delta_time, &mut world.rng);

    // ── 4. Player weapons ───────────────────────────────────────
    let weapon_name = world
        .player
        .current_weapon()
        .map(|w| w.name.clone())
        .unwrap_or_default();
    let report = world.player.update_weapons(
        delta_time,
        world.roster.enemies_mut(),
        input.manual_attack,
        &mut world.rng,
    );
    for hit in &report.projectile_hits {
        push_hit(&mut result, hit);
    }
    match &report.attack {
        Some(AttackOutcome::Swing {
            direction,
            hits,
            total_damage,
        }) => {
            world.counters.swings += 1;
            result.events.push(FrameEvent::WeaponSwing {
                weapon: weapon_name,
                direction: *direction,
                targets_hit: hits.len(),
                total_damage: *total_damage,
            });
            for hit in hits {
                push_hit(&mut result, hit);
            }
        }
        Some(AttackOutcome::Fired { target_id }) => {
            world.counters.projectiles_fired += 1;
            result.events.push(FrameEvent::ProjectileFired {
                weapon: weapon_name,
                target_id: *target_id,
            });
        }
        _ => {}
    }
    world.counters.damage_dealt += report.damage_dealt() as u64;
    world.counters.crits += report.hits().filter(|h| h.is_crit).count() as u32;
    if report.healed > 0 {
        world.counters.life_stolen += report.healed as u64;
        result.events.push(FrameEvent::LifeSteal {
            healed: report.healed,
        });
    }

    // ── 5. Enemy attacks ────────────────────────────────────────
    let player_bounds = world.player.bounds();
    for enemy in world.roster.enemies_mut() {
        if !enemy.is_alive() || !world.player.is_alive() {
            continue;
        }
        let in_contact = enemy.bounds().intersects(&player_bounds);
        if !in_contact && !enemy.variant().attacks_from_range() {
            continue;
        }
        if let Some(strike) = enemy.attack(&mut world.player, &mut world.rng) {
            match strike.intake {
                DamageIntake::Dodged => world.counters.hits_dodged += 1,
                DamageIntake::Absorbed => world.counters.hits_absorbed += 1,
                DamageIntake::Taken { amount } => world.counters.damage_taken += amount as u64,
            }
            result.events.push(FrameEvent::EnemyAttack {
                enemy_id: strike.enemy_id,
                variant: strike.variant,
                raw_damage: strike.raw_damage,
                intake: strike.intake,
            });
        }
    }
    if !world.player.is_alive() {
        log::debug!("player died at frame {}", world.frame);
        result.events.push(FrameEvent::PlayerDied);
    }

    // ── 6. Pickups and shop ─────────────────────────────────────
    let pickups = world.pickups.update(delta_time, &mut world.player);
    if pickups.gold_collected > 0 {
        world.counters.gold_collected += pickups.gold_collected as u64;
        result.events.push(FrameEvent::GoldCollected {
            amount: pickups.gold_collected,
        });
    }
    if pickups.packs_collected > 0 {
        world.counters.health_packs_collected += pickups.packs_collected;
        result.events.push(FrameEvent::HealthPackCollected {
            healed: pickups.health_restored,
        });
    }
    if world.shop.update(delta_time, &mut world.rng) {
        result.events.push(FrameEvent::ShopRelocated {
            position: world.shop.position,
        });
    }

    // ── 7. Rewards and cleanup ──────────────────────────────────
    for enemy in world.roster.remove_dead() {
        let variant = enemy.variant();
        let stats = variant.stats();
        *world.counters.kills.entry(variant).or_insert(0) += 1;
        result.events.push(FrameEvent::EnemyKilled {
            enemy_id: enemy.id,
            variant,
            xp: stats.xp_reward,
            gold: stats.gold_reward,
        });

        let level_before = world.player.level();
        let gained = world.player.gain_experience(stats.xp_reward);
        for offset in 1..=gained {
            result.events.push(FrameEvent::LeveledUp {
                new_level: level_before + offset,
            });
        }

        world.pickups.drop_gold(enemy.position, stats.gold_reward);
        if world
            .pickups
            .roll_health_pack(enemy.position, world.player.modifiers.drop_luck, &mut world.rng)
        {
            result.events.push(FrameEvent::HealthPackDropped {
                position: enemy.position,
            });
        }
    }

    // ── 8. Talent tree entry ────────────────────────────────────
    if world.player.enter_talent_tree() {
        result.events.push(FrameEvent::TalentTreeUnlocked);
    }

    for event in &result.events {
        if let Some((message, is_crit, is_player_action)) = event.log_line() {
            world.add_log_entry(message, is_crit, is_player_action);
        }
    }
    log::trace!(
        "frame {} done: {} events, {} enemies",
        world.frame,
        result.events.len(),
        world.roster.len()
    );

    world.frame += 1;
    world.elapsed += delta_time;
    result
}
