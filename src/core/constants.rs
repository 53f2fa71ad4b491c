//! Gameplay constants shared by the game core and the simulator.
//!
//! Everything here is compile-time data. Runtime knobs for the headless
//! driver live in `simulation::config` instead.

#![allow(dead_code)]

// =============================================================================
// WORLD
// =============================================================================

/// Width of the wrap-around world rectangle.
pub const WORLD_WIDTH: f64 = 5000.0;

/// Height of the wrap-around world rectangle.
pub const WORLD_HEIGHT: f64 = 5000.0;

/// Fraction of world width a wander target may stray from the current position.
pub const WANDER_RADIUS_FRACTION: f64 = 0.1;

/// Below this distance an agent considers itself at its target and stops.
pub const ARRIVAL_EPSILON: f64 = 0.1;

// =============================================================================
// PLAYER
// =============================================================================

pub const PLAYER_START_HEALTH: u32 = 100;
pub const PLAYER_BASE_SPEED: f64 = 200.0;
pub const PLAYER_SIZE: f64 = 50.0;
pub const PLAYER_START_X: f64 = WORLD_WIDTH / 2.0;
pub const PLAYER_START_Y: f64 = WORLD_HEIGHT / 2.0;

/// Experience needed to leave level N is `N * XP_PER_LEVEL`.
pub const XP_PER_LEVEL: u64 = 100;

/// Crit multiplier a fresh player rolls with before any talent.
pub const BASE_CRIT_MULTIPLIER: f64 = 1.5;

/// Armor value at which incoming damage is halved.
pub const ARMOR_HALVING_POINT: f64 = 100.0;

// =============================================================================
// ENEMY ROSTER
// =============================================================================

pub const INITIAL_ENEMY_COUNT: usize = 5;

/// Below this many living enemies the roster spawns immediately.
pub const ENEMY_POPULATION_FLOOR: usize = 5;

/// Hard cap on roster size.
pub const ENEMY_POPULATION_CAP: usize = 50;

/// Seconds between regular spawns.
pub const ENEMY_SPAWN_INTERVAL: f64 = 2.0;

pub const ENEMY_SPAWN_MIN_DISTANCE: f64 = 400.0;
pub const ENEMY_SPAWN_MAX_DISTANCE: f64 = 600.0;

/// Chase weight of the default policy, out of 100.
pub const DEFAULT_CHASE_PERCENT: u32 = 70;

// ── Brute ──

pub const BRUTE_CHARGE_SPEED: f64 = 400.0;
pub const BRUTE_CHARGE_ENTER_DISTANCE: f64 = 200.0;
pub const BRUTE_CHARGE_EXIT_DISTANCE: f64 = 300.0;
pub const BRUTE_CHASE_PERCENT: u32 = 80;
pub const BRUTE_CHARGE_DAMAGE_MULTIPLIER: f64 = 1.5;

// ── Scout ──

pub const SCOUT_CHASE_PERCENT: u32 = 50;

// ── Assassin ──

/// Seconds an assassin stays fully visible before fading.
pub const ASSASSIN_VISIBLE_DURATION: f64 = 3.0;
/// Seconds an assassin stays stealthed before reappearing.
pub const ASSASSIN_STEALTH_DURATION: f64 = 8.0;
pub const ASSASSIN_PURSUIT_DISTANCE: f64 = 100.0;
pub const ASSASSIN_CHASE_PERCENT: u32 = 60;
pub const ASSASSIN_FLANK_ANGLE: f64 = 1.5;
pub const ASSASSIN_FLANK_DISTANCE: f64 = 80.0;

// ── Sniper ──

/// Engagement range, shared by the attack check and the stand-off band.
pub const SNIPER_RANGE: f64 = 200.0;
pub const SNIPER_BAND_MIN: f64 = 0.7;
pub const SNIPER_BAND_MAX: f64 = 1.2;
pub const SNIPER_AIM_TIME: f64 = 2.0;
/// How far behind itself a sniper aims its retreat target.
pub const SNIPER_RETREAT_DISTANCE: f64 = 100.0;

// ── Swarm ──

pub const SWARM_START_RADIUS: f64 = 50.0;
pub const SWARM_MIN_RADIUS: f64 = 30.0;
pub const SWARM_MAX_RADIUS: f64 = 80.0;
/// Orbit angular speed in radians per second.
pub const SWARM_ORBIT_SPEED: f64 = 2.0;
/// Largest random orbit nudge per re-roll, in degrees.
pub const SWARM_ANGLE_JITTER_DEGREES: i32 = 30;
/// Largest random radius nudge per re-roll.
pub const SWARM_RADIUS_JITTER: i32 = 10;
pub const SWARM_BOB_FREQUENCY: f64 = 3.0;
pub const SWARM_BOB_AMPLITUDE: f64 = 2.0;

// =============================================================================
// WEAPONS
// =============================================================================

pub const DEFAULT_SWING_DURATION: f64 = 0.3;
pub const DEFAULT_PROJECTILE_SPEED: f64 = 400.0;
pub const PROJECTILE_LIFETIME: f64 = 3.0;
pub const PROJECTILE_HIT_RADIUS: f64 = 20.0;

/// Initial projectile storage per ranged weapon.
pub const PROJECTILE_POOL_CAPACITY: usize = 16;

// =============================================================================
// PICKUPS
// =============================================================================

pub const GOLD_DROP_LIFETIME: f64 = 30.0;
pub const GOLD_DROP_RADIUS: f64 = 8.0;
pub const GOLD_PICKUP_REACH: f64 = 25.0;

pub const HEALTH_PACK_LIFETIME: f64 = 20.0;
pub const HEALTH_PACK_HEAL: u32 = 25;
pub const HEALTH_PACK_SIZE: f64 = 20.0;

/// Base chance that a dying enemy leaves a health pack.
pub const HEALTH_PACK_DROP_CHANCE: f64 = 0.10;

// =============================================================================
// SHOP
// =============================================================================

pub const SHOP_RELOCATE_MIN_SECONDS: f64 = 120.0;
pub const SHOP_RELOCATE_MAX_SECONDS: f64 = 180.0;
pub const SHOP_WARNING_SECONDS: f64 = 30.0;
pub const SHOP_INTERACTION_RANGE: f64 = 100.0;

/// Relocation keeps the shop this far from every world edge.
pub const SHOP_EDGE_MARGIN: f64 = 100.0;

// =============================================================================
// LOGS
// =============================================================================

pub const COMBAT_LOG_CAPACITY: usize = 50;
