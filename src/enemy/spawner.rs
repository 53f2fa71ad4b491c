//! Enemy factory and the roster that owns every live enemy.

use super::types::{Enemy, EnemyVariant};
use crate::core::constants::*;
use crate::core::geometry::{wrap_position, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Weighted variant roll: 30% Grunt, 15% Scout, 15% Brute, 15% Assassin,
/// 10% Sniper, 15% Swarm.
pub fn roll_variant(rng: &mut impl Rng) -> EnemyVariant {
    let roll = rng.gen_range(0..100);
    if roll < 30 {
        EnemyVariant::Grunt
    } else if roll < 45 {
        EnemyVariant::Scout
    } else if roll < 60 {
        EnemyVariant::Brute
    } else if roll < 75 {
        EnemyVariant::Assassin
    } else if roll < 85 {
        EnemyVariant::Sniper
    } else {
        EnemyVariant::Swarm
    }
}

pub fn spawn_enemy(id: u64, position: Vec2, rng: &mut impl Rng) -> Enemy {
    let variant = roll_variant(rng);
    Enemy::new(id, variant, position, rng)
}

/// Grunt or Scout, evenly.
pub fn spawn_basic_enemy(id: u64, position: Vec2, rng: &mut impl Rng) -> Enemy {
    let variant = if rng.gen_bool(0.5) {
        EnemyVariant::Grunt
    } else {
        EnemyVariant::Scout
    };
    Enemy::new(id, variant, position, rng)
}

/// Brute or Assassin, evenly.
pub fn spawn_combat_enemy(id: u64, position: Vec2, rng: &mut impl Rng) -> Enemy {
    let variant = if rng.gen_bool(0.5) {
        EnemyVariant::Brute
    } else {
        EnemyVariant::Assassin
    };
    Enemy::new(id, variant, position, rng)
}

/// Sniper or Swarm, evenly.
pub fn spawn_special_enemy(id: u64, position: Vec2, rng: &mut impl Rng) -> Enemy {
    let variant = if rng.gen_bool(0.5) {
        EnemyVariant::Sniper
    } else {
        EnemyVariant::Swarm
    };
    Enemy::new(id, variant, position, rng)
}

/// A spawn point on a ring around the player, wrapped into the world.
pub fn spawn_position_near(player_pos: Vec2, rng: &mut impl Rng) -> Vec2 {
    let angle = rng.gen_range(0.0..std::f64::consts::TAU);
    let distance = rng.gen_range(ENEMY_SPAWN_MIN_DISTANCE..ENEMY_SPAWN_MAX_DISTANCE);
    wrap_position(player_pos + Vec2::from_angle(angle) * distance)
}

/// Owns every enemy. Keeps the living population at or above the floor
/// and adds one more on a fixed interval up to the cap.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemyRoster {
    enemies: Vec<Enemy>,
    spawn_timer: f64,
    next_id: u64,
}

impl EnemyRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn living_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }

    pub fn get(&self, id: u64) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Adds an enemy of a chosen variant. Returns its id.
    pub fn spawn_variant(&mut self, variant: EnemyVariant, position: Vec2, rng: &mut impl Rng) -> u64 {
        let id = self.allocate_id();
        self.enemies
            .push(Enemy::new(id, variant, wrap_position(position), rng));
        id
    }

    /// Adds a factory-rolled enemy near the player. Returns its id and variant.
    pub fn spawn_near(&mut self, player_pos: Vec2, rng: &mut impl Rng) -> (u64, EnemyVariant) {
        let id = self.allocate_id();
        let position = spawn_position_near(player_pos, rng);
        let enemy = spawn_enemy(id, position, rng);
        let variant = enemy.variant();
        log::debug!(
            "spawned {} #{} at ({:.0}, {:.0})",
            variant.name(),
            id,
            position.x,
            position.y
        );
        self.enemies.push(enemy);
        (id, variant)
    }

    /// Fills the roster with the opening wave.
    pub fn populate(&mut self, player_pos: Vec2, rng: &mut impl Rng) -> Vec<(u64, EnemyVariant)> {
        (0..INITIAL_ENEMY_COUNT)
            .map(|_| self.spawn_near(player_pos, rng))
            .collect()
    }

    /// Advances the spawn clock and tops the roster up. Returns what spawned.
    pub fn update_spawning(
        &mut self,
        player_pos: Vec2,
        delta_time: f64,
        rng: &mut impl Rng,
    ) -> Vec<(u64, EnemyVariant)> {
        let mut spawned = Vec::new();

        while self.living_count() < ENEMY_POPULATION_FLOOR && self.len() < ENEMY_POPULATION_CAP {
            spawned.push(self.spawn_near(player_pos, rng));
        }

        self.spawn_timer += delta_time;
        if self.spawn_timer >= ENEMY_SPAWN_INTERVAL {
            self.spawn_timer = 0.0;
            if self.len() < ENEMY_POPULATION_CAP {
                spawned.push(self.spawn_near(player_pos, rng));
            }
        }

        spawned
    }

    /// Runs AI and movement for every living enemy.
    pub fn update_all(&mut self, player_pos: Vec2, delta_time: f64, rng: &mut impl Rng) {
        for enemy in self.enemies.iter_mut().filter(|e| e.is_alive()) {
            enemy.update(player_pos, delta_time, rng);
        }
    }

    /// Removes and returns every dead enemy, preserving the order of the rest.
    pub fn remove_dead(&mut self) -> Vec<Enemy> {
        let (alive, dead): (Vec<Enemy>, Vec<Enemy>) =
            self.enemies.drain(..).partition(|e| e.is_alive());
        self.enemies = alive;
        dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_roll_variant_distribution() {
        let mut rng = test_rng();
        let mut counts: HashMap<EnemyVariant, u32> = HashMap::new();
        for _ in 0..10_000 {
            *counts.entry(roll_variant(&mut rng)).or_insert(0) += 1;
        }
        let grunts = counts[&EnemyVariant::Grunt];
        let snipers = counts[&EnemyVariant::Sniper];
        assert!((2700..3300).contains(&grunts), "grunts: {grunts}");
        assert!((800..1200).contains(&snipers), "snipers: {snipers}");
        assert_eq!(counts.len(), 6);
    }

    #[test]
    fn test_sub_factories_stay_in_their_group() {
        let mut rng = test_rng();
        for _ in 0..100 {
            let basic = spawn_basic_enemy(1, Vec2::ZERO, &mut rng).variant();
            assert!(matches!(basic, EnemyVariant::Grunt | EnemyVariant::Scout));
            let combat = spawn_combat_enemy(1, Vec2::ZERO, &mut rng).variant();
            assert!(matches!(combat, EnemyVariant::Brute | EnemyVariant::Assassin));
            let special = spawn_special_enemy(1, Vec2::ZERO, &mut rng).variant();
            assert!(matches!(special, EnemyVariant::Sniper | EnemyVariant::Swarm));
        }
    }

    #[test]
    fn test_spawn_position_ring() {
        let mut rng = test_rng();
        let player = Vec2::new(2500.0, 2500.0);
        for _ in 0..100 {
            let d = spawn_position_near(player, &mut rng).distance(player);
            assert!((ENEMY_SPAWN_MIN_DISTANCE..ENEMY_SPAWN_MAX_DISTANCE + 1e-9).contains(&d));
        }
    }

    #[test]
    fn test_populate_and_unique_ids() {
        let mut rng = test_rng();
        let mut roster = EnemyRoster::new();
        let spawned = roster.populate(Vec2::new(2500.0, 2500.0), &mut rng);
        assert_eq!(spawned.len(), INITIAL_ENEMY_COUNT);
        let mut ids: Vec<u64> = roster.enemies().iter().map(|e| e.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), INITIAL_ENEMY_COUNT);
    }

    #[test]
    fn test_population_floor_refills_immediately() {
        let mut rng = test_rng();
        let mut roster = EnemyRoster::new();
        let spawned = roster.update_spawning(Vec2::new(2500.0, 2500.0), 0.01, &mut rng);
        assert_eq!(spawned.len(), ENEMY_POPULATION_FLOOR);
        assert_eq!(roster.living_count(), ENEMY_POPULATION_FLOOR);
    }

    #[test]
    fn test_interval_spawn() {
        let mut rng = test_rng();
        let player = Vec2::new(2500.0, 2500.0);
        let mut roster = EnemyRoster::new();
        roster.populate(player, &mut rng);

        assert!(roster.update_spawning(player, 1.0, &mut rng).is_empty());
        assert_eq!(roster.update_spawning(player, 1.0, &mut rng).len(), 1);
        assert_eq!(roster.len(), INITIAL_ENEMY_COUNT + 1);
    }

    #[test]
    fn test_population_cap() {
        let mut rng = test_rng();
        let player = Vec2::new(2500.0, 2500.0);
        let mut roster = EnemyRoster::new();
        for _ in 0..ENEMY_POPULATION_CAP {
            roster.spawn_near(player, &mut rng);
        }
        assert!(roster
            .update_spawning(player, ENEMY_SPAWN_INTERVAL, &mut rng)
            .is_empty());
        assert_eq!(roster.len(), ENEMY_POPULATION_CAP);
    }

    #[test]
    fn test_remove_dead_keeps_living_order() {
        let mut rng = test_rng();
        let mut roster = EnemyRoster::new();
        let a = roster.spawn_variant(EnemyVariant::Grunt, Vec2::new(10.0, 10.0), &mut rng);
        let b = roster.spawn_variant(EnemyVariant::Scout, Vec2::new(20.0, 10.0), &mut rng);
        let c = roster.spawn_variant(EnemyVariant::Brute, Vec2::new(30.0, 10.0), &mut rng);
        roster.enemies_mut()[1].take_damage(1000);

        let dead = roster.remove_dead();
        assert_eq!(dead.len(), 1);
        assert_eq!(dead[0].id, b);
        let ids: Vec<u64> = roster.enemies().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn test_update_all_skips_dead() {
        let mut rng = test_rng();
        let mut roster = EnemyRoster::new();
        roster.spawn_variant(EnemyVariant::Grunt, Vec2::new(100.0, 100.0), &mut rng);
        roster.enemies_mut()[0].take_damage(1000);
        roster.enemies_mut()[0].target = Vec2::new(500.0, 100.0);
        roster.update_all(Vec2::new(500.0, 100.0), 1.0, &mut rng);
        assert_eq!(roster.enemies()[0].position, Vec2::new(100.0, 100.0));
    }
}
