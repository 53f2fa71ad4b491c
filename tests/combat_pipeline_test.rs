//! Integration tests for the damage pipeline: weapon attacks, projectiles,
//! modified damage, armor, dodge, shields and life-steal.
//!
//! Uses seeded ChaCha8Rng for deterministic behavior.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use survivor::character::damage::calculate_modified_damage;
use survivor::character::{AttackContext, DamageIntake, Player, StatModifiers};
use survivor::core::Vec2;
use survivor::enemy::{Enemy, EnemyVariant};
use survivor::weapon::{AttackOutcome, Weapon};

fn test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

fn ctx(mods: &StatModifiers) -> AttackContext<'_> {
    AttackContext {
        modifiers: mods,
        attacker_health_fraction: 1.0,
    }
}

fn brute(id: u64, position: Vec2, rng: &mut ChaCha8Rng) -> Enemy {
    Enemy::new(id, EnemyVariant::Brute, position, rng)
}

// =============================================================================
// Melee splash
// =============================================================================

#[test]
fn test_swing_hits_every_enemy_in_range_and_no_others() {
    let mut rng = test_rng();
    let origin = Vec2::new(1000.0, 1000.0);
    let mods = StatModifiers::default();

    for inside in [1usize, 2, 4] {
        let mut enemies: Vec<Enemy> = (0..inside)
            .map(|i| brute(i as u64, origin + Vec2::new(10.0 + i as f64 * 10.0, 0.0), &mut rng))
            .collect();
        enemies.push(brute(100, origin + Vec2::new(0.0, 300.0), &mut rng));
        enemies.push(brute(101, origin + Vec2::new(-500.0, 0.0), &mut rng));

        let mut sword = Weapon::sword();
        let outcome = sword.attack(origin, &mut enemies, &ctx(&mods), &mut rng);

        let AttackOutcome::Swing { hits, .. } = outcome else {
            panic!("expected a swing, got {:?}", outcome);
        };
        assert_eq!(hits.len(), inside);
        let damaged = enemies.iter().filter(|e| e.health() < e.max_health()).count();
        assert_eq!(damaged, inside);
        assert!(enemies[inside..].iter().all(|e| e.health() == e.max_health()));
    }
}

#[test]
fn test_attack_is_noop_mid_swing_and_on_cooldown() {
    let mut rng = test_rng();
    let origin = Vec2::new(1000.0, 1000.0);
    let mods = StatModifiers::default();
    let mut enemies = vec![brute(1, origin + Vec2::new(20.0, 0.0), &mut rng)];
    let mut sword = Weapon::sword();

    assert!(sword.attack(origin, &mut enemies, &ctx(&mods), &mut rng).triggered());
    let health_after_first = enemies[0].health();

    assert_eq!(
        sword.attack(origin, &mut enemies, &ctx(&mods), &mut rng),
        AttackOutcome::NotReady
    );
    assert_eq!(enemies[0].health(), health_after_first);
}

#[test]
fn test_no_target_when_everything_is_dead_or_far() {
    let mut rng = test_rng();
    let origin = Vec2::new(1000.0, 1000.0);
    let mods = StatModifiers::default();

    let mut none: Vec<Enemy> = Vec::new();
    let mut bow = Weapon::bow();
    assert_eq!(
        bow.attack(origin, &mut none, &ctx(&mods), &mut rng),
        AttackOutcome::NoTarget
    );

    let mut dead = vec![brute(1, origin + Vec2::new(50.0, 0.0), &mut rng)];
    dead[0].take_damage(10_000);
    assert_eq!(
        bow.attack(origin, &mut dead, &ctx(&mods), &mut rng),
        AttackOutcome::NoTarget
    );
}

// =============================================================================
// Projectiles
// =============================================================================

#[test]
fn test_projectile_hits_exactly_one_enemy() {
    let mut rng = test_rng();
    let origin = Vec2::new(1000.0, 1000.0);
    let mods = StatModifiers::default();
    // Two brutes stacked on the same spot along the firing line.
    let mut enemies = vec![
        brute(1, origin + Vec2::new(100.0, 0.0), &mut rng),
        brute(2, origin + Vec2::new(100.0, 0.0), &mut rng),
    ];
    let mut bow = Weapon::bow();

    assert!(matches!(
        bow.attack(origin, &mut enemies, &ctx(&mods), &mut rng),
        AttackOutcome::Fired { target_id: 1 }
    ));

    let mut hits = Vec::new();
    for _ in 0..60 {
        hits.extend(bow.update(1.0 / 60.0, &mut enemies, &ctx(&mods), &mut rng));
    }

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].enemy_id, 1);
    assert_eq!(enemies[0].health(), 150 - 20);
    assert_eq!(enemies[1].health(), 150);
    assert!(bow.projectiles().is_empty());
}

#[test]
fn test_expired_projectile_deals_nothing() {
    let mut rng = test_rng();
    let origin = Vec2::new(1000.0, 1000.0);
    let mods = StatModifiers::default();
    let mut enemies = vec![brute(1, origin + Vec2::new(200.0, 0.0), &mut rng)];
    let mut bow = Weapon::bow();
    bow.attack(origin, &mut enemies, &ctx(&mods), &mut rng);

    // Move the target off the flight path, let the shot burn out, then put
    // the target where the projectile ended up.
    enemies[0].position = origin + Vec2::new(0.0, 2000.0);
    for _ in 0..4 {
        let hits = bow.update(1.0, &mut enemies, &ctx(&mods), &mut rng);
        assert!(hits.is_empty());
    }
    assert!(bow.projectiles().is_empty());
    enemies[0].position = origin + Vec2::new(1050.0, 0.0);
    assert!(bow.update(0.1, &mut enemies, &ctx(&mods), &mut rng).is_empty());
    assert_eq!(enemies[0].health(), enemies[0].max_health());
}

// =============================================================================
// Modified damage and intake
// =============================================================================

#[test]
fn test_neutral_modifiers_leave_damage_unchanged() {
    let mut rng = test_rng();
    let mods = StatModifiers::default();
    for _ in 0..100 {
        let roll = calculate_modified_damage(&mods, 100, &mut rng);
        assert_eq!(roll.damage, 100);
        assert!(!roll.is_crit);
    }
}

#[test]
fn test_armor_halves_damage_at_one_hundred() {
    let mut rng = test_rng();
    let mut player = Player::new();
    player.modifiers.add_armor(100.0);
    let intake = player.take_damage(100, &mut rng);
    assert_eq!(intake, DamageIntake::Taken { amount: 50 });
    assert_eq!(player.health(), 50);
}

#[test]
fn test_certain_dodge_never_hurts() {
    let mut rng = test_rng();
    let mut player = Player::new();
    player.modifiers.add_dodge_chance(1.0);
    for amount in [1, 50, 10_000] {
        assert_eq!(player.take_damage(amount, &mut rng), DamageIntake::Dodged);
    }
    assert_eq!(player.health(), player.max_health());
}

#[test]
fn test_shield_soaks_before_health() {
    let mut rng = test_rng();
    let mut player = Player::new();
    player.modifiers.add_shield(30.0, 5.0);

    assert_eq!(player.take_damage(20, &mut rng), DamageIntake::Absorbed);
    assert_eq!(player.health(), 100);
    assert_eq!(
        player.take_damage(20, &mut rng),
        DamageIntake::Taken { amount: 10 }
    );
    assert_eq!(player.health(), 90);
}

#[test]
fn test_life_steal_heals_from_swing_damage() {
    let mut rng = test_rng();
    let mut player = Player::new();
    player.clear_weapons();
    player.add_weapon(Weapon::melee("Cleaver", 40, 1.0, 60.0, 0.3));
    player.modifiers.add_life_steal(0.5);
    player.take_damage(50, &mut rng);

    let mut enemies = vec![brute(1, player.position + Vec2::new(30.0, 0.0), &mut rng)];
    let report = player.update_weapons(0.016, &mut enemies, false, &mut rng);

    assert_eq!(report.damage_dealt(), 40);
    assert_eq!(report.healed, 20);
    assert_eq!(player.health(), 70);
}
