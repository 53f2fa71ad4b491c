//! Integration tests for life-steal through `Player::update_weapons`.
//!
//! Life-steal reads the damage as rolled, so a killing blow heals for the
//! whole hit even when the enemy had less health left.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use survivor::character::Player;
use survivor::core::Vec2;
use survivor::enemy::{Enemy, EnemyVariant};
use survivor::weapon::{AttackOutcome, Weapon};

fn test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

/// A player at 40/100 health with doubled damage and full life-steal.
fn hungry_player(rng: &mut ChaCha8Rng) -> Player {
    let mut player = Player::new();
    player.add_damage_multiplier(1.0);
    player.modifiers.add_life_steal(1.0);
    player.take_damage(60, rng);
    assert_eq!(player.health(), 40);
    player
}

// =============================================================================
// Melee
// =============================================================================

#[test]
fn test_melee_overkill_heals_full_rolled_damage() {
    let mut rng = test_rng();
    let mut player = hungry_player(&mut rng);
    let mut enemies = vec![Enemy::new(
        1,
        EnemyVariant::Swarm,
        player.position + Vec2::new(30.0, 0.0),
        &mut rng,
    )];
    assert_eq!(enemies[0].health(), 30);

    let report = player.update_weapons(1.0 / 60.0, &mut enemies, false, &mut rng);

    let Some(AttackOutcome::Swing { hits, .. }) = &report.attack else {
        panic!("expected a swing, got {:?}", report.attack);
    };
    assert!(hits[0].killed);
    assert_eq!(hits[0].damage, 30);
    assert_eq!(hits[0].rolled, 50);
    assert_eq!(report.damage_dealt(), 30);
    assert_eq!(report.healed, 50);
    assert_eq!(player.health(), 90);
}

#[test]
fn test_melee_splash_heals_on_summed_rolls() {
    let mut rng = test_rng();
    let mut player = hungry_player(&mut rng);
    let origin = player.position;
    let mut enemies = vec![
        Enemy::new(1, EnemyVariant::Swarm, origin + Vec2::new(30.0, 0.0), &mut rng),
        Enemy::new(2, EnemyVariant::Grunt, origin + Vec2::new(0.0, 40.0), &mut rng),
    ];
    player.take_damage(30, &mut rng);
    assert_eq!(player.health(), 10);

    let report = player.update_weapons(1.0 / 60.0, &mut enemies, false, &mut rng);

    // 30 lost by the swarm plus 50 by the grunt, but 50 + 50 rolled.
    assert_eq!(report.damage_dealt(), 80);
    assert_eq!(report.healed, 90);
    assert_eq!(player.health(), 100);
}

// =============================================================================
// Projectiles
// =============================================================================

#[test]
fn test_projectile_overkill_heals_full_rolled_damage() {
    let mut rng = test_rng();
    let mut player = hungry_player(&mut rng);
    player.clear_weapons();
    player.add_weapon(Weapon::bow());
    let mut enemies = vec![Enemy::new(
        1,
        EnemyVariant::Swarm,
        player.position + Vec2::new(100.0, 0.0),
        &mut rng,
    )];

    let fired = player.update_weapons(1.0 / 60.0, &mut enemies, false, &mut rng);
    assert!(matches!(fired.attack, Some(AttackOutcome::Fired { target_id: 1 })));
    assert_eq!(fired.healed, 0);

    let mut healed = 0;
    let mut hits = Vec::new();
    for _ in 0..30 {
        let report = player.update_weapons(1.0 / 60.0, &mut enemies, false, &mut rng);
        healed += report.healed;
        hits.extend(report.projectile_hits);
    }

    assert_eq!(hits.len(), 1);
    assert!(hits[0].killed);
    assert_eq!(hits[0].damage, 30);
    assert_eq!(hits[0].rolled, 40);
    assert_eq!(healed, 40);
    assert_eq!(player.health(), 80);
}

#[test]
fn test_no_life_steal_without_the_modifier() {
    let mut rng = test_rng();
    let mut player = Player::new();
    player.take_damage(50, &mut rng);
    let mut enemies = vec![Enemy::new(
        1,
        EnemyVariant::Swarm,
        player.position + Vec2::new(30.0, 0.0),
        &mut rng,
    )];

    let report = player.update_weapons(1.0 / 60.0, &mut enemies, false, &mut rng);
    assert!(report.attack.as_ref().is_some_and(|a| a.triggered()));
    assert_eq!(report.healed, 0);
    assert_eq!(player.health(), 50);
}
