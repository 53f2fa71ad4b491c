//! Category × rarity talent pools and the random draw used by tree generation.

use super::types::{Talent, TalentCategory, TalentEffect, TalentRarity};
use rand::seq::SliceRandom;
use rand::Rng;

/// Every talent in the given category and base rarity.
pub fn pool(category: TalentCategory, rarity: TalentRarity) -> Vec<TalentEffect> {
    TalentEffect::ALL
        .into_iter()
        .filter(|e| e.category() == category && e.base_rarity() == rarity)
        .collect()
}

/// Rarity band for a grid row. The bottom row rolls Rare or Epic evenly.
pub fn rarity_for_row(row: usize, rng: &mut impl Rng) -> TalentRarity {
    match row {
        0 => TalentRarity::Common,
        1 => TalentRarity::Uncommon,
        _ => {
            if rng.gen_bool(0.5) {
                TalentRarity::Rare
            } else {
                TalentRarity::Epic
            }
        }
    }
}

/// Draws one talent from the pool. An empty Epic pool falls back to Rare,
/// and an empty pool after that falls back to Damage Boost.
pub fn draw_talent(category: TalentCategory, rarity: TalentRarity, rng: &mut impl Rng) -> Talent {
    let mut candidates = pool(category, rarity);
    if candidates.is_empty() && rarity == TalentRarity::Epic {
        candidates = pool(category, TalentRarity::Rare);
    }
    let effect = candidates
        .choose(rng)
        .copied()
        .unwrap_or(TalentEffect::DamageBoost);
    Talent::new(effect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_pool_contents() {
        assert_eq!(
            pool(TalentCategory::Combat, TalentRarity::Common),
            vec![TalentEffect::DamageBoost, TalentEffect::AttackSpeed]
        );
        assert_eq!(
            pool(TalentCategory::Defensive, TalentRarity::Epic),
            vec![TalentEffect::Dodge]
        );
        assert!(pool(TalentCategory::Utility, TalentRarity::Epic).is_empty());
        assert!(pool(TalentCategory::Combat, TalentRarity::Legendary).is_empty());
    }

    #[test]
    fn test_draw_stays_in_category() {
        let mut rng = test_rng();
        for category in TalentCategory::ALL {
            for _ in 0..50 {
                let talent = draw_talent(category, TalentRarity::Common, &mut rng);
                assert_eq!(talent.category(), category);
                assert_eq!(talent.level, 0);
            }
        }
    }

    #[test]
    fn test_utility_epic_falls_back_to_rare() {
        let mut rng = test_rng();
        let talent = draw_talent(TalentCategory::Utility, TalentRarity::Epic, &mut rng);
        assert_eq!(talent.effect, TalentEffect::LuckyDrops);
    }

    #[test]
    fn test_empty_pool_falls_back_to_damage_boost() {
        let mut rng = test_rng();
        let talent = draw_talent(TalentCategory::Defensive, TalentRarity::Legendary, &mut rng);
        assert_eq!(talent.effect, TalentEffect::DamageBoost);
    }

    #[test]
    fn test_row_rarity_bands() {
        let mut rng = test_rng();
        assert_eq!(rarity_for_row(0, &mut rng), TalentRarity::Common);
        assert_eq!(rarity_for_row(1, &mut rng), TalentRarity::Uncommon);
        for _ in 0..20 {
            let r = rarity_for_row(2, &mut rng);
            assert!(matches!(r, TalentRarity::Rare | TalentRarity::Epic));
        }
    }
}
