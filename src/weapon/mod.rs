//! Weapons: melee and ranged runtime state, attack resolution and the tier catalog.

pub mod catalog;
pub mod logic;
pub mod types;

pub use catalog::{CatalogError, CatalogResult, WeaponCatalog, WeaponCategory, WeaponStats, WeaponTier};
pub use logic::{find_closest_enemy, AttackOutcome, WeaponHit};
pub use types::*;
