//! The player character: stat modifiers, damage math and the `Player` itself.

pub mod damage;
pub mod modifiers;
pub mod player;

pub use damage::{AttackContext, HitRoll};
pub use modifiers::{Shield, StatModifiers};
pub use player::{DamageIntake, Player, WeaponReport};
