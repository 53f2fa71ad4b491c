//! Hostile agents: variants, AI policies, attacks and the spawning roster.

pub mod ai;
pub mod combat;
pub mod spawner;
pub mod types;

pub use combat::EnemyStrike;
pub use spawner::*;
pub use types::*;
