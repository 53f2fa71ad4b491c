//! Ground pickups: gold and health packs.

pub mod field;
pub mod types;

pub use field::{PickupField, PickupReport};
pub use types::{GoldDrop, HealthPack};
