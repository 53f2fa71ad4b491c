//! Purchase surface for the in-world shop. No UI lives here.

pub mod logic;
pub mod types;

pub use logic::{purchase, Shop, ShopError, ShopResult};
pub use types::{ShopItem, ShopItemKind, ShopStock, StatBoost};
