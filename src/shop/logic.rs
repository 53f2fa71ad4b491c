//! Purchases and the wandering shop's relocation clock.

use super::types::{ShopItem, ShopItemKind, ShopStock};
use crate::character::Player;
use crate::core::constants::*;
use crate::core::Vec2;
use crate::weapon::{CatalogError, WeaponCatalog};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    #[error("no shop item with id {0}")]
    UnknownItem(u32),
    #[error("{name} costs {price} gold but only {available} is available")]
    InsufficientGold {
        name: String,
        price: u32,
        available: u32,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub type ShopResult<T> = Result<T, ShopError>;

/// Charges the player for `item` and hands it over.
///
/// The weapon is built before any gold changes hands, so a catalog failure
/// leaves the player untouched.
pub fn purchase(item: &ShopItem, player: &mut Player, catalog: &WeaponCatalog) -> ShopResult<()> {
    if player.gold() < item.price {
        return Err(ShopError::InsufficientGold {
            name: item.name.clone(),
            price: item.price,
            available: player.gold(),
        });
    }

    match item.kind {
        ShopItemKind::Weapon {
            category,
            tier,
            upgrade_level,
        } => {
            let weapon = catalog.create_weapon(category, tier, upgrade_level)?;
            player.spend_gold(item.price);
            player.add_weapon(weapon);
        }
        ShopItemKind::Stat(boost) => {
            player.spend_gold(item.price);
            boost.apply(player);
        }
    }
    log::debug!("purchased {} for {} gold", item.name, item.price);
    Ok(())
}

/// A shop that sits somewhere in the world and jumps to a new spot every
/// couple of minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    pub position: Vec2,
    stock: ShopStock,
    /// Seconds since the last relocation.
    relocate_timer: f64,
    /// Seconds between the last relocation and the next.
    relocate_after: f64,
    warning: bool,
}

impl Shop {
    pub fn new(catalog: &WeaponCatalog, rng: &mut impl Rng) -> Self {
        Self {
            position: random_location(rng),
            stock: ShopStock::new(catalog),
            relocate_timer: 0.0,
            relocate_after: rng.gen_range(SHOP_RELOCATE_MIN_SECONDS..=SHOP_RELOCATE_MAX_SECONDS),
            warning: false,
        }
    }

    pub fn stock(&self) -> &ShopStock {
        &self.stock
    }

    pub fn is_player_in_range(&self, player_position: Vec2) -> bool {
        self.position.distance(player_position) <= SHOP_INTERACTION_RANGE
    }

    /// Set during the last stretch before a relocation.
    pub fn relocation_warning(&self) -> bool {
        self.warning
    }

    pub fn time_until_relocation(&self) -> f64 {
        (self.relocate_after - self.relocate_timer).max(0.0)
    }

    /// Advances the relocation clock. Returns true on the frame the shop moves.
    pub fn update(&mut self, delta_time: f64, rng: &mut impl Rng) -> bool {
        self.relocate_timer += delta_time;
        if self.relocate_timer >= self.relocate_after - SHOP_WARNING_SECONDS {
            self.warning = true;
        }
        if self.relocate_timer < self.relocate_after {
            return false;
        }

        self.position = random_location(rng);
        self.relocate_timer = 0.0;
        self.relocate_after = rng.gen_range(SHOP_RELOCATE_MIN_SECONDS..=SHOP_RELOCATE_MAX_SECONDS);
        self.warning = false;
        log::debug!(
            "shop relocated to ({:.0}, {:.0})",
            self.position.x,
            self.position.y
        );
        true
    }

    /// Buys item `id`. The player must be within interaction range.
    pub fn buy(&self, id: u32, player: &mut Player, catalog: &WeaponCatalog) -> ShopResult<bool> {
        let item = self.stock.item(id).ok_or(ShopError::UnknownItem(id))?;
        if !self.is_player_in_range(player.position) {
            return Ok(false);
        }
        purchase(item, player, catalog)?;
        Ok(true)
    }
}

fn random_location(rng: &mut impl Rng) -> Vec2 {
    Vec2::new(
        rng.gen_range(SHOP_EDGE_MARGIN..WORLD_WIDTH - SHOP_EDGE_MARGIN),
        rng.gen_range(SHOP_EDGE_MARGIN..WORLD_HEIGHT - SHOP_EDGE_MARGIN),
    )
}
