//! The simulation context: everything one run owns, plus its RNG.

use super::config::SimConfig;
use crate::character::Player;
use crate::core::constants::COMBAT_LOG_CAPACITY;
use crate::core::Vec2;
use crate::enemy::{EnemyRoster, EnemyVariant};
use crate::pickups::PickupField;
use crate::shop::Shop;
use crate::weapon::WeaponCatalog;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Per-frame player input. The driver fills this in; nothing here reads a
/// keyboard.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub movement: Vec2,
    pub manual_attack: bool,
    pub switch_weapon: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatLogEntry {
    pub frame: u64,
    pub message: String,
    pub is_crit: bool,
    pub is_player_action: bool,
}

/// Running totals for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunCounters {
    pub kills: HashMap<EnemyVariant, u32>,
    pub damage_dealt: u64,
    pub damage_taken: u64,
    pub hits_dodged: u32,
    pub hits_absorbed: u32,
    pub crits: u32,
    pub swings: u32,
    pub projectiles_fired: u32,
    pub life_stolen: u64,
    pub health_regenerated: u64,
    pub gold_collected: u64,
    pub health_packs_collected: u32,
    pub enemies_spawned: u32,
    pub talents_selected: u32,
}

impl RunCounters {
    pub fn total_kills(&self) -> u32 {
        self.kills.values().sum()
    }
}

pub struct World {
    pub player: Player,
    pub roster: EnemyRoster,
    pub pickups: PickupField,
    pub shop: Shop,
    pub catalog: WeaponCatalog,
    pub counters: RunCounters,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) frame: u64,
    pub(crate) elapsed: f64,
    combat_log: VecDeque<CombatLogEntry>,
}

impl World {
    /// A fresh run: seeded RNG, generated talent tree, the configured
    /// starting weapons and the opening wave.
    pub fn new(config: &SimConfig, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let catalog = WeaponCatalog::standard();

        let mut player = Player::generate(&mut rng);
        player.auto_attack = config.auto_attack;
        if !config.starting_weapons.is_empty() {
            player.clear_weapons();
            for preset in &config.starting_weapons {
                player.add_weapon(preset.build());
            }
        }

        let mut roster = EnemyRoster::new();
        let opening = roster.populate(player.position, &mut rng);
        let shop = Shop::new(&catalog, &mut rng);

        let counters = RunCounters {
            enemies_spawned: opening.len() as u32,
            ..Default::default()
        };

        Self {
            player,
            roster,
            pickups: PickupField::new(),
            shop,
            catalog,
            counters,
            rng,
            frame: 0,
            elapsed: 0.0,
            combat_log: VecDeque::with_capacity(COMBAT_LOG_CAPACITY),
        }
    }

    /// Default config with the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(&SimConfig::default(), seed)
    }

    /// An arena with no enemies, for scripted scenarios.
    pub fn empty(seed: u64) -> Self {
        let mut world = Self::with_seed(seed);
        world.roster = EnemyRoster::new();
        world
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Frames actually simulated (paused frames do not count).
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Simulated seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_over(&self) -> bool {
        !self.player.is_alive()
    }

    pub fn combat_log(&self) -> &VecDeque<CombatLogEntry> {
        &self.combat_log
    }

    pub fn add_log_entry(&mut self, message: String, is_crit: bool, is_player_action: bool) {
        if self.combat_log.len() >= COMBAT_LOG_CAPACITY {
            self.combat_log.pop_front();
        }
        self.combat_log.push_back(CombatLogEntry {
            frame: self.frame,
            message,
            is_crit,
            is_player_action,
        });
    }

    /// Resolves one pending level-up by taking the first talent on offer.
    /// Returns the talent index taken, if any was available.
    pub fn auto_level_up(&mut self) -> Option<usize> {
        if !self.player.process_level_up() {
            return None;
        }
        let choice = self.player.talent_tree().available_talents().first().copied()?;
        if self.player.select_talent(choice) {
            self.counters.talents_selected += 1;
            Some(choice)
        } else {
            None
        }
    }
}
