//! The 3×3 talent grid: one column per category, one rarity band per row.
//!
//! Nodes are stored column-major (`index = column * 3 + row`). The only
//! unlock rules are: the first level-up opens row 0, and taking a node opens
//! the node directly below it in the same column.

use super::pools::{draw_talent, rarity_for_row};
use super::types::{Talent, TalentCategory, TalentTarget};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const TREE_COLUMNS: usize = 3;
pub const TREE_ROWS: usize = 3;
pub const TREE_SIZE: usize = TREE_COLUMNS * TREE_ROWS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalentNode {
    pub talent: Talent,
    pub is_unlocked: bool,
    pub is_selected: bool,
    pub column: usize,
    pub row: usize,
}

impl TalentNode {
    pub fn is_available(&self) -> bool {
        self.is_unlocked && !self.is_selected
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalentTree {
    nodes: Vec<TalentNode>,
}

pub fn node_index(column: usize, row: usize) -> usize {
    column * TREE_ROWS + row
}

/// Fixed layout using the first talent of each row's pool. Handy when no
/// RNG is around, e.g. a freshly built player in tests.
impl Default for TalentTree {
    fn default() -> Self {
        use super::types::TalentEffect::*;
        Self::from_talents([
            Talent::new(DamageBoost),
            Talent::new(CriticalStrike),
            Talent::new(Vampirism),
            Talent::new(HealthBoost),
            Talent::new(Regeneration),
            Talent::new(Shield),
            Talent::new(SpeedBoost),
            Talent::new(GoldFind),
            Talent::new(LuckyDrops),
        ])
    }
}

impl TalentTree {
    /// Fills every cell from its category/rarity pool. All nodes start locked.
    pub fn generate(rng: &mut impl Rng) -> Self {
        let mut nodes = Vec::with_capacity(TREE_SIZE);
        for (column, category) in TalentCategory::ALL.into_iter().enumerate() {
            for row in 0..TREE_ROWS {
                let rarity = rarity_for_row(row, rng);
                nodes.push(TalentNode {
                    talent: draw_talent(category, rarity, rng),
                    is_unlocked: false,
                    is_selected: false,
                    column,
                    row,
                });
            }
        }
        Self { nodes }
    }

    /// Builds a tree from explicit talents, laid out column-major.
    pub fn from_talents(talents: [Talent; TREE_SIZE]) -> Self {
        let nodes = talents
            .into_iter()
            .enumerate()
            .map(|(index, talent)| TalentNode {
                talent,
                is_unlocked: false,
                is_selected: false,
                column: index / TREE_ROWS,
                row: index % TREE_ROWS,
            })
            .collect();
        Self { nodes }
    }

    pub fn nodes(&self) -> &[TalentNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&TalentNode> {
        self.nodes.get(index)
    }

    /// Opens the top row. Safe to call more than once.
    pub fn unlock_top_row(&mut self) {
        for node in self.nodes.iter_mut().filter(|n| n.row == 0) {
            node.is_unlocked = true;
        }
    }

    /// Whether the entry row has been opened yet.
    pub fn is_entered(&self) -> bool {
        self.nodes.iter().any(|n| n.row == 0 && n.is_unlocked)
    }

    /// Takes the node at `index` and applies its talent.
    ///
    /// Fails without changing anything when the index is out of range or the
    /// node is locked or already taken.
    pub fn select_talent(&mut self, index: usize, target: &mut TalentTarget<'_>) -> bool {
        let Some(node) = self.nodes.get_mut(index) else {
            log::warn!("talent index {} out of range (tree has {})", index, TREE_SIZE);
            return false;
        };
        if !node.is_available() {
            return false;
        }

        node.is_selected = true;
        node.talent.apply(target);
        let (column, row) = (node.column, node.row);
        log::debug!(
            "selected talent {} at column {} row {}",
            node.talent.name(),
            column,
            row
        );

        if row + 1 < TREE_ROWS {
            if let Some(below) = self.nodes.get_mut(node_index(column, row + 1)) {
                below.is_unlocked = true;
            }
        }
        true
    }

    /// Indices that can be selected right now, in grid order.
    pub fn available_talents(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_available())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_selected).count()
    }

    pub fn selected_in_column(&self, column: usize) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.column == column && n.is_selected)
            .count()
    }
}
