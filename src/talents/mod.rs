//! Talent graph: definitions, pools and the 3×3 unlock tree.

pub mod pools;
pub mod tree;
pub mod types;

pub use pools::{draw_talent, pool};
pub use tree::{TalentNode, TalentTree, TREE_SIZE};
pub use types::*;
