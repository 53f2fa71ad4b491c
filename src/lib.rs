//! Survivor - top-down survival combat core
//!
//! Enemies, weapons, the damage pipeline, talents and the shop, driven by a
//! headless frame loop. Rendering and input devices live elsewhere.

pub mod build_info;
pub mod character;
pub mod core;
pub mod enemy;
pub mod pickups;
pub mod shop;
pub mod simulation;
pub mod talents;
pub mod weapon;
