//! Shared primitives: constants, geometry and health.

pub mod constants;
pub mod entity;
pub mod geometry;

pub use entity::Vitals;
pub use geometry::{wrap_position, Rect, Vec2};
