//! Headless frame loop and the tooling around it.
//!
//! `World` owns everything a run needs, `step_frame` advances it, and the
//! runner plays scripted runs for balance numbers.

pub mod config;
pub mod report;
pub mod runner;
pub mod tick;
pub mod world;

pub use config::{ConfigError, ConfigResult, SimConfig};
pub use report::{format_time, RunSummary, SimReport};
pub use runner::{run_simulation, run_single, scripted_input};
pub use tick::{step_frame, FrameEvent, FrameResult};
pub use world::{CombatLogEntry, FrameInput, RunCounters, World};
