//! The Ball - a dodge-and-collect arcade survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, scoring)
//! - `renderer`: Read-only frame snapshots handed to a drawing backend
//! - `platform`: Input and clock collaborators
//! - `persistence`: Best score/level record
//! - `tuning`: Data-driven game balance

pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use persistence::{FileRecordStore, MemoryRecordStore, Record, RecordError, RecordStore};
pub use sim::{GameState, TickInput, tick};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second (the classic 24 Hz arcade loop)
    pub const TICK_RATE: u32 = 24;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f64 = 1.0 / TICK_RATE as f64;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame time fed to the accumulator
    pub const MAX_FRAME_DT: f64 = 0.1;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
