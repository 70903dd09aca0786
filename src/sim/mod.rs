//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod entity;
pub mod geometry;
pub mod scoring;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timers;

pub use entity::{
    ActiveStatus, Ball, BallKind, Hero, KindTable, MoveIntent, SPAWNABLE_KINDS, SPECIAL_KINDS,
    StatusKind,
};
pub use geometry::{PlayArea, circles_overlap, distance};
pub use spawner::{KindBag, Side, SpawnParams, Spawner};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{CollisionOutcome, TickInput, apply_collision, tick};
pub use timers::{Schedule, TimerEvent};
