//! Game state and core simulation types
//!
//! `GameState` is owned and mutated only by [`super::tick::tick`]. Readers
//! look at it between ticks.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Ball, BallKind, Hero, StatusKind};
use super::spawner::Spawner;
use super::timers::{Schedule, TimerEvent};
use crate::persistence::Record;
use crate::tuning::{Tuning, TuningError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; state is frozen
    GameOver,
}

/// Notable things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: u32, kind: BallKind },
    /// Balls that drifted out of the area
    Culled { count: usize, points: f64 },
    /// Ball touched by the hero. `kind` is what was spawned, `resolved` is
    /// what took effect (they differ only for Random balls).
    Collected {
        id: u32,
        kind: BallKind,
        resolved: BallKind,
        points: f64,
    },
    StatusApplied { status: StatusKind },
    StatusExpired { status: StatusKind },
    LevelUp { level: u32 },
    GameOver { level: u32, score: f64 },
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Current level (starts at 1)
    pub level: u32,
    pub score: f64,
    /// Simulated seconds since the session started
    pub elapsed: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub hero: Hero,
    /// Active balls (sorted by id for determinism)
    pub balls: Vec<Ball>,
    pub spawner: Spawner,
    pub schedule: Schedule,
    /// Best record loaded at session start
    pub record: Record,
    /// Events produced by the last tick
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(tuning: Tuning, seed: u64, record: Record) -> Result<Self, TuningError> {
        Self::with_rng(tuning, seed, Pcg32::seed_from_u64(seed), record)
    }

    /// Create a state drawing randomness from a caller-supplied generator
    pub fn with_rng(
        tuning: Tuning,
        seed: u64,
        mut rng: Pcg32,
        record: Record,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;
        let spawner = Spawner::new(&tuning.spawn)?;
        let hero = Hero::new(
            tuning.area.center(),
            tuning.hero.initial_radius,
            tuning.hero.initial_speed,
        );

        let mut schedule = Schedule::new();
        schedule.arm(spawner.next_delay(&mut rng), TimerEvent::SpawnBall);

        log::info!(
            "New session (seed {seed}), best record: level {} score {:.1}",
            record.level,
            record.score
        );

        Ok(Self {
            seed,
            rng,
            tuning,
            level: 1,
            score: 0.0,
            elapsed: 0.0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            hero,
            balls: Vec::new(),
            spawner,
            schedule,
            record,
            events: Vec::new(),
            next_id: 1,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Place a ball directly, bypassing the spawner. Returns its id.
    pub fn insert_ball(&mut self, kind: BallKind, pos: Vec2, vel: Vec2, radius: f32) -> u32 {
        let id = self.next_entity_id();
        self.balls.push(Ball::new(id, pos, vel, radius, kind));
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Configured duration of a status in seconds
    pub fn status_duration(&self, status: StatusKind) -> f64 {
        self.tuning.status.duration(status)
    }

    /// Remaining share of the hero's active status, from 1.0 down to 0.0
    pub fn status_remaining(&self) -> Option<(StatusKind, f64)> {
        self.hero.status.map(|s| {
            let duration = self.status_duration(s.kind);
            let left = 1.0 - (self.elapsed - s.since) / duration;
            (s.kind, left.clamp(0.0, 1.0))
        })
    }

    /// Ensure balls are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.balls.sort_by_key(|b| b.id);
    }
}
