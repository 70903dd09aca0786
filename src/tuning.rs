//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. The defaults reproduce the
//! classic arcade feel; a JSON file can override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::entity::{KindTable, StatusKind};
use crate::sim::geometry::PlayArea;

/// Errors raised when loading or validating tuning
#[derive(Debug, Error)]
pub enum TuningError {
    /// A value breaks the configuration contract
    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
    #[error("invalid spawn kind weights: {0}")]
    Weights(#[from] rand::distr::weighted::Error),
    #[error("invalid spawn jitter: {0}")]
    Jitter(#[from] rand_distr::NormalError),
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Closed interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f32,
    pub max: f32,
}

impl Band {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamp into the band. Values past an edge stick to that edge.
    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Both ends multiplied by `ratio`
    pub fn scaled(&self, ratio: f32) -> Self {
        Self::new(self.min * ratio, self.max * ratio)
    }

    fn is_ordered(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Hero starting values and modifier bands
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroTuning {
    pub initial_radius: f32,
    /// Pixels per tick
    pub initial_speed: f32,
    pub radius_band: Band,
    pub speed_band: Band,
    /// Radius change per Bigger/Smaller pickup
    pub radius_step: f32,
    /// Speed change per SpeedUp/SpeedDown pickup
    pub speed_step: f32,
}

impl Default for HeroTuning {
    fn default() -> Self {
        Self {
            initial_radius: 16.0,
            initial_speed: 8.0,
            radius_band: Band::new(5.0, 32.0),
            speed_band: Band::new(2.0, 24.0),
            radius_step: 1.0,
            speed_step: 1.0,
        }
    }
}

/// Spawner schedule and level-1 spawn distributions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Mean seconds between spawns at level 1
    pub interval: f64,
    /// Standard deviation of the interval multiplier (mean 1.0)
    pub interval_jitter: f64,
    /// Ball speed in pixels per tick
    pub speed_range: Band,
    /// Half-width of the launch cone around the inward normal (radians)
    pub max_angle: f32,
    pub radius_range: Band,
    /// Kinds drawn per weighted batch
    pub batch_size: usize,
    pub kind_weights: KindTable<f64>,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            interval: 1.0,
            interval_jitter: 0.1,
            speed_range: Band::new(4.0, 8.0),
            max_angle: std::f32::consts::PI / 6.0,
            radius_range: Band::new(5.0, 10.0),
            batch_size: 20,
            kind_weights: KindTable {
                enemy: 0.67,
                speed_up: 0.06,
                speed_down: 0.06,
                smaller: 0.06,
                bigger: 0.06,
                godlike: 0.03,
                frozen: 0.03,
                random: 0.03,
            },
        }
    }
}

/// Status durations in seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusTuning {
    pub godlike_duration: f64,
    pub frozen_duration: f64,
    /// Slack allowed when an expiry deadline fires slightly early
    pub expiry_epsilon: f64,
}

impl StatusTuning {
    pub fn duration(&self, status: StatusKind) -> f64 {
        match status {
            StatusKind::Godlike => self.godlike_duration,
            StatusKind::Frozen => self.frozen_duration,
        }
    }
}

impl Default for StatusTuning {
    fn default() -> Self {
        Self {
            godlike_duration: 4.0,
            frozen_duration: 2.0,
            expiry_epsilon: 0.01,
        }
    }
}

/// Level progression
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelTuning {
    /// Seconds per level threshold
    pub interval: f64,
    /// Spawn interval multiplier per level (< 1 spawns faster)
    pub spawn_interval_ratio: f64,
    pub speed_ratio: f32,
    pub radius_ratio: f32,
}

impl Default for LevelTuning {
    fn default() -> Self {
        Self {
            interval: 15.0,
            spawn_interval_ratio: 0.8,
            speed_ratio: 1.08,
            radius_ratio: 1.08,
        }
    }
}

/// Complete game balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub area: PlayArea,
    pub hero: HeroTuning,
    pub spawn: SpawnTuning,
    pub status: StatusTuning,
    pub level: LevelTuning,
    /// Collision score coefficients. Random balls are resolved before
    /// scoring, so the `random` slot is unused.
    pub collide_score: KindTable<f64>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            area: PlayArea::default(),
            hero: HeroTuning::default(),
            spawn: SpawnTuning::default(),
            status: StatusTuning::default(),
            level: LevelTuning::default(),
            collide_score: KindTable {
                enemy: 4.0,
                speed_up: 2.0,
                speed_down: 4.0,
                smaller: 2.0,
                bigger: 4.0,
                godlike: 8.0,
                frozen: 32.0,
                random: 0.0,
            },
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning: Tuning = serde_json::from_str(&json)?;
        tuning.validate()?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Check the configuration contract
    pub fn validate(&self) -> Result<(), TuningError> {
        let area = &self.area;
        if !(area.width > 0.0 && area.height > 0.0) {
            return Err(TuningError::Invalid("play area must have positive size"));
        }

        let hero = &self.hero;
        if !hero.radius_band.is_ordered() || hero.radius_band.min <= 0.0 {
            return Err(TuningError::Invalid("hero radius band must be positive and ordered"));
        }
        if hero.radius_band.max * 2.0 > area.width.min(area.height) {
            return Err(TuningError::Invalid("hero must fit inside the play area"));
        }
        if !hero.speed_band.is_ordered() || hero.speed_band.min < 0.0 {
            return Err(TuningError::Invalid("hero speed band must be non-negative and ordered"));
        }
        if !hero.radius_band.contains(hero.initial_radius) {
            return Err(TuningError::Invalid("initial hero radius outside its band"));
        }
        if !hero.speed_band.contains(hero.initial_speed) {
            return Err(TuningError::Invalid("initial hero speed outside its band"));
        }

        let spawn = &self.spawn;
        if !(spawn.interval > 0.0) {
            return Err(TuningError::Invalid("spawn interval must be positive"));
        }
        if !spawn.speed_range.is_ordered() || spawn.speed_range.min <= 0.0 {
            return Err(TuningError::Invalid("spawn speed range must be positive and ordered"));
        }
        if !spawn.radius_range.is_ordered() || spawn.radius_range.min <= 0.0 {
            return Err(TuningError::Invalid("spawn radius range must be positive and ordered"));
        }
        if !(spawn.max_angle >= 0.0 && spawn.max_angle < std::f32::consts::FRAC_PI_2) {
            return Err(TuningError::Invalid("spawn angle cone must be within [0, pi/2)"));
        }
        let weights = spawn.kind_weights.values();
        if weights.iter().any(|w| !(w.is_finite() && *w >= 0.0)) || weights.iter().sum::<f64>() <= 0.0 {
            return Err(TuningError::Invalid("spawn kind weights must be non-negative with a positive sum"));
        }
        if spawn.batch_size == 0 {
            return Err(TuningError::Invalid("spawn batch size must be non-zero"));
        }

        let status = &self.status;
        if !(status.godlike_duration > 0.0 && status.frozen_duration > 0.0) {
            return Err(TuningError::Invalid("status durations must be positive"));
        }
        if !(status.expiry_epsilon >= 0.0) {
            return Err(TuningError::Invalid("expiry epsilon must be non-negative"));
        }

        let level = &self.level;
        if !(level.interval > 0.0) {
            return Err(TuningError::Invalid("level interval must be positive"));
        }
        if !(level.spawn_interval_ratio > 0.0 && level.spawn_interval_ratio <= 1.0) {
            return Err(TuningError::Invalid("spawn interval ratio must be in (0, 1]"));
        }
        if !(level.speed_ratio >= 1.0 && level.radius_ratio >= 1.0) {
            return Err(TuningError::Invalid("speed and radius ratios must be at least 1"));
        }

        if self.collide_score.values().iter().any(|c| !(*c >= 0.0)) {
            return Err(TuningError::Invalid("collision coefficients must be non-negative"));
        }

        Ok(())
    }
}
