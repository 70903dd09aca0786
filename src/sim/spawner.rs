//! Ball spawner
//!
//! Balls enter from a random edge of the play area, just outside it, with a
//! velocity aimed inward inside a cone. Kinds come from a weighted table,
//! drawn in batches into a pending queue that is refilled only when empty.

use glam::Vec2;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

use super::entity::{Ball, BallKind, KindTable, SPAWNABLE_KINDS};
use super::geometry::PlayArea;
use crate::polar_to_cartesian;
use crate::tuning::{Band, LevelTuning, SpawnTuning, TuningError};

/// Edge a ball enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

pub const SIDES: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

impl Side {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        SIDES[rng.random_range(0..SIDES.len())]
    }

    /// Unit vector pointing from this edge into the play area
    pub fn inward(self) -> Vec2 {
        match self {
            Side::Left => Vec2::X,
            Side::Right => Vec2::NEG_X,
            Side::Top => Vec2::Y,
            Side::Bottom => Vec2::NEG_Y,
        }
    }
}

/// Launch velocity for a ball entering from `side`.
///
/// `theta` is the deviation from the inward normal. The (cos, sin) pair is
/// mirrored for right/bottom edges and its axes swapped for top/bottom.
pub fn launch_velocity(side: Side, speed: f32, theta: f32) -> Vec2 {
    let v = polar_to_cartesian(speed, theta);
    match side {
        Side::Left => Vec2::new(v.x, v.y),
        Side::Right => Vec2::new(-v.x, v.y),
        Side::Top => Vec2::new(v.y, v.x),
        Side::Bottom => Vec2::new(v.y, -v.x),
    }
}

/// Spawn point just outside `side`, at `fraction` along that edge
pub fn entry_position(area: &PlayArea, side: Side, radius: f32, fraction: f32) -> Vec2 {
    match side {
        Side::Left => Vec2::new(area.left - radius, area.top + area.height * fraction),
        Side::Right => Vec2::new(area.right() + radius, area.top + area.height * fraction),
        Side::Top => Vec2::new(area.left + area.width * fraction, area.top - radius),
        Side::Bottom => Vec2::new(area.left + area.width * fraction, area.bottom() + radius),
    }
}

/// Level-scaled spawn parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnParams {
    /// Mean seconds between spawns
    pub interval: f64,
    pub speed_range: Band,
    pub radius_range: Band,
    pub max_angle: f32,
}

impl SpawnParams {
    pub fn from_tuning(tuning: &SpawnTuning) -> Self {
        Self {
            interval: tuning.interval,
            speed_range: tuning.speed_range,
            radius_range: tuning.radius_range,
            max_angle: tuning.max_angle,
        }
    }

    /// Shorter interval, faster and larger balls. The cone stays fixed.
    pub fn level_up(&mut self, level: &LevelTuning) {
        self.interval *= level.spawn_interval_ratio;
        self.speed_range = self.speed_range.scaled(level.speed_ratio);
        self.radius_range = self.radius_range.scaled(level.radius_ratio);
    }
}

/// Weighted kind queue, refilled a batch at a time
#[derive(Debug, Clone)]
pub struct KindBag {
    dist: WeightedIndex<f64>,
    batch_size: usize,
    pending: Vec<BallKind>,
}

impl KindBag {
    pub fn new(weights: &KindTable<f64>, batch_size: usize) -> Result<Self, TuningError> {
        if batch_size == 0 {
            return Err(TuningError::Invalid("spawn batch size must be non-zero"));
        }
        Ok(Self {
            dist: WeightedIndex::new(weights.values())?,
            batch_size,
            pending: Vec::with_capacity(batch_size),
        })
    }

    /// Take the next kind, drawing a fresh batch when the queue is empty
    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> BallKind {
        loop {
            if let Some(kind) = self.pending.pop() {
                return kind;
            }
            self.refill(rng);
        }
    }

    fn refill<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let dist = &self.dist;
        self.pending
            .extend((0..self.batch_size).map(|_| SPAWNABLE_KINDS[dist.sample(&mut *rng)]));
        log::debug!("Drew a batch of {} ball kinds", self.batch_size);
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

/// Produces balls and spawn delays for the current level
#[derive(Debug, Clone)]
pub struct Spawner {
    params: SpawnParams,
    bag: KindBag,
    jitter: Normal<f64>,
}

impl Spawner {
    pub fn new(tuning: &SpawnTuning) -> Result<Self, TuningError> {
        Ok(Self {
            params: SpawnParams::from_tuning(tuning),
            bag: KindBag::new(&tuning.kind_weights, tuning.batch_size)?,
            jitter: Normal::new(1.0, tuning.interval_jitter)?,
        })
    }

    pub fn params(&self) -> &SpawnParams {
        &self.params
    }

    pub fn level_up(&mut self, level: &LevelTuning) {
        self.params.level_up(level);
    }

    /// Seconds until the next spawn: the interval scaled by a Gaussian
    /// multiplier, never negative
    pub fn next_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.params.interval * self.jitter.sample(rng).max(0.0)
    }

    /// Build the next ball
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R, area: &PlayArea, id: u32) -> Ball {
        let kind = self.bag.next(rng);
        let p = &self.params;

        let side = Side::random(rng);
        let speed = rng.random_range(p.speed_range.min..=p.speed_range.max);
        let theta = rng.random_range(-p.max_angle..=p.max_angle);
        let fraction: f32 = rng.random();
        let radius = rng.random_range(p.radius_range.min..=p.radius_range.max);

        let pos = entry_position(area, side, radius, fraction);
        let vel = launch_velocity(side, speed, theta);
        log::debug!("Spawn #{id} {kind:?} from {side:?} r={radius:.1} v=({:.1}, {:.1})", vel.x, vel.y);
        Ball::new(id, pos, vel, radius, kind)
    }
}
