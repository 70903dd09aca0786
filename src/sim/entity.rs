//! Hero and spawned-ball entities
//!
//! The hero is the single player-controlled circle. Every other circle is a
//! `Ball` launched by the spawner; balls keep their velocity for life and are
//! removed (never bounced) when culled or collected.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{PlayArea, circles_overlap};
use crate::tuning::Band;

/// Entity kind discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallKind {
    Hero,
    /// Touching one without Godlike ends the run
    Enemy,
    SpeedUp,
    SpeedDown,
    Smaller,
    Bigger,
    /// Temporary immunity to enemies
    Godlike,
    /// Temporary immobilization
    Frozen,
    /// Placeholder re-rolled into a concrete special on collision
    Random,
}

/// Concrete special kinds a `Random` ball can resolve to
pub const SPECIAL_KINDS: [BallKind; 6] = [
    BallKind::SpeedUp,
    BallKind::SpeedDown,
    BallKind::Smaller,
    BallKind::Bigger,
    BallKind::Frozen,
    BallKind::Godlike,
];

/// Kinds the spawner may produce, in weight-table order
pub const SPAWNABLE_KINDS: [BallKind; 8] = [
    BallKind::Enemy,
    BallKind::SpeedUp,
    BallKind::SpeedDown,
    BallKind::Smaller,
    BallKind::Bigger,
    BallKind::Godlike,
    BallKind::Frozen,
    BallKind::Random,
];

impl BallKind {
    /// Timed status granted by this kind, if any
    pub fn status(self) -> Option<StatusKind> {
        match self {
            BallKind::Godlike => Some(StatusKind::Godlike),
            BallKind::Frozen => Some(StatusKind::Frozen),
            _ => None,
        }
    }

    /// Resolve the `Random` placeholder uniformly into one of `SPECIAL_KINDS`.
    /// Every other kind resolves to itself.
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> BallKind {
        match self {
            BallKind::Random => SPECIAL_KINDS[rng.random_range(0..SPECIAL_KINDS.len())],
            kind => kind,
        }
    }
}

/// Per-kind value table with one slot for every spawnable kind.
///
/// `get` is total: the hero has no slot and reads as `T::default()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KindTable<T> {
    pub enemy: T,
    pub speed_up: T,
    pub speed_down: T,
    pub smaller: T,
    pub bigger: T,
    pub godlike: T,
    pub frozen: T,
    pub random: T,
}

impl<T: Copy + Default> KindTable<T> {
    pub fn get(&self, kind: BallKind) -> T {
        match kind {
            BallKind::Hero => T::default(),
            BallKind::Enemy => self.enemy,
            BallKind::SpeedUp => self.speed_up,
            BallKind::SpeedDown => self.speed_down,
            BallKind::Smaller => self.smaller,
            BallKind::Bigger => self.bigger,
            BallKind::Godlike => self.godlike,
            BallKind::Frozen => self.frozen,
            BallKind::Random => self.random,
        }
    }

    /// Values in `SPAWNABLE_KINDS` order
    pub fn values(&self) -> [T; 8] {
        SPAWNABLE_KINDS.map(|kind| self.get(kind))
    }
}

/// Timed hero modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    Godlike,
    Frozen,
}

impl StatusKind {
    pub fn kind(self) -> BallKind {
        match self {
            StatusKind::Godlike => BallKind::Godlike,
            StatusKind::Frozen => BallKind::Frozen,
        }
    }
}

/// The hero's current status and the simulated time it was applied
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveStatus {
    pub kind: StatusKind,
    pub since: f64,
}

/// Held movement direction on each axis, each in {-1, 0, 1}.
/// Screen coordinates: positive vertical is down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub horizontal: i8,
    pub vertical: i8,
}

impl MoveIntent {
    pub const IDLE: Self = Self {
        horizontal: 0,
        vertical: 0,
    };

    pub fn new(horizontal: i8, vertical: i8) -> Self {
        Self {
            horizontal: horizontal.signum(),
            vertical: vertical.signum(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.horizontal == 0 && self.vertical == 0
    }

    pub fn is_diagonal(&self) -> bool {
        self.horizontal != 0 && self.vertical != 0
    }

    /// Per-axis speed for a base speed: diagonal moves are divided by √2 so
    /// they cover the same distance per tick as axis moves.
    pub fn axis_speed(&self, base_speed: f32) -> f32 {
        if self.is_idle() {
            0.0
        } else if self.is_diagonal() {
            base_speed / std::f32::consts::SQRT_2
        } else {
            base_speed
        }
    }

    /// Displacement for one tick at the given base speed
    pub fn displacement(&self, base_speed: f32) -> Vec2 {
        Vec2::new(self.horizontal as f32, self.vertical as f32) * self.axis_speed(base_speed)
    }
}

/// The player-controlled circle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub pos: Vec2,
    pub radius: f32,
    /// Base speed in pixels per tick
    pub speed: f32,
    pub intent: MoveIntent,
    pub status: Option<ActiveStatus>,
    /// Resolved kind of the special collected this tick (one-tick highlight)
    pub flash: Option<BallKind>,
}

impl Hero {
    pub fn new(pos: Vec2, radius: f32, speed: f32) -> Self {
        Self {
            pos,
            radius,
            speed,
            intent: MoveIntent::IDLE,
            status: None,
            flash: None,
        }
    }

    pub fn has_status(&self, kind: StatusKind) -> bool {
        self.status.is_some_and(|s| s.kind == kind)
    }

    pub fn is_godlike(&self) -> bool {
        self.has_status(StatusKind::Godlike)
    }

    pub fn is_frozen(&self) -> bool {
        self.has_status(StatusKind::Frozen)
    }

    /// Move one tick along the current intent, staying inside the area.
    /// A frozen hero does not move at all.
    pub fn step(&mut self, area: &PlayArea) {
        if self.is_frozen() {
            return;
        }
        let next = self.pos + self.intent.displacement(self.speed);
        self.pos = area.clamp_circle(next, self.radius);
    }

    /// Change radius within the band; re-clamps position so a grown hero
    /// never pokes out of the area. The re-clamp applies while frozen too.
    pub fn resize(&mut self, delta: f32, band: Band, area: &PlayArea) {
        self.radius = band.clamp(self.radius + delta);
        self.pos = area.clamp_circle(self.pos, self.radius);
    }

    pub fn change_speed(&mut self, delta: f32, band: Band) {
        self.speed = band.clamp(self.speed + delta);
    }

    /// Apply a status, overwriting any previous one and restarting its clock
    pub fn apply_status(&mut self, kind: StatusKind, now: f64) {
        self.status = Some(ActiveStatus { kind, since: now });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn overlaps(&self, ball: &Ball) -> bool {
        circles_overlap(self.pos, self.radius, ball.pos, ball.radius)
    }
}

/// A spawned ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    /// Pixels per tick, fixed at spawn
    pub vel: Vec2,
    pub radius: f32,
    pub kind: BallKind,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32, kind: BallKind) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            kind,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}
