//! Score and level progression

use super::entity::{BallKind, KindTable};

/// Base points per event at a level
#[inline]
pub fn base_points(level: u32) -> f64 {
    (level as f64).sqrt()
}

/// Points for balls that left the area this tick
pub fn cull_points(level: u32, count: usize) -> f64 {
    base_points(level) * count as f64
}

/// Points for one collected ball of a resolved kind
pub fn collect_points(level: u32, kind: BallKind, coefficients: &KindTable<f64>) -> f64 {
    base_points(level) * coefficients.get(kind)
}

/// Whether `elapsed` seconds have crossed the next level threshold
pub fn level_due(elapsed: f64, level: u32, interval: f64) -> bool {
    (elapsed / interval).floor() > level as f64
}
