//! Idle/demo mode steering
//!
//! Picks a movement intent from the current state: dodge the enemies that
//! are about to reach the hero, otherwise go grab the nearest useful pickup.
//! Reads state only and never touches the RNG.

use glam::Vec2;

use super::entity::{Ball, BallKind, MoveIntent};
use super::state::GameState;

/// Ticks of ball motion to look ahead when judging danger
const LOOKAHEAD_TICKS: f32 = 8.0;
/// Clearance beyond touching distance that still counts as a threat
const THREAT_MARGIN: f32 = 60.0;
/// Component share of the steering vector needed to press that axis
const AXIS_DEADZONE: f32 = 0.38;

fn is_pickup(kind: BallKind) -> bool {
    matches!(
        kind,
        BallKind::SpeedUp | BallKind::Smaller | BallKind::Godlike | BallKind::Random
    )
}

/// Whether touching this ball would hurt the hero right now
fn is_threat(ball: &Ball, godlike: bool) -> bool {
    match ball.kind {
        BallKind::Enemy => !godlike,
        BallKind::Frozen | BallKind::Bigger | BallKind::SpeedDown => true,
        _ => false,
    }
}

fn to_intent(steer: Vec2) -> MoveIntent {
    let len = steer.length();
    if len < 1e-3 {
        return MoveIntent::IDLE;
    }
    let axis = |c: f32| {
        if c.abs() / len > AXIS_DEADZONE {
            c.signum() as i8
        } else {
            0
        }
    };
    MoveIntent::new(axis(steer.x), axis(steer.y))
}

/// Choose the hero's intent for the next tick
pub fn steer(state: &GameState) -> MoveIntent {
    let hero = &state.hero;
    let godlike = hero.is_godlike();

    // Push away from every ball on a course to meet the hero soon
    let mut push = Vec2::ZERO;
    for ball in state.balls.iter().filter(|b| is_threat(b, godlike)) {
        let ahead = ball.pos + ball.vel * LOOKAHEAD_TICKS;
        let reach = hero.radius + ball.radius + THREAT_MARGIN;
        for point in [ball.pos, ahead] {
            let away = hero.pos - point;
            let dist = away.length();
            if dist < reach {
                let weight = if ball.kind == BallKind::Enemy { 1.0 } else { 0.4 };
                push += away.normalize_or_zero() * weight * (reach - dist) / reach;
            }
        }
    }

    if push.length_squared() > 1e-6 {
        // Lean back toward the middle so walls do not trap the hero
        let home = (state.tuning.area.center() - hero.pos) / state.tuning.area.width.max(1.0);
        return to_intent(push + home * 0.5);
    }

    // Nothing dangerous nearby: head for the nearest pickup
    let target = state
        .balls
        .iter()
        .filter(|b| is_pickup(b.kind) && state.tuning.area.contains_circle(b.pos, b.radius))
        .min_by(|a, b| {
            a.pos
                .distance_squared(hero.pos)
                .partial_cmp(&b.pos.distance_squared(hero.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|b| b.pos + b.vel * 2.0);

    match target {
        Some(pos) => to_intent(pos - hero.pos),
        None => {
            let home = state.tuning.area.center() - hero.pos;
            if home.length() > hero.speed * 4.0 {
                to_intent(home)
            } else {
                MoveIntent::IDLE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::Record;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(Tuning::default(), 3, Record::default()).unwrap()
    }

    #[test]
    fn test_empty_field_at_center_stays_idle() {
        assert_eq!(steer(&state()), MoveIntent::IDLE);
    }

    #[test]
    fn test_flees_incoming_enemy() {
        let mut state = state();
        let hero = state.hero.pos;
        // Enemy just left of the hero, heading right
        state.insert_ball(BallKind::Enemy, hero - Vec2::new(50.0, 0.0), Vec2::new(6.0, 0.0), 8.0);
        let intent = steer(&state);
        assert_eq!(intent.horizontal, 1);
    }

    #[test]
    fn test_godlike_ignores_enemies() {
        let mut state = state();
        let hero = state.hero.pos;
        state.hero.apply_status(crate::sim::entity::StatusKind::Godlike, 0.0);
        state.insert_ball(BallKind::Enemy, hero - Vec2::new(50.0, 0.0), Vec2::new(6.0, 0.0), 8.0);
        state.insert_ball(BallKind::SpeedUp, hero + Vec2::new(0.0, 200.0), Vec2::ZERO, 8.0);
        let intent = steer(&state);
        assert_eq!(intent, MoveIntent::new(0, 1));
    }

    #[test]
    fn test_seeks_nearest_pickup() {
        let mut state = state();
        let hero = state.hero.pos;
        state.insert_ball(BallKind::Godlike, hero + Vec2::new(-150.0, -150.0), Vec2::ZERO, 8.0);
        state.insert_ball(BallKind::SpeedUp, hero + Vec2::new(300.0, 0.0), Vec2::ZERO, 8.0);
        assert_eq!(steer(&state), MoveIntent::new(-1, -1));
    }
}
