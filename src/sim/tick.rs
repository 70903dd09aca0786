//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use rand::Rng;

use super::autopilot;
use super::entity::{BallKind, Hero, MoveIntent};
use super::scoring::{collect_points, cull_points, level_due};
use super::state::{GameEvent, GamePhase, GameState};
use super::timers::{Schedule, TimerEvent, should_expire};
use crate::tuning::Tuning;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement direction
    pub intent: MoveIntent,
    /// Idle/demo mode - the autopilot steers the hero
    pub idle_mode: bool,
}

/// What a collision did to the hero
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionOutcome {
    /// Kind whose effect was applied (Random is already resolved)
    pub resolved: BallKind,
    /// Enemy touched without Godlike
    pub fatal: bool,
}

/// Apply the effect of touching a ball of `kind` to the hero.
///
/// Status pickups overwrite the current status and arm an expiry deadline.
/// Radius and speed changes stick at their band edges.
pub fn apply_collision<R: Rng + ?Sized>(
    hero: &mut Hero,
    kind: BallKind,
    rng: &mut R,
    tuning: &Tuning,
    schedule: &mut Schedule,
    now: f64,
) -> CollisionOutcome {
    if kind == BallKind::Enemy {
        return CollisionOutcome {
            resolved: kind,
            fatal: !hero.is_godlike(),
        };
    }

    let resolved = kind.resolve(rng);
    let t = &tuning.hero;
    match resolved {
        BallKind::Bigger => hero.resize(t.radius_step, t.radius_band, &tuning.area),
        BallKind::Smaller => hero.resize(-t.radius_step, t.radius_band, &tuning.area),
        BallKind::SpeedUp => hero.change_speed(t.speed_step, t.speed_band),
        BallKind::SpeedDown => hero.change_speed(-t.speed_step, t.speed_band),
        BallKind::Godlike | BallKind::Frozen => {
            if let Some(status) = resolved.status() {
                hero.apply_status(status, now);
                schedule.arm(now + tuning.status.duration(status), TimerEvent::StatusExpire(status));
            }
        }
        BallKind::Hero | BallKind::Enemy | BallKind::Random => {}
    }
    hero.flash = Some(resolved);

    CollisionOutcome {
        resolved,
        fatal: false,
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f64) {
    // A finished run stays exactly as it ended
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.events.clear();
    state.hero.flash = None;
    state.time_ticks += 1;
    state.elapsed += dt;
    let now = state.elapsed;
    let area = state.tuning.area;

    state.hero.intent = if input.idle_mode {
        autopilot::steer(state)
    } else {
        input.intent
    };

    // Hero first, then every ball
    state.hero.step(&area);

    let mut remove = vec![false; state.balls.len()];
    let mut culled = 0usize;
    let mut collected = Vec::new();
    let mut fatal = false;

    for (idx, ball) in state.balls.iter_mut().enumerate() {
        ball.advance();

        if area.has_exited(ball.pos, ball.radius, ball.vel) {
            remove[idx] = true;
            culled += 1;
        } else if state.hero.overlaps(ball) {
            let outcome = apply_collision(
                &mut state.hero,
                ball.kind,
                &mut state.rng,
                &state.tuning,
                &mut state.schedule,
                now,
            );
            log::debug!("Hero hit #{} {:?} -> {:?}", ball.id, ball.kind, outcome.resolved);
            if let Some(status) = outcome.resolved.status() {
                state.events.push(GameEvent::StatusApplied { status });
            }
            fatal |= outcome.fatal;
            remove[idx] = true;
            collected.push((ball.id, ball.kind, outcome.resolved));
        }
    }

    // Batch removal after the pass
    let mut idx = 0;
    state.balls.retain(|_| {
        let keep = !remove[idx];
        idx += 1;
        keep
    });

    if culled > 0 {
        let points = cull_points(state.level, culled);
        state.score += points;
        state.events.push(GameEvent::Culled {
            count: culled,
            points,
        });
    }

    for (id, kind, resolved) in collected {
        let points = collect_points(state.level, resolved, &state.tuning.collide_score);
        state.score += points;
        state.events.push(GameEvent::Collected {
            id,
            kind,
            resolved,
            points,
        });
    }

    if level_due(now, state.level, state.tuning.level.interval) {
        state.level += 1;
        state.spawner.level_up(&state.tuning.level);
        log::info!(
            "Level {} at {:.1}s (spawn interval {:.3}s)",
            state.level,
            now,
            state.spawner.params().interval
        );
        state.events.push(GameEvent::LevelUp { level: state.level });
    }

    poll_timers(state, now);

    if fatal {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over at level {} with score {:.1}",
            state.level,
            state.score
        );
        state.events.push(GameEvent::GameOver {
            level: state.level,
            score: state.score,
        });
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Fire every deadline due by `now`. Deadlines armed while handling these
/// wait for the next tick.
fn poll_timers(state: &mut GameState, now: f64) {
    let mut fired = Vec::new();
    while let Some((_, event)) = state.schedule.pop_due(now) {
        fired.push(event);
    }

    for event in fired {
        match event {
            TimerEvent::SpawnBall => {
                let id = state.next_entity_id();
                let ball = state.spawner.spawn(&mut state.rng, &state.tuning.area, id);
                state.events.push(GameEvent::Spawned {
                    id,
                    kind: ball.kind,
                });
                state.balls.push(ball);
                let delay = state.spawner.next_delay(&mut state.rng);
                state.schedule.arm(now + delay, TimerEvent::SpawnBall);
            }
            TimerEvent::StatusExpire(status) => {
                if should_expire(
                    state.hero.status,
                    status,
                    now,
                    state.status_duration(status),
                    state.tuning.status.expiry_epsilon,
                ) {
                    state.hero.clear_status();
                    log::debug!("{status:?} expired at {now:.2}s");
                    state.events.push(GameEvent::StatusExpired { status });
                }
            }
        }
    }
}
