//! Rendering collaborator
//!
//! The simulation never draws. After each tick a [`Frame`] snapshot is
//! captured from the finished state and handed to a [`Renderer`] backend.

pub mod palette;

use std::io::Write;

use glam::Vec2;
use rand::Rng;

use crate::persistence::Record;
use crate::sim::{GameState, PlayArea, StatusKind};
use palette::{colors, kind_color, random_special};

/// A filled circle to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleSprite {
    pub pos: Vec2,
    pub radius: f32,
    pub color: [f32; 4],
}

/// Shrinking bar for the active status
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusBar {
    pub status: StatusKind,
    /// 1.0 when applied, 0.0 when due to expire
    pub remaining: f64,
    pub color: [f32; 4],
}

/// Final screen contents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameOverSummary {
    pub level: u32,
    pub score: f64,
    pub new_record: bool,
    /// Best score before this run
    pub best: f64,
}

/// Everything a backend needs to draw one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub playground: PlayArea,
    /// Panel to the right of the playground
    pub scoreboard: PlayArea,
    pub hero: CircleSprite,
    pub balls: Vec<CircleSprite>,
    pub level: u32,
    pub score: f64,
    pub hero_radius: f32,
    pub hero_speed: f32,
    pub status: Option<StatusBar>,
    pub record: Record,
    pub game_over: Option<GameOverSummary>,
}

impl Frame {
    /// Snapshot a finished tick. `rng` only picks the per-frame colour of
    /// Random balls and must not be the simulation's generator.
    pub fn capture<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Self {
        let area = state.tuning.area;
        let hero = &state.hero;

        // Flash beats status beats the plain hero colour
        let hero_color = hero
            .flash
            .or(hero.status.map(|s| s.kind.kind()))
            .and_then(kind_color)
            .unwrap_or(colors::HERO);

        let balls = state
            .balls
            .iter()
            .map(|b| CircleSprite {
                pos: b.pos,
                radius: b.radius,
                color: kind_color(b.kind).unwrap_or_else(|| random_special(rng)),
            })
            .collect();

        let status = state.status_remaining().map(|(status, remaining)| StatusBar {
            status,
            remaining,
            color: kind_color(status.kind()).unwrap_or(colors::HERO),
        });

        let game_over = state.is_over().then(|| GameOverSummary {
            level: state.level,
            score: state.score,
            new_record: state.record.should_replace(state.score),
            best: state.record.score,
        });

        Self {
            playground: area,
            scoreboard: PlayArea::new(area.right(), area.top, area.width / 4.0, area.height),
            hero: CircleSprite {
                pos: hero.pos,
                radius: hero.radius,
                color: hero_color,
            },
            balls,
            level: state.level,
            score: state.score,
            hero_radius: hero.radius,
            hero_speed: hero.speed,
            status,
            record: state.record,
            game_over,
        }
    }
}

/// Drawing backend
pub trait Renderer {
    type Error;

    fn draw(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}

/// Writes the scoreboard as text lines. Used by the headless driver.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    type Error = std::io::Error;

    fn draw(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        if let Some(summary) = frame.game_over {
            writeln!(self.out, "GAME OVER")?;
            writeln!(self.out, "Level: {}", summary.level)?;
            writeln!(self.out, "Score: {:.1}", summary.score)?;
            if summary.new_record {
                writeln!(self.out, "New Record!")?;
            } else {
                writeln!(self.out, "Best Score Record: {:.1}", summary.best)?;
            }
            return Ok(());
        }

        write!(
            self.out,
            "level {:>2}  score {:>8.1}  radius {:>4.1}  speed {:>4.1}  balls {:>3}",
            frame.level,
            frame.score,
            frame.hero_radius,
            frame.hero_speed,
            frame.balls.len()
        )?;
        if let Some(bar) = frame.status {
            write!(self.out, "  {:?} {:>3.0}%", bar.status, bar.remaining * 100.0)?;
        }
        writeln!(self.out, "  best {:.1}", frame.record.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BallKind;
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn state() -> GameState {
        GameState::new(Tuning::default(), 5, Record::new(2, 40.0)).unwrap()
    }

    #[test]
    fn test_capture_copies_scoreboard_values() {
        let mut state = state();
        state.score = 12.5;
        state.insert_ball(BallKind::Enemy, Vec2::new(10.0, 10.0), Vec2::X, 6.0);
        let frame = Frame::capture(&state, &mut Pcg32::seed_from_u64(0));

        assert_eq!(frame.level, 1);
        assert_eq!(frame.score, 12.5);
        assert_eq!(frame.hero_radius, 16.0);
        assert_eq!(frame.balls.len(), 1);
        assert_eq!(frame.balls[0].color, colors::ENEMY);
        assert_eq!(frame.hero.color, colors::HERO);
        assert_eq!(frame.scoreboard.width, 256.0);
        assert!(frame.game_over.is_none());
    }

    #[test]
    fn test_hero_color_priority() {
        let mut state = state();
        state.hero.apply_status(StatusKind::Frozen, 0.0);
        let mut rng = Pcg32::seed_from_u64(0);
        assert_eq!(Frame::capture(&state, &mut rng).hero.color, colors::FROZEN);

        state.hero.flash = Some(BallKind::SpeedUp);
        assert_eq!(Frame::capture(&state, &mut rng).hero.color, colors::SPEED_UP);
    }

    #[test]
    fn test_status_bar_shrinks() {
        let mut state = state();
        state.hero.apply_status(StatusKind::Godlike, 1.0);
        state.elapsed = 3.0;
        let bar = Frame::capture(&state, &mut Pcg32::seed_from_u64(0)).status.unwrap();
        assert_eq!(bar.status, StatusKind::Godlike);
        assert!((bar.remaining - 0.5).abs() < 1e-9);
        assert_eq!(bar.color, colors::GODLIKE);
    }

    #[test]
    fn test_game_over_text() {
        let mut state = state();
        state.score = 55.0;
        state.level = 3;
        state.phase = crate::sim::GamePhase::GameOver;
        let frame = Frame::capture(&state, &mut Pcg32::seed_from_u64(0));

        let mut text = TextRenderer::new(Vec::new());
        text.draw(&frame).unwrap();
        let out = String::from_utf8(text.into_inner()).unwrap();
        assert!(out.contains("Level: 3"));
        assert!(out.contains("New Record!"));
    }
}
