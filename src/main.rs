//! The Ball entry point
//!
//! Headless native driver: runs a session on the fixed 24 Hz step, steered
//! by the autopilot, prints the scoreboard and updates the best record.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};
    use clap::Parser;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use the_ball::consts::{SIM_DT, TICK_RATE};
    use the_ball::persistence::{FileRecordStore, RecordStore, finish_session};
    use the_ball::platform::FixedStep;
    use the_ball::renderer::{Frame, Renderer, TextRenderer};
    use the_ball::sim::{GameEvent, GameState, TickInput, tick};
    use the_ball::tuning::Tuning;

    #[derive(Parser, Debug)]
    #[command(author, version, about, long_about = None)]
    struct CliArgs {
        /// Session seed. Defaults to the current time.
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,
        /// JSON file overriding any subset of the game balance.
        #[arg(long, value_name = "PATH")]
        tuning: Option<PathBuf>,
        /// Record file. Defaults to the platform data directory.
        #[arg(long, value_name = "PATH")]
        record: Option<PathBuf>,
        /// Stop after this many simulated seconds even if the hero survives.
        #[arg(long, value_name = "SECONDS", default_value_t = 600.0)]
        max_seconds: f64,
        /// Print the scoreboard every N simulated seconds (0 disables).
        #[arg(long, value_name = "SECONDS", default_value_t = 5.0)]
        report_every: f64,
        /// Pace the simulation against the wall clock instead of running flat out.
        #[arg(long)]
        realtime: bool,
    }

    fn time_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    pub fn run() -> Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        let args = CliArgs::parse();

        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path)
                .with_context(|| format!("loading tuning from {}", path.display()))?,
            None => Tuning::default(),
        };

        let mut store = match args.record.clone().or_else(FileRecordStore::default_path) {
            Some(path) => FileRecordStore::new(path),
            None => {
                log::warn!("Could not determine data directory, keeping record in ./record.json");
                FileRecordStore::new("record.json")
            }
        };
        let record = store.load();

        let seed = args.seed.unwrap_or_else(time_seed);
        let mut state = GameState::new(tuning, seed, record).context("starting session")?;
        log::info!("The Ball starting (seed {seed}, {TICK_RATE} Hz)");

        // Render-side randomness stays off the simulation stream
        let mut paint_rng = Pcg32::seed_from_u64(seed ^ 0x5eed_c010);
        let mut screen = TextRenderer::new(std::io::stdout().lock());
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        let report_ticks = (args.report_every * TICK_RATE as f64).round() as u64;
        let mut clock = FixedStep::new(SIM_DT);
        let mut last = Instant::now();

        while !state.is_over() && state.elapsed < args.max_seconds {
            let steps = if args.realtime {
                std::thread::sleep(Duration::from_secs_f64(SIM_DT / 2.0));
                let now = Instant::now();
                let frame_dt = now.duration_since(last).as_secs_f64();
                last = now;
                clock.advance(frame_dt)
            } else {
                1
            };

            for _ in 0..steps {
                tick(&mut state, &input, SIM_DT);
                for event in &state.events {
                    match event {
                        GameEvent::Spawned { id, kind } => log::debug!("Spawned #{id} {kind:?}"),
                        GameEvent::StatusApplied { status } => log::debug!("{status:?} applied"),
                        _ => {}
                    }
                }
                if report_ticks > 0 && state.time_ticks % report_ticks == 0 {
                    screen.draw(&Frame::capture(&state, &mut paint_rng))?;
                }
                if state.is_over() {
                    break;
                }
            }
        }

        if !state.is_over() {
            log::info!("Stopped after {:.0}s without a collision", state.elapsed);
        }

        let outcome = finish_session(&state, &mut store)
            .with_context(|| format!("saving record to {}", store.path().display()))?;
        let mut summary = Frame::capture(&state, &mut paint_rng);
        summary.game_over = Some(the_ball::renderer::GameOverSummary {
            level: outcome.level,
            score: outcome.score,
            new_record: outcome.new_record,
            best: outcome.previous.score,
        });
        screen.draw(&summary)?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser driver; the library is usable on its own
}
