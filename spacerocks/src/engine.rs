use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, info};

use crate::config::GameConfig;
use crate::input::{InputSource, InputState};
use crate::render::Renderer;
use crate::world::{TickReport, World};

/// Paces ticks to a fixed rate by sleeping until the next deadline.
///
/// If a tick overruns, the schedule restarts from now instead of trying to catch up.
#[derive(Debug, Clone)]
pub struct FrameClock {
    tick_length: Duration,
    next_deadline: Instant,
}

impl FrameClock {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            tick_length: Duration::from_secs_f64(1.0 / f64::from(tick_rate.max(1))),
            next_deadline: Instant::now(),
        }
    }

    pub fn tick_length(&self) -> Duration {
        self.tick_length
    }

    /// Block until the current tick's slot has elapsed.
    pub fn wait(&mut self) {
        self.next_deadline += self.tick_length;
        let now = Instant::now();
        if self.next_deadline > now {
            std::thread::sleep(self.next_deadline - now);
        } else {
            self.next_deadline = now;
        }
    }
}

/// Totals gathered over a whole run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub bullets_fired: usize,
    pub asteroids_destroyed: usize,
    pub bullets_expired: usize,
    pub ship_destroyed_at: Option<u64>,
    pub asteroids_remaining: usize,
    pub quit_requested: bool,
    pub elapsed: Duration,
}

impl RunSummary {
    fn record(&mut self, report: &TickReport) {
        self.ticks = report.tick;
        self.bullets_fired += report.bullets_fired;
        self.asteroids_destroyed += report.asteroids_destroyed;
        self.bullets_expired += report.bullets_expired;
        if report.ship_destroyed {
            self.ship_destroyed_at = Some(report.tick);
        }
    }
}

/// Main entrypoint for running a session: poll input, tick the world, draw.
pub struct Engine {
    config: GameConfig,
    seed: u64,
    max_ticks: Option<u64>,
    paced: bool,
}

impl Engine {
    /// Create an engine with the default configuration and a random seed.
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            seed: fastrand::u64(..),
            max_ticks: None,
            paced: true,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Fix the seed so the session is reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Stop after this many ticks even if nobody asks to quit.
    #[must_use]
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    /// Enable or disable sleeping to hold `tick_rate`. Disabled runs go as fast as possible.
    #[must_use]
    pub fn with_pacing(mut self, paced: bool) -> Self {
        self.paced = paced;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Run until the input source asks to quit or `max_ticks` is reached.
    pub fn run<I, R>(self, input: &mut I, renderer: &mut R) -> Result<RunSummary>
    where
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        let config = self.config;
        let mut world = World::new(&config, self.seed)?;
        let mut controls = InputState::new();
        let mut clock = FrameClock::new(config.tick_rate);
        let mut summary = RunSummary::default();
        let started = Instant::now();

        info!(
            "running \"{}\" at {} ticks/s (seed {})",
            config.title, config.tick_rate, self.seed
        );

        loop {
            if self.max_ticks.is_some_and(|max| world.tick_count() >= max) {
                debug!("tick limit reached");
                break;
            }

            controls.begin_frame();
            for event in input.poll(world.tick_count()) {
                controls.handle_event(&config.bindings, &event);
            }
            if controls.quit_requested() {
                info!("quit requested after {} ticks", world.tick_count());
                summary.quit_requested = true;
                break;
            }

            let report = world.tick(&controls.tick_input());
            summary.record(&report);
            renderer.draw(&world.frame())?;

            if self.paced {
                clock.wait();
            }
        }

        summary.ticks = world.tick_count();
        summary.asteroids_remaining = world.asteroids().len();
        summary.elapsed = started.elapsed();
        info!(
            "session over: {} ticks, {} asteroids destroyed, ship {}",
            summary.ticks,
            summary.asteroids_destroyed,
            if world.ship().is_some() { "alive" } else { "lost" }
        );
        Ok(summary)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
