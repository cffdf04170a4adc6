mod autopilot;
mod console;

use std::path::PathBuf;

use anyhow::{Context, Result};
use spacerocks::{Engine, GameConfig};

use autopilot::Autopilot;
use console::ConsoleRenderer;

const DEFAULT_TICKS: u64 = 3_600;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // usage: spacerocks_demo [config.json] [ticks]
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let path = PathBuf::from(path);
            GameConfig::load_from_file(&path)
                .with_context(|| format!("loading {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    let ticks = match args.next() {
        Some(raw) => raw.parse().with_context(|| format!("bad tick count {raw:?}"))?,
        None => DEFAULT_TICKS,
    };

    let engine = Engine::new()
        .with_config(config)
        .with_max_ticks(ticks)
        .with_pacing(false);
    let seed = engine.seed();
    let report_every = u64::from(engine.config().tick_rate);

    let summary = engine.run(&mut Autopilot::new(), &mut ConsoleRenderer::new(report_every))?;

    println!("seed:                {seed}");
    println!("ticks:               {}", summary.ticks);
    println!("bullets fired:       {}", summary.bullets_fired);
    println!("asteroids destroyed: {}", summary.asteroids_destroyed);
    println!("asteroids remaining: {}", summary.asteroids_remaining);
    match summary.ship_destroyed_at {
        Some(tick) => println!("ship destroyed:      tick {tick}"),
        None => println!("ship destroyed:      never"),
    }
    Ok(())
}
