//! Terminal runner for the Slotlife simulation.

mod frame;
mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use slotlife_core::RunnerConfig;
use slotlife_world::Simulation;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "slotlife")]
#[command(version)]
#[command(about = "Artificial-life simulation on a toroidal grid of slots")]
struct Cli {
    /// Configuration file (JSON); flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn into_config(self) -> Result<RunnerConfig> {
        let mut config = match &self.config {
            Some(path) => RunnerConfig::from_json_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => RunnerConfig::default(),
        };

        if let Some(width) = self.width {
            config.world.width = width;
        }
        if let Some(height) = self.height {
            config.world.height = height;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if self.seed.is_some() {
            config.world.seed = self.seed;
        }
        if self.ticks.is_some() {
            config.max_ticks = self.ticks;
        }
        if self.no_color {
            config.color = false;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    let config = Cli::parse().into_config()?;
    let mut sim = Simulation::from_config(&config.world)?;
    info!(seed = ?sim.seed(), fps = config.fps, "Starting simulation");

    let frame_time = Duration::from_secs_f64(1.0 / config.fps as f64);
    let stdout = std::io::stdout();

    loop {
        sim.tick()?;

        let mut out = stdout.lock();
        frame::draw(&mut out, &sim, config.color)?;
        out.flush()?;
        drop(out);

        if config.max_ticks.map_or(false, |max| sim.ticks() >= max) {
            break;
        }
        if sim.stats().total() == 0 {
            info!(tick = sim.ticks(), "Population died out");
            break;
        }

        std::thread::sleep(frame_time);
    }

    let totals = sim.totals();
    info!(
        ticks = sim.ticks(),
        births = totals.births,
        deaths = totals.deaths,
        fights = totals.fights,
        "Simulation finished"
    );

    Ok(())
}
