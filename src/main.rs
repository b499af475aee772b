//! Headless simulation runner (default binary).
//!
//! Builds an engine from a JSON config and command line overrides, plays a
//! scripted list of commands, then runs the frame loop for a fixed number
//! of frames. Events are logged as they are drained and the final snapshot
//! is printed as JSON. Optionally keeps a best score on disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::prelude::*;

use blockfall::core::{EngineConfig, GameEngine};
use blockfall::types::{GameCommand, GameEvent, TICK_MS};

#[derive(Debug, Parser)]
#[command(name = "blockfall-sim", about = "Run a falling-block game without a screen")]
struct Cli {
    /// JSON file with engine settings; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u32>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    #[arg(long)]
    fall_interval_ms: Option<u32>,

    /// Comma separated commands, e.g. "left,rotate,hardDrop"
    #[arg(long, default_value = "")]
    script: String,

    /// Frames to tick after the script
    #[arg(long, default_value_t = 0)]
    frames: u32,

    #[arg(long, default_value_t = TICK_MS)]
    frame_ms: u32,

    /// File holding the best score seen so far
    #[arg(long)]
    best_score: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
struct BestScore {
    best_score: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();

    let config = build_config(&cli)?;
    let mut engine = GameEngine::new(config).context("invalid engine config")?;
    info!(
        width = config.width,
        height = config.height,
        seed = config.seed,
        "engine started"
    );

    let script = parse_script(&cli.script)?;
    for command in script {
        let accepted = engine.apply_command(command);
        debug!(command = command.as_str(), accepted, "command");
        log_events(&mut engine);
    }

    for _ in 0..cli.frames {
        engine.tick(cli.frame_ms, false);
        log_events(&mut engine);
        if engine.is_game_over() {
            break;
        }
    }

    if let Some(path) = &cli.best_score {
        let best = update_best_score(path, engine.score())?;
        info!(best, "best score");
    }

    let snapshot = engine.snapshot();
    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot).context("failed to encode snapshot")?
    );
    Ok(())
}

fn build_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if let Some(interval) = cli.fall_interval_ms {
        config.fall_interval_ms = interval;
    }
    Ok(config)
}

fn parse_script(script: &str) -> Result<Vec<GameCommand>> {
    let mut commands = Vec::new();
    for token in script.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match GameCommand::from_str(token) {
            Some(command) => commands.push(command),
            None => bail!("unknown command in script: {token:?}"),
        }
    }
    Ok(commands)
}

fn log_events(engine: &mut GameEngine) {
    for event in engine.take_events() {
        match event {
            GameEvent::LinesCleared {
                lines,
                points,
                combo,
                back_to_back,
            } => info!(lines, points, combo, back_to_back, "lines cleared"),
            GameEvent::GameOver { score } => warn!(score, "game over"),
            other => debug!(?other, "event"),
        }
    }
}

/// Stored best score; a missing file counts as zero
fn read_best_score(path: &Path) -> Result<u32> {
    if !path.exists() {
        return Ok(0);
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let stored: BestScore = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(stored.best_score)
}

/// Write `score` if it beats the stored one; returns the best after update
fn update_best_score(path: &Path, score: u32) -> Result<u32> {
    let best = read_best_score(path)?;
    if score <= best {
        return Ok(best);
    }
    let text = serde_json::to_string(&BestScore { best_score: score })?;
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(score)
}
