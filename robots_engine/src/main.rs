use anyhow::{Context, Result};
use clap::Parser;
use robots_engine::start_simulation;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::info;

/// Drive robots around a grid and report where each one ends up.
#[derive(Debug, Parser)]
#[command(name = "robots", version, about)]
struct Cli {
    /// File containing the grid size and robot scripts. Reads stdin when omitted.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Save a JSON replay of every robot's moves to this file.
    #[arg(short, long)]
    replay: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let input = read_input(cli.input.as_ref())?;
    let replay = cli
        .replay
        .as_ref()
        .map(|path| path.to_string_lossy().to_string());

    // Reports go out as each robot finishes, so a bad line later on keeps earlier output
    let (simulation, _) = start_simulation(&input, replay.clone(), |report| println!("{report}"))
        .context("failed to run robot scripts")?;

    if let Some(replay) = replay {
        simulation
            .save_replay()
            .with_context(|| format!("failed to save replay to {replay}"))?;
        info!(%replay, robots = simulation.robots(), "Saved replay");
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("could not read input file {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("could not read input from stdin")?;
            Ok(input)
        }
    }
}
