mod config;
mod error;
mod replay;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::process::ExitCode;

use annotator::engine::EditorCore;
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{Cli, ReplayConfig};
use crate::error::ReplayError;
use crate::replay::Replayer;

fn main() -> ExitCode {
    // Actions go to stdout; keep logs off it.
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "replay failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ReplayError> {
    let config = cli.validate()?;
    let rng = seeded_rng(&config);
    let reader: Box<dyn BufRead> = if config.script == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(&config.script)?))
    };

    tracing::info!(
        script = %config.script,
        width = config.stage.width,
        height = config.stage.height,
        "replay starting"
    );
    let mut replayer = Replayer::new(EditorCore::with_config(config.stage, config.defaults), rng);
    let stdout = io::stdout();
    let summary = replayer.run(reader, &mut stdout.lock())?;
    tracing::info!(steps = summary.steps, actions = summary.actions, rects = replayer.core().len(), "replay finished");
    Ok(())
}

fn seeded_rng(config: &ReplayConfig) -> ChaCha8Rng {
    match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    }
}
