//! Self-play game generation CLI.
//!
//! Plays Shapeships games with random build choices and writes one JSONL
//! record per game.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]

use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter};
use std::time::Instant;

use clap::Parser;
use shapeships::board::Species;
use shapeships::selfplay::{self, SelfPlayConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Random self-play for the Shapeships engine
#[derive(Parser, Debug)]
#[command(name = "selfplay")]
#[command(about = "Play random Shapeships games and write JSONL game records")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Comma-separated species, one per seat
    #[arg(long, value_delimiter = ',', default_values_t = vec![Species::Human, Species::Xenite])]
    species: Vec<Species>,

    /// Battles before a game is cut off
    #[arg(long, default_value_t = 200)]
    max_rounds: usize,

    /// Number of parallel threads
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Random seed, 0 for entropy
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<String>,

    /// Suppress progress and summary output
    #[arg(long, short = 'q')]
    quiet: bool,
}

impl From<Args> for SelfPlayConfig {
    fn from(args: Args) -> Self {
        SelfPlayConfig {
            num_games: args.games,
            species: args.species,
            max_rounds: args.max_rounds,
            threads: args.threads,
            seed: args.seed,
            quiet: args.quiet,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shapeships=info,selfplay=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let output_path = args.output.clone();
    let config = SelfPlayConfig::from(args);

    if !config.quiet {
        info!(
            "Self-play: {} games, {} seats, max {} rounds, {} threads",
            config.num_games,
            config.species.len(),
            config.max_rounds,
            config.threads
        );
    }

    let start = Instant::now();
    let games = selfplay::run_self_play(&config)?;
    let elapsed = start.elapsed();

    if !config.quiet {
        let summary = selfplay::summarize(&games);
        info!(
            "Completed {} games in {:.1}s, {} reached game over, mean {:.1} rounds",
            summary.games,
            elapsed.as_secs_f64(),
            summary.game_overs,
            summary.mean_rounds
        );
        for (seat, wins) in summary.sole_survivor_wins.iter().enumerate() {
            info!("  player {} ({}): {} wins", seat, config.species[seat], wins);
        }
        info!("  mutual destruction: {}", summary.mutual_destruction);
    }

    match output_path {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(&path)?);
            selfplay::write_jsonl(&games, &mut writer)?;
            if !config.quiet {
                info!("Wrote {} games to {}", games.len(), path);
            }
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)?;
        }
    }
    Ok(())
}
