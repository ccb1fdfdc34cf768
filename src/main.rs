//! Shapeships -- a turn-based game engine driven over a line protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG` to adjust.

use std::io::{self, BufRead};

use shapeships::engine::Engine;
use shapeships::protocol::parser::{parse_command, Command};
use tracing_subscriber::EnvFilter;

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shapeships=info")),
        )
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => engine.set_option(name, value),
            Command::NewGame { species } => engine.new_game(&species, &mut out)?,
            Command::Next => engine.handle_next(&mut out)?,
            Command::Submit {
                player_id,
                proposal,
            } => engine.handle_submit(player_id, &proposal, &mut out)?,
            Command::Snapshot => engine.handle_snapshot(&mut out)?,
            Command::Load { json } => engine.load(&json, &mut out)?,
            Command::Quit => break,
        }
    }

    Ok(())
}
