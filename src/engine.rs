//! Engine session state.
//!
//! Holds the latest game snapshot, the session dice, and engine options,
//! and writes protocol responses for each command. Every command replaces
//! the stored game with the snapshot the state machine returns, so commands
//! are applied strictly one at a time.

use std::collections::HashMap;
use std::io::{self, Write};

use serde_json::Value;
use tracing::{info, warn};

use crate::dice::SeededDice;
use crate::game::Game;
use crate::protocol::snapshot::{decode_game, encode_game, encode_requests};

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub game: Option<Game>,
    pub options: HashMap<String, String>,
    dice: SeededDice,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    /// Creates an engine with no game and entropy-seeded dice.
    pub fn new() -> Self {
        Engine {
            game: None,
            options: HashMap::new(),
            dice: SeededDice::new(0),
        }
    }

    /// Creates an engine whose dice are seeded for reproducible sessions.
    pub fn with_seed(seed: u64) -> Self {
        Engine {
            dice: SeededDice::new(seed),
            ..Engine::new()
        }
    }

    /// Sets an engine option. `Seed` reseeds the session dice immediately.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        if name == "Seed" {
            match value.as_deref().map(str::parse::<u64>) {
                Some(Ok(seed)) => self.dice = SeededDice::new(seed),
                _ => warn!("invalid Seed value: {:?}", value),
            }
        }
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Starts a new game and writes the initial requests.
    pub fn new_game<W: Write>(&mut self, species: &[String], out: &mut W) -> io::Result<()> {
        match Game::start_named(species, &mut self.dice) {
            Ok((game, requests)) => {
                info!(players = species.len(), "new game");
                self.game = Some(game);
                writeln!(out, "requests {}", encode_requests(&requests))?;
            }
            Err(e) => writeln!(out, "error {}", e)?,
        }
        out.flush()
    }

    /// Handles `next`: writes the resulting phase and requests.
    pub fn handle_next<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let Some(game) = &self.game else {
            return no_game(out);
        };
        let (game, requests) = game.next(&mut self.dice);
        writeln!(out, "phase {}", game.phase())?;
        writeln!(out, "requests {}", encode_requests(&requests))?;
        self.game = Some(game);
        out.flush()
    }

    /// Handles `submit`: writes whether the proposal was accepted.
    pub fn handle_submit<W: Write>(
        &mut self,
        player_id: i64,
        proposal: &Value,
        out: &mut W,
    ) -> io::Result<()> {
        let Some(game) = &self.game else {
            return no_game(out);
        };
        let accepted = match usize::try_from(player_id) {
            Ok(id) => {
                let (game, accepted) = game.submit_value(id, proposal);
                self.game = Some(game);
                accepted
            }
            Err(_) => false,
        };
        writeln!(out, "submitted {}", accepted)?;
        out.flush()
    }

    /// Handles `snapshot`: writes the current game as JSON.
    pub fn handle_snapshot<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(game) = &self.game else {
            return no_game(out);
        };
        match encode_game(game) {
            Ok(json) => writeln!(out, "snapshot {}", json)?,
            Err(e) => writeln!(out, "error {}", e)?,
        }
        out.flush()
    }

    /// Handles `load`: replaces the current game with a decoded snapshot.
    ///
    /// A snapshot that fails to decode leaves the current game in place.
    pub fn load<W: Write>(&mut self, json: &str, out: &mut W) -> io::Result<()> {
        match decode_game(json) {
            Ok(game) => {
                self.game = Some(game);
                writeln!(out, "loaded")?;
            }
            Err(e) => writeln!(out, "error {}", e)?,
        }
        out.flush()
    }
}

fn no_game<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "error no game")?;
    out.flush()
}
