//! The game state machine.
//!
//! A `Game` is an immutable snapshot of one simulation: its phase, its
//! ordered players and the ship catalog they build from. Every operation
//! returns a new `Game`, so callers can keep any earlier snapshot for replay
//! or undo. The protocol is request/submit/advance:
//!
//! 1. `start` or `next` resolves the entry effect of a phase and hands every
//!    player a request (possibly empty).
//! 2. The driver answers pending requests one player at a time via `submit`.
//! 3. `next` refuses to advance while any request is still pending.

use serde_json::Value;
use tracing::{debug, info};

use crate::board::{Catalog, Phase, Player, Proposal, Request, Species};
use crate::dice::DieRoller;
use crate::error::{GameError, ProposalError};
use crate::protocol::snapshot::GameSnapshot;
use crate::resolve::{apply_battle, is_game_over, next_phase, resolve_battle, start_turn};

/// One simulation instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    phase: Phase,
    players: Vec<Player>,
    catalog: Catalog,
}

impl Game {
    /// Starts a game with the standard catalog.
    ///
    /// Resolves the opening BUILD phase (one shared roll) and returns the
    /// game with each player's initial request.
    pub fn start(
        species: &[Species],
        dice: &mut impl DieRoller,
    ) -> Result<(Game, Vec<Option<Request>>), GameError> {
        Game::start_with_catalog(Catalog::standard(), species, dice)
    }

    /// Starts a game from species names, failing on the first unknown name.
    pub fn start_named<S: AsRef<str>>(
        names: &[S],
        dice: &mut impl DieRoller,
    ) -> Result<(Game, Vec<Option<Request>>), GameError> {
        let species = names
            .iter()
            .map(|n| n.as_ref().parse::<Species>())
            .collect::<Result<Vec<_>, _>>()?;
        Game::start(&species, dice)
    }

    /// Starts a game that builds from a custom catalog.
    pub fn start_with_catalog(
        catalog: Catalog,
        species: &[Species],
        dice: &mut impl DieRoller,
    ) -> Result<(Game, Vec<Option<Request>>), GameError> {
        if species.is_empty() {
            return Err(GameError::NoPlayers);
        }
        let game = Game {
            phase: Phase::Build,
            players: species.iter().map(|&s| Player::new(s)).collect(),
            catalog,
        }
        .resolve_phase(dice)
        .generate_requests();
        debug!(players = game.players.len(), "game started");
        let requests = game.requests();
        Ok((game, requests))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, player_id: usize) -> Option<&Player> {
        self.players.get(player_id)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Each player's pending request, index-aligned with `players()`.
    pub fn requests(&self) -> Vec<Option<Request>> {
        self.players.iter().map(|p| p.request.clone()).collect()
    }

    /// Returns true while any player still owes an answer.
    pub fn has_pending_requests(&self) -> bool {
        self.players.iter().any(Player::has_pending_request)
    }

    /// Advances to the next phase once every request has been answered.
    ///
    /// While any request is pending this is a no-op that returns the same
    /// game and the outstanding requests.
    pub fn next(&self, dice: &mut impl DieRoller) -> (Game, Vec<Option<Request>>) {
        if self.has_pending_requests() {
            debug!(phase = %self.phase, "next: requests still pending");
            return (self.clone(), self.requests());
        }
        let game = self.advance_phase().resolve_phase(dice).generate_requests();
        debug!(from = %self.phase, to = %game.phase, "phase advanced");
        let requests = game.requests();
        (game, requests)
    }

    /// Applies one player's proposal.
    ///
    /// Returns the updated game and `true` on success; on any failure the
    /// unchanged game and `false`. Only the submitting player is touched.
    pub fn submit(&self, player_id: usize, proposal: &Proposal) -> (Game, bool) {
        match self.try_submit(player_id, proposal) {
            Ok(game) => {
                debug!(player_id, kind = proposal.kind(), "proposal accepted");
                (game, true)
            }
            Err(e) => {
                debug!(player_id, error = %e, "proposal rejected");
                (self.clone(), false)
            }
        }
    }

    /// Like `submit`, but decodes the proposal from loosely-typed JSON so
    /// missing or unknown fields are rejected the same way as bad options.
    pub fn submit_value(&self, player_id: usize, proposal: &Value) -> (Game, bool) {
        match Proposal::from_value(proposal) {
            Ok(p) => self.submit(player_id, &p),
            Err(e) => {
                debug!(player_id, error = %e, "proposal rejected");
                (self.clone(), false)
            }
        }
    }

    fn try_submit(&self, player_id: usize, proposal: &Proposal) -> Result<Game, SubmitError> {
        let player = self
            .players
            .get(player_id)
            .ok_or(SubmitError::NoSuchPlayer(player_id))?;
        let updated = player.submit(proposal, &self.catalog)?.clear_request();
        let mut players = self.players.clone();
        players[player_id] = updated;
        Ok(Game {
            players,
            ..self.clone()
        })
    }

    /// Moves to the next phase in normal rotation without resolving it.
    fn advance_phase(&self) -> Game {
        Game {
            phase: next_phase(self.phase),
            ..self.clone()
        }
    }

    /// Applies the entry effect of the current phase.
    pub fn resolve_phase(&self, dice: &mut impl DieRoller) -> Game {
        match self.phase {
            Phase::Build => self.start_turn(dice),
            Phase::Battle => self.battle(),
            Phase::GameOver => self.clone(),
        }
    }

    /// Draws one roll and adds it to every player's lines.
    pub fn start_turn(&self, dice: &mut impl DieRoller) -> Game {
        let die_roll = dice.roll();
        debug!(die_roll, "turn started");
        Game {
            players: start_turn(&self.players, die_roll),
            ..self.clone()
        }
    }

    /// Resolves one simultaneous battle round.
    ///
    /// Enters GAME_OVER directly if any player ends at or below zero hp.
    pub fn battle(&self) -> Game {
        let outcome = resolve_battle(&self.players, &self.catalog);
        let players = apply_battle(&self.players, &outcome);
        let phase = if is_game_over(&players) {
            info!(hps = ?outcome.hps, "game over");
            Phase::GameOver
        } else {
            self.phase
        };
        Game {
            phase,
            players,
            catalog: self.catalog,
        }
    }

    /// Regenerates every player's request for the current phase.
    pub fn generate_requests(&self) -> Game {
        Game {
            players: self
                .players
                .iter()
                .map(|p| p.with_request_for(self.phase, &self.catalog))
                .collect(),
            ..self.clone()
        }
    }

    /// Captures the game as a serializable record.
    pub fn to_snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            players: self.players.clone(),
        }
    }

    /// Rebuilds a standard-catalog game from a snapshot.
    pub fn from_snapshot(snapshot: GameSnapshot) -> Result<Game, GameError> {
        Game::from_snapshot_with_catalog(snapshot, Catalog::standard())
    }

    /// Rebuilds a game from a snapshot, checking ships against `catalog`.
    pub fn from_snapshot_with_catalog(
        snapshot: GameSnapshot,
        catalog: Catalog,
    ) -> Result<Game, GameError> {
        if snapshot.players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        for player in &snapshot.players {
            player.ships.validate(&catalog)?;
        }
        Ok(Game {
            phase: snapshot.phase,
            players: snapshot.players,
            catalog,
        })
    }
}

/// Internal failure reasons for a submission; never leaves this module.
#[derive(Debug, thiserror::Error)]
enum SubmitError {
    #[error("no player with id {0}")]
    NoSuchPlayer(usize),

    #[error(transparent)]
    Proposal(#[from] ProposalError),
}
