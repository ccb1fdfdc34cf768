//! JSON snapshot encoding and decoding.
//!
//! A snapshot is the complete, catalog-free record of a game:
//!
//! ```text
//! {"phase": "BUILD",
//!  "players": [{"species": "HUMAN", "hp": 25, "lines": 4,
//!               "ships": {"defender": 1},
//!               "request": {"type": "build", "options": [{}, {"defender": 1}]}}]}
//! ```
//!
//! Decoding followed by encoding reproduces the game exactly.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::board::{Phase, Player, Request};
use crate::error::GameError;
use crate::game::Game;

/// Serializable record of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub players: Vec<Player>,
}

impl GameSnapshot {
    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<GameSnapshot, GameError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Encodes a game as a single-line JSON snapshot.
pub fn encode_game(game: &Game) -> Result<String, GameError> {
    game.to_snapshot().to_json()
}

/// Decodes a standard-catalog game from a JSON snapshot.
pub fn decode_game(json: &str) -> Result<Game, GameError> {
    Game::from_snapshot(GameSnapshot::from_json(json)?)
}

/// Encodes a request list as a JSON array, with `{}` for empty slots.
pub fn encode_requests(requests: &[Option<Request>]) -> String {
    Value::Array(requests.iter().map(|r| Request::to_value(r.as_ref())).collect()).to_string()
}
