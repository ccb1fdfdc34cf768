//! Error types for game construction and proposal validation.

use thiserror::Error;

/// Errors that can occur while constructing or restoring a game.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("'{0}' is not a valid species")]
    UnknownSpecies(String),

    #[error("unknown ship type '{0}'")]
    UnknownShip(String),

    #[error("ship '{ship}' is stored with the wrong holding kind for its fungibility")]
    HoldingMismatch { ship: String },

    #[error("a game needs at least one player")]
    NoPlayers,

    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Reasons a player's proposal is rejected.
///
/// These never escape the `Game` API; `Game::submit` turns them into a
/// `false` outcome and leaves the state untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProposalError {
    #[error("no request is pending for this player")]
    NoPendingRequest,

    #[error("proposal is missing field '{0}'")]
    MissingField(&'static str),

    #[error("unknown proposal type '{0}'")]
    UnknownType(String),

    #[error("proposed option was not offered")]
    NotOffered,

    #[error("unknown ship type '{0}'")]
    UnknownShip(String),

    #[error("build costs {cost} lines but only {lines} are available")]
    InsufficientLines { cost: u64, lines: u32 },

    #[error("malformed proposal: {0}")]
    Malformed(String),
}
