//! Driver protocol handling.
//!
//! This module implements the line-oriented command parser used by the main
//! loop and the JSON snapshot codec used to persist or transmit games.

pub mod parser;
pub mod snapshot;

pub use parser::{parse_command, Command};
pub use snapshot::{decode_game, encode_game, encode_requests, GameSnapshot};
