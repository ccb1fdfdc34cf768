//! Shapeships engine library.
//!
//! Exposes the board representation, move generation, phase resolution,
//! the game state machine, and protocol modules for use by integration
//! tests and the binary entry points.

pub mod board;
pub mod dice;
pub mod engine;
pub mod error;
pub mod game;
pub mod movegen;
pub mod protocol;
pub mod resolve;
pub mod selfplay;

pub use dice::{DieRoller, LoadedDice, SeededDice};
pub use error::{GameError, ProposalError};
pub use game::Game;
