//! Board representation and game-state types.
//!
//! Contains the core data structures for species, ships, fleets, requests,
//! players, and the phase of a game.

pub mod fleet;
pub mod player;
pub mod request;
pub mod ship;
pub mod species;
pub mod state;

pub use fleet::{Fleet, Holding, Purchase};
pub use player::Player;
pub use request::{Proposal, Request};
pub use ship::{Catalog, Contribution, ShipContext, ShipType, STANDARD_SHIPS};
pub use species::{Species, ALL_SPECIES};
pub use state::{Phase, DIE_SIDES, MAX_HP, STARTING_HP};
