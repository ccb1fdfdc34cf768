//! Legal move generation.
//!
//! Generates the set of legal actions for a player in the current phase
//! and picks random ones for self-play.

pub mod build;

use rand::Rng;

use crate::board::{Player, Proposal, Request};

pub use build::{affordable_purchases, legal_builds};

/// Picks a uniformly random option from the player's pending request.
///
/// Returns `None` when no request is pending.
pub fn random_proposal(player: &Player, rng: &mut impl Rng) -> Option<Proposal> {
    match player.request.as_ref()? {
        Request::Build { options } => {
            if options.is_empty() {
                return None;
            }
            let idx = rng.gen_range(0..options.len());
            Some(Proposal::build(options[idx].clone()))
        }
    }
}
