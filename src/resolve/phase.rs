//! Phase sequencing logic.
//!
//! Determines the next phase and applies the start-of-turn resource
//! accrual that happens on entering BUILD.

use crate::board::{Phase, Player};

/// Computes the phase that follows `phase` in normal rotation.
///
/// Phase flow:
/// - Build     -> Battle
/// - Battle    -> Build
/// - GameOver  -> GameOver (absorbing)
pub fn next_phase(phase: Phase) -> Phase {
    match phase {
        Phase::Build => Phase::Battle,
        Phase::Battle => Phase::Build,
        Phase::GameOver => Phase::GameOver,
    }
}

/// Applies one shared die roll to every player's lines.
pub fn start_turn(players: &[Player], die_roll: u32) -> Vec<Player> {
    players.iter().map(|p| p.accrue(die_roll)).collect()
}

/// Returns true if any player has been eliminated.
pub fn is_game_over(players: &[Player]) -> bool {
    players.iter().any(|p| p.hp <= 0)
}
