//! Phase resolution.
//!
//! Applies the entry effect of each phase: start-of-turn accrual for
//! BUILD, simultaneous combat for BATTLE, plus proposal validation and
//! build application during BUILD.

pub mod battle;
pub mod build;
pub mod phase;

pub use battle::{apply_battle, resolve_battle, BattleOutcome};
pub use build::{apply_build, validate_proposal};
pub use phase::{is_game_over, next_phase, start_turn};
