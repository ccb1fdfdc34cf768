//! Game phase and rule constants.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hit points every player starts with.
pub const STARTING_HP: i32 = 25;

/// Hit points are clamped to this ceiling after every battle.
pub const MAX_HP: i32 = 35;

/// Number of faces on the shared die rolled at the start of each turn.
pub const DIE_SIDES: u32 = 6;

/// The phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Build,
    Battle,
    GameOver,
}

impl Phase {
    /// Returns the wire name of this phase.
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Build => "BUILD",
            Phase::Battle => "BATTLE",
            Phase::GameOver => "GAME_OVER",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOver)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_serde_name() {
        for p in [Phase::Build, Phase::Battle, Phase::GameOver] {
            assert_eq!(serde_json::to_string(&p).unwrap(), format!("\"{}\"", p));
        }
    }

    #[test]
    fn serde_uses_wire_names() {
        assert_eq!(serde_json::to_string(&Phase::GameOver).unwrap(), "\"GAME_OVER\"");
        let p: Phase = serde_json::from_str("\"BATTLE\"").unwrap();
        assert_eq!(p, Phase::Battle);
        assert!(serde_json::from_str::<Phase>("\"RETREAT\"").is_err());
    }

    #[test]
    fn only_game_over_is_terminal() {
        assert!(!Phase::Build.is_terminal());
        assert!(!Phase::Battle.is_terminal());
        assert!(Phase::GameOver.is_terminal());
    }
}
