//! Player species.
//!
//! Each player picks one species at game start; it never changes afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// One of the four playable species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Species {
    Human,
    Xenite,
    Centaur,
    Ancient,
}

/// All species in standard order.
pub const ALL_SPECIES: [Species; 4] = [
    Species::Human,
    Species::Xenite,
    Species::Centaur,
    Species::Ancient,
];

impl Species {
    /// Returns the display name of this species.
    pub const fn name(self) -> &'static str {
        match self {
            Species::Human => "Human",
            Species::Xenite => "Xenite",
            Species::Centaur => "Centaur",
            Species::Ancient => "Ancient",
        }
    }

    /// Parses a species from its name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Species> {
        ALL_SPECIES
            .iter()
            .copied()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Species {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Species::from_name(s.trim()).ok_or_else(|| GameError::UnknownSpecies(s.to_string()))
    }
}
