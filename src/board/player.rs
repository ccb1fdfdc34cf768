//! Per-player state.
//!
//! A `Player` is an immutable value: every transition returns a new player
//! and leaves the original untouched.

use serde::{Deserialize, Serialize};

use super::fleet::{Fleet, Holding, Purchase};
use super::request::{optional_request, Proposal, Request};
use super::ship::{Catalog, Contribution, ShipContext};
use super::species::Species;
use super::state::{Phase, STARTING_HP};
use crate::error::{GameError, ProposalError};
use crate::movegen::build::legal_builds;
use crate::resolve::build::{apply_build, validate_proposal};

/// One participant in a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub species: Species,
    pub hp: i32,
    /// Unspent build resource.
    pub lines: u32,
    pub ships: Fleet,
    /// Pending request, or `None` when nothing is solicited.
    #[serde(with = "optional_request")]
    pub request: Option<Request>,
}

impl Player {
    /// Creates a fresh player with starting hp, no lines and no ships.
    pub fn new(species: Species) -> Self {
        Player {
            species,
            hp: STARTING_HP,
            lines: 0,
            ships: Fleet::new(),
            request: None,
        }
    }

    /// Creates a player from a species name.
    pub fn create(species: &str) -> Result<Self, GameError> {
        Ok(Player::new(species.parse()?))
    }

    /// Returns true if this player owes an answer to a pending request.
    pub fn has_pending_request(&self) -> bool {
        self.request.is_some()
    }

    /// Adds the turn's die roll to the player's lines.
    pub fn accrue(&self, die_roll: u32) -> Player {
        Player {
            lines: self.lines.saturating_add(die_roll),
            ..self.clone()
        }
    }

    /// Sums healing and damage over every owned ship, evaluated against `target`.
    pub fn combat_contribution(&self, target: &Player, catalog: &Catalog) -> Contribution {
        let mut total = Contribution::default();
        for (name, holding) in self.ships.iter() {
            let Some(ship) = catalog.get(name) else {
                continue;
            };
            match holding {
                Holding::Count(n) => {
                    let ctx = ShipContext {
                        owner: self,
                        target,
                        datum: None,
                    };
                    let quantity = i32::try_from(*n).unwrap_or(i32::MAX);
                    total += (ship.contribution)(&ctx) * quantity;
                }
                Holding::Instances(data) => {
                    for datum in data {
                        let ctx = ShipContext {
                            owner: self,
                            target,
                            datum: Some(datum),
                        };
                        total += (ship.contribution)(&ctx);
                    }
                }
            }
        }
        total
    }

    /// Enumerates every distinct purchase affordable with the current lines.
    pub fn enumerate_build_options(&self, catalog: &Catalog) -> Request {
        legal_builds(self, catalog)
    }

    /// Returns the request this player should answer in `phase`.
    pub fn generate_request(&self, phase: Phase, catalog: &Catalog) -> Option<Request> {
        match phase {
            Phase::Build => Some(self.enumerate_build_options(catalog)),
            Phase::Battle | Phase::GameOver => None,
        }
    }

    /// Returns a copy carrying the request for `phase`.
    pub fn with_request_for(&self, phase: Phase, catalog: &Catalog) -> Player {
        Player {
            request: self.generate_request(phase, catalog),
            ..self.clone()
        }
    }

    /// Validates a proposal against the pending request and applies it.
    ///
    /// The returned player still carries the old request; callers clear it.
    pub fn submit(&self, proposal: &Proposal, catalog: &Catalog) -> Result<Player, ProposalError> {
        validate_proposal(self.request.as_ref(), proposal)?;
        match proposal {
            Proposal::Build { option } => self.apply_build(option, catalog),
        }
    }

    /// Spends lines on a purchase and adds the ships to the fleet.
    pub fn apply_build(&self, purchase: &Purchase, catalog: &Catalog) -> Result<Player, ProposalError> {
        apply_build(self, purchase, catalog)
    }

    pub fn clear_request(&self) -> Player {
        Player {
            request: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_defaults() {
        let p = Player::new(Species::Centaur);
        assert_eq!(p.species, Species::Centaur);
        assert_eq!(p.hp, 25);
        assert_eq!(p.lines, 0);
        assert!(p.ships.is_empty());
        assert!(!p.has_pending_request());
    }

    #[test]
    fn create_rejects_unknown_species() {
        assert!(Player::create("Human").is_ok());
        assert!(matches!(Player::create("kraken"), Err(GameError::UnknownSpecies(_))));
    }

    #[test]
    fn accrue_adds_lines_without_mutating() {
        let p = Player::new(Species::Human);
        let q = p.accrue(4).accrue(2);
        assert_eq!(p.lines, 0);
        assert_eq!(q.lines, 6);
        let rich = Player {
            lines: u32::MAX - 1,
            ..p
        };
        assert_eq!(rich.accrue(6).lines, u32::MAX);
    }

    #[test]
    fn contribution_scales_with_quantity() {
        let catalog = Catalog::standard();
        let p = Player::new(Species::Human)
            .accrue(12)
            .apply_build(&Purchase::new().with("defender", 3).with("fighter", 2), &catalog)
            .unwrap();
        let other = Player::new(Species::Xenite);
        assert_eq!(p.combat_contribution(&other, &catalog), Contribution::new(3, 2));
        assert_eq!(p.combat_contribution(&p, &catalog), Contribution::new(3, 2));
    }

    #[test]
    fn request_only_in_build_phase() {
        let catalog = Catalog::standard();
        let p = Player::new(Species::Human).accrue(2);
        assert!(matches!(
            p.generate_request(Phase::Build, &catalog),
            Some(Request::Build { .. })
        ));
        assert_eq!(p.generate_request(Phase::Battle, &catalog), None);
        assert_eq!(p.generate_request(Phase::GameOver, &catalog), None);
    }

    #[test]
    fn submit_then_clear() {
        let catalog = Catalog::standard();
        let p = Player::new(Species::Human)
            .accrue(4)
            .with_request_for(Phase::Build, &catalog);
        let proposal = Proposal::build(Purchase::new().with("defender", 2));
        let q = p.submit(&proposal, &catalog).unwrap().clear_request();
        assert_eq!(q.lines, 0);
        assert_eq!(q.ships.quantity("defender"), 2);
        assert!(!q.has_pending_request());
        assert_eq!(q.submit(&proposal, &catalog), Err(ProposalError::NoPendingRequest));
    }

    #[test]
    fn serializes_empty_request_as_empty_object() {
        let p = Player::new(Species::Xenite);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "species": "XENITE",
                "hp": 25,
                "lines": 0,
                "ships": {},
                "request": {}
            })
        );
        let back: Player = serde_json::from_value(json).unwrap();
        assert_eq!(back, p);
    }
}
