//! Build-phase resolution.
//!
//! Validates a player's proposal against their pending request and applies
//! accepted builds. Validation never mutates: a rejected proposal leaves the
//! player exactly as it was.

use crate::board::{Catalog, Player, Proposal, Purchase, Request};
use crate::error::ProposalError;

/// Checks that `proposal` answers `request` with one of the offered options.
pub fn validate_proposal(request: Option<&Request>, proposal: &Proposal) -> Result<(), ProposalError> {
    let request = request.ok_or(ProposalError::NoPendingRequest)?;
    match (request, proposal) {
        (Request::Build { options }, Proposal::Build { option }) => {
            if options.contains(option) {
                Ok(())
            } else {
                Err(ProposalError::NotOffered)
            }
        }
    }
}

/// Deducts the purchase's cost from the player's lines and adds its ships.
///
/// Affordability is checked against the player's current lines even though
/// offered options were affordable when generated, so a stale or forged
/// option is still rejected.
pub fn apply_build(player: &Player, purchase: &Purchase, catalog: &Catalog) -> Result<Player, ProposalError> {
    let cost = purchase.total_cost(catalog)?;
    if cost > u64::from(player.lines) {
        return Err(ProposalError::InsufficientLines {
            cost,
            lines: player.lines,
        });
    }
    let ships = player.ships.merged(purchase, catalog)?;
    // cost <= lines, so the difference fits in u32.
    let lines = player.lines - cost as u32;
    Ok(Player {
        lines,
        ships,
        ..player.clone()
    })
}
