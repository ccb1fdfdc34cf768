//! Battle resolution.
//!
//! All players fight simultaneously. For every ordered pair (i, j),
//! including i == j, player i's ships are evaluated against player j: on the
//! diagonal the healing goes to j, off the diagonal the damage is taken by j.
//! Totals are applied after every pair is summed, then hp is clamped to
//! `MAX_HP`. There is no floor clamp; any hp at or below zero ends the game.

use crate::board::{Catalog, Player, MAX_HP};

/// Hit points after one battle round and whether anyone was eliminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleOutcome {
    /// Resulting hp per player, index-aligned with the input.
    pub hps: Vec<i32>,
    pub game_over: bool,
}

/// Computes the outcome of one battle round without modifying any player.
pub fn resolve_battle(players: &[Player], catalog: &Catalog) -> BattleOutcome {
    let mut hps: Vec<i32> = players.iter().map(|p| p.hp).collect();

    for (i, attacker) in players.iter().enumerate() {
        for (j, target) in players.iter().enumerate() {
            let contribution = attacker.combat_contribution(target, catalog);
            if i == j {
                hps[j] = hps[j].saturating_add(contribution.healing);
            } else {
                hps[j] = hps[j].saturating_sub(contribution.damage);
            }
        }
    }

    for hp in hps.iter_mut() {
        *hp = (*hp).min(MAX_HP);
    }

    let game_over = hps.iter().any(|&hp| hp <= 0);
    BattleOutcome { hps, game_over }
}

/// Returns copies of `players` carrying the outcome's hp.
pub fn apply_battle(players: &[Player], outcome: &BattleOutcome) -> Vec<Player> {
    players
        .iter()
        .zip(&outcome.hps)
        .map(|(p, &hp)| Player { hp, ..p.clone() })
        .collect()
}
