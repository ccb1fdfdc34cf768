//! Property-based tests for the game state machine.
//!
//! Plays random games from random dice and random choices and checks the
//! invariants that must hold in every reachable state.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use proptest::prelude::*;

use shapeships::board::{Catalog, Phase, Proposal, Purchase, Request, Species, ALL_SPECIES, MAX_HP};
use shapeships::movegen::affordable_purchases;
use shapeships::protocol::snapshot::{decode_game, encode_game, GameSnapshot};
use shapeships::{Game, LoadedDice};

fn species_list() -> impl Strategy<Value = Vec<Species>> {
    prop::collection::vec(prop::sample::select(ALL_SPECIES.to_vec()), 1..=4)
}

fn dice() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(1u32..=6, 1..8)
}

/// Answers every pending request with the option at `pick % len`, then advances.
fn step(game: &Game, dice: &mut LoadedDice, pick: usize) -> Game {
    let mut game = game.clone();
    for id in 0..game.players().len() {
        let request = game.players()[id].request.clone();
        if let Some(Request::Build { options }) = request {
            let option = options[pick % options.len()].clone();
            let (next, accepted) = game.submit(id, &Proposal::build(option));
            assert!(accepted);
            game = next;
        }
    }
    game.next(dice).0
}

/// Every state visited while playing `picks.len()` steps.
fn play(species: &[Species], rolls: Vec<u32>, picks: &[usize]) -> Vec<Game> {
    let mut dice = LoadedDice::new(rolls);
    let (mut game, _) = Game::start(species, &mut dice).unwrap();
    let mut states = vec![game.clone()];
    for &pick in picks {
        game = step(&game, &mut dice, pick);
        states.push(game.clone());
    }
    states
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Fresh players start at full hp with exactly one roll of lines.
    #[test]
    fn prop_start_state(species in species_list(), roll in 1u32..=6) {
        let mut dice = LoadedDice::always(roll);
        let (game, requests) = Game::start(&species, &mut dice).unwrap();
        prop_assert_eq!(game.phase(), Phase::Build);
        prop_assert_eq!(requests.len(), species.len());
        for player in game.players() {
            prop_assert_eq!(player.hp, 25);
            prop_assert_eq!(player.lines, roll);
            prop_assert!(player.ships.is_empty());
        }
    }

    /// Enumerated options are distinct, affordable, and include building nothing.
    #[test]
    fn prop_enumeration_is_distinct_and_affordable(lines in 0u32..40) {
        let catalog = Catalog::standard();
        let options = affordable_purchases(lines, &catalog);
        let distinct: HashSet<&Purchase> = options.iter().collect();
        prop_assert_eq!(distinct.len(), options.len());
        prop_assert!(options.contains(&Purchase::new()));
        for option in &options {
            prop_assert!(option.total_cost(&catalog).unwrap() <= u64::from(lines));
        }
    }

    /// Snapshots of any reachable state decode back to the same game.
    #[test]
    fn prop_snapshot_round_trip(
        species in species_list(),
        rolls in dice(),
        picks in prop::collection::vec(any::<usize>(), 0..12),
    ) {
        for game in play(&species, rolls, &picks) {
            let json = encode_game(&game).unwrap();
            prop_assert_eq!(decode_game(&json).unwrap(), game.clone());
            let snapshot: GameSnapshot = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(Game::from_snapshot(snapshot).unwrap(), game);
        }
    }

    /// hp never exceeds the cap and any elimination ends the game for good.
    #[test]
    fn prop_hp_capped_and_game_over_absorbing(
        species in species_list(),
        rolls in dice(),
        picks in prop::collection::vec(any::<usize>(), 0..40),
    ) {
        let mut over = false;
        for game in play(&species, rolls, &picks) {
            prop_assert!(game.players().iter().all(|p| p.hp <= MAX_HP));
            if over {
                prop_assert_eq!(game.phase(), Phase::GameOver);
            }
            if game.players().iter().any(|p| p.hp <= 0) {
                prop_assert_eq!(game.phase(), Phase::GameOver);
                over = true;
            }
        }
    }

    /// Proposals outside the offered set never change the game.
    #[test]
    fn prop_unoffered_proposal_rejected(
        species in species_list(),
        roll in 1u32..=6,
        defenders in 0u32..10,
        fighters in 0u32..10,
    ) {
        let mut dice = LoadedDice::always(roll);
        let (game, _) = Game::start(&species, &mut dice).unwrap();
        let option = Purchase::new().with("defender", defenders).with("fighter", fighters);
        let offered = match &game.players()[0].request {
            Some(Request::Build { options }) => options.contains(&option),
            None => false,
        };
        let (after, accepted) = game.submit(0, &Proposal::build(option));
        prop_assert_eq!(accepted, offered);
        if !accepted {
            prop_assert_eq!(after, game);
        }
    }
}
