//! Build-phase move generation.
//!
//! Enumerates every distinct purchase a player can afford with their
//! current lines, including the empty purchase (build nothing).

use std::collections::{HashSet, VecDeque};

use crate::board::{Catalog, Player, Purchase, Request};

/// Generates the build request for a player.
///
/// Walks (purchase, remaining lines) states breadth-first: from each state,
/// every ship type whose cost fits the remaining lines yields a successor
/// with one more of that ship. Purchases reached through different buying
/// orders are the same multiset and are only offered once. Options appear
/// in discovery order, so the empty purchase is always first.
pub fn legal_builds(player: &Player, catalog: &Catalog) -> Request {
    Request::Build {
        options: affordable_purchases(player.lines, catalog),
    }
}

/// Returns every distinct purchase whose total cost fits within `lines`.
pub fn affordable_purchases(lines: u32, catalog: &Catalog) -> Vec<Purchase> {
    let mut options = Vec::new();
    let mut seen: HashSet<Purchase> = HashSet::new();
    let mut queue: VecDeque<(Purchase, u32)> = VecDeque::new();

    seen.insert(Purchase::new());
    queue.push_back((Purchase::new(), lines));

    while let Some((purchase, remaining)) = queue.pop_front() {
        for ship in catalog.iter() {
            if ship.cost == 0 || ship.cost > remaining {
                continue;
            }
            let next = purchase.plus_one(ship.name);
            if seen.insert(next.clone()) {
                queue.push_back((next, remaining - ship.cost));
            }
        }
        options.push(purchase);
    }

    options
}
