//! Ship types and the catalog that prices them.
//!
//! A catalog is a static table of ship types. Each entry carries its line
//! cost, whether instances are fungible, and a plain function computing the
//! healing and damage one ship contributes in battle.

use std::ops::{Add, AddAssign, Mul};

use serde_json::Value;

use super::player::Player;

/// Healing and damage produced by one or more ships in a battle round.
///
/// Arithmetic saturates at the `i32` bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contribution {
    pub healing: i32,
    pub damage: i32,
}

impl Contribution {
    pub const fn new(healing: i32, damage: i32) -> Self {
        Contribution { healing, damage }
    }
}

impl Add for Contribution {
    type Output = Contribution;

    fn add(self, rhs: Contribution) -> Contribution {
        Contribution {
            healing: self.healing.saturating_add(rhs.healing),
            damage: self.damage.saturating_add(rhs.damage),
        }
    }
}

impl AddAssign for Contribution {
    fn add_assign(&mut self, rhs: Contribution) {
        *self = *self + rhs;
    }
}

impl Mul<i32> for Contribution {
    type Output = Contribution;

    fn mul(self, quantity: i32) -> Contribution {
        Contribution {
            healing: self.healing.saturating_mul(quantity),
            damage: self.damage.saturating_mul(quantity),
        }
    }
}

/// Everything a ship's combat rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct ShipContext<'a> {
    /// The player that owns the ship.
    pub owner: &'a Player,
    /// The player being evaluated against (the owner itself for healing).
    pub target: &'a Player,
    /// Per-instance data for non-fungible ships; `None` for fungible ones.
    pub datum: Option<&'a Value>,
}

/// A catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct ShipType {
    pub name: &'static str,
    /// Lines spent per ship built.
    pub cost: u32,
    /// Fungible ships are tracked by count; others keep one datum per ship.
    pub fungible: bool,
    /// Combat rule for a single ship.
    pub contribution: fn(&ShipContext<'_>) -> Contribution,
}

fn defender_contribution(_ctx: &ShipContext<'_>) -> Contribution {
    Contribution::new(1, 0)
}

fn fighter_contribution(_ctx: &ShipContext<'_>) -> Contribution {
    Contribution::new(0, 1)
}

/// The standard ship table.
pub static STANDARD_SHIPS: [ShipType; 2] = [
    ShipType {
        name: "defender",
        cost: 2,
        fungible: true,
        contribution: defender_contribution,
    },
    ShipType {
        name: "fighter",
        cost: 3,
        fungible: true,
        contribution: fighter_contribution,
    },
];

/// A lookup table of ship types, iterated in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    ships: &'static [ShipType],
}

impl Catalog {
    /// Wraps a static ship table.
    pub const fn new(ships: &'static [ShipType]) -> Self {
        Catalog { ships }
    }

    /// The standard defender/fighter catalog.
    pub const fn standard() -> Self {
        Catalog::new(&STANDARD_SHIPS)
    }

    /// Looks up a ship type by name.
    pub fn get(&self, name: &str) -> Option<&'static ShipType> {
        self.ships.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static ShipType> {
        self.ships.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::standard()
    }
}

impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        self.ships.len() == other.ships.len()
            && self
                .ships
                .iter()
                .zip(other.ships)
                .all(|(a, b)| a.name == b.name && a.cost == b.cost && a.fungible == b.fungible)
    }
}

impl Eq for Catalog {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Species;

    #[test]
    fn standard_catalog_prices() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.get("defender").map(|s| s.cost), Some(2));
        assert_eq!(catalog.get("fighter").map(|s| s.cost), Some(3));
        assert!(catalog.get("dreadnought").is_none());
    }

    #[test]
    fn contribution_arithmetic_saturates() {
        let big = Contribution::new(1, 2) * i32::MAX;
        assert_eq!(big, Contribution::new(i32::MAX, i32::MAX));
        let mut total = big;
        total += Contribution::new(5, 5);
        assert_eq!(total, Contribution::new(i32::MAX, i32::MAX));
        assert_eq!(Contribution::new(2, 3) * 4, Contribution::new(8, 12));
    }

    #[test]
    fn standard_ships_are_fungible() {
        assert!(Catalog::standard().iter().all(|s| s.fungible));
    }

    #[test]
    fn standard_contributions() {
        let player = Player::new(Species::Human);
        let ctx = ShipContext {
            owner: &player,
            target: &player,
            datum: None,
        };
        let catalog = Catalog::standard();
        let defender = catalog.get("defender").unwrap();
        let fighter = catalog.get("fighter").unwrap();
        assert_eq!((defender.contribution)(&ctx), Contribution::new(1, 0));
        assert_eq!((fighter.contribution)(&ctx), Contribution::new(0, 1));
    }

    #[test]
    fn contribution_arithmetic() {
        let mut total = Contribution::new(1, 2) * 3;
        total += Contribution::new(0, 1);
        assert_eq!(total, Contribution::new(3, 7));
    }
}
