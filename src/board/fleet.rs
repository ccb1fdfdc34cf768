//! Owned ships and purchase deltas.
//!
//! A `Fleet` is what a player owns; a `Purchase` is what a build adds to it.
//! Both are keyed by ship name in sorted order, so two purchases reached
//! through different buying orders compare and hash identically.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ship::Catalog;
use crate::error::{GameError, ProposalError};

/// How a player holds ships of one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Holding {
    /// Fungible ships: only the count matters.
    Count(u32),
    /// Non-fungible ships: one opaque datum per ship.
    Instances(Vec<Value>),
}

impl Holding {
    /// Number of ships held.
    pub fn quantity(&self) -> u32 {
        match self {
            Holding::Count(n) => *n,
            Holding::Instances(data) => u32::try_from(data.len()).unwrap_or(u32::MAX),
        }
    }
}

/// Ships owned by a player, keyed by ship name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fleet(BTreeMap<String, Holding>);

impl Fleet {
    pub fn new() -> Self {
        Fleet(BTreeMap::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Holding> {
        self.0.get(name)
    }

    /// Number of ships of the given type owned (0 if none).
    pub fn quantity(&self, name: &str) -> u32 {
        self.0.get(name).map_or(0, Holding::quantity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Holding)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns a new fleet with the purchase added.
    ///
    /// Fungible counts are summed; non-fungible types gain one `null` datum
    /// per ship bought.
    pub fn merged(&self, purchase: &Purchase, catalog: &Catalog) -> Result<Fleet, ProposalError> {
        let mut ships = self.0.clone();
        for (name, quantity) in purchase.iter() {
            let ship = catalog
                .get(name)
                .ok_or_else(|| ProposalError::UnknownShip(name.to_string()))?;
            let entry = ships.entry(name.to_string()).or_insert_with(|| {
                if ship.fungible {
                    Holding::Count(0)
                } else {
                    Holding::Instances(Vec::new())
                }
            });
            match entry {
                Holding::Count(n) if ship.fungible => {
                    *n = n.checked_add(quantity).ok_or_else(|| {
                        ProposalError::Malformed(format!("too many '{}' ships", name))
                    })?;
                }
                Holding::Instances(data) if !ship.fungible => {
                    data.extend(std::iter::repeat(Value::Null).take(quantity as usize));
                }
                _ => {
                    return Err(ProposalError::Malformed(format!(
                        "fleet holds '{}' with the wrong kind",
                        name
                    )))
                }
            }
        }
        Ok(Fleet(ships))
    }

    /// Checks every entry against the catalog.
    pub fn validate(&self, catalog: &Catalog) -> Result<(), GameError> {
        for (name, holding) in &self.0 {
            let ship = catalog
                .get(name)
                .ok_or_else(|| GameError::UnknownShip(name.clone()))?;
            let matches = match holding {
                Holding::Count(_) => ship.fungible,
                Holding::Instances(_) => !ship.fungible,
            };
            if !matches {
                return Err(GameError::HoldingMismatch { ship: name.clone() });
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, Holding)> for Fleet {
    fn from_iter<I: IntoIterator<Item = (String, Holding)>>(iter: I) -> Self {
        Fleet(iter.into_iter().collect())
    }
}

/// Ships added by one build: ship name to quantity.
///
/// The empty purchase means "build nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Purchase(BTreeMap<String, u32>);

impl Purchase {
    pub fn new() -> Self {
        Purchase(BTreeMap::new())
    }

    /// Builder-style helper: returns the purchase with `quantity` more of `name`.
    pub fn with(mut self, name: &str, quantity: u32) -> Self {
        *self.0.entry(name.to_string()).or_insert(0) += quantity;
        self
    }

    /// Returns a copy with one more ship of the given type.
    pub fn plus_one(&self, name: &str) -> Self {
        self.clone().with(name, 1)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> u32 {
        self.0.get(name).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Total line cost under the given catalog.
    pub fn total_cost(&self, catalog: &Catalog) -> Result<u64, ProposalError> {
        self.iter().try_fold(0u64, |acc, (name, quantity)| {
            let ship = catalog
                .get(name)
                .ok_or_else(|| ProposalError::UnknownShip(name.to_string()))?;
            Ok(acc + u64::from(ship.cost) * u64::from(quantity))
        })
    }
}

impl FromIterator<(String, u32)> for Purchase {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Purchase(iter.into_iter().collect())
    }
}
