//! Item types and the player's inventory.
//!
//! Items are consumables. Each carries a single effect on the player's vitals and
//! is used up when the effect actually lands. Using an item on a resource that is
//! already full is refused and the item stays in the pack.

use std::collections::HashSet;
use std::fmt;

use log::info;
use thiserror::Error;

use crate::vitals::Vitals;

pub const ENERGY_PACK: &str = "energy pack";
pub const OXYGEN_CANISTER: &str = "oxygen canister";

/// Which vital an effect touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Oxygen,
    Energy,
}
impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Oxygen => f.write_str("oxygen"),
            Resource::Energy => f.write_str("energy"),
        }
    }
}

/// What using an item does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEffect {
    Restore { resource: Resource, amount: u32 },
}
impl ItemEffect {
    pub fn resource(self) -> Resource {
        match self {
            ItemEffect::Restore { resource, .. } => resource,
        }
    }

    /// Apply the effect, returning how much was restored.
    /// Returns `None` and leaves `vitals` untouched if the target is already full.
    fn apply(self, vitals: &mut Vitals) -> Option<u32> {
        match self {
            ItemEffect::Restore { resource, amount } => {
                let gauge = match resource {
                    Resource::Oxygen => &mut vitals.oxygen,
                    Resource::Energy => &mut vitals.energy,
                };
                if gauge.is_full() {
                    None
                } else {
                    Some(gauge.fill(amount))
                }
            },
        }
    }
}

/// A single carried item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub description: String,
    pub effect: ItemEffect,
}
impl Item {
    pub fn energy_pack() -> Item {
        Item {
            name: ENERGY_PACK.to_string(),
            description: "A palm-sized cell that tops up your suit's energy reserve.".to_string(),
            effect: ItemEffect::Restore {
                resource: Resource::Energy,
                amount: 1,
            },
        }
    }

    pub fn oxygen_canister() -> Item {
        Item {
            name: OXYGEN_CANISTER.to_string(),
            description: "A compressed canister that clips onto your suit's air supply.".to_string(),
            effect: ItemEffect::Restore {
                resource: Resource::Oxygen,
                amount: 2,
            },
        }
    }

    /// Rebuild an item from its name, as stored in save files.
    pub fn from_catalog(name: &str) -> Option<Item> {
        match name.trim().to_lowercase().as_str() {
            ENERGY_PACK => Some(Item::energy_pack()),
            OXYGEN_CANISTER => Some(Item::oxygen_canister()),
            _ => None,
        }
    }
}

/// Reasons an item could not be used.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UseError {
    #[error("You don't have a {0}")]
    NotCarried(String),
    #[error("Your {resource} is already full")]
    AlreadyFull { item: String, resource: Resource },
}

/// Result of a successful item use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseReport {
    pub item: String,
    pub resource: Resource,
    pub restored: u32,
}

/// The player's items in the order they were picked up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<Item>,
}
impl Inventory {
    pub fn new() -> Inventory {
        Inventory::default()
    }

    pub fn add(&mut self, item: Item) {
        info!("item '{}' added to inventory", item.name);
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Name and description pairs in insertion order.
    pub fn list(&self) -> Vec<(&str, &str)> {
        self.items
            .iter()
            .map(|item| (item.name.as_str(), item.description.as_str()))
            .collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.name.as_str()).collect()
    }

    /// Distinct item names, each listed where it was first picked up.
    pub fn kinds(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .map(|item| item.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        let wanted = name.trim().to_lowercase();
        self.items.iter().position(|item| item.name == wanted)
    }

    /// Remove and return the item at `index`.
    pub fn remove_at(&mut self, index: usize) -> Option<Item> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Use one item called `name`, applying its effect to `vitals`.
    ///
    /// # Errors
    /// - [`UseError::NotCarried`] if no such item is in the inventory
    /// - [`UseError::AlreadyFull`] if the effect's target is saturated; nothing is consumed
    pub fn use_item(&mut self, name: &str, vitals: &mut Vitals) -> Result<UseReport, UseError> {
        let index = self
            .position(name)
            .ok_or_else(|| UseError::NotCarried(name.trim().to_string()))?;
        let item = &self.items[index];
        let effect = item.effect;
        let Some(restored) = effect.apply(vitals) else {
            info!("use of '{}' refused: {} already full", item.name, effect.resource());
            return Err(UseError::AlreadyFull {
                item: item.name.clone(),
                resource: effect.resource(),
            });
        };
        let item = self.items.remove(index);
        info!("used '{}': +{restored} {}", item.name, effect.resource());
        Ok(UseReport {
            item: item.name,
            resource: effect.resource(),
            restored,
        })
    }
}
