//! Static content catalog.
//!
//! Holds every commodity, outfit, hull and fleet definition by name. Entries
//! are immutable once inserted and handed out as `Arc`s, so pilots share the
//! definitions instead of copying them.

use std::collections::HashMap;
use std::sync::Arc;

use super::{CatalogError, Commodity, Fleet, Outfit, Ship};

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    commodities: HashMap<String, Arc<Commodity>>,
    outfits: HashMap<String, Arc<Outfit>>,
    ships: HashMap<String, Arc<Ship>>,
    fleets: HashMap<String, Arc<Fleet>>,
}

fn insert_unique<T>(
    map: &mut HashMap<String, Arc<T>>,
    kind: &'static str,
    name: &str,
    value: T,
) -> Result<Arc<T>, CatalogError> {
    if map.contains_key(name) {
        return Err(CatalogError::Duplicate {
            kind,
            name: name.to_string(),
        });
    }
    let value = Arc::new(value);
    map.insert(name.to_string(), Arc::clone(&value));
    Ok(value)
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::Duplicate`] if the name is taken.
    pub fn insert_commodity(&mut self, commodity: Commodity) -> Result<Arc<Commodity>, CatalogError> {
        let name = commodity.name.clone();
        insert_unique(&mut self.commodities, "commodity", &name, commodity)
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::Duplicate`] if the name is taken.
    pub fn insert_outfit(&mut self, outfit: Outfit) -> Result<Arc<Outfit>, CatalogError> {
        let name = outfit.name.clone();
        insert_unique(&mut self.outfits, "outfit", &name, outfit)
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::Duplicate`] if the name is taken.
    pub fn insert_ship(&mut self, ship: Ship) -> Result<Arc<Ship>, CatalogError> {
        let name = ship.name.clone();
        insert_unique(&mut self.ships, "ship", &name, ship)
    }

    /// # Errors
    ///
    /// Returns [`CatalogError::Duplicate`] if the name is taken.
    pub fn insert_fleet(&mut self, fleet: Fleet) -> Result<Arc<Fleet>, CatalogError> {
        let name = fleet.name.clone();
        insert_unique(&mut self.fleets, "fleet", &name, fleet)
    }

    pub fn commodity(&self, name: &str) -> Option<Arc<Commodity>> {
        self.commodities.get(name).cloned()
    }

    pub fn outfit(&self, name: &str) -> Option<Arc<Outfit>> {
        self.outfits.get(name).cloned()
    }

    pub fn ship(&self, name: &str) -> Option<Arc<Ship>> {
        self.ships.get(name).cloned()
    }

    /// Looks up a fleet template, logging a warning when it does not exist.
    pub fn fleet(&self, name: &str) -> Option<Arc<Fleet>> {
        let fleet = self.fleets.get(name).cloned();
        if fleet.is_none() {
            tracing::warn!(fleet = name, "fleet not found");
        }
        fleet
    }

    /// Resolves an outfit reference made by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownOutfit`] if the outfit does not exist.
    pub fn require_outfit(&self, owner: &str, name: &str) -> Result<Arc<Outfit>, CatalogError> {
        self.outfit(name).ok_or_else(|| CatalogError::UnknownOutfit {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// Resolves a hull reference made by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownShip`] if the hull does not exist.
    pub fn require_ship(&self, owner: &str, name: &str) -> Result<Arc<Ship>, CatalogError> {
        self.ship(name).ok_or_else(|| CatalogError::UnknownShip {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn commodity_names(&self) -> impl Iterator<Item = &str> {
        self.commodities.keys().map(String::as_str)
    }

    pub fn ship_names(&self) -> impl Iterator<Item = &str> {
        self.ships.keys().map(String::as_str)
    }

    pub fn fleet_names(&self) -> impl Iterator<Item = &str> {
        self.fleets.keys().map(String::as_str)
    }

    pub fn outfit_count(&self) -> usize {
        self.outfits.len()
    }
}
