//! Hull definitions.

use std::sync::Arc;

use super::Outfit;
use crate::physics::Vec2;
use crate::stats::ShipStats;

/// Immutable hull definition shared by every pilot flying it.
///
/// Base values are combined with installed outfits as
/// `(base + absolute) * relative` whenever a pilot recomputes its stats.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ship {
    pub name: String,
    pub mass: f64,
    pub thrust: f64,
    /// Turn rate in radians per second.
    pub turn: f64,
    pub speed: f64,

    pub armour: f64,
    pub armour_regen: f64,
    pub shield: f64,
    pub shield_regen: f64,
    pub energy: f64,
    pub energy_regen: f64,
    pub fuel: u32,

    /// Cargo hold capacity in tonnes.
    pub cap_cargo: u32,
    /// Total outfit mass the hull can carry.
    pub cap_weapon: u32,

    /// Hull sprite extent; explosions scatter within half of it.
    pub size: Vec2,

    /// Intrinsic hull modifiers.
    pub stats: ShipStats,
    /// Outfits new pilots come equipped with.
    pub outfits: Vec<ShipOutfit>,
}

impl Ship {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Default loadout entry.
#[derive(Clone, Debug, PartialEq)]
pub struct ShipOutfit {
    pub outfit: Arc<Outfit>,
    pub quantity: u32,
}

impl ShipOutfit {
    pub fn new(outfit: Arc<Outfit>, quantity: u32) -> Self {
        Self { outfit, quantity }
    }
}
