//! Static content and read-only collaborators.
//!
//! Definitions (commodities, outfits, hulls, fleets) live in the [`Catalog`]
//! and are shared by pilots through `Arc`. Behaviour the simulation consults
//! but does not own (faction relations, damage resolution, player navigation)
//! sits behind oracle traits; [`SimEnv`] bundles them so the world can reach
//! everything it needs without coupling to concrete implementations.
mod catalog;
mod commodities;
mod damage;
mod error;
mod factions;
mod fleets;
mod navigation;
mod outfits;
mod rng;
mod ships;

pub use catalog::Catalog;
pub use commodities::Commodity;
pub use damage::{DamageOracle, DamageSplit, DamageType, StandardDamage};
pub use error::CatalogError;
pub use factions::{FactionId, FactionOracle, FactionTable};
pub use fleets::{Fleet, FleetPilot};
pub use navigation::{FixedHeading, NavigationOracle, NoDestination};
pub use outfits::{
    AfterburnerData, AmmoData, BoltData, LauncherData, MapData, ModificationData, Outfit,
    OutfitCategory, OutfitKind,
};
pub use rng::PcgRng;
pub use ships::{Ship, ShipOutfit};

/// Aggregates the read-only oracles consulted during a simulation step.
#[derive(Clone, Copy)]
pub struct SimEnv<'a> {
    factions: &'a dyn FactionOracle,
    damage: &'a dyn DamageOracle,
    navigation: &'a dyn NavigationOracle,
}

impl<'a> SimEnv<'a> {
    pub fn new(
        factions: &'a dyn FactionOracle,
        damage: &'a dyn DamageOracle,
        navigation: &'a dyn NavigationOracle,
    ) -> Self {
        Self {
            factions,
            damage,
            navigation,
        }
    }

    pub fn factions(&self) -> &'a dyn FactionOracle {
        self.factions
    }

    pub fn damage(&self) -> &'a dyn DamageOracle {
        self.damage
    }

    pub fn navigation(&self) -> &'a dyn NavigationOracle {
        self.navigation
    }
}

impl core::fmt::Debug for SimEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SimEnv").finish_non_exhaustive()
    }
}
