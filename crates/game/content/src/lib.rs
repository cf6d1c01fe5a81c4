//! Data-driven flight content and loaders.
//!
//! This crate reads the static content a session flies with:
//! - Simulation tunables (TOML)
//! - Factions and their wars (RON)
//! - Commodities, outfits and hulls (RON)
//! - Fleet templates (RON)
//!
//! Cross references between files are resolved by name while loading, so the
//! result is a self-contained [`flight_core::Catalog`] of shared definitions.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CommodityLoader, ConfigLoader, Content, ContentFactory, FactionLoader, FleetLoader,
    OutfitLoader, ShipLoader,
};

/// Content bundled with this crate.
pub const BUNDLED_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");
