//! Content loaders for reading flight data from files.
//!
//! Each loader turns one RON/TOML file into core types. Files that refer to
//! other content by name are loaded after the files they depend on, in the
//! order [`ContentFactory::load`] uses.

pub mod commodities;
pub mod config;
pub mod factions;
pub mod factory;
pub mod fleets;
pub mod outfits;
pub mod ships;

pub use commodities::CommodityLoader;
pub use config::ConfigLoader;
pub use factions::FactionLoader;
pub use factory::{Content, ContentFactory};
pub use fleets::FleetLoader;
pub use outfits::OutfitLoader;
pub use ships::ShipLoader;

use std::path::Path;

use flight_core::{StatEntry, StatList};

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Builds a stat list from `(name, value)` pairs as written in data files.
///
/// Unknown names are logged and skipped.
pub(crate) fn stat_list(pairs: &[(String, f64)]) -> StatList {
    pairs
        .iter()
        .filter_map(|(name, value)| StatEntry::from_named(name, *value))
        .collect()
}
