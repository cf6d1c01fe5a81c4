//! Content factory for building a catalog from data files.

use std::path::{Path, PathBuf};

use flight_core::{Catalog, FactionTable, SimConfig};

use crate::loaders::{
    CommodityLoader, ConfigLoader, FactionLoader, FleetLoader, LoadResult, OutfitLoader,
    ShipLoader,
};

/// Everything a session needs from the data directory.
#[derive(Debug, Clone)]
pub struct Content {
    pub config: SimConfig,
    pub factions: FactionTable,
    pub catalog: Catalog,
}

/// Content factory that loads all flight content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml        (optional)
/// ├── factions.ron
/// ├── commodities.ron
/// ├── outfits.ron
/// ├── ships.ron
/// └── fleets.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load simulation tunables from `config.toml`, or the defaults if absent.
    pub fn load_config(&self) -> LoadResult<SimConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(SimConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load factions from `factions.ron`.
    pub fn load_factions(&self) -> LoadResult<FactionTable> {
        FactionLoader::load(&self.data_dir.join("factions.ron"))
    }

    /// Load commodities, outfits, ships and fleets, in dependency order.
    pub fn load_catalog(&self, factions: &FactionTable) -> LoadResult<Catalog> {
        let mut catalog = Catalog::new();
        let commodities =
            CommodityLoader::load(&self.data_dir.join("commodities.ron"), &mut catalog)?;
        let outfits = OutfitLoader::load(&self.data_dir.join("outfits.ron"), &mut catalog)?;
        let ships = ShipLoader::load(&self.data_dir.join("ships.ron"), &mut catalog)?;
        let fleets = FleetLoader::load(&self.data_dir.join("fleets.ron"), &mut catalog, factions)?;
        tracing::info!(commodities, outfits, ships, fleets, "content loaded");
        Ok(catalog)
    }

    /// Load everything.
    pub fn load(&self) -> LoadResult<Content> {
        // stat lookups index the table by kind; a misordered table is unusable
        flight_core::stats::check()
            .map_err(|e| anyhow::anyhow!("Stat table is inconsistent: {}", e))?;
        let config = self.load_config()?;
        let factions = self.load_factions()?;
        let catalog = self.load_catalog(&factions)?;
        Ok(Content {
            config,
            factions,
            catalog,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
