//! Outfit loader.

use std::path::Path;

use flight_core::{
    AfterburnerData, AmmoData, BoltData, Catalog, CatalogError, LauncherData, MapData,
    ModificationData, Outfit, OutfitKind,
};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file, stat_list};

/// Outfit entry as written in RON files.
#[derive(Debug, Clone, Deserialize)]
pub struct OutfitSpec {
    pub name: String,
    pub mass: u32,
    /// Maximum quantity a single pilot may carry.
    pub max: u32,
    /// Selectable as a secondary weapon.
    #[serde(default)]
    pub secondary: bool,
    pub kind: OutfitKindSpec,
}

/// Outfit payload as written in RON files.
///
/// Modification stats are `(name, value)` pairs with relative stats given in
/// percent, e.g. `("speed_mod", 10.0)` for +10% speed.
#[derive(Debug, Clone, Deserialize)]
pub enum OutfitKindSpec {
    Bolt(BoltData),
    TurretBolt(BoltData),
    Launcher(LauncherData),
    Ammo(AmmoData),
    Modification { stats: Vec<(String, f64)> },
    Afterburner(AfterburnerData),
    Map(MapData),
}

impl OutfitSpec {
    pub fn into_outfit(self) -> Outfit {
        let kind = match self.kind {
            OutfitKindSpec::Bolt(data) => OutfitKind::Bolt(data),
            OutfitKindSpec::TurretBolt(data) => OutfitKind::TurretBolt(data),
            OutfitKindSpec::Launcher(data) => OutfitKind::Launcher(data),
            OutfitKindSpec::Ammo(data) => OutfitKind::Ammo(data),
            OutfitKindSpec::Modification { stats } => OutfitKind::Modification(ModificationData {
                stats: stat_list(&stats),
            }),
            OutfitKindSpec::Afterburner(data) => OutfitKind::Afterburner(data),
            OutfitKindSpec::Map(data) => OutfitKind::Map(data),
        };
        let outfit = Outfit::new(self.name, self.mass, self.max, kind);
        if self.secondary { outfit.secondary() } else { outfit }
    }
}

/// Loader for outfits from RON files.
///
/// RON format: `Vec<OutfitSpec>`
pub struct OutfitLoader;

impl OutfitLoader {
    pub fn load(path: &Path, catalog: &mut Catalog) -> LoadResult<usize> {
        let content = read_file(path)?;
        Self::parse(&content, catalog)
    }

    /// Parses outfits into `catalog`, returning how many were added.
    ///
    /// Launchers naming ammunition that does not exist are kept (they simply
    /// never fire) and logged.
    pub fn parse(content: &str, catalog: &mut Catalog) -> LoadResult<usize> {
        let specs: Vec<OutfitSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse outfit RON: {}", e))?;
        if specs.is_empty() {
            return Err(CatalogError::Empty("outfit").into());
        }

        let mut launchers = Vec::new();
        let count = specs.len();
        for spec in specs {
            let outfit = catalog.insert_outfit(spec.into_outfit())?;
            if let Some(ammo) = outfit.ammo_name() {
                launchers.push((outfit.name.clone(), ammo.to_string()));
            }
        }
        for (launcher, ammo) in launchers {
            match catalog.outfit(&ammo) {
                Some(outfit) if outfit.is_ammo() => {}
                _ => tracing::warn!(outfit = %launcher, ammo = %ammo, "launcher ammunition not found"),
            }
        }
        Ok(count)
    }
}
