//! Faction loader.

use std::path::Path;

use flight_core::{CatalogError, FactionTable};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Faction file structure for RON files.
///
/// ```ron
/// (
///     factions: ["Independent", "Pirate"],
///     enemies: [("Independent", "Pirate")],
/// )
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct FactionFile {
    pub factions: Vec<String>,
    #[serde(default)]
    pub enemies: Vec<(String, String)>,
}

/// Loader for factions from RON files.
pub struct FactionLoader;

impl FactionLoader {
    pub fn load(path: &Path) -> LoadResult<FactionTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<FactionTable> {
        let file: FactionFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse faction RON: {}", e))?;
        if file.factions.is_empty() {
            return Err(CatalogError::Empty("faction").into());
        }

        let mut table = FactionTable::new();
        for name in &file.factions {
            if table.id(name).is_some() {
                return Err(CatalogError::Duplicate {
                    kind: "faction",
                    name: name.clone(),
                }
                .into());
            }
            table.add(name.as_str());
        }

        for (a, b) in &file.enemies {
            let resolve = |name: &String| {
                table.id(name).ok_or_else(|| CatalogError::UnknownFaction {
                    owner: "enemies".to_string(),
                    name: name.clone(),
                })
            };
            let (a, b) = (resolve(a)?, resolve(b)?);
            table.set_enemies(a, b);
        }
        tracing::debug!(factions = table.len(), "factions loaded");
        Ok(table)
    }
}
