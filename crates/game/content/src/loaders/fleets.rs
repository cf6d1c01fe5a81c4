//! Fleet template loader.
//!
//! Fleets degrade rather than fail: a missing `ai`, `faction` or `pilots`
//! field is logged and replaced with a default, and members flying unknown
//! hulls are dropped with a warning.

use std::path::Path;

use flight_core::{Catalog, CatalogError, FactionId, FactionTable, Fleet, FleetPilot};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// AI profile used by fleets that do not name one.
pub const DEFAULT_AI: &str = "generic";

/// Fleet entry as written in RON files.
#[derive(Debug, Clone, Deserialize)]
pub struct FleetSpec {
    pub name: String,
    #[serde(default)]
    pub faction: Option<String>,
    #[serde(default)]
    pub ai: Option<String>,
    #[serde(default)]
    pub pilots: Option<Vec<FleetPilotSpec>>,
}

/// Fleet member as written in RON files.
#[derive(Debug, Clone, Deserialize)]
pub struct FleetPilotSpec {
    /// Overrides the hull name as the pilot's display name.
    #[serde(default)]
    pub name: Option<String>,
    pub ship: String,
    /// Spawn chance in percent.
    pub chance: u32,
}

impl FleetSpec {
    /// Resolves hull and faction references.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownFaction`] when the named faction does
    /// not exist.
    pub fn into_fleet(self, catalog: &Catalog, factions: &FactionTable) -> Result<Fleet, CatalogError> {
        let faction = match &self.faction {
            Some(name) => factions.id(name).ok_or_else(|| CatalogError::UnknownFaction {
                owner: self.name.clone(),
                name: name.clone(),
            })?,
            None => {
                tracing::warn!(fleet = %self.name, "fleet missing 'faction'");
                FactionId::default()
            }
        };
        let ai = self.ai.unwrap_or_else(|| {
            tracing::warn!(fleet = %self.name, "fleet missing 'ai'");
            DEFAULT_AI.to_string()
        });
        let members = self.pilots.unwrap_or_else(|| {
            tracing::warn!(fleet = %self.name, "fleet missing 'pilots'");
            Vec::new()
        });

        let mut pilots = Vec::with_capacity(members.len());
        for member in members {
            let Some(ship) = catalog.ship(&member.ship) else {
                tracing::warn!(fleet = %self.name, ship = %member.ship, "fleet pilot has unknown ship");
                continue;
            };
            if member.chance == 0 {
                tracing::warn!(
                    fleet = %self.name,
                    ship = %member.ship,
                    "fleet pilot has 0% chance of appearing"
                );
            }
            let mut pilot = FleetPilot::new(ship, member.chance.min(100));
            if let Some(name) = member.name {
                pilot = pilot.named(name);
            }
            pilots.push(pilot);
        }

        Ok(Fleet {
            name: self.name,
            faction,
            ai,
            pilots,
        })
    }
}

/// Loader for fleet templates from RON files.
///
/// RON format: `Vec<FleetSpec>`. Hulls and factions must already be loaded.
pub struct FleetLoader;

impl FleetLoader {
    pub fn load(path: &Path, catalog: &mut Catalog, factions: &FactionTable) -> LoadResult<usize> {
        let content = read_file(path)?;
        Self::parse(&content, catalog, factions)
    }

    /// Parses fleets into `catalog`, returning how many were added.
    pub fn parse(content: &str, catalog: &mut Catalog, factions: &FactionTable) -> LoadResult<usize> {
        let specs: Vec<FleetSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse fleet RON: {}", e))?;
        let count = specs.len();
        for spec in specs {
            let fleet = spec.into_fleet(catalog, factions)?;
            catalog.insert_fleet(fleet)?;
        }
        Ok(count)
    }
}
