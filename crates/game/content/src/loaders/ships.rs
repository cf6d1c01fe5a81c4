//! Hull loader.

use std::path::Path;

use flight_core::{Catalog, CatalogError, Ship, ShipOutfit, ShipStats, Vec2};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file, stat_list};

/// Hull entry as written in RON files.
///
/// `turn` is given in degrees per second; everything else is in simulation
/// units. Default outfits are referenced by name.
#[derive(Debug, Clone, Deserialize)]
pub struct ShipSpec {
    pub name: String,
    pub mass: f64,
    pub thrust: f64,
    pub turn: f64,
    pub speed: f64,
    pub armour: f64,
    #[serde(default)]
    pub armour_regen: f64,
    #[serde(default)]
    pub shield: f64,
    #[serde(default)]
    pub shield_regen: f64,
    #[serde(default)]
    pub energy: f64,
    #[serde(default)]
    pub energy_regen: f64,
    #[serde(default)]
    pub fuel: u32,
    #[serde(default)]
    pub cap_cargo: u32,
    #[serde(default)]
    pub cap_weapon: u32,
    #[serde(default)]
    pub size: (f64, f64),
    #[serde(default)]
    pub stats: Vec<(String, f64)>,
    #[serde(default)]
    pub outfits: Vec<(String, u32)>,
}

impl ShipSpec {
    /// Resolves outfit references against `catalog`.
    pub fn into_ship(self, catalog: &Catalog) -> Result<Ship, CatalogError> {
        let outfits = self
            .outfits
            .iter()
            .map(|(outfit, quantity)| {
                catalog
                    .require_outfit(&self.name, outfit)
                    .map(|outfit| ShipOutfit::new(outfit, *quantity))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut stats = ShipStats::new();
        stats.apply_list(&stat_list(&self.stats));

        Ok(Ship {
            name: self.name,
            mass: self.mass,
            thrust: self.thrust,
            turn: self.turn.to_radians(),
            speed: self.speed,
            armour: self.armour,
            armour_regen: self.armour_regen,
            shield: self.shield,
            shield_regen: self.shield_regen,
            energy: self.energy,
            energy_regen: self.energy_regen,
            fuel: self.fuel,
            cap_cargo: self.cap_cargo,
            cap_weapon: self.cap_weapon,
            size: Vec2::new(self.size.0, self.size.1),
            stats,
            outfits,
        })
    }
}

/// Loader for hulls from RON files.
///
/// RON format: `Vec<ShipSpec>`. Outfits must already be in the catalog.
pub struct ShipLoader;

impl ShipLoader {
    pub fn load(path: &Path, catalog: &mut Catalog) -> LoadResult<usize> {
        let content = read_file(path)?;
        Self::parse(&content, catalog)
    }

    /// Parses hulls into `catalog`, returning how many were added.
    pub fn parse(content: &str, catalog: &mut Catalog) -> LoadResult<usize> {
        let specs: Vec<ShipSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ship RON: {}", e))?;
        if specs.is_empty() {
            return Err(CatalogError::Empty("ship").into());
        }
        let count = specs.len();
        for spec in specs {
            let ship = spec.into_ship(catalog)?;
            catalog.insert_ship(ship)?;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use flight_core::{ErrorSeverity, GameError, MapData, Outfit, OutfitKind};

    use super::*;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .insert_outfit(Outfit::new("Star Map", 0, 1, OutfitKind::Map(MapData { radius: 3 })))
            .unwrap();
        catalog
    }

    #[test]
    fn hulls_resolve_their_loadout() {
        let mut catalog = catalog();
        ShipLoader::parse(
            r#"[(
                name: "Llama",
                mass: 80.0,
                thrust: 180.0,
                turn: 90.0,
                speed: 260.0,
                armour: 60.0,
                cap_cargo: 30,
                stats: [("jump_delay", -25.0)],
                outfits: [("Star Map", 1)],
            )]"#,
            &mut catalog,
        )
        .unwrap();

        let llama = catalog.ship("Llama").unwrap();
        assert!((llama.turn - core::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(llama.cap_cargo, 30);
        assert_eq!(llama.shield, 0.0);
        assert_eq!(llama.outfits.len(), 1);
        assert_eq!(llama.outfits[0].outfit.name, "Star Map");
        assert!((llama.stats.jump_delay - 0.75).abs() < 1e-12);
    }

    #[test]
    fn unknown_outfits_fail_the_load() {
        let spec = ShipSpec {
            name: "Hyena".into(),
            mass: 30.0,
            thrust: 200.0,
            turn: 120.0,
            speed: 300.0,
            armour: 30.0,
            armour_regen: 0.0,
            shield: 0.0,
            shield_regen: 0.0,
            energy: 0.0,
            energy_regen: 0.0,
            fuel: 0,
            cap_cargo: 0,
            cap_weapon: 0,
            size: (0.0, 0.0),
            stats: Vec::new(),
            outfits: vec![("Plasma Blaster".into(), 2)],
        };
        let error = spec.into_ship(&catalog()).unwrap_err();
        assert_eq!(
            error,
            CatalogError::UnknownOutfit {
                owner: "Hyena".into(),
                name: "Plasma Blaster".into(),
            }
        );
        assert_eq!(error.severity(), ErrorSeverity::Validation);
    }
}
