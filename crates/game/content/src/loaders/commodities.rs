//! Commodity loader.

use std::path::Path;

use flight_core::{Catalog, Commodity};

use crate::loaders::{LoadResult, read_file};

/// Loader for commodities from RON files.
///
/// RON format: `Vec<Commodity>`
pub struct CommodityLoader;

impl CommodityLoader {
    pub fn load(path: &Path, catalog: &mut Catalog) -> LoadResult<usize> {
        let content = read_file(path)?;
        Self::parse(&content, catalog)
    }

    /// Parses commodities into `catalog`, returning how many were added.
    pub fn parse(content: &str, catalog: &mut Catalog) -> LoadResult<usize> {
        let commodities: Vec<Commodity> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse commodity RON: {}", e))?;
        let count = commodities.len();
        for commodity in commodities {
            catalog.insert_commodity(commodity)?;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_names_and_prices() {
        let mut catalog = Catalog::new();
        let count = CommodityLoader::parse(
            r#"[(name: "Food", price: 80), (name: "Ore", price: 200)]"#,
            &mut catalog,
        )
        .unwrap();
        assert_eq!(count, 2);
        assert_eq!(catalog.commodity("Ore").unwrap().price, 200);
    }

    #[test]
    fn duplicates_are_rejected() {
        let mut catalog = Catalog::new();
        let result = CommodityLoader::parse(
            r#"[(name: "Food", price: 80), (name: "Food", price: 90)]"#,
            &mut catalog,
        );
        assert!(result.is_err());
    }
}
