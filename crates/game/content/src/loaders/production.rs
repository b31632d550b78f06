//! Production and building recipe loader.

use std::collections::BTreeSet;
use std::path::Path;

use mud_core::{Building, Production};
use serde::Deserialize;

use crate::catalog::ProductionCatalog;
use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Deserialize)]
struct ProductionFile {
    #[serde(default)]
    productions: Vec<Production>,
    #[serde(default)]
    buildings: Vec<Building>,
}

/// Loader for `(productions: [...], buildings: [...])` RON files.
pub struct ProductionLoader;

impl ProductionLoader {
    pub fn load(path: &Path) -> LoadResult<ProductionCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ProductionCatalog> {
        let file: ProductionFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse production RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for production in &file.productions {
            anyhow::ensure!(
                seen.insert(production.id),
                "Duplicate production id {} ('{}')",
                production.id.0,
                production.name
            );
            anyhow::ensure!(
                production.quantity > 0,
                "Production '{}' yields nothing",
                production.name
            );
        }

        let mut seen = BTreeSet::new();
        for building in &file.buildings {
            anyhow::ensure!(
                seen.insert(building.id),
                "Duplicate building id {} ('{}')",
                building.id.0,
                building.name
            );
        }

        tracing::debug!(
            productions = file.productions.len(),
            buildings = file.buildings.len(),
            "loaded production catalog"
        );
        Ok(ProductionCatalog::new(file.productions, file.buildings))
    }
}
