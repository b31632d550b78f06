//! Item catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use mud_core::{ItemKind, ItemTemplate};
use serde::Deserialize;

use crate::catalog::ItemCatalog;
use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Deserialize)]
struct ItemFile {
    items: Vec<ItemTemplate>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses `(items: [...])`, rejecting duplicate names and impossible
    /// numbers.
    pub fn parse(content: &str) -> LoadResult<ItemCatalog> {
        let file: ItemFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut names = BTreeSet::new();
        for template in &file.items {
            anyhow::ensure!(
                names.insert(template.name.as_str()),
                "Duplicate item '{}' in catalog",
                template.name
            );
            validate(template)?;
        }

        tracing::debug!(items = file.items.len(), "loaded item catalog");
        Ok(ItemCatalog::new(file.items))
    }
}

fn validate(template: &ItemTemplate) -> LoadResult<()> {
    match &template.kind {
        ItemKind::Weapon(profile) => {
            anyhow::ensure!(
                profile.min_damage <= profile.max_damage,
                "Weapon '{}' has min_damage {} above max_damage {}",
                template.name,
                profile.min_damage,
                profile.max_damage
            );
            anyhow::ensure!(
                profile.is_ranged() || profile.range == 0,
                "Melee weapon '{}' cannot have range {}",
                template.name,
                profile.range
            );
        }
        ItemKind::Magazine {
            rounds, capacity, ..
        } => {
            anyhow::ensure!(
                rounds <= capacity,
                "Magazine '{}' holds {} rounds but capacity is {}",
                template.name,
                rounds,
                capacity
            );
        }
        _ => {}
    }
    Ok(())
}
