//! In-memory catalogs of item templates, productions and buildings.

use std::collections::BTreeMap;

use mud_core::{Building, BuildingId, ItemTemplate, Production, ProductionId, ProductionOracle};

/// Item templates indexed by name.
#[derive(Clone, Debug, Default)]
pub struct ItemCatalog {
    templates: BTreeMap<String, ItemTemplate>,
}

impl ItemCatalog {
    /// Later templates replace earlier ones with the same name.
    pub fn new(templates: impl IntoIterator<Item = ItemTemplate>) -> Self {
        Self {
            templates: templates
                .into_iter()
                .map(|template| (template.name.clone(), template))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ItemTemplate> {
        self.templates.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Recipe book backing [`ProductionOracle`].
#[derive(Clone, Debug, Default)]
pub struct ProductionCatalog {
    productions: BTreeMap<ProductionId, Production>,
    buildings: BTreeMap<BuildingId, Building>,
}

impl ProductionCatalog {
    pub fn new(
        productions: impl IntoIterator<Item = Production>,
        buildings: impl IntoIterator<Item = Building>,
    ) -> Self {
        Self {
            productions: productions.into_iter().map(|p| (p.id, p)).collect(),
            buildings: buildings.into_iter().map(|b| (b.id, b)).collect(),
        }
    }

    pub fn productions(&self) -> impl Iterator<Item = &Production> {
        self.productions.values()
    }

    pub fn buildings(&self) -> impl Iterator<Item = &Building> {
        self.buildings.values()
    }
}

impl ProductionOracle for ProductionCatalog {
    fn production(&self, id: ProductionId) -> Option<&Production> {
        self.productions.get(&id)
    }

    fn building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use mud_core::{ItemKind, Profession, Requirements, WeaponProfile};

    use super::*;

    #[test]
    fn items_are_found_by_name() {
        let catalog = ItemCatalog::new([
            ItemTemplate::new("dagger", 1, ItemKind::Weapon(WeaponProfile::melee(1, 4))),
            ItemTemplate::new("rope", 2, ItemKind::Misc),
            ItemTemplate::new("dagger", 2, ItemKind::Weapon(WeaponProfile::melee(2, 5))),
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("dagger").map(|t| t.weight), Some(2));
        assert!(catalog.get("sword").is_none());
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["dagger", "rope"]);
    }

    #[test]
    fn productions_and_buildings_resolve_by_id() {
        let catalog = ProductionCatalog::new(
            [Production {
                id: ProductionId(3),
                name: "spear".into(),
                profession: Profession {
                    name: "weaponsmithing".into(),
                    start: "You start carving".into(),
                    finish: "You have finished carving".into(),
                    interrupt: "You stop carving.".into(),
                },
                time: 20,
                outcome: ItemTemplate::new("spear", 3, ItemKind::Misc),
                quantity: 1,
                requirements: Requirements::default(),
            }],
            [Building {
                id: BuildingId(1),
                name: "palisade".into(),
                time: 60,
                requirements: Requirements::default(),
            }],
        );

        assert_eq!(
            catalog.production(ProductionId(3)).map(|p| p.name.as_str()),
            Some("spear")
        );
        assert!(catalog.production(ProductionId(4)).is_none());
        assert_eq!(catalog.building(BuildingId(1)).map(|b| b.time), Some(60));
        assert_eq!(catalog.buildings().count(), 1);
    }
}
