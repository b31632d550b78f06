//! Crafting and building definitions.
//!
//! Recipes are content owned by the production subsystem; the engine only
//! reads them to validate orders and to know what to consume and create.

use crate::state::{ItemTemplate, ResourceKind, ToolKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ProductionId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BuildingId(pub u32);

/// Verbs a craft uses in its notifications.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Profession {
    pub name: String,
    /// e.g. "You start forging"
    pub start: String,
    /// e.g. "You have finished forging"
    pub finish: String,
    /// e.g. "You stop forging"
    pub interrupt: String,
}

/// Tools and materials a recipe needs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Requirements {
    #[cfg_attr(feature = "serde", serde(default))]
    pub tools: Vec<ToolKind>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ingredients: Vec<(ResourceKind, u32)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Production {
    pub id: ProductionId,
    pub name: String,
    pub profession: Profession,
    /// Seconds the craft takes.
    pub time: u32,
    pub outcome: ItemTemplate,
    pub quantity: u32,
    pub requirements: Requirements,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Building {
    pub id: BuildingId,
    pub name: String,
    /// Seconds the construction takes.
    pub time: u32,
    pub requirements: Requirements,
}

/// Lookup of recipe definitions.
pub trait ProductionOracle: Send + Sync {
    fn production(&self, id: ProductionId) -> Option<&Production>;
    fn building(&self, id: BuildingId) -> Option<&Building>;
}
