//! Actor roster loader.
//!
//! A roster lists the actors a world starts with, together with the names of
//! the items they carry. Item names are resolved against the item catalog
//! when the runtime spawns the roster.

use std::path::Path;

use mud_core::{Abilities, ActorKind, ActorSpec, EquipmentSlot, Posture, RoomId};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

fn default_level() -> u32 {
    1
}

fn default_score() -> u32 {
    10
}

fn default_weight() -> u32 {
    70
}

/// One entry of `actors.ron`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActorProfile {
    pub name: String,
    #[serde(default)]
    pub kind: ActorKind,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default = "default_score")]
    pub strength: u32,
    #[serde(default = "default_score")]
    pub agility: u32,
    #[serde(default = "default_score")]
    pub perception: u32,
    #[serde(default = "default_score")]
    pub constitution: u32,
    #[serde(default = "default_score")]
    pub intelligence: u32,
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(default)]
    pub room: Option<RoomId>,
    #[serde(default)]
    pub posture: Posture,
    /// Items to carry, by catalog name.
    #[serde(default)]
    pub inventory: Vec<String>,
    /// Items to wear or wield, by catalog name.
    #[serde(default)]
    pub equipment: Vec<(EquipmentSlot, String)>,
}

impl ActorProfile {
    /// Spawn parameters for this profile. Fails on out-of-range scores.
    pub fn spec(&self) -> LoadResult<ActorSpec> {
        let abilities = Abilities::new(
            self.strength,
            self.agility,
            self.perception,
            self.constitution,
            self.intelligence,
        )
        .map_err(|e| anyhow::anyhow!("Actor '{}': {}", self.name, e))?;

        let mut spec = ActorSpec::new(self.name.clone())
            .level(self.level)
            .abilities(abilities)
            .weight(self.weight)
            .posture(self.posture);
        spec.kind = self.kind;
        spec.location = self.room;
        Ok(spec)
    }

    /// Every item name the profile refers to.
    pub fn item_names(&self) -> impl Iterator<Item = &str> {
        self.inventory
            .iter()
            .chain(self.equipment.iter().map(|(_, name)| name))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ActorFile {
    actors: Vec<ActorProfile>,
}

/// Loader for `(actors: [...])` RON files.
pub struct ActorLoader;

impl ActorLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ActorProfile>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ActorProfile>> {
        let file: ActorFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse actor roster RON: {}", e))?;

        for profile in &file.actors {
            profile.spec()?;
        }

        tracing::debug!(actors = file.actors.len(), "loaded actor roster");
        Ok(file.actors)
    }
}

#[cfg(test)]
mod tests {
    use mud_core::{Ability, World};

    use super::*;

    #[test]
    fn parses_roster_with_defaults() {
        let roster = ActorLoader::parse(
            r#"(actors: [
                (
                    name: "guard",
                    kind: Mobile,
                    level: 3,
                    strength: 16,
                    room: Some(2),
                    equipment: [(RightHand, "longsword")],
                ),
                (name: "rat", weight: 2),
            ])"#,
        )
        .unwrap();

        assert_eq!(roster.len(), 2);

        let guard = roster[0].spec().unwrap();
        assert_eq!(guard.kind, ActorKind::Mobile);
        assert_eq!(guard.level, 3);
        assert_eq!(guard.abilities.get(Ability::Strength), 16);
        assert_eq!(guard.abilities.get(Ability::Agility), 10);
        assert_eq!(guard.location, Some(RoomId(2)));
        assert_eq!(roster[0].item_names().collect::<Vec<_>>(), vec!["longsword"]);

        let rat = roster[1].spec().unwrap();
        assert_eq!(rat.kind, ActorKind::Player);
        assert_eq!(rat.weight, 2);
        assert_eq!(rat.location, None);
    }

    #[test]
    fn out_of_range_scores_are_rejected() {
        let err = ActorLoader::parse(r#"(actors: [(name: "titan", strength: 99)])"#).unwrap_err();
        assert!(err.to_string().contains("titan"));
    }

    #[test]
    fn spec_spawns_into_world() {
        let profile = ActorLoader::parse(r#"(actors: [(name: "scout", room: Some(4))])"#)
            .unwrap()
            .remove(0);
        let mut world = World::new(1);
        let id = world.spawn_actor(profile.spec().unwrap());
        assert_eq!(world.location_of(id), Some(RoomId(4)));
    }
}
