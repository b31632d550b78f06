//! In-memory oracles and a world fixture for unit tests.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use crate::action::{Action, ActionBehavior, ActionError, ActionStatus, Outcome};
use crate::config::GameConfig;
use crate::env::{
    Building, BuildingId, GameEnv, MapOracle, PcgRng, Production, ProductionId, ProductionOracle,
    Profession, Requirements, RngOracle, ScriptedRng,
};
use crate::event::Outbox;
use crate::state::{
    Abilities, ActorSpec, ActorState, AmmoKind, Direction, EntityId, EquipmentSlot, ItemFlags,
    ItemId, ItemKind, ItemTemplate, ResourceKind, RoomId, ToolKind, WeaponProfile, World,
};

/// A `WIDTH` x `HEIGHT` grid of rooms numbered row by row from 1.
///
/// Range is the Manhattan distance between rooms. Sealed rooms have no exits.
#[derive(Default)]
pub(crate) struct GridMap {
    sealed: BTreeSet<RoomId>,
}

impl GridMap {
    pub(crate) const WIDTH: u32 = 3;
    pub(crate) const HEIGHT: u32 = 3;

    pub(crate) fn seal(&mut self, room: RoomId) {
        self.sealed.insert(room);
    }

    fn coords(room: RoomId) -> Option<(u32, u32)> {
        let index = room.0.checked_sub(1)?;
        (index < Self::WIDTH * Self::HEIGHT).then(|| (index % Self::WIDTH, index / Self::WIDTH))
    }

    fn room_at(x: u32, y: u32) -> RoomId {
        RoomId(y * Self::WIDTH + x + 1)
    }
}

impl MapOracle for GridMap {
    fn exit(&self, room: RoomId, direction: Direction) -> Option<RoomId> {
        if self.sealed.contains(&room) {
            return None;
        }
        let (x, y) = Self::coords(room)?;
        let (x, y) = match direction {
            Direction::North => (x, y.checked_sub(1)?),
            Direction::South => (x, y + 1),
            Direction::East => (x + 1, y),
            Direction::West => (x.checked_sub(1)?, y),
            Direction::Up | Direction::Down => return None,
        };
        (x < Self::WIDTH && y < Self::HEIGHT).then(|| Self::room_at(x, y))
    }

    fn is_at_range(&self, origin: RoomId, target: RoomId, range: u32) -> bool {
        match (Self::coords(origin), Self::coords(target)) {
            (Some((ox, oy)), Some((tx, ty))) => ox.abs_diff(tx) + oy.abs_diff(ty) <= range,
            _ => false,
        }
    }
}

pub(crate) struct Recipes {
    productions: BTreeMap<ProductionId, Production>,
    buildings: BTreeMap<BuildingId, Building>,
}

impl Recipes {
    pub(crate) const PLANKS: ProductionId = ProductionId(1);
    pub(crate) const HUT: BuildingId = BuildingId(1);
}

impl Default for Recipes {
    fn default() -> Self {
        let planks = Production {
            id: Self::PLANKS,
            name: "planks".into(),
            profession: Profession {
                name: "carpentry".into(),
                start: "You start sawing".into(),
                finish: "You have finished sawing".into(),
                interrupt: "You stop sawing.".into(),
            },
            time: 4,
            outcome: ItemTemplate::new("plank", 2, ItemKind::Misc),
            quantity: 2,
            requirements: Requirements {
                tools: vec![ToolKind::Saw],
                ingredients: vec![(ResourceKind::Wood, 2)],
            },
        };
        let hut = Building {
            id: Self::HUT,
            name: "hut".into(),
            time: 10,
            requirements: Requirements {
                tools: vec![ToolKind::Hammer],
                ingredients: vec![(ResourceKind::Wood, 3)],
            },
        };
        Self {
            productions: BTreeMap::from([(planks.id, planks)]),
            buildings: BTreeMap::from([(hut.id, hut)]),
        }
    }
}

impl ProductionOracle for Recipes {
    fn production(&self, id: ProductionId) -> Option<&Production> {
        self.productions.get(&id)
    }

    fn building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.get(&id)
    }
}

pub(crate) fn sword() -> ItemTemplate {
    ItemTemplate::new("a sword", 4, ItemKind::Weapon(WeaponProfile::melee(2, 6)))
}

pub(crate) fn dagger() -> ItemTemplate {
    ItemTemplate::new("a dagger", 1, ItemKind::Weapon(WeaponProfile::melee(1, 4)))
}

pub(crate) fn greatsword() -> ItemTemplate {
    ItemTemplate::new("a greatsword", 10, ItemKind::Weapon(WeaponProfile::melee(5, 10)))
        .with_flags(ItemFlags::TWO_HANDED)
}

pub(crate) fn bow() -> ItemTemplate {
    ItemTemplate::new(
        "a bow",
        2,
        ItemKind::Weapon(WeaponProfile::ranged(2, 5, 2, AmmoKind::Arrow)),
    )
}

pub(crate) fn quiver(rounds: u32) -> ItemTemplate {
    ItemTemplate::new(
        "a quiver",
        1,
        ItemKind::Magazine {
            ammo: AmmoKind::Arrow,
            rounds,
            capacity: 12,
        },
    )
}

pub(crate) fn tool(kind: ToolKind) -> ItemTemplate {
    ItemTemplate::new(kind.to_string(), 2, ItemKind::Tool(kind))
}

pub(crate) fn wood() -> ItemTemplate {
    ItemTemplate::new("wood", 1, ItemKind::Resource(ResourceKind::Wood))
        .with_flags(ItemFlags::STACKABLE)
}

pub(crate) struct Fixture {
    pub(crate) world: World,
    pub(crate) map: GridMap,
    pub(crate) recipes: Recipes,
    pub(crate) config: GameConfig,
    pub(crate) rng: Box<dyn RngOracle>,
    pub(crate) outbox: Outbox,
}

impl Fixture {
    /// Middle row, west edge of the grid.
    pub(crate) const START: RoomId = RoomId(4);

    pub(crate) fn new() -> Self {
        Self {
            world: World::new(7),
            map: GridMap::default(),
            recipes: Recipes::default(),
            config: GameConfig::default(),
            rng: Box::new(PcgRng),
            outbox: Outbox::default(),
        }
    }

    /// Replaces the RNG with a fixed sequence of rolls.
    pub(crate) fn rolls(&mut self, rolls: impl IntoIterator<Item = u32>) {
        self.rng = Box::new(ScriptedRng::new(rolls));
    }

    pub(crate) fn env(&self) -> GameEnv<'_> {
        GameEnv::with_all(&self.map, &self.recipes, &self.config, self.rng.as_ref())
    }

    pub(crate) fn spawn(&mut self, name: &str) -> EntityId {
        self.world.spawn_actor(ActorSpec::new(name).at(Self::START))
    }

    pub(crate) fn spawn_with(&mut self, name: &str, abilities: Abilities) -> EntityId {
        self.world
            .spawn_actor(ActorSpec::new(name).abilities(abilities).at(Self::START))
    }

    pub(crate) fn actor(&self, id: EntityId) -> &ActorState {
        self.world.actor(id).expect("actor exists")
    }

    pub(crate) fn actor_mut(&mut self, id: EntityId) -> &mut ActorState {
        self.world.actor_mut(id).expect("actor exists")
    }

    pub(crate) fn give(&mut self, actor: EntityId, template: &ItemTemplate, quantity: u32) -> ItemId {
        let item = self.world.create_item(template, quantity);
        self.world.give(actor, item).expect("give item");
        item
    }

    pub(crate) fn wield(
        &mut self,
        actor: EntityId,
        template: &ItemTemplate,
        slot: EquipmentSlot,
    ) -> ItemId {
        let item = self.give(actor, template, 1);
        self.world.equip(actor, item, slot).expect("equip item");
        item
    }

    /// Makes two actors opponents of each other.
    pub(crate) fn engage(&mut self, a: EntityId, b: EntityId) {
        self.world.add_opponent(a, b, None);
        self.world.add_opponent(b, a, None);
    }

    pub(crate) fn perform(
        &mut self,
        action: &mut Action,
        actor: EntityId,
        now: Instant,
    ) -> Result<ActionStatus, ActionError> {
        let env = GameEnv::with_all(&self.map, &self.recipes, &self.config, self.rng.as_ref());
        action.perform(&mut self.world, &env, actor, now, &mut self.outbox)
    }

    /// Performs a bare action kind regardless of any deadline.
    pub(crate) fn run(
        &mut self,
        behavior: &mut dyn ActionBehavior,
        actor: EntityId,
        now: Instant,
    ) -> Result<Outcome, ActionError> {
        let env = GameEnv::with_all(&self.map, &self.recipes, &self.config, self.rng.as_ref());
        behavior.perform(&mut self.world, &env, actor, now, &mut self.outbox)
    }

    pub(crate) fn notes(&self, actor: EntityId) -> Vec<&str> {
        self.outbox.notifications_for(actor)
    }
}
