//! Combat step resolution.
//!
//! A step resolves every active weapon of one actor atomically: no other
//! actor observes a half-resolved attack. Weapons that cannot fire (no rounds,
//! no target at range, not enough stamina) are skipped without cost and the
//! remaining weapons still resolve.

use std::time::Instant;

use crate::action::{
    Action, ActionError, ActionKind, acting, base_stamina_cost, current_room, game_config,
};
use crate::config::GameConfig;
use crate::env::{Dice, GameEnv};
use crate::event::{CombatEvent, GameEvent, Outbox};
use crate::state::{Ability, ActorState, EntityId, Relocation, World};
use crate::stats::{LoadProfile, StatBlock, ability_modifier, combat_cooldown, flee_cooldown, stamina_cost};

use super::damage::{aggro_from_damage, apply_damage};
use super::death;
use super::result::resolve_attack;
use super::weapons::{
    ActiveWeapon, active_weapons, damage_bonus, hand_weights, loaded_rounds, spend_round,
};

/// Whether the actor keeps fighting after a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CombatOutcome {
    /// Opponents remain; queue another basic attack.
    Continue,
    /// Combat is over for this actor.
    Ended,
}

/// Seconds until the next basic attack with the current equipment.
pub fn attack_cooldown(world: &World, actor: &ActorState, config: &GameConfig) -> u32 {
    let weapons = active_weapons(world, actor, config);
    let (right, left) = hand_weights(&weapons);
    combat_cooldown(&load_profile(world, actor), right, left)
}

/// Seconds until a flee attempt resolves.
pub fn retreat_cooldown(world: &World, actor: &ActorState) -> u32 {
    flee_cooldown(&load_profile(world, actor))
}

fn load_profile(world: &World, actor: &ActorState) -> LoadProfile {
    LoadProfile::of(actor, &StatBlock::of(world, actor))
}

/// Resolves one basic attack step for `actor`.
pub fn basic_attack(
    world: &mut World,
    env: &GameEnv<'_>,
    actor: EntityId,
    now: Instant,
    outbox: &mut Outbox,
) -> Result<CombatOutcome, ActionError> {
    let config = game_config(env)?;
    let map = env.map()?;
    let rng = env.rng()?;

    let nonce = world.next_nonce();
    let pruned = world.prune_opponents(actor);
    if pruned > 0 {
        tracing::trace!(actor = %actor, pruned, "dropped stale opponents");
    }

    let weapons = active_weapons(world, acting(world, actor)?, config);
    if weapons.is_empty() {
        outbox.notify(actor, ActionError::NoWeapon.to_string());
    }

    let dual_wielding = weapons.len() > 1;
    let mut dice = Dice::new(rng, world.game_seed, nonce, actor);

    for weapon in &weapons {
        let attacker = acting(world, actor)?;
        let Some(origin) = attacker.location else {
            break;
        };

        if let Some(item) = weapon.item.filter(|_| weapon.is_ranged()) {
            if loaded_rounds(world, item) == 0 {
                outbox.notify(actor, format!("You need to reload {}.", weapon.name));
                continue;
            }
        }

        let target = attacker.opponents.first_within_range(|id| {
            world
                .location_of(id)
                .is_some_and(|room| map.is_at_range(origin, room, weapon.profile.range))
        });
        let Some(target) = target else {
            outbox.notify(
                actor,
                format!("You do not have opponents at range for {}.", weapon.name),
            );
            continue;
        };

        let cost = stamina_cost(&load_profile(world, attacker), Some(weapon.weight));
        if attacker.stamina() < cost {
            outbox.notify(
                actor,
                format!("You are too tired to attack with {}.", weapon.name),
            );
            continue;
        }

        let bonus = damage_bonus(weapon, weapons.len(), attacker.ability(Ability::Strength));
        let attacker_name = attacker.name.clone();
        let defender = acting(world, target)?;
        let armor_class = StatBlock::of(world, defender).armor_class;
        let target_name = defender.name.clone();
        let target_room = defender.location.unwrap_or(origin);

        outbox.push(GameEvent::Fight {
            actor,
            opponent: target,
        });
        let result = resolve_attack(&mut dice, weapon, dual_wielding, bonus, armor_class);
        tracing::trace!(
            actor = %actor,
            target = %target,
            weapon = %weapon.name,
            roll = result.roll,
            effective = result.effective,
            armor_class,
            damage = ?result.damage,
            "attack rolled"
        );
        if let Some(item) = weapon.item.filter(|_| weapon.is_ranged()) {
            spend_round(world, item);
        }

        let Some(amount) = result.damage else {
            if let Some(state) = world.actor_mut(actor) {
                state.rem_stamina(cost / 2, true);
            }
            outbox.notify(
                actor,
                format!("You miss {target_name} with {}.", weapon.name),
            );
            outbox.notify(
                target,
                format!("{attacker_name} misses you with {}.", weapon.name),
            );
            outbox.broadcast(
                target_room,
                format!("{attacker_name} misses {target_name} with {}.", weapon.name),
                [actor, target],
            );
            outbox.combat(CombatEvent::Miss {
                attacker: actor,
                target,
                weapon: weapon.item,
            });
            continue;
        };

        if let Some(state) = world.actor_mut(actor) {
            state.rem_stamina(cost, true);
        }
        let (died, max_health) = match world.actor_mut(target) {
            Some(state) => (apply_damage(state, amount), state.max_health()),
            None => continue,
        };
        outbox.combat(CombatEvent::Damage {
            attacker: actor,
            target,
            weapon: weapon.item,
            amount,
            critical: result.is_critical(),
        });

        if died {
            if let Some(state) = world.actor_mut(actor) {
                state.opponents.remove_opponent(target);
            }
            death::kill(world, config, target, Some(actor), outbox);
            continue;
        }

        announce_hit(
            outbox,
            HitReport {
                actor,
                target,
                room: target_room,
                attacker_name: &attacker_name,
                target_name: &target_name,
                weapon,
                amount,
                critical: result.is_critical(),
            },
        );
        retaliate(world, config, actor, target, aggro_from_damage(amount, max_health), now);
    }

    let attacker = acting(world, actor)?;
    if attacker.is_located() && attacker.opponents.has_opponents() {
        Ok(CombatOutcome::Continue)
    } else {
        outbox.notify(actor, "You stop fighting.");
        Ok(CombatOutcome::Ended)
    }
}

struct HitReport<'a> {
    actor: EntityId,
    target: EntityId,
    room: crate::state::RoomId,
    attacker_name: &'a str,
    target_name: &'a str,
    weapon: &'a ActiveWeapon,
    amount: u32,
    critical: bool,
}

fn announce_hit(outbox: &mut Outbox, report: HitReport<'_>) {
    let HitReport {
        actor,
        target,
        room,
        attacker_name,
        target_name,
        weapon,
        amount,
        critical,
    } = report;
    let (hit, hits) = if critical {
        ("critically hit", "critically hits")
    } else {
        ("hit", "hits")
    };
    outbox.notify(
        actor,
        format!("You {hit} {target_name} with {} for {amount}.", weapon.name),
    );
    outbox.notify(
        target,
        format!("{attacker_name} {hits} you with {} for {amount}.", weapon.name),
    );
    outbox.broadcast(
        room,
        format!("{attacker_name} {hits} {target_name} with {}.", weapon.name),
        [actor, target],
    );
}

/// The target marks the attacker and, if idle, starts fighting back.
fn retaliate(
    world: &mut World,
    config: &GameConfig,
    attacker: EntityId,
    target: EntityId,
    aggro: u32,
    now: Instant,
) {
    world.add_opponent(target, attacker, None);
    world.add_opponent(attacker, target, None);

    let cooldown = match world.actor(target) {
        Some(state) if !state.action.kind().is_combat() => attack_cooldown(world, state, config),
        Some(_) => {
            if let Some(state) = world.actor_mut(target) {
                state.opponents.add_aggro(attacker, aggro);
            }
            return;
        }
        None => return,
    };
    if let Some(state) = world.actor_mut(target) {
        state.opponents.add_aggro(attacker, aggro);
        state.action = Action::scheduled(ActionKind::basic_attack(), now, cooldown);
        tracing::debug!(actor = %target, opponent = %attacker, cooldown, "fighting back");
    }
}

/// Resolves a flee attempt for `actor`.
///
/// Failing to get away keeps the actor in combat; a successful flee ends it
/// and clears every list the actor appeared in.
pub fn flee(
    world: &mut World,
    env: &GameEnv<'_>,
    actor: EntityId,
    outbox: &mut Outbox,
) -> Result<CombatOutcome, ActionError> {
    let map = env.map()?;
    let rng = env.rng()?;

    let nonce = world.next_nonce();
    world.prune_opponents(actor);
    let mut dice = Dice::new(rng, world.game_seed, nonce, actor);

    let fleer = acting(world, actor)?;
    let origin = current_room(fleer)?;
    let attackers = u32::try_from(fleer.opponents.size()).unwrap_or(u32::MAX);
    let chance = dice
        .range(0, GameConfig::ATTACK_DIE)
        .saturating_add(ability_modifier(fleer.ability(Ability::Agility)));
    if chance < attackers {
        outbox.notify(actor, "You were not able to escape from your attackers.");
        return Ok(CombatOutcome::Continue);
    }

    let cost = base_stamina_cost(world, fleer);
    if fleer.stamina() < cost {
        outbox.notify(actor, "You are too tired to flee.");
        return Ok(CombatOutcome::Continue);
    }

    let exits = map.exits(origin);
    let Some(last) = u32::try_from(exits.len()).ok().and_then(|len| len.checked_sub(1)) else {
        outbox.notify(actor, ActionError::NoEscape.to_string());
        return Ok(CombatOutcome::Continue);
    };
    let (direction, destination) = exits[dice.range(0, last) as usize];

    let name = fleer.name.clone();
    if let Some(state) = world.actor_mut(actor) {
        state.rem_stamina(cost, true);
    }
    world
        .relocate(
            actor,
            destination,
            Relocation {
                depart: format!("{name} flees from the battlefield."),
                arrive: format!("{name} arrives fleeing."),
                self_message: "You flee from the battlefield.".to_owned(),
            },
            outbox,
        )
        .map_err(|_| ActionError::Nowhere)?;

    if let Some(state) = world.actor_mut(actor) {
        state.opponents.reset_list();
    }
    world.forget_opponent(actor);

    outbox.combat(CombatEvent::Fled {
        actor,
        from: origin,
        to: destination,
        direction,
    });
    tracing::info!(actor = %actor, from = %origin, to = %destination, %direction, "actor fled");
    Ok(CombatOutcome::Ended)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Abilities, EquipmentSlot, RoomId};
    use crate::testing::{Fixture, bow, dagger, greatsword, quiver, sword};

    fn attack(fixture: &mut Fixture, actor: EntityId) -> Result<CombatOutcome, ActionError> {
        let env = GameEnv::with_all(
            &fixture.map,
            &fixture.recipes,
            &fixture.config,
            fixture.rng.as_ref(),
        );
        basic_attack(&mut fixture.world, &env, actor, Instant::now(), &mut fixture.outbox)
    }

    fn run_flee(fixture: &mut Fixture, actor: EntityId) -> Result<CombatOutcome, ActionError> {
        let env = GameEnv::with_all(
            &fixture.map,
            &fixture.recipes,
            &fixture.config,
            fixture.rng.as_ref(),
        );
        flee(&mut fixture.world, &env, actor, &mut fixture.outbox)
    }

    fn strong() -> Abilities {
        Abilities::new(14, 10, 10, 10, 10).unwrap()
    }

    #[test]
    fn natural_twenty_with_a_two_handed_weapon_crits() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn_with("hero", strong());
        let ogre = fixture.spawn("ogre");
        fixture.wield(hero, &greatsword(), EquipmentSlot::RightHand);
        fixture.engage(hero, ogre);
        fixture.rolls([20, 7]);

        let outcome = attack(&mut fixture, hero);

        assert_eq!(outcome, Ok(CombatOutcome::Continue));
        // (7 + 2 + 1) * 2
        assert_eq!(fixture.actor(ogre).health(), 40 - 20);
        assert!(fixture
            .notes(hero)
            .contains(&"You critically hit ogre with a greatsword for 20."));
        assert!(fixture
            .notes(ogre)
            .contains(&"hero critically hits you with a greatsword for 20."));
    }

    #[test]
    fn off_hand_penalty_turns_a_ten_into_a_miss() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let rat = fixture.spawn("rat");
        fixture.wield(hero, &sword(), EquipmentSlot::RightHand);
        fixture.wield(hero, &dagger(), EquipmentSlot::LeftHand);
        fixture.engage(hero, rat);
        // right hand: 19 - 6 = 13 >= 10, damage 3; left hand: 10 - 10 = 0
        fixture.rolls([19, 3, 10]);

        attack(&mut fixture, hero).unwrap();

        let notes = fixture.notes(hero);
        assert!(notes.contains(&"You hit rat with a sword for 3."));
        assert!(notes.contains(&"You miss rat with a dagger."));
        assert_eq!(fixture.actor(rat).health(), 37);
    }

    #[test]
    fn miss_costs_half_the_stamina_of_a_hit() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let rat = fixture.spawn("rat");
        fixture.wield(hero, &sword(), EquipmentSlot::RightHand);
        fixture.engage(hero, rat);

        let actor = fixture.actor(hero);
        let cost = stamina_cost(&load_profile(&fixture.world, actor), Some(4));
        let full = actor.stamina();
        assert!(cost >= 2);

        fixture.rolls([2]);
        attack(&mut fixture, hero).unwrap();
        assert_eq!(fixture.actor(hero).stamina(), full - cost / 2);

        fixture.rolls([15, 2]);
        attack(&mut fixture, hero).unwrap();
        assert_eq!(fixture.actor(hero).stamina(), full - cost / 2 - cost);
    }

    #[test]
    fn skipped_attacks_cost_nothing() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let rat = fixture.spawn("rat");
        fixture.wield(hero, &sword(), EquipmentSlot::RightHand);
        fixture.engage(hero, rat);
        fixture.actor_mut(hero).set_stamina(0);
        fixture.rolls([]);

        attack(&mut fixture, hero).unwrap();

        assert_eq!(
            fixture.notes(hero),
            vec!["You are too tired to attack with a sword."]
        );
        assert_eq!(fixture.actor(rat).health(), 40);
    }

    #[test]
    fn melee_needs_a_target_in_the_same_room() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let rat = fixture.spawn("rat");
        fixture.wield(hero, &sword(), EquipmentSlot::RightHand);
        fixture.engage(hero, rat);
        fixture.actor_mut(rat).location = Some(RoomId(5));
        fixture.rolls([]);

        let outcome = attack(&mut fixture, hero);

        assert_eq!(outcome, Ok(CombatOutcome::Continue));
        assert_eq!(
            fixture.notes(hero),
            vec!["You do not have opponents at range for a sword."]
        );
        assert_eq!(fixture.actor(hero).stamina(), fixture.actor(hero).max_stamina());
    }

    #[test]
    fn ranged_attacks_reach_and_spend_rounds() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let deer = fixture.spawn("deer");
        let weapon = fixture.wield(hero, &bow(), EquipmentSlot::RightHand);
        fixture.engage(hero, deer);
        fixture.actor_mut(deer).location = Some(RoomId(6));

        fixture.rolls([]);
        attack(&mut fixture, hero).unwrap();
        assert_eq!(fixture.notes(hero), vec!["You need to reload a bow."]);

        let arrows = fixture.world.create_item(&quiver(3), 1);
        fixture.world.item_mut(weapon).unwrap().contents.push(arrows);
        fixture.rolls([15, 4]);
        attack(&mut fixture, hero).unwrap();

        assert_eq!(loaded_rounds(&fixture.world, weapon), 2);
        assert_eq!(fixture.actor(deer).health(), 36);
    }

    #[test]
    fn hit_makes_the_target_fight_back() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let wolf = fixture.spawn("wolf");
        fixture.wield(hero, &sword(), EquipmentSlot::RightHand);
        fixture.world.add_opponent(hero, wolf, Some(0));
        fixture.rolls([15, 4]);

        attack(&mut fixture, hero).unwrap();

        let target = fixture.actor(wolf);
        assert!(target.action.kind().is_combat());
        // 4 damage out of 40 max health
        assert_eq!(target.opponents.aggro_of(hero), Some(10));
    }

    #[test]
    fn killing_blow_leaves_a_corpse_and_ends_combat() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let rat = fixture.spawn("rat");
        fixture.wield(hero, &sword(), EquipmentSlot::RightHand);
        fixture.engage(hero, rat);
        fixture.actor_mut(rat).set_health(2);
        fixture.rolls([15, 6]);

        let outcome = attack(&mut fixture, hero);

        assert_eq!(outcome, Ok(CombatOutcome::Ended));
        assert_eq!(fixture.actor(rat).location, None);
        assert_eq!(fixture.world.ground(Fixture::START).len(), 1);
        assert!(!fixture.actor(hero).opponents.has_opponents());
        assert_eq!(fixture.notes(hero).last(), Some(&"You stop fighting."));
    }

    #[test]
    fn no_weapon_still_reports_and_continues() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let rat = fixture.spawn("rat");
        fixture.engage(hero, rat);
        fixture.rolls([]);

        let outcome = attack(&mut fixture, hero);

        assert_eq!(outcome, Ok(CombatOutcome::Continue));
        assert_eq!(
            fixture.notes(hero),
            vec!["You do not have a valid weapon equipped."]
        );
    }

    #[test]
    fn fists_add_the_strength_modifier() {
        let mut fixture = Fixture::new();
        fixture.config = GameConfig::default().with_unarmed_fallback(true);
        let hero = fixture.spawn_with("hero", strong());
        let rat = fixture.spawn("rat");
        fixture.engage(hero, rat);
        fixture.rolls([15, 3]);

        attack(&mut fixture, hero).unwrap();

        assert_eq!(fixture.actor(rat).health(), 40 - 5);
    }

    #[test]
    fn stale_opponents_are_pruned_before_attacking() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let ghost = fixture.spawn("ghost");
        fixture.wield(hero, &sword(), EquipmentSlot::RightHand);
        fixture.engage(hero, ghost);
        fixture.actor_mut(ghost).location = None;
        fixture.rolls([]);

        let outcome = attack(&mut fixture, hero);

        assert_eq!(outcome, Ok(CombatOutcome::Ended));
        assert!(!fixture.actor(hero).opponents.has_opponents());
    }

    #[test]
    fn successful_flee_leaves_the_room_and_every_list() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let rat = fixture.spawn("rat");
        fixture.engage(hero, rat);
        // chance 10 >= 1 opponent; start room 4 exits are north, south, east
        fixture.rolls([10, 2]);

        let outcome = run_flee(&mut fixture, hero);

        assert_eq!(outcome, Ok(CombatOutcome::Ended));
        assert_eq!(fixture.world.location_of(hero), Some(RoomId(5)));
        assert!(!fixture.actor(hero).opponents.has_opponents());
        assert!(!fixture.actor(rat).opponents.has_opponent(hero));
        assert_eq!(
            fixture.notes(hero).last(),
            Some(&"You flee from the battlefield.")
        );
    }

    #[test]
    fn failed_flee_keeps_fighting() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let rats: Vec<_> = (0..3).map(|i| fixture.spawn(&format!("rat{i}"))).collect();
        for rat in &rats {
            fixture.engage(hero, *rat);
        }
        fixture.rolls([2]);

        let outcome = run_flee(&mut fixture, hero);

        assert_eq!(outcome, Ok(CombatOutcome::Continue));
        assert_eq!(fixture.world.location_of(hero), Some(Fixture::START));
        assert_eq!(
            fixture.notes(hero),
            vec!["You were not able to escape from your attackers."]
        );
    }

    #[test]
    fn sealed_room_has_no_escape() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let rat = fixture.spawn("rat");
        fixture.engage(hero, rat);
        fixture.map.seal(Fixture::START);
        fixture.rolls([20]);

        let outcome = run_flee(&mut fixture, hero);

        assert_eq!(outcome, Ok(CombatOutcome::Continue));
        assert_eq!(fixture.notes(hero), vec!["There is no way of escape."]);
        assert_eq!(fixture.actor(hero).stamina(), fixture.actor(hero).max_stamina());
    }

    #[test]
    fn cooldowns_follow_the_load_formulas() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        fixture.wield(hero, &greatsword(), EquipmentSlot::RightHand);
        let actor = fixture.actor(hero);

        // 5 + lg(70) + lg(10) + lg(10) ~ 8.85
        assert_eq!(attack_cooldown(&fixture.world, actor, &fixture.config), 8);
        // 5 + lg(70) + lg(10) ~ 7.85
        assert_eq!(retreat_cooldown(&fixture.world, actor), 7);
    }
}
