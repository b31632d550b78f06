//! Fighting: repeated basic attacks, or an attempt to flee.

use std::time::Instant;

use crate::combat::{CombatOutcome, attack_cooldown, basic_attack, flee, retreat_cooldown};
use crate::env::GameEnv;
use crate::event::Outbox;
use crate::state::{EntityId, World};

use super::{ActionBehavior, ActionError, ActionType, Outcome, acting, current_room, game_config};

/// The move a combat action makes when its cooldown elapses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatMove {
    BasicAttack,
    Flee,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombatAction {
    pub next_move: CombatMove,
}

impl CombatAction {
    pub fn new(next_move: CombatMove) -> Self {
        Self { next_move }
    }
}

impl ActionBehavior for CombatAction {
    fn action_type(&self) -> ActionType {
        ActionType::Fighting
    }

    fn check(&self, world: &World, env: &GameEnv<'_>, actor: EntityId) -> Result<(), ActionError> {
        let fighter = acting(world, actor)?;
        let room = current_room(fighter)?;
        if !fighter.opponents.has_opponents() {
            return Err(ActionError::NoOpponents);
        }
        if self.next_move == CombatMove::Flee && env.map()?.exits(room).is_empty() {
            return Err(ActionError::NoEscape);
        }
        Ok(())
    }

    fn cooldown(
        &self,
        world: &World,
        env: &GameEnv<'_>,
        actor: EntityId,
    ) -> Result<u32, ActionError> {
        let fighter = acting(world, actor)?;
        Ok(match self.next_move {
            CombatMove::BasicAttack => attack_cooldown(world, fighter, game_config(env)?),
            CombatMove::Flee => retreat_cooldown(world, fighter),
        })
    }

    fn stop_message(&self, _env: &GameEnv<'_>) -> String {
        "You stop fighting.".to_owned()
    }

    fn perform(
        &mut self,
        world: &mut World,
        env: &GameEnv<'_>,
        actor: EntityId,
        now: Instant,
        outbox: &mut Outbox,
    ) -> Result<Outcome, ActionError> {
        let outcome = match self.next_move {
            CombatMove::BasicAttack => basic_attack(world, env, actor, now, outbox)?,
            CombatMove::Flee => flee(world, env, actor, outbox)?,
        };
        match outcome {
            CombatOutcome::Continue => {
                self.next_move = CombatMove::BasicAttack;
                let fighter = acting(world, actor)?;
                let cooldown = attack_cooldown(world, fighter, game_config(env)?);
                Ok(Outcome::Again { cooldown })
            }
            CombatOutcome::Ended => Ok(Outcome::Finished),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::action::{Action, ActionKind, ActionStatus};
    use crate::state::{EquipmentSlot, RoomId};
    use crate::testing::{Fixture, sword};

    #[test]
    fn fighting_requires_opponents() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let attack = CombatAction::new(CombatMove::BasicAttack);
        assert_eq!(
            attack.check(&fixture.world, &fixture.env(), hero),
            Err(ActionError::NoOpponents)
        );

        let rat = fixture.spawn("rat");
        fixture.engage(hero, rat);
        assert_eq!(attack.check(&fixture.world, &fixture.env(), hero), Ok(()));
    }

    #[test]
    fn fleeing_requires_an_exit() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let rat = fixture.spawn("rat");
        fixture.engage(hero, rat);
        fixture.map.seal(Fixture::START);

        let retreat = CombatAction::new(CombatMove::Flee);
        assert_eq!(
            retreat.check(&fixture.world, &fixture.env(), hero),
            Err(ActionError::NoEscape)
        );
    }

    #[test]
    fn combat_requeues_while_opponents_remain() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let rat = fixture.spawn("rat");
        fixture.wield(hero, &sword(), EquipmentSlot::RightHand);
        fixture.engage(hero, rat);
        fixture.rolls([15, 2]);

        let now = Instant::now();
        let mut action = Action::scheduled(ActionKind::basic_attack(), now, 0);
        let status = fixture.perform(&mut action, hero, now);

        assert_eq!(status, Ok(ActionStatus::Running));
        let cooldown = attack_cooldown(&fixture.world, fixture.actor(hero), &fixture.config);
        assert_eq!(action.deadline(), now + Duration::from_secs(u64::from(cooldown)));

        // repeated before the new deadline: nothing happens
        let health = fixture.actor(rat).health();
        assert_eq!(fixture.perform(&mut action, hero, now), Ok(ActionStatus::Running));
        assert_eq!(fixture.actor(rat).health(), health);
    }

    #[test]
    fn failed_flee_falls_back_to_attacking() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let rats: Vec<_> = (0..2).map(|i| fixture.spawn(&format!("rat{i}"))).collect();
        for rat in &rats {
            fixture.engage(hero, *rat);
        }
        fixture.rolls([0]);

        let mut retreat = CombatAction::new(CombatMove::Flee);
        let outcome = fixture.run(&mut retreat, hero, Instant::now());

        assert!(matches!(outcome, Ok(Outcome::Again { .. })));
        assert_eq!(retreat.next_move, CombatMove::BasicAttack);
    }

    #[test]
    fn successful_flee_finishes() {
        let mut fixture = Fixture::new();
        let hero = fixture.spawn("hero");
        let rat = fixture.spawn("rat");
        fixture.engage(hero, rat);
        fixture.rolls([20, 0]);

        let outcome = fixture.run(&mut CombatAction::new(CombatMove::Flee), hero, Instant::now());

        assert_eq!(outcome, Ok(Outcome::Finished));
        assert_eq!(fixture.world.location_of(hero), Some(RoomId(1)));
    }

    #[test]
    fn stop_message_is_shared_by_every_move() {
        let fixture = Fixture::new();
        for next_move in [CombatMove::BasicAttack, CombatMove::Flee] {
            assert_eq!(
                CombatAction::new(next_move).stop_message(&fixture.env()),
                "You stop fighting."
            );
        }
    }
}
