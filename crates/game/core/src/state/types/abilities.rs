//! Ability scores.
//!
//! Every actor carries five abilities in `[1, 60]`. The derived numbers in
//! [`crate::stats`] never read raw scores directly; they go through the
//! modifier and log helpers defined there.

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumIter,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ability {
    Strength,
    Agility,
    Perception,
    Constitution,
    Intelligence,
}

impl Ability {
    pub const COUNT: usize = 5;

    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Agility => "AGI",
            Self::Perception => "PER",
            Self::Constitution => "CON",
            Self::Intelligence => "INT",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AbilityError {
    #[error("{ability} must be between {min} and {max}, got {value}", min = GameConfig::MIN_ABILITY, max = GameConfig::MAX_ABILITY)]
    OutOfRange { ability: Ability, value: u32 },
}

impl GameError for AbilityError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "ABILITY_OUT_OF_RANGE",
        }
    }
}

/// The five ability scores of an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Abilities {
    scores: [u32; Ability::COUNT],
}

impl Abilities {
    pub fn new(
        strength: u32,
        agility: u32,
        perception: u32,
        constitution: u32,
        intelligence: u32,
    ) -> Result<Self, AbilityError> {
        let mut abilities = Self::default();
        abilities.set(Ability::Strength, strength)?;
        abilities.set(Ability::Agility, agility)?;
        abilities.set(Ability::Perception, perception)?;
        abilities.set(Ability::Constitution, constitution)?;
        abilities.set(Ability::Intelligence, intelligence)?;
        Ok(abilities)
    }

    pub fn get(&self, ability: Ability) -> u32 {
        self.scores[ability.index()]
    }

    /// Sets a score, rejecting values outside `[1, 60]`.
    pub fn set(&mut self, ability: Ability, value: u32) -> Result<(), AbilityError> {
        if !(GameConfig::MIN_ABILITY..=GameConfig::MAX_ABILITY).contains(&value) {
            return Err(AbilityError::OutOfRange { ability, value });
        }
        self.scores[ability.index()] = value;
        Ok(())
    }

    pub fn with(mut self, ability: Ability, value: u32) -> Result<Self, AbilityError> {
        self.set(ability, value)?;
        Ok(self)
    }
}

impl Default for Abilities {
    /// Average human: every score at 10.
    fn default() -> Self {
        Self {
            scores: [10; Ability::COUNT],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_scores_outside_bounds() {
        let mut abilities = Abilities::default();
        assert!(abilities.set(Ability::Strength, 61).is_err());
        assert!(abilities.set(Ability::Strength, 0).is_err());
        assert_eq!(abilities.get(Ability::Strength), 10);

        abilities.set(Ability::Strength, 60).unwrap();
        assert_eq!(abilities.get(Ability::Strength), 60);
    }

    #[test]
    fn new_sets_every_score() {
        let abilities = Abilities::new(14, 12, 11, 16, 9).unwrap();
        assert_eq!(abilities.get(Ability::Strength), 14);
        assert_eq!(abilities.get(Ability::Agility), 12);
        assert_eq!(abilities.get(Ability::Perception), 11);
        assert_eq!(abilities.get(Ability::Constitution), 16);
        assert_eq!(abilities.get(Ability::Intelligence), 9);
    }

    #[test]
    fn error_code_is_stable() {
        let err = Abilities::new(70, 10, 10, 10, 10).unwrap_err();
        assert_eq!(err.error_code(), "ABILITY_OUT_OF_RANGE");
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }
}
