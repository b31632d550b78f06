/// Body position of an actor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Posture {
    #[default]
    Stand,
    Crouch,
    Sit,
    Prone,
    Rest,
    Sleep,
}

impl Posture {
    /// Postures from which an actor can walk.
    pub const fn can_move(self) -> bool {
        matches!(self, Self::Stand | Self::Crouch | Self::Prone)
    }

    /// Scale applied to the stamina cost of a step.
    pub const fn move_stamina_factor(self) -> f64 {
        match self {
            Self::Crouch => 0.75,
            Self::Prone => 0.5,
            _ => 1.0,
        }
    }

    pub const fn health_regen_factor(self) -> u32 {
        match self {
            Self::Sit => 2,
            Self::Rest => 4,
            _ => 0,
        }
    }

    pub const fn stamina_regen_factor(self) -> u32 {
        match self {
            Self::Sit => 3,
            Self::Rest => 5,
            _ => 0,
        }
    }

    pub const fn action_description(self) -> &'static str {
        match self {
            Self::Stand => "standing",
            Self::Crouch => "crouched",
            Self::Sit => "sitting",
            Self::Prone => "lying prone",
            Self::Rest => "resting",
            Self::Sleep => "sleeping",
        }
    }
}
