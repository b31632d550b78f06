//! Coarse health descriptions shown to players instead of raw numbers.

/// Health bracket by percentage of the maximum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealthCondition {
    Dying,
    AlmostDead,
    LeakingGuts,
    CoveredInBlood,
    BleedingFreely,
    NastyWounds,
    SeveralWounds,
    SomeCuts,
    FewBruises,
    SlightlyScratched,
    PerfectHealth,
}

impl HealthCondition {
    pub fn from_meter(health: u32, max_health: u32) -> Self {
        if health == 0 || max_health == 0 {
            return Self::Dying;
        }
        let percent = u64::from(health) * 100 / u64::from(max_health);
        match percent {
            100.. => Self::PerfectHealth,
            90..=99 => Self::SlightlyScratched,
            80..=89 => Self::FewBruises,
            70..=79 => Self::SomeCuts,
            60..=69 => Self::SeveralWounds,
            50..=59 => Self::NastyWounds,
            40..=49 => Self::BleedingFreely,
            30..=39 => Self::CoveredInBlood,
            20..=29 => Self::LeakingGuts,
            10..=19 => Self::AlmostDead,
            _ => Self::Dying,
        }
    }

    /// Third-person phrase, e.g. "is slightly scratched".
    pub const fn describe(self) -> &'static str {
        match self {
            Self::PerfectHealth => "is in perfect health",
            Self::SlightlyScratched => "is slightly scratched",
            Self::FewBruises => "has a few bruises",
            Self::SomeCuts => "has some cuts",
            Self::SeveralWounds => "has several wounds",
            Self::NastyWounds => "has many nasty wounds",
            Self::BleedingFreely => "is bleeding freely",
            Self::CoveredInBlood => "is covered in blood",
            Self::LeakingGuts => "is leaking guts",
            Self::AlmostDead => "is almost dead",
            Self::Dying => "is DYING",
        }
    }
}
