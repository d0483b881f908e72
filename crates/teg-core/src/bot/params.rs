//! Parameter tables that turn one policy into every bot tier.
//!
//! A tier is a [`TierParams`] value: attack ceilings and probability
//! thresholds per [`ObjectiveFocus`], the probability table, force sizing and
//! the reinforcement, target-selection and fortify styles. A disposition
//! shifts the attack ceiling and threshold of its tier. [`BotParams`] is the
//! resolved result for one bot profile.

use serde::Deserialize;
use teg_types::{BotLevel, BotProfile, BotStrategy, Objective, ObjectiveKind, PlayerColor};
use tracing::warn;

use crate::config::{BotsConfig, DispositionConfig, DispositionsConfig, TierOverrides};

/// Highest minimum attack probability a disposition can push a tier to.
pub const MAX_MIN_ATTACK_PROBABILITY: f64 = 0.95;

// ---------------------------------------------------------------------------
// Objective focus
// ---------------------------------------------------------------------------

/// What an objective-aware bot is steering toward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectiveFocus {
    /// No specific target: grow and hold territory.
    General,
    /// Take the listed continents.
    Occupation {
        /// Target continent names.
        continents: Vec<String>,
    },
    /// Wipe out a colour.
    Destruction {
        /// Target colour.
        color: PlayerColor,
    },
}

impl ObjectiveFocus {
    /// Focus implied by a secret objective. Common objectives, missing
    /// objectives and occupation objectives without continents all map to
    /// [`ObjectiveFocus::General`].
    pub fn from_objective(objective: Option<&Objective>) -> Self {
        match objective.map(|o| &o.kind) {
            Some(ObjectiveKind::Occupation { continents }) if continents.is_empty() => {
                warn!("occupation objective lists no continents, playing for general gain");
                Self::General
            }
            Some(ObjectiveKind::Occupation { continents }) => Self::Occupation {
                continents: continents.clone(),
            },
            Some(ObjectiveKind::Destruction { color }) => Self::Destruction { color: *color },
            Some(ObjectiveKind::Common) | None => Self::General,
        }
    }

    /// Whether this focus is a destruction objective.
    pub const fn is_destruction(&self) -> bool {
        matches!(self, Self::Destruction { .. })
    }
}

/// A value that may differ per objective focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ByFocus<T> {
    /// Common objective, or none.
    pub general: T,
    /// Occupation objective.
    pub occupation: T,
    /// Destruction objective.
    pub destruction: T,
}

impl<T: Copy> ByFocus<T> {
    /// The same value for every focus.
    pub const fn uniform(value: T) -> Self {
        Self {
            general: value,
            occupation: value,
            destruction: value,
        }
    }

    /// Value for a focus.
    pub const fn get(&self, focus: &ObjectiveFocus) -> T {
        match focus {
            ObjectiveFocus::General => self.general,
            ObjectiveFocus::Occupation { .. } => self.occupation,
            ObjectiveFocus::Destruction { .. } => self.destruction,
        }
    }

    /// Apply a function to every entry.
    pub fn map<U>(self, f: impl Fn(T) -> U) -> ByFocus<U> {
        ByFocus {
            general: f(self.general),
            occupation: f(self.occupation),
            destruction: f(self.destruction),
        }
    }
}

// ---------------------------------------------------------------------------
// Styles
// ---------------------------------------------------------------------------

/// How the success probability of an attack is estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbabilityTable {
    /// Ratio of the armies that can leave (all but one) to the defenders.
    GarrisonAdjusted,
    /// Ratio of all attacking armies to the defenders.
    RawRatio,
}

/// How many armies an attack commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceSizing {
    /// Everything but the mandatory garrison.
    AllIn,
    /// Match the defenders while keeping a reserve at home.
    Measured,
    /// Match the defenders, overcommitting under a destruction objective.
    Overkill,
}

/// Which target an attacker picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSelection {
    /// Fewest defending armies.
    Weakest,
    /// Highest weakness-and-exposure score.
    Priority,
    /// Weakest strategic target, else weakest.
    Strategic,
}

/// How reinforcement and initial placement budgets are spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReinforcementStyle {
    /// Half to the weakest border, the rest over the other borders.
    FrontLoaded,
    /// Half to the most threatened border, the rest dealt to weak borders.
    ThreatWeighted,
    /// Driven by the objective focus and its strategic targets.
    ObjectiveDriven,
}

/// How the single fortify move is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FortifyStyle {
    /// Only from a source with no enemy neighbour.
    SafeSourceOnly,
    /// Best scored source and target pair.
    Scored,
    /// Toward borders, weighted by strategic targets.
    ObjectiveDriven,
}

// ---------------------------------------------------------------------------
// Tier tables
// ---------------------------------------------------------------------------

/// Full parameter table of one tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierParams {
    /// Attacks per turn.
    pub max_attacks: ByFocus<u32>,
    /// Minimum estimated success probability for an attack.
    pub min_attack_probability: ByFocus<f64>,
    /// Probability estimate.
    pub probability_table: ProbabilityTable,
    /// Attack force sizing.
    pub force_sizing: ForceSizing,
    /// Target choice.
    pub target_selection: TargetSelection,
    /// Whether attackers are tried strongest first instead of in host order.
    pub strongest_attackers_first: bool,
    /// Reinforcement spread.
    pub reinforcement: ReinforcementStyle,
    /// Fortify move choice.
    pub fortify: FortifyStyle,
    /// Armies a fortified territory should reach.
    pub ideal_fortify_strength: u32,
    /// Armies a fortify source keeps behind.
    pub min_garrison: u32,
    /// Whether the secret objective steers decisions.
    pub objective_aware: bool,
}

impl TierParams {
    /// Greedy beginner.
    pub const fn novice() -> Self {
        Self {
            max_attacks: ByFocus::uniform(3),
            min_attack_probability: ByFocus::uniform(0.4),
            probability_table: ProbabilityTable::GarrisonAdjusted,
            force_sizing: ForceSizing::AllIn,
            target_selection: TargetSelection::Weakest,
            strongest_attackers_first: false,
            reinforcement: ReinforcementStyle::FrontLoaded,
            fortify: FortifyStyle::SafeSourceOnly,
            ideal_fortify_strength: 3,
            min_garrison: 1,
            objective_aware: false,
        }
    }

    /// Careful generalist.
    pub const fn balanced() -> Self {
        Self {
            max_attacks: ByFocus::uniform(5),
            min_attack_probability: ByFocus::uniform(0.6),
            probability_table: ProbabilityTable::GarrisonAdjusted,
            force_sizing: ForceSizing::Measured,
            target_selection: TargetSelection::Priority,
            strongest_attackers_first: false,
            reinforcement: ReinforcementStyle::ThreatWeighted,
            fortify: FortifyStyle::Scored,
            ideal_fortify_strength: 4,
            min_garrison: 2,
            objective_aware: false,
        }
    }

    /// Objective-driven planner.
    pub const fn expert() -> Self {
        Self {
            max_attacks: ByFocus {
                general: 6,
                occupation: 8,
                destruction: 10,
            },
            min_attack_probability: ByFocus {
                general: 0.55,
                occupation: 0.5,
                destruction: 0.4,
            },
            probability_table: ProbabilityTable::RawRatio,
            force_sizing: ForceSizing::Overkill,
            target_selection: TargetSelection::Strategic,
            strongest_attackers_first: true,
            reinforcement: ReinforcementStyle::ObjectiveDriven,
            fortify: FortifyStyle::ObjectiveDriven,
            ideal_fortify_strength: 4,
            min_garrison: 1,
            objective_aware: true,
        }
    }

    /// Built-in table of a tier.
    pub const fn for_level(level: BotLevel) -> Self {
        match level {
            BotLevel::Novice => Self::novice(),
            BotLevel::Balanced => Self::balanced(),
            BotLevel::Expert => Self::expert(),
        }
    }

    /// Replace the tunable numbers present in `overrides`.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &TierOverrides) -> Self {
        if let Some(max_attacks) = overrides.max_attacks {
            self.max_attacks = max_attacks;
        }
        if let Some(min_probability) = overrides.min_attack_probability {
            self.min_attack_probability = min_probability;
        }
        if let Some(ideal) = overrides.ideal_fortify_strength {
            self.ideal_fortify_strength = ideal;
        }
        if let Some(garrison) = overrides.min_garrison {
            self.min_garrison = garrison;
        }
        self
    }

    /// Shift the attack parameters by a disposition. The ceiling never drops
    /// below one attack and the threshold never exceeds
    /// [`MAX_MIN_ATTACK_PROBABILITY`].
    #[must_use]
    pub fn with_disposition(mut self, disposition: &DispositionConfig) -> Self {
        let reduction = disposition.ceiling_reduction;
        let margin = disposition.probability_margin;
        self.max_attacks = self
            .max_attacks
            .map(|ceiling| ceiling.saturating_sub(reduction).max(1));
        self.min_attack_probability = self
            .min_attack_probability
            .map(|p| (p + margin).clamp(0.0, MAX_MIN_ATTACK_PROBABILITY));
        self
    }
}

/// Resolved parameters of one bot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotParams {
    /// Skill tier.
    pub level: BotLevel,
    /// Disposition.
    pub strategy: BotStrategy,
    /// Tier table after overrides and disposition.
    pub tier: TierParams,
}

impl BotParams {
    /// Built-in parameters for a profile, with no configuration overrides.
    pub fn for_profile(profile: &BotProfile) -> Self {
        Self::resolve(profile, &BotsConfig::default(), &DispositionsConfig::default())
    }

    /// Parameters for a profile: built-in tier, then configured overrides,
    /// then the disposition shift.
    pub fn resolve(
        profile: &BotProfile,
        bots: &BotsConfig,
        dispositions: &DispositionsConfig,
    ) -> Self {
        let tier = TierParams::for_level(profile.level)
            .with_overrides(bots.for_level(profile.level))
            .with_disposition(dispositions.for_strategy(profile.strategy));
        Self {
            level: profile.level,
            strategy: profile.strategy,
            tier,
        }
    }

    /// Attack ceiling for a focus.
    pub const fn max_attacks(&self, focus: &ObjectiveFocus) -> u32 {
        self.tier.max_attacks.get(focus)
    }

    /// Attack threshold for a focus.
    pub const fn min_attack_probability(&self, focus: &ObjectiveFocus) -> f64 {
        self.tier.min_attack_probability.get(focus)
    }

    /// Focus this bot plays for, given its objective. Tiers that ignore
    /// objectives always play for general gain.
    pub fn focus_for(&self, objective: Option<&Objective>) -> ObjectiveFocus {
        if self.tier.objective_aware {
            ObjectiveFocus::from_objective(objective)
        } else {
            ObjectiveFocus::General
        }
    }
}
