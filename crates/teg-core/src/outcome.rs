//! Explicit results of each turn sub-action.
//!
//! A sub-action never returns an error to the orchestrator. It either did
//! its work, skipped it for a stated reason, or aborted on a gateway fault,
//! and says so in one of these values.

use teg_types::{ArmyPlan, CombatResult, FortifyOrder};

use crate::error::GatewayError;

/// Why a sub-action did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The host says the player may not act now.
    NotEligible,
    /// No armies to place.
    NoArmies,
    /// The player owns no territory.
    NoTerritories,
    /// No suitable source or target.
    NoCandidates,
    /// The chosen source may not send any army.
    NoMovableArmies,
    /// The computed amount was zero.
    NothingToMove,
}

/// Result of an initial placement or a reinforcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// The plan was submitted.
    Placed {
        /// The submitted plan.
        plan: ArmyPlan,
    },
    /// Nothing was submitted.
    Skipped(SkipReason),
    /// A gateway fault stopped the sub-action before submission completed.
    Aborted {
        /// The fault.
        error: GatewayError,
    },
}

impl PlacementOutcome {
    /// Armies placed (zero unless [`Placed`](Self::Placed)).
    pub fn armies_placed(&self) -> u32 {
        match self {
            Self::Placed { plan } => plan.total(),
            Self::Skipped(_) | Self::Aborted { .. } => 0,
        }
    }
}

/// Result of the attack sub-action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttackOutcome {
    /// Every attacker was considered; `attacks` may be empty.
    Completed {
        /// Resolved attacks in order.
        attacks: Vec<CombatResult>,
    },
    /// A gateway fault stopped the sequence.
    Aborted {
        /// Attacks resolved before the fault.
        attacks: Vec<CombatResult>,
        /// The fault.
        error: GatewayError,
    },
}

impl AttackOutcome {
    /// Attacks resolved this turn.
    pub fn attacks(&self) -> &[CombatResult] {
        match self {
            Self::Completed { attacks } | Self::Aborted { attacks, .. } => attacks,
        }
    }

    /// Territories conquered this turn.
    pub fn conquests(&self) -> usize {
        self.attacks().iter().filter(|a| a.conquered).count()
    }
}

/// Result of the fortify sub-action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FortifyOutcome {
    /// The move was executed.
    Moved(FortifyOrder),
    /// No move was submitted.
    Skipped(SkipReason),
    /// The host declined the move.
    Rejected(FortifyOrder),
    /// A gateway fault stopped the sub-action.
    Aborted {
        /// The fault.
        error: GatewayError,
    },
}
