//! Commands a bot submits to the host and the results it gets back.
//!
//! [`ArmyPlan`] carries initial placements and reinforcements, [`AttackOrder`]
//! and [`FortifyOrder`] carry single moves. [`CombatResult`] and
//! [`ReinforcementStatus`] are produced by the host.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::TerritoryId;

/// Armies to place, per territory.
///
/// Entries are strictly positive: adding zero armies is a no-op, so a plan
/// never mentions a territory it leaves untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ArmyPlan {
    placements: BTreeMap<TerritoryId, u32>,
}

impl ArmyPlan {
    /// An empty plan.
    pub const fn new() -> Self {
        Self {
            placements: BTreeMap::new(),
        }
    }

    /// Add armies to a territory, accumulating with earlier additions.
    pub fn add(&mut self, territory: TerritoryId, armies: u32) {
        if armies == 0 {
            return;
        }
        let slot = self.placements.entry(territory).or_insert(0);
        *slot = slot.saturating_add(armies);
    }

    /// Armies planned for a territory (zero when absent).
    pub fn get(&self, territory: TerritoryId) -> u32 {
        self.placements.get(&territory).copied().unwrap_or(0)
    }

    /// Sum of all placements.
    pub fn total(&self) -> u32 {
        self.placements
            .values()
            .fold(0_u32, |acc, armies| acc.saturating_add(*armies))
    }

    /// Number of territories receiving armies.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether the plan places nothing.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Iterate over `(territory, armies)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (TerritoryId, u32)> + '_ {
        self.placements.iter().map(|(id, armies)| (*id, *armies))
    }
}

/// A single attack from one owned territory into an adjacent enemy one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AttackOrder {
    /// Attacking territory.
    pub from: TerritoryId,
    /// Defending territory.
    pub to: TerritoryId,
    /// Armies committed to the attack.
    pub armies: u32,
}

/// Outcome of one resolved attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CombatResult {
    /// Attacking territory.
    pub attacker: TerritoryId,
    /// Defending territory.
    pub defender: TerritoryId,
    /// Attacking territory name.
    pub attacker_name: String,
    /// Defending territory name.
    pub defender_name: String,
    /// Whether the defender changed hands.
    pub conquered: bool,
    /// Armies lost by the attacker.
    pub attacker_losses: u32,
    /// Armies lost by the defender.
    pub defender_losses: u32,
}

/// A single army movement between two owned territories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FortifyOrder {
    /// Source territory.
    pub from: TerritoryId,
    /// Destination territory.
    pub to: TerritoryId,
    /// Armies moved.
    pub armies: u32,
}

/// Reinforcement entitlement of a player at the start of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ReinforcementStatus {
    /// Armies still to be placed this turn.
    pub armies_to_place: u32,
    /// Armies earned from territory count.
    pub base_armies: u32,
    /// Armies earned from fully held continents.
    pub continent_bonus: u32,
    /// `base_armies + continent_bonus`.
    pub total_armies: u32,
    /// Whether the player may reinforce right now.
    pub can_reinforce: bool,
}
