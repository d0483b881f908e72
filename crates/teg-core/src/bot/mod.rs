//! Bot policy: one configurable decision procedure for every skill tier and
//! disposition.
//!
//! The [`BotExecutor`] trait is what the host calls once per bot turn.
//! [`ConfiguredBot`] implements it for any profile by reading a resolved
//! [`BotParams`] table, and [`BotRoster`] builds executors from the loaded
//! configuration.

pub mod attack;
pub mod fortify;
pub mod frontier;
pub mod numeric;
pub mod params;
pub mod reinforce;
pub mod targets;

use teg_types::{BotLevel, BotProfile, BotStrategy, Game, Player, TerritoryId};

use crate::config::{BotsConfig, DispositionsConfig};
use crate::gateway::Gateways;
use crate::outcome::{AttackOutcome, FortifyOutcome, PlacementOutcome};
use crate::turn::{self, TurnReport};

pub use params::{BotParams, ObjectiveFocus, TierParams};

/// A bot that can play a turn.
pub trait BotExecutor {
    /// Skill tier.
    fn level(&self) -> BotLevel;

    /// Disposition.
    fn strategy(&self) -> BotStrategy;

    /// Play one full turn for `bot` in `game`, according to the game's
    /// coarse state. Never fails: faults are contained in the report.
    fn execute_turn(&self, bot: &Player, game: &Game, gateways: &Gateways<'_>) -> TurnReport;

    /// Advisory list of promising attack targets. Currently always empty.
    fn best_attack_targets(&self, bot: &Player, game: &Game) -> Vec<TerritoryId>;

    /// Advisory list of positions worth defending. Currently always empty.
    fn best_defense_positions(&self, bot: &Player, game: &Game) -> Vec<TerritoryId>;
}

/// The table-driven bot used for every profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfiguredBot {
    params: BotParams,
}

impl ConfiguredBot {
    /// A bot playing with the given parameters.
    pub const fn new(params: BotParams) -> Self {
        Self { params }
    }

    /// A bot with the built-in parameters of a profile.
    pub fn for_profile(profile: &BotProfile) -> Self {
        Self::new(BotParams::for_profile(profile))
    }

    /// Resolved parameters.
    pub const fn params(&self) -> &BotParams {
        &self.params
    }

    /// Place an initial-placement allotment.
    pub fn place_initial_armies(
        &self,
        bot: &Player,
        game: &Game,
        gateways: &Gateways<'_>,
        allotment: u32,
    ) -> PlacementOutcome {
        reinforce::place_initial_armies(&self.params, bot, game, gateways, allotment)
    }

    /// Place this turn's reinforcements.
    pub fn reinforce(&self, bot: &Player, game: &Game, gateways: &Gateways<'_>) -> PlacementOutcome {
        reinforce::reinforce(&self.params, bot, game, gateways)
    }

    /// Run the attack sequence.
    pub fn attack(&self, bot: &Player, game: &Game, gateways: &Gateways<'_>) -> AttackOutcome {
        attack::attack(&self.params, bot, game, gateways)
    }

    /// Make at most one fortify move.
    pub fn fortify(&self, bot: &Player, game: &Game, gateways: &Gateways<'_>) -> FortifyOutcome {
        fortify::fortify(&self.params, bot, game, gateways)
    }
}

impl BotExecutor for ConfiguredBot {
    fn level(&self) -> BotLevel {
        self.params.level
    }

    fn strategy(&self) -> BotStrategy {
        self.params.strategy
    }

    fn execute_turn(&self, bot: &Player, game: &Game, gateways: &Gateways<'_>) -> TurnReport {
        turn::run_turn(self, bot, game, gateways)
    }

    fn best_attack_targets(&self, _bot: &Player, _game: &Game) -> Vec<TerritoryId> {
        Vec::new()
    }

    fn best_defense_positions(&self, _bot: &Player, _game: &Game) -> Vec<TerritoryId> {
        Vec::new()
    }
}

/// Builds executors for bot profiles from the loaded configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BotRoster {
    bots: BotsConfig,
    dispositions: DispositionsConfig,
}

impl BotRoster {
    /// A roster over configured tier overrides and dispositions.
    pub const fn new(bots: BotsConfig, dispositions: DispositionsConfig) -> Self {
        Self { bots, dispositions }
    }

    /// The executor for a profile.
    pub fn executor_for(&self, profile: &BotProfile) -> ConfiguredBot {
        ConfiguredBot::new(BotParams::resolve(profile, &self.bots, &self.dispositions))
    }
}
