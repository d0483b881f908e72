//! Gateways to the collaborators that own the board.
//!
//! The bot engine never mutates game state directly. It reads territories
//! through [`TerritoryQueries`] and issues commands through the combat,
//! fortification, reinforcement, initial-placement and game-state gateways.
//! Each trait takes `&self`; a host that serves several of them from one
//! object uses interior mutability and serializes access per game.
//!
//! [`Gateways`] bundles one reference per collaborator for a single turn.

use teg_types::{
    ArmyPlan, AttackOrder, CombatResult, FortifyOrder, GameId, PlayerId, ReinforcementStatus,
    Territory, TerritoryId, TurnPhase,
};

use crate::error::GatewayError;
use crate::telemetry::TelemetrySink;

/// Read access to the territory graph of a game.
pub trait TerritoryQueries {
    /// Territories owned by a player.
    fn owned_by(&self, game: GameId, player: PlayerId) -> Result<Vec<Territory>, GatewayError>;

    /// Territories adjacent to a territory.
    fn neighbors(&self, game: GameId, territory: TerritoryId)
    -> Result<Vec<Territory>, GatewayError>;

    /// Every territory on the board.
    fn all(&self, game: GameId) -> Result<Vec<Territory>, GatewayError>;

    /// Look up a territory by country name.
    fn by_name(&self, game: GameId, name: &str) -> Result<Option<Territory>, GatewayError>;

    /// Whether a player owns every territory of a continent. A continent
    /// with no territories on the board is never controlled.
    fn controls_continent(
        &self,
        game: GameId,
        player: PlayerId,
        continent: &str,
    ) -> Result<bool, GatewayError> {
        let mut members = self
            .all(game)?
            .into_iter()
            .filter(|t| t.continent == continent)
            .peekable();
        if members.peek().is_none() {
            return Ok(false);
        }
        Ok(members.all(|t| t.is_owned_by(player)))
    }
}

/// Attack queries and resolution.
pub trait CombatGateway {
    /// Owned territories that can currently launch an attack.
    fn attackable_territories(
        &self,
        game: GameId,
        player: PlayerId,
    ) -> Result<Vec<Territory>, GatewayError>;

    /// Enemy territories an attacker can reach.
    fn attack_targets(
        &self,
        game: GameId,
        attacker: TerritoryId,
    ) -> Result<Vec<Territory>, GatewayError>;

    /// Resolve one attack.
    fn attack(
        &self,
        game: GameId,
        player: PlayerId,
        order: AttackOrder,
    ) -> Result<CombatResult, GatewayError>;
}

/// Army movement between owned territories.
pub trait FortificationGateway {
    /// Owned territories that can send armies.
    fn fortifiable_territories(
        &self,
        game: GameId,
        player: PlayerId,
    ) -> Result<Vec<Territory>, GatewayError>;

    /// Owned territories a source can send armies to.
    fn fortify_targets(
        &self,
        game: GameId,
        player: PlayerId,
        source: TerritoryId,
    ) -> Result<Vec<Territory>, GatewayError>;

    /// Armies that may leave a territory this turn.
    fn max_movable(&self, game: GameId, territory: TerritoryId) -> Result<u32, GatewayError>;

    /// Execute a move. `Ok(false)` means the host declined it.
    fn fortify(
        &self,
        game: GameId,
        player: PlayerId,
        order: FortifyOrder,
    ) -> Result<bool, GatewayError>;
}

/// Turn-start reinforcement.
pub trait ReinforcementGateway {
    /// Whether the player may reinforce right now.
    fn can_reinforce(&self, game: GameId, player: PlayerId) -> Result<bool, GatewayError>;

    /// Reinforcement entitlement of the player.
    fn reinforcement_status(
        &self,
        game: GameId,
        player: PlayerId,
    ) -> Result<ReinforcementStatus, GatewayError>;

    /// Place a full reinforcement plan.
    fn place_reinforcements(
        &self,
        game: GameId,
        player: PlayerId,
        plan: &ArmyPlan,
    ) -> Result<(), GatewayError>;
}

/// Armies placed during the initial placement rounds.
pub trait InitialPlacementGateway {
    /// Place a full initial-placement plan.
    fn place_initial_armies(
        &self,
        game: GameId,
        player: PlayerId,
        plan: &ArmyPlan,
    ) -> Result<(), GatewayError>;
}

/// The turn-phase state machine of a game.
pub trait GameStateGateway {
    /// Move the game to a new turn phase.
    fn change_turn_phase(&self, game: GameId, phase: TurnPhase) -> Result<(), GatewayError>;
}

/// One reference per collaborator, for the duration of a turn.
#[derive(Clone, Copy)]
pub struct Gateways<'a> {
    /// Territory reads.
    pub territories: &'a dyn TerritoryQueries,
    /// Attacks.
    pub combat: &'a dyn CombatGateway,
    /// Army movement.
    pub fortification: &'a dyn FortificationGateway,
    /// Reinforcement.
    pub reinforcement: &'a dyn ReinforcementGateway,
    /// Initial placement.
    pub placement: &'a dyn InitialPlacementGateway,
    /// Turn phases.
    pub game_state: &'a dyn GameStateGateway,
    /// Telemetry.
    pub telemetry: &'a dyn TelemetrySink,
}

impl<'a> Gateways<'a> {
    /// Bundle a host that serves every collaborator itself.
    pub fn uniform<H>(host: &'a H) -> Self
    where
        H: TerritoryQueries
            + CombatGateway
            + FortificationGateway
            + ReinforcementGateway
            + InitialPlacementGateway
            + GameStateGateway
            + TelemetrySink,
    {
        Self {
            territories: host,
            combat: host,
            fortification: host,
            reinforcement: host,
            placement: host,
            game_state: host,
            telemetry: host,
        }
    }
}
