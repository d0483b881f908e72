//! Scripted in-memory host shared by the bot integration tests.
//!
//! The host serves every gateway from one board, records every command it
//! receives, and can be told to fail a named operation.

#![allow(dead_code, clippy::unwrap_used)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use teg_core::{
    CombatGateway, FortificationGateway, GameStateGateway, GatewayError, InitialPlacementGateway,
    ReinforcementGateway, TelemetrySink, TerritoryQueries,
};
use teg_types::{
    ArmyPlan, AttackOrder, BotLevel, BotProfile, BotStrategy, CombatResult, EventType,
    FortifyOrder, Game, GameId, GameState, Objective, Player, PlayerColor, PlayerId,
    PlayerStatus, ReinforcementStatus, TelemetryEvent, Territory, TerritoryId, TurnPhase,
};

/// A bot seat.
pub fn bot(level: BotLevel, strategy: BotStrategy, color: PlayerColor) -> Player {
    Player {
        id: PlayerId::new(),
        display_name: format!("{level:?} {color}"),
        color,
        status: PlayerStatus::Active,
        bot_profile: Some(BotProfile {
            name: format!("{level:?}"),
            level,
            strategy,
        }),
        objective: None,
    }
}

/// A human seat.
pub fn human(color: PlayerColor) -> Player {
    Player {
        id: PlayerId::new(),
        display_name: format!("human {color}"),
        color,
        status: PlayerStatus::Active,
        bot_profile: None,
        objective: None,
    }
}

/// An objective card.
pub fn objective(kind: teg_types::ObjectiveKind) -> Objective {
    Objective {
        id: teg_types::ObjectiveId::new(),
        description: "test card".to_owned(),
        kind,
    }
}

pub struct ScriptedHost {
    game: GameId,
    board: RefCell<Vec<Territory>>,
    calls: RefCell<BTreeMap<&'static str, u32>>,
    /// Operation that fails with `Unavailable`.
    pub fail_on: Cell<Option<&'static str>>,
    /// Whether every attack conquers its target.
    pub conquer: Cell<bool>,
    /// Answer to fortify commands.
    pub accept_fortify: Cell<bool>,
    /// Answer to `can_reinforce`.
    pub may_reinforce: Cell<bool>,
    /// Armies the reinforcement status reports.
    pub reinforcements: Cell<u32>,
    /// Replaces the computed `max_movable`.
    pub max_movable: Cell<Option<u32>>,
    pub attacks: RefCell<Vec<AttackOrder>>,
    pub fortifications: RefCell<Vec<FortifyOrder>>,
    pub reinforcement_plans: RefCell<Vec<ArmyPlan>>,
    pub initial_plans: RefCell<Vec<ArmyPlan>>,
    pub phases: RefCell<Vec<TurnPhase>>,
    pub events: RefCell<Vec<TelemetryEvent>>,
}

impl Default for ScriptedHost {
    fn default() -> Self {
        Self {
            game: GameId::new(),
            board: RefCell::new(Vec::new()),
            calls: RefCell::new(BTreeMap::new()),
            fail_on: Cell::new(None),
            conquer: Cell::new(false),
            accept_fortify: Cell::new(true),
            may_reinforce: Cell::new(true),
            reinforcements: Cell::new(0),
            max_movable: Cell::new(None),
            attacks: RefCell::new(Vec::new()),
            fortifications: RefCell::new(Vec::new()),
            reinforcement_plans: RefCell::new(Vec::new()),
            initial_plans: RefCell::new(Vec::new()),
            phases: RefCell::new(Vec::new()),
            events: RefCell::new(Vec::new()),
        }
    }
}

impl ScriptedHost {
    /// The game this host serves.
    pub fn game(&self, state: GameState, players: Vec<Player>) -> Game {
        Game {
            id: self.game,
            code: "TEST".to_owned(),
            state,
            phase: TurnPhase::Reinforcement,
            turn: 3,
            players,
        }
    }

    /// Add a territory and return its id.
    pub fn territory(&self, name: &str, owner: &Player, armies: u32, continent: &str) -> TerritoryId {
        let id = TerritoryId::new();
        self.board.borrow_mut().push(Territory {
            id,
            name: name.to_owned(),
            owner: Some(owner.id),
            armies,
            continent: continent.to_owned(),
            neighbors: BTreeSet::new(),
            last_conquered_turn: None,
        });
        id
    }

    /// Make two territories adjacent.
    pub fn connect(&self, a: TerritoryId, b: TerritoryId) {
        for t in self.board.borrow_mut().iter_mut() {
            if t.id == a {
                t.neighbors.insert(b);
            } else if t.id == b {
                t.neighbors.insert(a);
            }
        }
    }

    pub fn get(&self, id: TerritoryId) -> Territory {
        self.board.borrow().iter().find(|t| t.id == id).cloned().unwrap()
    }

    /// Times an operation was invoked.
    pub fn calls(&self, op: &str) -> u32 {
        self.calls.borrow().get(op).copied().unwrap_or(0)
    }

    /// Commands that would have changed the board.
    pub fn mutations(&self) -> usize {
        [
            self.attacks.borrow().len(),
            self.fortifications.borrow().len(),
            self.reinforcement_plans.borrow().len(),
            self.initial_plans.borrow().len(),
        ]
        .iter()
        .sum()
    }

    pub fn events_of(&self, kind: EventType) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.event_type() == kind)
            .count()
    }

    pub fn event_kinds(&self) -> Vec<EventType> {
        self.events.borrow().iter().map(TelemetryEvent::event_type).collect()
    }

    fn enter(&self, game: GameId, op: &'static str) -> Result<(), GatewayError> {
        let mut calls = self.calls.borrow_mut();
        let count = calls.entry(op).or_insert(0);
        *count = count.saturating_add(1);
        drop(calls);
        if game != self.game {
            return Err(GatewayError::GameNotFound(game));
        }
        if self.fail_on.get() == Some(op) {
            return Err(GatewayError::unavailable(format!("{op} is down")));
        }
        Ok(())
    }

    fn lookup(&self, id: TerritoryId) -> Result<Territory, GatewayError> {
        self.board
            .borrow()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(GatewayError::TerritoryNotFound(id))
    }

    fn adjacent(&self, id: TerritoryId) -> Result<Vec<Territory>, GatewayError> {
        let territory = self.lookup(id)?;
        Ok(self
            .board
            .borrow()
            .iter()
            .filter(|t| territory.neighbors.contains(&t.id))
            .cloned()
            .collect())
    }

    fn owned(&self, player: PlayerId) -> Vec<Territory> {
        self.board
            .borrow()
            .iter()
            .filter(|t| t.is_owned_by(player))
            .cloned()
            .collect()
    }
}

impl TerritoryQueries for ScriptedHost {
    fn owned_by(&self, game: GameId, player: PlayerId) -> Result<Vec<Territory>, GatewayError> {
        self.enter(game, "owned_by")?;
        Ok(self.owned(player))
    }

    fn neighbors(&self, game: GameId, territory: TerritoryId) -> Result<Vec<Territory>, GatewayError> {
        self.enter(game, "neighbors")?;
        self.adjacent(territory)
    }

    fn all(&self, game: GameId) -> Result<Vec<Territory>, GatewayError> {
        self.enter(game, "all")?;
        Ok(self.board.borrow().clone())
    }

    fn by_name(&self, game: GameId, name: &str) -> Result<Option<Territory>, GatewayError> {
        self.enter(game, "by_name")?;
        Ok(self.board.borrow().iter().find(|t| t.name == name).cloned())
    }
}

impl CombatGateway for ScriptedHost {
    fn attackable_territories(&self, game: GameId, player: PlayerId) -> Result<Vec<Territory>, GatewayError> {
        self.enter(game, "attackable_territories")?;
        Ok(self.owned(player))
    }

    fn attack_targets(&self, game: GameId, attacker: TerritoryId) -> Result<Vec<Territory>, GatewayError> {
        self.enter(game, "attack_targets")?;
        let owner = self.lookup(attacker)?.owner;
        Ok(self
            .adjacent(attacker)?
            .into_iter()
            .filter(|t| t.owner != owner)
            .collect())
    }

    fn attack(&self, game: GameId, _player: PlayerId, order: AttackOrder) -> Result<CombatResult, GatewayError> {
        self.enter(game, "attack")?;
        let from = self.lookup(order.from)?;
        let to = self.lookup(order.to)?;
        self.attacks.borrow_mut().push(order);
        let conquered = self.conquer.get();
        Ok(CombatResult {
            attacker: from.id,
            defender: to.id,
            attacker_name: from.name,
            defender_name: to.name,
            conquered,
            attacker_losses: u32::from(!conquered),
            defender_losses: if conquered { to.armies } else { 0 },
        })
    }
}

impl FortificationGateway for ScriptedHost {
    fn fortifiable_territories(&self, game: GameId, player: PlayerId) -> Result<Vec<Territory>, GatewayError> {
        self.enter(game, "fortifiable_territories")?;
        Ok(self.owned(player).into_iter().filter(|t| t.armies > 1).collect())
    }

    fn fortify_targets(
        &self,
        game: GameId,
        player: PlayerId,
        source: TerritoryId,
    ) -> Result<Vec<Territory>, GatewayError> {
        self.enter(game, "fortify_targets")?;
        Ok(self
            .adjacent(source)?
            .into_iter()
            .filter(|t| t.is_owned_by(player))
            .collect())
    }

    fn max_movable(&self, game: GameId, territory: TerritoryId) -> Result<u32, GatewayError> {
        self.enter(game, "max_movable")?;
        let armies = self.lookup(territory)?.armies;
        Ok(self.max_movable.get().unwrap_or(armies.saturating_sub(1)))
    }

    fn fortify(&self, game: GameId, _player: PlayerId, order: FortifyOrder) -> Result<bool, GatewayError> {
        self.enter(game, "fortify")?;
        self.fortifications.borrow_mut().push(order);
        Ok(self.accept_fortify.get())
    }
}

impl ReinforcementGateway for ScriptedHost {
    fn can_reinforce(&self, game: GameId, _player: PlayerId) -> Result<bool, GatewayError> {
        self.enter(game, "can_reinforce")?;
        Ok(self.may_reinforce.get())
    }

    fn reinforcement_status(&self, game: GameId, _player: PlayerId) -> Result<ReinforcementStatus, GatewayError> {
        self.enter(game, "reinforcement_status")?;
        let armies = self.reinforcements.get();
        Ok(ReinforcementStatus {
            armies_to_place: armies,
            base_armies: armies,
            continent_bonus: 0,
            total_armies: armies,
            can_reinforce: self.may_reinforce.get(),
        })
    }

    fn place_reinforcements(&self, game: GameId, _player: PlayerId, plan: &ArmyPlan) -> Result<(), GatewayError> {
        self.enter(game, "place_reinforcements")?;
        self.reinforcement_plans.borrow_mut().push(plan.clone());
        Ok(())
    }
}

impl InitialPlacementGateway for ScriptedHost {
    fn place_initial_armies(&self, game: GameId, _player: PlayerId, plan: &ArmyPlan) -> Result<(), GatewayError> {
        self.enter(game, "place_initial_armies")?;
        self.initial_plans.borrow_mut().push(plan.clone());
        Ok(())
    }
}

impl GameStateGateway for ScriptedHost {
    fn change_turn_phase(&self, game: GameId, phase: TurnPhase) -> Result<(), GatewayError> {
        self.enter(game, "change_turn_phase")?;
        self.phases.borrow_mut().push(phase);
        Ok(())
    }
}

impl TelemetrySink for ScriptedHost {
    fn record(&self, event: TelemetryEvent) -> Result<(), GatewayError> {
        self.events.borrow_mut().push(event);
        Ok(())
    }
}
