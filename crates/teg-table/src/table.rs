//! A single-threaded game table that serves every bot-engine gateway.
//!
//! [`Table`] owns the board, the game snapshot, a seeded RNG for dealing and
//! dice, and the telemetry log. Gateways take `&self`, so the mutable parts
//! live behind `RefCell`s; no borrow is held across a call into another
//! gateway method.
//!
//! # Rules enforced
//!
//! - Reinforcement: `max(3, owned / 2)` plus the bonus of every fully held
//!   continent, once per turn, only during the `Reinforcement` phase.
//! - Initial placement: at most the round's allotment, on owned territories.
//! - Attack: from an owned territory to an adjacent enemy one, leaving at
//!   least one army behind. A conquest moves the surviving force in.
//! - Fortify: one move per turn between adjacent owned territories, leaving
//!   at least one army behind. A second move in the same turn is declined.
//!
//! Commands that break a rule fail with [`GatewayError::Rejected`].

use std::cell::RefCell;
use std::collections::BTreeSet;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use teg_core::{
    CombatGateway, FortificationGateway, GameStateGateway, GatewayError, InitialPlacementGateway,
    ReinforcementGateway, TelemetrySink, TerritoryQueries,
};
use teg_types::{
    ArmyPlan, AttackOrder, CombatResult, FortifyOrder, Game, GameId, GameState, PlayerId,
    PlayerStatus, ReinforcementStatus, TelemetryEvent, TelemetryRecord, Territory, TerritoryId,
    TurnPhase,
};
use tracing::{debug, info};

use crate::board::Board;
use crate::dice;
use crate::error::TableError;

/// Reinforcements a player receives no matter how little they hold.
pub const MIN_REINFORCEMENTS: u32 = 3;

/// An in-memory game table.
#[derive(Debug)]
pub struct Table {
    board: RefCell<Board>,
    game: RefCell<Game>,
    rng: RefCell<SmallRng>,
    telemetry: RefCell<Vec<TelemetryRecord>>,
    reinforced: RefCell<BTreeSet<PlayerId>>,
    fortified: RefCell<BTreeSet<PlayerId>>,
}

impl Table {
    /// Seat a game at a board. `seed` drives dealing and dice.
    pub fn new(board: Board, game: Game, seed: u64) -> Self {
        Self {
            board: RefCell::new(board),
            game: RefCell::new(game),
            rng: RefCell::new(SmallRng::seed_from_u64(seed)),
            telemetry: RefCell::new(Vec::new()),
            reinforced: RefCell::new(BTreeSet::new()),
            fortified: RefCell::new(BTreeSet::new()),
        }
    }

    // -------------------------------------------------------------------
    // Table management
    // -------------------------------------------------------------------

    /// Snapshot of the game.
    pub fn game(&self) -> Game {
        self.game.borrow().clone()
    }

    /// Modify the game.
    pub fn update_game<R>(&self, f: impl FnOnce(&mut Game, &mut SmallRng) -> R) -> R {
        f(&mut self.game.borrow_mut(), &mut self.rng.borrow_mut())
    }

    /// Read the board.
    pub fn with_board<R>(&self, f: impl FnOnce(&Board) -> R) -> R {
        f(&self.board.borrow())
    }

    /// Every telemetry record so far.
    pub fn telemetry(&self) -> Vec<TelemetryRecord> {
        self.telemetry.borrow().clone()
    }

    /// Shuffle the territories and deal them round-robin to the active
    /// players, one army each.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::NoPlayers`] when no active player is seated.
    pub fn deal_territories(&self) -> Result<(), TableError> {
        let seats: Vec<PlayerId> = self
            .game
            .borrow()
            .players
            .iter()
            .filter(|p| p.is_active())
            .map(|p| p.id)
            .collect();
        if seats.is_empty() {
            return Err(TableError::NoPlayers);
        }

        let mut order = self.board.borrow().territory_ids().to_vec();
        order.shuffle(&mut *self.rng.borrow_mut());

        let mut board = self.board.borrow_mut();
        for (id, owner) in order.iter().zip(seats.iter().cycle()) {
            if let Some(territory) = board.get_mut(*id) {
                territory.owner = Some(*owner);
                territory.armies = 1;
            }
        }
        info!(
            territories = order.len(),
            players = seats.len(),
            "territories dealt"
        );
        Ok(())
    }

    /// Move the game to a new coarse state.
    pub fn set_state(&self, state: GameState) {
        let mut game = self.game.borrow_mut();
        debug!(game = %game.id, from = ?game.state, to = ?state, "game state changed");
        game.state = state;
    }

    /// Start turn `turn`: phase back to `Reinforcement`, per-turn limits reset.
    pub fn begin_turn(&self, turn: u32) {
        {
            let mut game = self.game.borrow_mut();
            game.turn = turn;
            game.phase = TurnPhase::Reinforcement;
        }
        self.reinforced.borrow_mut().clear();
        self.fortified.borrow_mut().clear();
    }

    // -------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------

    fn check_game(&self, game: GameId) -> Result<(), GatewayError> {
        if self.game.borrow().id == game {
            Ok(())
        } else {
            Err(GatewayError::GameNotFound(game))
        }
    }

    fn territory(&self, id: TerritoryId) -> Result<Territory, GatewayError> {
        self.board
            .borrow()
            .get(id)
            .cloned()
            .ok_or(GatewayError::TerritoryNotFound(id))
    }

    fn owned_territory(&self, player: PlayerId, id: TerritoryId) -> Result<Territory, GatewayError> {
        let territory = self.territory(id)?;
        if territory.is_owned_by(player) {
            Ok(territory)
        } else {
            Err(GatewayError::rejected(format!(
                "{} does not belong to the player",
                territory.name
            )))
        }
    }

    fn owned(&self, player: PlayerId) -> Vec<Territory> {
        self.board
            .borrow()
            .owned_by(player)
            .into_iter()
            .cloned()
            .collect()
    }

    fn has_neighbor(&self, territory: &Territory, owned: bool) -> bool {
        let board = self.board.borrow();
        territory.neighbors.iter().any(|id| {
            board
                .get(*id)
                .is_some_and(|n| n.owner.is_some() && (n.owner == territory.owner) == owned)
        })
    }

    fn is_active(&self, player: PlayerId) -> Result<bool, GatewayError> {
        self.game
            .borrow()
            .player(player)
            .map(|p| p.is_active())
            .ok_or(GatewayError::PlayerNotFound(player))
    }

    fn validate_plan(&self, player: PlayerId, plan: &ArmyPlan) -> Result<(), GatewayError> {
        for (id, _) in plan.iter() {
            self.owned_territory(player, id)?;
        }
        Ok(())
    }

    fn apply_plan(&self, plan: &ArmyPlan) {
        let mut board = self.board.borrow_mut();
        for (id, armies) in plan.iter() {
            if let Some(territory) = board.get_mut(id) {
                territory.armies = territory.armies.saturating_add(armies);
            }
        }
    }

    fn eliminate_if_empty(&self, player: PlayerId) {
        if !self.board.borrow().owned_by(player).is_empty() {
            return;
        }
        let mut game = self.game.borrow_mut();
        let game_id = game.id;
        if let Some(p) = game.players.iter_mut().find(|p| p.id == player) {
            p.status = PlayerStatus::Eliminated;
            info!(game = %game_id, %player, name = %p.display_name, "player eliminated");
        }
    }
}

// ---------------------------------------------------------------------------
// Territory reads
// ---------------------------------------------------------------------------

impl TerritoryQueries for Table {
    fn owned_by(&self, game: GameId, player: PlayerId) -> Result<Vec<Territory>, GatewayError> {
        self.check_game(game)?;
        Ok(self.owned(player))
    }

    fn neighbors(
        &self,
        game: GameId,
        territory: TerritoryId,
    ) -> Result<Vec<Territory>, GatewayError> {
        self.check_game(game)?;
        let board = self.board.borrow();
        if board.get(territory).is_none() {
            return Err(GatewayError::TerritoryNotFound(territory));
        }
        Ok(board.neighbors(territory).into_iter().cloned().collect())
    }

    fn all(&self, game: GameId) -> Result<Vec<Territory>, GatewayError> {
        self.check_game(game)?;
        Ok(self.board.borrow().territories().cloned().collect())
    }

    fn by_name(&self, game: GameId, name: &str) -> Result<Option<Territory>, GatewayError> {
        self.check_game(game)?;
        let board = self.board.borrow();
        Ok(board.id_of(name).and_then(|id| board.get(id)).cloned())
    }
}

// ---------------------------------------------------------------------------
// Combat
// ---------------------------------------------------------------------------

impl CombatGateway for Table {
    fn attackable_territories(
        &self,
        game: GameId,
        player: PlayerId,
    ) -> Result<Vec<Territory>, GatewayError> {
        self.check_game(game)?;
        Ok(self
            .owned(player)
            .into_iter()
            .filter(|t| t.can_attack() && self.has_neighbor(t, false))
            .collect())
    }

    fn attack_targets(
        &self,
        game: GameId,
        attacker: TerritoryId,
    ) -> Result<Vec<Territory>, GatewayError> {
        self.check_game(game)?;
        let source = self.territory(attacker)?;
        let board = self.board.borrow();
        Ok(board
            .neighbors(attacker)
            .into_iter()
            .filter(|t| t.owner != source.owner)
            .cloned()
            .collect())
    }

    fn attack(
        &self,
        game: GameId,
        player: PlayerId,
        order: AttackOrder,
    ) -> Result<CombatResult, GatewayError> {
        self.check_game(game)?;
        let from = self.owned_territory(player, order.from)?;
        let to = self.territory(order.to)?;
        if !from.neighbors.contains(&to.id) {
            return Err(GatewayError::rejected(format!(
                "{} does not border {}",
                from.name, to.name
            )));
        }
        if to.is_owned_by(player) {
            return Err(GatewayError::rejected(format!(
                "{} already belongs to the attacker",
                to.name
            )));
        }
        if order.armies == 0 || order.armies > from.movable_armies() {
            return Err(GatewayError::rejected(format!(
                "cannot attack with {} of {} armies",
                order.armies, from.armies
            )));
        }

        let losses = {
            let mut rng = self.rng.borrow_mut();
            let attack = dice::roll(&mut *rng, order.armies);
            let defence = dice::roll(&mut *rng, to.armies);
            dice::resolve(&attack, &defence)
        };
        let turn = self.game.borrow().turn;
        let remaining_defenders = to.armies.saturating_sub(losses.defender);
        let conquered = remaining_defenders == 0;
        {
            let mut board = self.board.borrow_mut();
            let left_behind = from.armies.saturating_sub(losses.attacker);
            let moving = if conquered {
                order
                    .armies
                    .saturating_sub(losses.attacker)
                    .min(left_behind.saturating_sub(1))
            } else {
                0
            };
            if let Some(source) = board.get_mut(from.id) {
                source.armies = left_behind.saturating_sub(moving);
            }
            if let Some(target) = board.get_mut(to.id) {
                target.armies = if conquered { moving } else { remaining_defenders };
                if conquered {
                    target.owner = Some(player);
                    target.last_conquered_turn = Some(turn);
                }
            }
        }
        debug!(
            from = %from.name,
            to = %to.name,
            armies = order.armies,
            attacker_losses = losses.attacker,
            defender_losses = losses.defender,
            conquered,
            "battle resolved"
        );
        if conquered {
            if let Some(previous) = to.owner {
                self.eliminate_if_empty(previous);
            }
        }

        Ok(CombatResult {
            attacker: from.id,
            defender: to.id,
            attacker_name: from.name,
            defender_name: to.name,
            conquered,
            attacker_losses: losses.attacker,
            defender_losses: losses.defender,
        })
    }
}

// ---------------------------------------------------------------------------
// Fortification
// ---------------------------------------------------------------------------

impl FortificationGateway for Table {
    fn fortifiable_territories(
        &self,
        game: GameId,
        player: PlayerId,
    ) -> Result<Vec<Territory>, GatewayError> {
        self.check_game(game)?;
        Ok(self
            .owned(player)
            .into_iter()
            .filter(|t| t.movable_armies() > 0 && self.has_neighbor(t, true))
            .collect())
    }

    fn fortify_targets(
        &self,
        game: GameId,
        player: PlayerId,
        source: TerritoryId,
    ) -> Result<Vec<Territory>, GatewayError> {
        self.check_game(game)?;
        self.owned_territory(player, source)?;
        let board = self.board.borrow();
        Ok(board
            .neighbors(source)
            .into_iter()
            .filter(|t| t.is_owned_by(player))
            .cloned()
            .collect())
    }

    fn max_movable(&self, game: GameId, territory: TerritoryId) -> Result<u32, GatewayError> {
        self.check_game(game)?;
        Ok(self.territory(territory)?.movable_armies())
    }

    fn fortify(
        &self,
        game: GameId,
        player: PlayerId,
        order: FortifyOrder,
    ) -> Result<bool, GatewayError> {
        self.check_game(game)?;
        if self.fortified.borrow().contains(&player) {
            debug!(%player, "already fortified this turn");
            return Ok(false);
        }
        let from = self.owned_territory(player, order.from)?;
        let to = self.owned_territory(player, order.to)?;
        if !from.neighbors.contains(&to.id) {
            return Err(GatewayError::rejected(format!(
                "{} does not border {}",
                from.name, to.name
            )));
        }
        if order.armies == 0 || order.armies > from.movable_armies() {
            return Err(GatewayError::rejected(format!(
                "cannot move {} of {} armies",
                order.armies, from.armies
            )));
        }
        {
            let mut board = self.board.borrow_mut();
            if let Some(source) = board.get_mut(from.id) {
                source.armies = source.armies.saturating_sub(order.armies);
            }
            if let Some(target) = board.get_mut(to.id) {
                target.armies = target.armies.saturating_add(order.armies);
            }
        }
        self.fortified.borrow_mut().insert(player);
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Reinforcement and initial placement
// ---------------------------------------------------------------------------

impl ReinforcementGateway for Table {
    fn can_reinforce(&self, game: GameId, player: PlayerId) -> Result<bool, GatewayError> {
        self.check_game(game)?;
        let active = self.is_active(player)?;
        Ok(active && self.game.borrow().phase == TurnPhase::Reinforcement)
    }

    fn reinforcement_status(
        &self,
        game: GameId,
        player: PlayerId,
    ) -> Result<ReinforcementStatus, GatewayError> {
        let can_reinforce = self.can_reinforce(game, player)?;
        let (base_armies, continent_bonus) = {
            let board = self.board.borrow();
            let held = u32::try_from(board.owned_by(player).len()).unwrap_or(u32::MAX);
            let bonus = board
                .controlled_continents(player)
                .iter()
                .fold(0_u32, |acc, c| acc.saturating_add(c.bonus));
            ((held / 2).max(MIN_REINFORCEMENTS), bonus)
        };
        let total_armies = base_armies.saturating_add(continent_bonus);
        let armies_to_place = if self.reinforced.borrow().contains(&player) {
            0
        } else {
            total_armies
        };
        Ok(ReinforcementStatus {
            armies_to_place,
            base_armies,
            continent_bonus,
            total_armies,
            can_reinforce,
        })
    }

    fn place_reinforcements(
        &self,
        game: GameId,
        player: PlayerId,
        plan: &ArmyPlan,
    ) -> Result<(), GatewayError> {
        let status = self.reinforcement_status(game, player)?;
        if !status.can_reinforce {
            return Err(GatewayError::rejected("not in the reinforcement phase"));
        }
        if plan.total() > status.armies_to_place {
            return Err(GatewayError::rejected(format!(
                "plan places {} armies, {} available",
                plan.total(),
                status.armies_to_place
            )));
        }
        self.validate_plan(player, plan)?;
        self.apply_plan(plan);
        self.reinforced.borrow_mut().insert(player);
        Ok(())
    }
}

impl InitialPlacementGateway for Table {
    fn place_initial_armies(
        &self,
        game: GameId,
        player: PlayerId,
        plan: &ArmyPlan,
    ) -> Result<(), GatewayError> {
        self.check_game(game)?;
        let state = self.game.borrow().state;
        let Some(allotment) = state.initial_allotment() else {
            return Err(GatewayError::rejected(format!(
                "{state:?} is not an initial placement round"
            )));
        };
        if plan.total() > allotment {
            return Err(GatewayError::rejected(format!(
                "plan places {} armies, allotment is {allotment}",
                plan.total()
            )));
        }
        self.validate_plan(player, plan)?;
        self.apply_plan(plan);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Phases and telemetry
// ---------------------------------------------------------------------------

impl GameStateGateway for Table {
    fn change_turn_phase(&self, game: GameId, phase: TurnPhase) -> Result<(), GatewayError> {
        self.check_game(game)?;
        self.game.borrow_mut().phase = phase;
        Ok(())
    }
}

impl TelemetrySink for Table {
    fn record(&self, event: TelemetryEvent) -> Result<(), GatewayError> {
        self.telemetry.borrow_mut().push(TelemetryRecord {
            event,
            recorded_at: Utc::now(),
        });
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use teg_types::{Player, PlayerColor};

    use super::*;

    fn seat(color: PlayerColor) -> Player {
        Player {
            id: PlayerId::new(),
            display_name: color.to_string(),
            color,
            status: PlayerStatus::Active,
            bot_profile: None,
            objective: None,
        }
    }

    /// Three territories in a row: `A - B - C`, one continent worth 2.
    fn strip(owners: [&Player; 3], armies: [u32; 3], state: GameState) -> (Table, [TerritoryId; 3]) {
        let mut board = Board::new();
        board.add_continent("Strip", 2);
        let ids = ["A", "B", "C"].map(|name| board.add_territory(name, "Strip").unwrap());
        board.connect("A", "B").unwrap();
        board.connect("B", "C").unwrap();
        for ((id, owner), count) in ids.iter().zip(owners).zip(armies) {
            let t = board.get_mut(*id).unwrap();
            t.owner = Some(owner.id);
            t.armies = count;
        }
        let mut players: Vec<Player> = Vec::new();
        for owner in owners {
            if !players.iter().any(|p| p.id == owner.id) {
                players.push(owner.clone());
            }
        }
        let game = Game {
            id: GameId::new(),
            code: "UNIT".to_owned(),
            state,
            phase: TurnPhase::Reinforcement,
            turn: 2,
            players,
        };
        (Table::new(board, game, 7), ids)
    }

    #[test]
    fn reinforcement_counts_minimum_and_continent_bonus() {
        let red = seat(PlayerColor::Red);
        let (table, _) = strip([&red, &red, &red], [1, 1, 1], GameState::NormalPlay);
        let game = table.game();
        let status = table.reinforcement_status(game.id, red.id).unwrap();
        assert_eq!(status.base_armies, 3);
        assert_eq!(status.continent_bonus, 2);
        assert_eq!(status.armies_to_place, 5);
        assert!(status.can_reinforce);
    }

    #[test]
    fn reinforcing_twice_in_a_turn_is_refused() {
        let red = seat(PlayerColor::Red);
        let blue = seat(PlayerColor::Blue);
        let (table, [a, ..]) = strip([&red, &red, &blue], [1, 1, 1], GameState::NormalPlay);
        let game = table.game();
        let mut plan = ArmyPlan::new();
        plan.add(a, 3);
        table.place_reinforcements(game.id, red.id, &plan).unwrap();
        assert_eq!(table.with_board(|b| b.get(a).map(|t| t.armies)), Some(4));
        assert!(matches!(
            table.place_reinforcements(game.id, red.id, &plan),
            Err(GatewayError::Rejected { .. })
        ));
        table.begin_turn(3);
        assert!(table.place_reinforcements(game.id, red.id, &plan).is_ok());
    }

    #[test]
    fn reinforcement_outside_its_phase_is_refused() {
        let red = seat(PlayerColor::Red);
        let (table, [a, ..]) = strip([&red, &red, &red], [1, 1, 1], GameState::NormalPlay);
        let game = table.game();
        table.change_turn_phase(game.id, TurnPhase::Attack).unwrap();
        assert!(!table.can_reinforce(game.id, red.id).unwrap());
        let mut plan = ArmyPlan::new();
        plan.add(a, 1);
        assert!(table.place_reinforcements(game.id, red.id, &plan).is_err());
    }

    #[test]
    fn placing_on_foreign_soil_is_refused() {
        let red = seat(PlayerColor::Red);
        let blue = seat(PlayerColor::Blue);
        let (table, [.., c]) = strip([&red, &red, &blue], [1, 1, 1], GameState::Reinforcement5);
        let game = table.game();
        let mut plan = ArmyPlan::new();
        plan.add(c, 2);
        assert!(matches!(
            table.place_initial_armies(game.id, red.id, &plan),
            Err(GatewayError::Rejected { .. })
        ));
    }

    #[test]
    fn initial_placement_respects_the_allotment() {
        let red = seat(PlayerColor::Red);
        let blue = seat(PlayerColor::Blue);
        let (table, [a, ..]) = strip([&red, &red, &blue], [1, 1, 1], GameState::Reinforcement3);
        let game = table.game();
        let mut plan = ArmyPlan::new();
        plan.add(a, 4);
        assert!(table.place_initial_armies(game.id, red.id, &plan).is_err());
        let mut plan = ArmyPlan::new();
        plan.add(a, 3);
        assert!(table.place_initial_armies(game.id, red.id, &plan).is_ok());
    }

    #[test]
    fn attack_must_cross_a_border_and_leave_a_garrison() {
        let red = seat(PlayerColor::Red);
        let blue = seat(PlayerColor::Blue);
        let (table, [a, b, c]) = strip([&red, &blue, &blue], [5, 1, 1], GameState::NormalPlay);
        let game = table.game();
        let order = |to, armies| AttackOrder { from: a, to, armies };
        assert!(table.attack(game.id, red.id, order(c, 2)).is_err());
        assert!(table.attack(game.id, red.id, order(b, 5)).is_err());
        assert!(table.attack(game.id, red.id, order(b, 0)).is_err());
        assert!(table.attack(game.id, blue.id, order(b, 1)).is_err());
    }

    #[test]
    fn battles_conserve_or_lose_armies_and_conquests_move_in() {
        let red = seat(PlayerColor::Red);
        let blue = seat(PlayerColor::Blue);
        let (table, [a, b, _]) = strip([&red, &blue, &blue], [10, 1, 1], GameState::NormalPlay);
        let game = table.game();
        let mut conquered = false;
        for _ in 0..20 {
            let attacker = table.with_board(|board| board.get(a).cloned()).unwrap();
            if conquered || attacker.armies < 2 {
                break;
            }
            let result = table
                .attack(
                    game.id,
                    red.id,
                    AttackOrder {
                        from: a,
                        to: b,
                        armies: attacker.armies.saturating_sub(1).min(3),
                    },
                )
                .unwrap();
            conquered = result.conquered;
        }
        let (source, target) = table.with_board(|board| (board.get(a).cloned(), board.get(b).cloned()));
        let (source, target) = (source.unwrap(), target.unwrap());
        assert!(source.armies >= 1);
        if conquered {
            assert_eq!(target.owner, Some(red.id));
            assert!(target.armies >= 1);
            assert_eq!(target.last_conquered_turn, Some(2));
        } else {
            assert_eq!(target.owner, Some(blue.id));
        }
    }

    #[test]
    fn losing_the_last_territory_eliminates() {
        let red = seat(PlayerColor::Red);
        let blue = seat(PlayerColor::Blue);
        let (table, [a, b, c]) = strip([&red, &blue, &red], [30, 1, 30], GameState::NormalPlay);
        let game = table.game();
        for _ in 0..50 {
            let owner = table.with_board(|board| board.get(b).and_then(|t| t.owner));
            if owner == Some(red.id) {
                break;
            }
            let from = if table.with_board(|board| board.get(a).map(|t| t.armies)) > Some(1) {
                a
            } else {
                c
            };
            let _ = table.attack(game.id, red.id, AttackOrder { from, to: b, armies: 1 });
        }
        let blue_status = table.game().player(blue.id).map(|p| p.status);
        let owner = table.with_board(|board| board.get(b).and_then(|t| t.owner));
        assert_eq!(owner == Some(red.id), blue_status == Some(PlayerStatus::Eliminated));
    }

    #[test]
    fn only_one_fortify_per_turn() {
        let red = seat(PlayerColor::Red);
        let (table, [a, b, _]) = strip([&red, &red, &red], [5, 1, 1], GameState::NormalPlay);
        let game = table.game();
        let order = FortifyOrder { from: a, to: b, armies: 2 };
        assert_eq!(table.max_movable(game.id, a).unwrap(), 4);
        assert!(table.fortify(game.id, red.id, order).unwrap());
        assert!(!table.fortify(game.id, red.id, order).unwrap());
        assert_eq!(table.with_board(|board| board.get(b).map(|t| t.armies)), Some(3));
    }

    #[test]
    fn fortify_cannot_empty_the_source_or_skip_a_border() {
        let red = seat(PlayerColor::Red);
        let (table, [a, _, c]) = strip([&red, &red, &red], [5, 1, 1], GameState::NormalPlay);
        let game = table.game();
        assert!(table.fortify(game.id, red.id, FortifyOrder { from: a, to: c, armies: 1 }).is_err());
        let (table, [a, b, _]) = strip([&red, &red, &red], [5, 1, 1], GameState::NormalPlay);
        let game = table.game();
        assert!(table.fortify(game.id, red.id, FortifyOrder { from: a, to: b, armies: 5 }).is_err());
    }

    #[test]
    fn other_games_are_not_found() {
        let red = seat(PlayerColor::Red);
        let (table, _) = strip([&red, &red, &red], [1, 1, 1], GameState::NormalPlay);
        let other = GameId::new();
        assert_eq!(table.all(other), Err(GatewayError::GameNotFound(other)));
    }

    #[test]
    fn dealing_covers_the_board_evenly() {
        let red = seat(PlayerColor::Red);
        let blue = seat(PlayerColor::Blue);
        let board = crate::classic::classic().unwrap();
        let game = Game {
            id: GameId::new(),
            code: "DEAL".to_owned(),
            state: GameState::WaitingForPlayers,
            phase: TurnPhase::Reinforcement,
            turn: 0,
            players: vec![red.clone(), blue.clone()],
        };
        let table = Table::new(board, game, 11);
        table.deal_territories().unwrap();
        let game = table.game();
        assert_eq!(table.owned_by(game.id, red.id).unwrap().len(), 25);
        assert_eq!(table.owned_by(game.id, blue.id).unwrap().len(), 25);
        assert!(table.all(game.id).unwrap().iter().all(|t| t.armies == 1));
    }
}
