//! Initial placement and reinforcement.
//!
//! Both spread a budget of armies over owned territories with the same
//! planner; they differ only in the gateway that receives the plan and in
//! the eligibility checks that come first. Every plan sums exactly to its
//! budget.

use std::collections::BTreeSet;

use teg_types::{ArmyPlan, Game, Player, TelemetryEvent, TerritoryId};
use tracing::{debug, warn};

use super::frontier::{self, FrontierEntry};
use super::numeric::{front_loaded, split_evenly};
use super::params::{BotParams, ObjectiveFocus, ReinforcementStyle};
use super::targets::strategic_target_ids;
use crate::error::GatewayError;
use crate::gateway::Gateways;
use crate::outcome::{PlacementOutcome, SkipReason};
use crate::telemetry::emit;

/// Share of the budget the primary territory receives, in percent.
const PRIMARY_SHARE_PERCENT: u32 = 50;

/// Share of the budget the strongest destruction staging post receives.
const DESTRUCTION_SHARE_PERCENT: u32 = 75;

/// Borders with at most this many armies receive secondary reinforcements.
const WEAK_BORDER_ARMIES: u32 = 3;

/// Most territories an expert spreads a general-purpose budget over.
const GENERAL_SPREAD: usize = 3;

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// Spread `budget` armies over the analysed territories in the style of the
/// bot's tier.
pub fn plan_placement(
    params: &BotParams,
    focus: &ObjectiveFocus,
    frontier: &[FrontierEntry],
    strategic: &BTreeSet<TerritoryId>,
    budget: u32,
) -> ArmyPlan {
    match params.tier.reinforcement {
        ReinforcementStyle::FrontLoaded => front_loaded_plan(frontier, budget),
        ReinforcementStyle::ThreatWeighted => threat_weighted_plan(frontier, budget),
        ReinforcementStyle::ObjectiveDriven => objective_plan(focus, frontier, strategic, budget),
    }
}

fn ids_of<'a>(entries: impl IntoIterator<Item = &'a FrontierEntry>) -> Vec<TerritoryId> {
    entries.into_iter().map(|e| e.territory.id).collect()
}

fn borders_weakest_first(frontier: &[FrontierEntry]) -> Vec<&FrontierEntry> {
    let mut borders: Vec<&FrontierEntry> = frontier.iter().filter(|e| e.is_border()).collect();
    borders.sort_by_key(|e| e.territory.armies);
    borders
}

fn front_loaded_plan(frontier: &[FrontierEntry], budget: u32) -> ArmyPlan {
    let borders = borders_weakest_first(frontier);
    if borders.is_empty() {
        return split_evenly(&ids_of(frontier), budget);
    }
    front_loaded(&ids_of(borders), budget, PRIMARY_SHARE_PERCENT)
}

fn threat_weighted_plan(frontier: &[FrontierEntry], budget: u32) -> ArmyPlan {
    if frontier.len() <= 2 {
        return split_evenly(&ids_of(frontier), budget);
    }
    let mut borders: Vec<&FrontierEntry> = frontier.iter().filter(|e| e.is_border()).collect();
    borders.sort_by(|a, b| {
        b.threat()
            .cmp(&a.threat())
            .then(a.territory.armies.cmp(&b.territory.armies))
    });
    let Some((primary, rest)) = borders.split_first() else {
        return split_evenly(&ids_of(frontier), budget);
    };
    let secondaries: Vec<TerritoryId> = rest
        .iter()
        .filter(|e| e.territory.armies <= WEAK_BORDER_ARMIES)
        .map(|e| e.territory.id)
        .collect();

    let mut plan = ArmyPlan::new();
    if secondaries.is_empty() {
        plan.add(primary.territory.id, budget);
        return plan;
    }
    let primary_share = budget.div_ceil(2);
    plan.add(primary.territory.id, primary_share);

    // Deal the rest one army at a time around the secondaries.
    let dealt = budget.saturating_sub(primary_share);
    let seats = u32::try_from(secondaries.len()).unwrap_or(u32::MAX);
    let round = dealt.checked_div(seats).unwrap_or(0);
    let extra = dealt.checked_rem(seats).unwrap_or(0);
    for (index, id) in secondaries.iter().enumerate() {
        let bonus = u32::from(u32::try_from(index).is_ok_and(|i| i < extra));
        plan.add(*id, round.saturating_add(bonus));
    }
    plan
}

fn objective_plan(
    focus: &ObjectiveFocus,
    frontier: &[FrontierEntry],
    strategic: &BTreeSet<TerritoryId>,
    budget: u32,
) -> ArmyPlan {
    let plan = match focus {
        ObjectiveFocus::Destruction { .. } => {
            let mut posts: Vec<&FrontierEntry> =
                frontier.iter().filter(|e| e.touches_any(strategic)).collect();
            posts.sort_by(|a, b| b.territory.armies.cmp(&a.territory.armies));
            front_loaded(&ids_of(posts), budget, DESTRUCTION_SHARE_PERCENT)
        }
        ObjectiveFocus::Occupation { continents } => {
            let inside = |e: &FrontierEntry| continents.contains(&e.territory.continent);
            let mut posts: Vec<&FrontierEntry> = frontier
                .iter()
                .filter(|e| inside(e) || e.touches_any(strategic))
                .collect();
            posts.sort_by_key(|e| (!inside(e), e.territory.armies));
            front_loaded(&ids_of(posts), budget, PRIMARY_SHARE_PERCENT)
        }
        ObjectiveFocus::General => ArmyPlan::new(),
    };
    if plan.is_empty() {
        general_spread(frontier, budget)
    } else {
        plan
    }
}

/// At most [`GENERAL_SPREAD`] territories: weakest borders, else the first
/// owned ones.
fn general_spread(frontier: &[FrontierEntry], budget: u32) -> ArmyPlan {
    let borders = borders_weakest_first(frontier);
    let chosen: Vec<TerritoryId> = if borders.is_empty() {
        ids_of(frontier.iter().take(GENERAL_SPREAD))
    } else {
        ids_of(borders.into_iter().take(GENERAL_SPREAD))
    };
    split_evenly(&chosen, budget)
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

fn analyze_owned(
    params: &BotParams,
    player: &Player,
    game: &Game,
    gw: &Gateways<'_>,
) -> Result<(ObjectiveFocus, Vec<FrontierEntry>, BTreeSet<TerritoryId>), GatewayError> {
    let focus = params.focus_for(player.objective.as_ref());
    let owned = gw.territories.owned_by(game.id, player.id)?;
    let frontier = frontier::analyze(gw.territories, game.id, player.id, owned)?;
    let strategic = if params.tier.reinforcement == ReinforcementStyle::ObjectiveDriven {
        strategic_target_ids(gw.territories, game, player.id, &focus)
    } else {
        BTreeSet::new()
    };
    Ok((focus, frontier, strategic))
}

/// Place an initial-placement allotment.
pub fn place_initial_armies(
    params: &BotParams,
    player: &Player,
    game: &Game,
    gw: &Gateways<'_>,
    allotment: u32,
) -> PlacementOutcome {
    match try_place_initial(params, player, game, gw, allotment) {
        Ok(outcome) => outcome,
        Err(error) => {
            warn!(game = %game.id, player = %player.id, %error, "initial placement aborted");
            PlacementOutcome::Aborted { error }
        }
    }
}

fn try_place_initial(
    params: &BotParams,
    player: &Player,
    game: &Game,
    gw: &Gateways<'_>,
    allotment: u32,
) -> Result<PlacementOutcome, GatewayError> {
    if allotment == 0 {
        return Ok(PlacementOutcome::Skipped(SkipReason::NoArmies));
    }
    let (focus, frontier, strategic) = analyze_owned(params, player, game, gw)?;
    if frontier.is_empty() {
        debug!(game = %game.id, player = %player.id, "no territories for initial placement");
        return Ok(PlacementOutcome::Skipped(SkipReason::NoTerritories));
    }
    let plan = plan_placement(params, &focus, &frontier, &strategic, allotment);
    gw.placement.place_initial_armies(game.id, player.id, &plan)?;
    debug!(
        game = %game.id,
        player = %player.id,
        allotment,
        territories = plan.len(),
        "initial armies placed"
    );
    Ok(PlacementOutcome::Placed { plan })
}

/// Place the turn's reinforcements.
pub fn reinforce(
    params: &BotParams,
    player: &Player,
    game: &Game,
    gw: &Gateways<'_>,
) -> PlacementOutcome {
    match try_reinforce(params, player, game, gw) {
        Ok(outcome) => outcome,
        Err(error) => {
            warn!(game = %game.id, player = %player.id, %error, "reinforcement aborted");
            PlacementOutcome::Aborted { error }
        }
    }
}

fn try_reinforce(
    params: &BotParams,
    player: &Player,
    game: &Game,
    gw: &Gateways<'_>,
) -> Result<PlacementOutcome, GatewayError> {
    if !gw.reinforcement.can_reinforce(game.id, player.id)? {
        debug!(game = %game.id, player = %player.id, "player may not reinforce now");
        return Ok(PlacementOutcome::Skipped(SkipReason::NotEligible));
    }
    let status = gw.reinforcement.reinforcement_status(game.id, player.id)?;
    let budget = status.armies_to_place;
    if budget == 0 {
        return Ok(PlacementOutcome::Skipped(SkipReason::NoArmies));
    }
    let (focus, frontier, strategic) = analyze_owned(params, player, game, gw)?;
    if frontier.is_empty() {
        return Ok(PlacementOutcome::Skipped(SkipReason::NoTerritories));
    }

    let plan = plan_placement(params, &focus, &frontier, &strategic, budget);
    gw.reinforcement
        .place_reinforcements(game.id, player.id, &plan)?;
    debug!(
        game = %game.id,
        player = %player.id,
        budget,
        base = status.base_armies,
        continent_bonus = status.continent_bonus,
        territories = plan.len(),
        "reinforcements placed"
    );

    for entry in &frontier {
        let armies = plan.get(entry.territory.id);
        if armies == 0 {
            continue;
        }
        emit(
            gw.telemetry,
            TelemetryEvent::ReinforcementsPlaced {
                game: game.id,
                player: player.id,
                turn: game.turn,
                territory: entry.territory.name.clone(),
                armies,
                total_armies: entry.territory.armies.saturating_add(armies),
            },
        );
    }
    Ok(PlacementOutcome::Placed { plan })
}
