//! The fortify sub-action: at most one army movement per turn.

use std::collections::BTreeSet;

use teg_types::{FortifyOrder, Game, Player, TelemetryEvent, Territory, TerritoryId};
use tracing::{debug, warn};

use super::frontier::EnemyCounts;
use super::numeric::{expert_fortify_amount, ideal_fortify_amount};
use super::params::{BotParams, FortifyStyle, ObjectiveFocus};
use super::targets::strategic_target_ids;
use crate::error::GatewayError;
use crate::gateway::Gateways;
use crate::outcome::{FortifyOutcome, SkipReason};
use crate::telemetry::emit;

/// Expert sources must hold more than this many armies.
const EXPERT_MIN_SOURCE_ARMIES: u32 = 2;

/// A chosen source and destination.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Move {
    source: Territory,
    target: Territory,
}

/// Whether an expert move toward `target` is worth making: the target must
/// face the enemy, and outside a destruction focus the source must also be
/// the stronger of the two.
pub const fn expert_should_fortify(
    source_armies: u32,
    target_armies: u32,
    target_is_border: bool,
    focus: &ObjectiveFocus,
) -> bool {
    target_is_border && (focus.is_destruction() || source_armies > target_armies)
}

/// Run the fortify sub-action.
pub fn fortify(params: &BotParams, player: &Player, game: &Game, gw: &Gateways<'_>) -> FortifyOutcome {
    match try_fortify(params, player, game, gw) {
        Ok(outcome) => outcome,
        Err(error) => {
            warn!(game = %game.id, player = %player.id, %error, "fortification aborted");
            FortifyOutcome::Aborted { error }
        }
    }
}

fn try_fortify(
    params: &BotParams,
    player: &Player,
    game: &Game,
    gw: &Gateways<'_>,
) -> Result<FortifyOutcome, GatewayError> {
    let tier = &params.tier;
    let focus = params.focus_for(player.objective.as_ref());
    let sources = gw.fortification.fortifiable_territories(game.id, player.id)?;
    if sources.is_empty() {
        return Ok(FortifyOutcome::Skipped(SkipReason::NoCandidates));
    }

    let mut counts = EnemyCounts::new(gw.territories, game.id, player.id);
    let chosen = match tier.fortify {
        FortifyStyle::SafeSourceOnly => safe_source_move(&sources, player, game, gw, &mut counts)?,
        FortifyStyle::Scored => scored_move(&sources, params, player, game, gw, &mut counts)?,
        FortifyStyle::ObjectiveDriven => {
            let strategic = strategic_target_ids(gw.territories, game, player.id, &focus);
            objective_move(&sources, &focus, &strategic, player, game, gw, &mut counts)?
        }
    };
    let Some(Move { source, target }) = chosen else {
        debug!(game = %game.id, player = %player.id, "no fortify move worth making");
        return Ok(FortifyOutcome::Skipped(SkipReason::NoCandidates));
    };

    let max_movable = gw.fortification.max_movable(game.id, source.id)?;
    if max_movable == 0 {
        return Ok(FortifyOutcome::Skipped(SkipReason::NoMovableArmies));
    }
    let armies = match tier.fortify {
        FortifyStyle::SafeSourceOnly | FortifyStyle::Scored => ideal_fortify_amount(
            source.armies,
            target.armies,
            max_movable,
            tier.ideal_fortify_strength,
            tier.min_garrison,
        ),
        FortifyStyle::ObjectiveDriven => expert_fortify_amount(source.armies, max_movable, &focus),
    };
    if armies == 0 {
        return Ok(FortifyOutcome::Skipped(SkipReason::NothingToMove));
    }

    let order = FortifyOrder {
        from: source.id,
        to: target.id,
        armies,
    };
    if !gw.fortification.fortify(game.id, player.id, order)? {
        debug!(from = %source.name, to = %target.name, armies, "fortify declined by host");
        return Ok(FortifyOutcome::Rejected(order));
    }
    debug!(from = %source.name, to = %target.name, armies, "fortified");
    emit(
        gw.telemetry,
        TelemetryEvent::FortificationPerformed {
            game: game.id,
            player: player.id,
            turn: game.turn,
            from: source.name,
            to: target.name,
            armies,
        },
    );
    Ok(FortifyOutcome::Moved(order))
}

fn targets_of(
    source: &Territory,
    player: &Player,
    game: &Game,
    gw: &Gateways<'_>,
) -> Result<Vec<Territory>, GatewayError> {
    Ok(gw
        .fortification
        .fortify_targets(game.id, player.id, source.id)?
        .into_iter()
        .filter(|t| t.id != source.id && t.is_owned_by(player.id))
        .collect())
}

/// First safe source with a destination; prefers the weakest border
/// destination.
fn safe_source_move(
    sources: &[Territory],
    player: &Player,
    game: &Game,
    gw: &Gateways<'_>,
    counts: &mut EnemyCounts<'_>,
) -> Result<Option<Move>, GatewayError> {
    for source in sources {
        if !counts.is_safe(source.id)? {
            continue;
        }
        let targets = targets_of(source, player, game, gw)?;
        let mut best_border: Option<&Territory> = None;
        for target in &targets {
            if counts.count(target.id)? > 0 && best_border.is_none_or(|b| target.armies < b.armies) {
                best_border = Some(target);
            }
        }
        let chosen = best_border.or_else(|| targets.iter().min_by_key(|t| t.armies));
        if let Some(target) = chosen {
            return Ok(Some(Move {
                source: source.clone(),
                target: target.clone(),
            }));
        }
    }
    Ok(None)
}

/// Best positive score over every pair: enemy pressure on the destination,
/// a safe source, and the army gap between them.
fn scored_move(
    sources: &[Territory],
    params: &BotParams,
    player: &Player,
    game: &Game,
    gw: &Gateways<'_>,
    counts: &mut EnemyCounts<'_>,
) -> Result<Option<Move>, GatewayError> {
    let mut best: Option<(Move, i64)> = None;
    for source in sources.iter().filter(|s| s.armies > params.tier.min_garrison) {
        let source_bonus = if counts.is_safe(source.id)? { 5 } else { 0 };
        for target in targets_of(source, player, game, gw)? {
            let pressure = i64::try_from(counts.count(target.id)?).unwrap_or(i64::MAX);
            let score = pressure
                .saturating_mul(10)
                .saturating_add(source_bonus)
                .saturating_add(army_gap(source, &target));
            if score > 0 && best.as_ref().is_none_or(|(_, top)| score > *top) {
                best = Some((
                    Move {
                        source: source.clone(),
                        target,
                    },
                    score,
                ));
            }
        }
    }
    Ok(best.map(|(chosen, _)| chosen))
}

/// Strongest qualifying pair, weighting destinations that touch strategic
/// targets.
fn objective_move(
    sources: &[Territory],
    focus: &ObjectiveFocus,
    strategic: &BTreeSet<TerritoryId>,
    player: &Player,
    game: &Game,
    gw: &Gateways<'_>,
    counts: &mut EnemyCounts<'_>,
) -> Result<Option<Move>, GatewayError> {
    let mut best: Option<(Move, i64)> = None;
    for source in sources.iter().filter(|s| s.armies > EXPERT_MIN_SOURCE_ARMIES) {
        for target in targets_of(source, player, game, gw)? {
            let is_border = counts.count(target.id)? > 0;
            if !expert_should_fortify(source.armies, target.armies, is_border, focus) {
                continue;
            }
            let strategic_neighbors = target
                .neighbors
                .iter()
                .filter(|id| strategic.contains(id))
                .count();
            let score = i64::try_from(strategic_neighbors)
                .unwrap_or(i64::MAX)
                .saturating_mul(10)
                .saturating_add(army_gap(source, &target));
            if best.as_ref().is_none_or(|(_, top)| score > *top) {
                best = Some((
                    Move {
                        source: source.clone(),
                        target,
                    },
                    score,
                ));
            }
        }
    }
    Ok(best.map(|(chosen, _)| chosen))
}

fn army_gap(source: &Territory, target: &Territory) -> i64 {
    i64::from(source.armies).saturating_sub(i64::from(target.armies))
}
