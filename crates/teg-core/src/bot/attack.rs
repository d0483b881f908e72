//! The attack sub-action.
//!
//! Attackers are considered one at a time. Each picks at most one target,
//! passes the probability gate, commits a sized force and waits for the
//! combat result before the next attacker is considered. The sequence stops
//! at the tier's attack ceiling.

use std::collections::BTreeSet;

use teg_types::{AttackOrder, CombatResult, Game, Player, TelemetryEvent, Territory, TerritoryId};
use tracing::{debug, warn};

use super::numeric::{attack_force, attack_probability};
use super::params::{BotParams, TargetSelection};
use super::targets::strategic_target_ids;
use crate::error::GatewayError;
use crate::gateway::Gateways;
use crate::outcome::AttackOutcome;
use crate::telemetry::emit;

/// Armies at which a defender no longer counts as weak for priority scoring.
const PRIORITY_ARMY_CAP: u32 = 10;

/// Pick the target an attacker goes for.
///
/// `owned` and `strategic` are only read by the selections that need them.
/// Ties keep the host's order.
pub fn choose_target<'t>(
    selection: TargetSelection,
    targets: &'t [Territory],
    owned: &BTreeSet<TerritoryId>,
    strategic: &BTreeSet<TerritoryId>,
) -> Option<&'t Territory> {
    match selection {
        TargetSelection::Weakest => weakest(targets.iter()),
        TargetSelection::Priority => {
            let mut best: Option<(&Territory, u32)> = None;
            for target in targets {
                let score = priority_score(target, owned);
                if best.is_none_or(|(_, top)| score > top) {
                    best = Some((target, score));
                }
            }
            best.map(|(target, _)| target)
        }
        TargetSelection::Strategic => {
            weakest(targets.iter().filter(|t| strategic.contains(&t.id)))
                .or_else(|| weakest(targets.iter()))
        }
    }
}

fn weakest<'t>(candidates: impl Iterator<Item = &'t Territory>) -> Option<&'t Territory> {
    candidates.min_by_key(|t| t.armies)
}

/// Weakness of the defender plus how many of our territories surround it.
pub fn priority_score(target: &Territory, owned: &BTreeSet<TerritoryId>) -> u32 {
    let weakness = PRIORITY_ARMY_CAP.saturating_sub(target.armies.min(PRIORITY_ARMY_CAP));
    let surrounding = target
        .neighbors
        .iter()
        .filter(|id| owned.contains(id))
        .count();
    let surrounding = u32::try_from(surrounding).unwrap_or(u32::MAX);
    weakness
        .saturating_mul(10)
        .saturating_add(surrounding.saturating_mul(5))
}

/// Run the attack sub-action.
pub fn attack(params: &BotParams, player: &Player, game: &Game, gw: &Gateways<'_>) -> AttackOutcome {
    let mut attacks = Vec::new();
    match try_attack(params, player, game, gw, &mut attacks) {
        Ok(()) => AttackOutcome::Completed { attacks },
        Err(error) => {
            warn!(
                game = %game.id,
                player = %player.id,
                completed = attacks.len(),
                %error,
                "attack sequence aborted"
            );
            AttackOutcome::Aborted { attacks, error }
        }
    }
}

fn try_attack(
    params: &BotParams,
    player: &Player,
    game: &Game,
    gw: &Gateways<'_>,
    attacks: &mut Vec<CombatResult>,
) -> Result<(), GatewayError> {
    let tier = &params.tier;
    let focus = params.focus_for(player.objective.as_ref());
    let ceiling = usize::try_from(params.max_attacks(&focus)).unwrap_or(usize::MAX);
    let threshold = params.min_attack_probability(&focus);

    let mut attackers = gw.combat.attackable_territories(game.id, player.id)?;
    if attackers.is_empty() {
        debug!(game = %game.id, player = %player.id, "no territory can attack");
        return Ok(());
    }
    if tier.strongest_attackers_first {
        attackers.sort_by(|a, b| b.armies.cmp(&a.armies));
    }

    let owned: BTreeSet<TerritoryId> = if tier.target_selection == TargetSelection::Priority {
        gw.territories
            .owned_by(game.id, player.id)?
            .into_iter()
            .map(|t| t.id)
            .collect()
    } else {
        BTreeSet::new()
    };
    let strategic = if tier.target_selection == TargetSelection::Strategic {
        strategic_target_ids(gw.territories, game, player.id, &focus)
    } else {
        BTreeSet::new()
    };

    for attacker in &attackers {
        if attacks.len() >= ceiling {
            debug!(game = %game.id, player = %player.id, ceiling, "attack ceiling reached");
            break;
        }
        if !attacker.can_attack() {
            continue;
        }
        let targets: Vec<Territory> = gw
            .combat
            .attack_targets(game.id, attacker.id)?
            .into_iter()
            .filter(|t| !t.is_owned_by(player.id))
            .collect();
        let Some(target) = choose_target(tier.target_selection, &targets, &owned, &strategic)
        else {
            continue;
        };

        let probability = attack_probability(tier.probability_table, attacker.armies, target.armies);
        if probability < threshold {
            debug!(
                from = %attacker.name,
                to = %target.name,
                probability,
                threshold,
                "attack below threshold"
            );
            continue;
        }
        let armies = attack_force(tier.force_sizing, attacker.armies, target.armies, &focus);
        if armies == 0 {
            continue;
        }

        let order = AttackOrder {
            from: attacker.id,
            to: target.id,
            armies,
        };
        let result = gw.combat.attack(game.id, player.id, order)?;
        debug!(
            from = %result.attacker_name,
            to = %result.defender_name,
            armies,
            probability,
            conquered = result.conquered,
            "attack resolved"
        );
        record(game, player, armies, &result, gw);
        attacks.push(result);
    }
    Ok(())
}

fn record(game: &Game, player: &Player, armies: u32, result: &CombatResult, gw: &Gateways<'_>) {
    emit(
        gw.telemetry,
        TelemetryEvent::AttackPerformed {
            game: game.id,
            player: player.id,
            turn: game.turn,
            from: result.attacker_name.clone(),
            to: result.defender_name.clone(),
            armies,
            conquered: result.conquered,
        },
    );
    if result.conquered {
        emit(
            gw.telemetry,
            TelemetryEvent::TerritoryConquered {
                game: game.id,
                player: player.id,
                turn: game.turn,
                territory: result.defender_name.clone(),
                from: result.attacker_name.clone(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use teg_types::PlayerId;

    use super::*;

    fn target(armies: u32) -> Territory {
        Territory {
            id: TerritoryId::new(),
            name: format!("target-{armies}"),
            owner: Some(PlayerId::new()),
            armies,
            continent: "Africa".to_owned(),
            neighbors: BTreeSet::new(),
            last_conquered_turn: None,
        }
    }

    #[test]
    fn weakest_keeps_first_on_ties() {
        let targets = vec![target(3), target(1), target(1)];
        let chosen = choose_target(
            TargetSelection::Weakest,
            &targets,
            &BTreeSet::new(),
            &BTreeSet::new(),
        );
        assert_eq!(chosen.map(|t| t.id), targets.get(1).map(|t| t.id));
    }

    #[test]
    fn strategic_target_beats_weaker_bystander() {
        let targets = vec![target(1), target(4)];
        let strategic: BTreeSet<TerritoryId> = targets.get(1).map(|t| t.id).into_iter().collect();
        let chosen = choose_target(
            TargetSelection::Strategic,
            &targets,
            &BTreeSet::new(),
            &strategic,
        );
        assert_eq!(chosen.map(|t| t.armies), Some(4));
    }

    #[test]
    fn strategic_falls_back_to_weakest() {
        let targets = vec![target(5), target(2)];
        let chosen = choose_target(
            TargetSelection::Strategic,
            &targets,
            &BTreeSet::new(),
            &BTreeSet::new(),
        );
        assert_eq!(chosen.map(|t| t.armies), Some(2));
    }

    #[test]
    fn priority_rewards_surrounded_targets() {
        let ours = TerritoryId::new();
        let owned: BTreeSet<TerritoryId> = [ours].into_iter().collect();
        let lonely = target(2);
        let mut surrounded = target(3);
        surrounded.neighbors.insert(ours);
        // lonely: 8 * 10 = 80; surrounded: 7 * 10 + 5 = 75.
        assert_eq!(priority_score(&lonely, &owned), 80);
        assert_eq!(priority_score(&surrounded, &owned), 75);

        let mut swarmed = target(3);
        for _ in 0..3 {
            let id = TerritoryId::new();
            swarmed.neighbors.insert(id);
        }
        let owned_all: BTreeSet<TerritoryId> = swarmed.neighbors.iter().copied().collect();
        let targets = vec![lonely, swarmed];
        let chosen =
            choose_target(TargetSelection::Priority, &targets, &owned_all, &BTreeSet::new());
        assert_eq!(chosen.map(|t| t.armies), Some(3));
    }

    #[test]
    fn no_targets_means_no_choice() {
        for selection in [
            TargetSelection::Weakest,
            TargetSelection::Priority,
            TargetSelection::Strategic,
        ] {
            assert!(choose_target(selection, &[], &BTreeSet::new(), &BTreeSet::new()).is_none());
        }
    }
}
