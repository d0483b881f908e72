//! Strategic targets: the enemy territories an objective-aware bot cares
//! about most.

use std::collections::BTreeSet;

use teg_types::{Game, PlayerId, Territory, TerritoryId};
use tracing::{debug, warn};

use super::params::ObjectiveFocus;
use crate::gateway::TerritoryQueries;

/// Enemy territories with at most this many armies are general targets.
pub const WEAK_TARGET_ARMIES: u32 = 2;

/// Strategic targets for a focus.
///
/// - occupation: enemy territories inside a target continent
/// - destruction: territories held by active players of the target colour
/// - general: enemy territories with at most [`WEAK_TARGET_ARMIES`] armies
///
/// A query fault yields no targets.
pub fn strategic_targets(
    territories: &dyn TerritoryQueries,
    game: &Game,
    player: PlayerId,
    focus: &ObjectiveFocus,
) -> Vec<Territory> {
    let board = match territories.all(game.id) {
        Ok(board) => board,
        Err(e) => {
            warn!(game = %game.id, %player, error = %e, "could not read board for strategic targets");
            return Vec::new();
        }
    };
    let is_enemy = |t: &Territory| t.owner.is_some_and(|owner| owner != player);

    let targets: Vec<Territory> = match focus {
        ObjectiveFocus::Occupation { continents } => board
            .into_iter()
            .filter(|t| is_enemy(t) && continents.contains(&t.continent))
            .collect(),
        ObjectiveFocus::Destruction { color } => {
            let victims: BTreeSet<PlayerId> = game
                .players_with_color(*color)
                .filter(|p| p.is_active() && p.id != player)
                .map(|p| p.id)
                .collect();
            board
                .into_iter()
                .filter(|t| t.owner.is_some_and(|owner| victims.contains(&owner)))
                .collect()
        }
        ObjectiveFocus::General => board
            .into_iter()
            .filter(|t| is_enemy(t) && t.armies <= WEAK_TARGET_ARMIES)
            .collect(),
    };
    debug!(game = %game.id, %player, ?focus, count = targets.len(), "strategic targets identified");
    targets
}

/// Identifiers of [`strategic_targets`].
pub fn strategic_target_ids(
    territories: &dyn TerritoryQueries,
    game: &Game,
    player: PlayerId,
    focus: &ObjectiveFocus,
) -> BTreeSet<TerritoryId> {
    strategic_targets(territories, game, player, focus)
        .into_iter()
        .map(|t| t.id)
        .collect()
}
