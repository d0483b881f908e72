//! Frontier analysis: which owned territories touch the enemy, and how
//! hard they are pressed.

use std::collections::{BTreeMap, BTreeSet};

use teg_types::{GameId, PlayerId, Territory, TerritoryId};

use crate::error::GatewayError;
use crate::gateway::TerritoryQueries;

/// An owned territory together with its enemy neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// The owned territory.
    pub territory: Territory,
    /// Adjacent territories owned by someone else.
    pub enemy_neighbors: Vec<Territory>,
}

impl FrontierEntry {
    /// Whether any neighbour belongs to another player.
    pub fn is_border(&self) -> bool {
        !self.enemy_neighbors.is_empty()
    }

    /// Enemy armies adjacent to this territory.
    pub fn enemy_armies(&self) -> u32 {
        self.enemy_neighbors
            .iter()
            .fold(0_u32, |acc, t| acc.saturating_add(t.armies))
    }

    /// Adjacent enemy armies minus the armies stationed here.
    pub fn threat(&self) -> i64 {
        i64::from(self.enemy_armies()).saturating_sub(i64::from(self.territory.armies))
    }

    /// Whether an enemy neighbour is in `targets`.
    pub fn touches_any(&self, targets: &BTreeSet<TerritoryId>) -> bool {
        self.enemy_neighbors.iter().any(|t| targets.contains(&t.id))
    }
}

/// Enemy neighbours of a territory: adjacent, with an owner, not `player`.
pub fn enemy_neighbors(
    territories: &dyn TerritoryQueries,
    game: GameId,
    player: PlayerId,
    territory: TerritoryId,
) -> Result<Vec<Territory>, GatewayError> {
    Ok(territories
        .neighbors(game, territory)?
        .into_iter()
        .filter(|n| n.owner.is_some_and(|owner| owner != player))
        .collect())
}

/// Analyse every owned territory, preserving the given order.
pub fn analyze(
    territories: &dyn TerritoryQueries,
    game: GameId,
    player: PlayerId,
    owned: Vec<Territory>,
) -> Result<Vec<FrontierEntry>, GatewayError> {
    owned
        .into_iter()
        .map(|territory| {
            let enemy_neighbors = enemy_neighbors(territories, game, player, territory.id)?;
            Ok(FrontierEntry {
                territory,
                enemy_neighbors,
            })
        })
        .collect()
}

/// Memoized enemy-neighbour counts, for decisions that revisit the same
/// territory many times.
pub struct EnemyCounts<'a> {
    territories: &'a dyn TerritoryQueries,
    game: GameId,
    player: PlayerId,
    cache: BTreeMap<TerritoryId, usize>,
}

impl<'a> EnemyCounts<'a> {
    /// An empty cache over a game.
    pub const fn new(territories: &'a dyn TerritoryQueries, game: GameId, player: PlayerId) -> Self {
        Self {
            territories,
            game,
            player,
            cache: BTreeMap::new(),
        }
    }

    /// Number of enemy neighbours of a territory.
    pub fn count(&mut self, territory: TerritoryId) -> Result<usize, GatewayError> {
        if let Some(cached) = self.cache.get(&territory) {
            return Ok(*cached);
        }
        let found = enemy_neighbors(self.territories, self.game, self.player, territory)?.len();
        self.cache.insert(territory, found);
        Ok(found)
    }

    /// Whether a territory has no enemy neighbour.
    pub fn is_safe(&mut self, territory: TerritoryId) -> Result<bool, GatewayError> {
        Ok(self.count(territory)? == 0)
    }
}
