//! The board graph: territories as nodes, borders as undirected edges.
//!
//! A [`Board`] stores every [`Territory`] together with the continent it
//! belongs to. Borders are kept on both endpoints, so adjacency is always
//! symmetric. Territories are listed in the order they were added, which is
//! the order the host reports them in.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use teg_types::{PlayerId, Territory, TerritoryId};

use crate::error::TableError;

/// A continent and the bonus its owner collects each turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continent {
    /// Continent name.
    pub name: String,
    /// Extra reinforcements for holding every member territory.
    pub bonus: u32,
    /// Member territories, in board order.
    pub members: Vec<TerritoryId>,
}

/// The territory graph of one game.
#[derive(Debug, Clone, Default)]
pub struct Board {
    territories: BTreeMap<TerritoryId, Territory>,
    order: Vec<TerritoryId>,
    by_name: BTreeMap<String, TerritoryId>,
    continents: BTreeMap<String, Continent>,
}

impl Board {
    /// Create an empty board.
    pub const fn new() -> Self {
        Self {
            territories: BTreeMap::new(),
            order: Vec::new(),
            by_name: BTreeMap::new(),
            continents: BTreeMap::new(),
        }
    }

    // -------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------

    /// Declare a continent. Declaring it again updates the bonus.
    pub fn add_continent(&mut self, name: &str, bonus: u32) {
        self.continents
            .entry(name.to_owned())
            .and_modify(|c| c.bonus = bonus)
            .or_insert_with(|| Continent {
                name: name.to_owned(),
                bonus,
                members: Vec::new(),
            });
    }

    /// Add an unowned territory with no armies to a declared continent.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownContinent`] or
    /// [`TableError::DuplicateTerritory`].
    pub fn add_territory(&mut self, name: &str, continent: &str) -> Result<TerritoryId, TableError> {
        if self.by_name.contains_key(name) {
            return Err(TableError::DuplicateTerritory {
                name: name.to_owned(),
            });
        }
        let members = &mut self
            .continents
            .get_mut(continent)
            .ok_or_else(|| TableError::UnknownContinent {
                name: continent.to_owned(),
            })?
            .members;

        let id = TerritoryId::new();
        members.push(id);
        self.territories.insert(
            id,
            Territory {
                id,
                name: name.to_owned(),
                owner: None,
                armies: 0,
                continent: continent.to_owned(),
                neighbors: BTreeSet::new(),
                last_conquered_turn: None,
            },
        );
        self.order.push(id);
        self.by_name.insert(name.to_owned(), id);
        Ok(id)
    }

    /// Add a border between two named territories.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownTerritory`] or [`TableError::SelfBorder`].
    pub fn connect(&mut self, a: &str, b: &str) -> Result<(), TableError> {
        if a == b {
            return Err(TableError::SelfBorder { name: a.to_owned() });
        }
        let a_id = self.require(a)?;
        let b_id = self.require(b)?;
        if let Some(t) = self.territories.get_mut(&a_id) {
            t.neighbors.insert(b_id);
        }
        if let Some(t) = self.territories.get_mut(&b_id) {
            t.neighbors.insert(a_id);
        }
        Ok(())
    }

    fn require(&self, name: &str) -> Result<TerritoryId, TableError> {
        self.id_of(name).ok_or_else(|| TableError::UnknownTerritory {
            name: name.to_owned(),
        })
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// Look up a territory.
    pub fn get(&self, id: TerritoryId) -> Option<&Territory> {
        self.territories.get(&id)
    }

    /// Look up a territory for mutation.
    pub fn get_mut(&mut self, id: TerritoryId) -> Option<&mut Territory> {
        self.territories.get_mut(&id)
    }

    /// Identifier of a named territory.
    pub fn id_of(&self, name: &str) -> Option<TerritoryId> {
        self.by_name.get(name).copied()
    }

    /// Number of territories.
    pub fn territory_count(&self) -> usize {
        self.order.len()
    }

    /// Every territory, in board order.
    pub fn territories(&self) -> impl Iterator<Item = &Territory> {
        self.order.iter().filter_map(|id| self.territories.get(id))
    }

    /// Territory ids, in board order.
    pub fn territory_ids(&self) -> &[TerritoryId] {
        &self.order
    }

    /// Territories bordering `id`, in board order.
    pub fn neighbors(&self, id: TerritoryId) -> Vec<&Territory> {
        let Some(territory) = self.territories.get(&id) else {
            return Vec::new();
        };
        self.territories()
            .filter(|t| territory.neighbors.contains(&t.id))
            .collect()
    }

    /// Whether two territories share a border.
    pub fn borders(&self, a: TerritoryId, b: TerritoryId) -> bool {
        self.territories
            .get(&a)
            .is_some_and(|t| t.neighbors.contains(&b))
    }

    /// Territories held by a player, in board order.
    pub fn owned_by(&self, player: PlayerId) -> Vec<&Territory> {
        self.territories().filter(|t| t.is_owned_by(player)).collect()
    }

    /// Every continent, by name.
    pub fn continents(&self) -> impl Iterator<Item = &Continent> {
        self.continents.values()
    }

    /// Look up a continent.
    pub fn continent(&self, name: &str) -> Option<&Continent> {
        self.continents.get(name)
    }

    /// Continents whose every member territory belongs to `player`.
    pub fn controlled_continents(&self, player: PlayerId) -> Vec<&Continent> {
        self.continents()
            .filter(|c| {
                !c.members.is_empty()
                    && c.members
                        .iter()
                        .all(|id| self.get(*id).is_some_and(|t| t.is_owned_by(player)))
            })
            .collect()
    }

    /// Check whether every territory is reachable from every other.
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.order.first() else {
            return true;
        };
        let mut seen = BTreeSet::from([*start]);
        let mut queue = VecDeque::from([*start]);
        while let Some(current) = queue.pop_front() {
            if let Some(territory) = self.territories.get(&current) {
                for next in &territory.neighbors {
                    if seen.insert(*next) {
                        queue.push_back(*next);
                    }
                }
            }
        }
        seen.len() == self.order.len()
    }
}
