//! The deck of secret objective cards for the classic map.
//!
//! Cards are decoded from their stored form (type tag plus target data) so
//! the deck goes through the same path as cards loaded from elsewhere.
//!
//! A player dealt the destruction card of their own colour plays for the
//! common objective instead; [`deal_classic_objectives`] makes that swap at
//! the table, so evaluation never sees a self-targeting card.

use rand::Rng;
use teg_core::assign_objectives;
use teg_types::{
    Objective, ObjectiveError, ObjectiveId, ObjectiveKind, ObjectiveType, Player, PlayerColor,
};

use crate::classic::{AFRICA, ASIA, EUROPE, NORTH_AMERICA, OCEANIA, SOUTH_AMERICA};

/// Occupation cards: `(description, target data)`.
const OCCUPATION_CARDS: [(&str, &str); 6] = [
    ("Occupy Africa and South America", "Africa,South America"),
    ("Occupy Europe and South America", "Europe,South America"),
    ("Occupy North America and Oceania", "North America,Oceania"),
    ("Occupy Asia", "Asia"),
    ("Occupy Africa, Oceania and South America", "Africa,Oceania,South America"),
    ("Occupy Europe and Africa", "Europe,Africa"),
];

/// Continents any occupation card may name.
pub const CONTINENT_NAMES: [&str; 6] = [SOUTH_AMERICA, NORTH_AMERICA, EUROPE, ASIA, AFRICA, OCEANIA];

/// The deck for a table: the common card, every occupation card, and one
/// destruction card per seated colour.
///
/// # Errors
///
/// Returns [`ObjectiveError`] if a stored card does not decode.
pub fn classic_objectives(seated: &[PlayerColor]) -> Result<Vec<Objective>, ObjectiveError> {
    let mut deck = vec![Objective::from_record(
        ObjectiveId::new(),
        ObjectiveType::Common,
        "Occupy 30 countries",
        None,
    )?];
    for (description, targets) in OCCUPATION_CARDS {
        deck.push(Objective::from_record(
            ObjectiveId::new(),
            ObjectiveType::Occupation,
            description,
            Some(targets),
        )?);
    }
    for color in seated {
        deck.push(Objective::from_record(
            ObjectiveId::new(),
            ObjectiveType::Destruction,
            &format!("Destroy the {color} army"),
            Some(color.as_str()),
        )?);
    }
    Ok(deck)
}

/// Build the deck for the seated colours and deal it. Own-colour
/// destruction cards are exchanged for the common card. Returns how many
/// players received an objective.
///
/// # Errors
///
/// Returns [`ObjectiveError`] if the deck does not decode or is empty.
pub fn deal_classic_objectives<R: Rng + ?Sized>(
    players: &mut [Player],
    rng: &mut R,
) -> Result<usize, ObjectiveError> {
    let colors: Vec<PlayerColor> = players.iter().map(|p| p.color).collect();
    let deck = classic_objectives(&colors)?;
    let dealt = assign_objectives(players, &deck, rng)?;
    let common = deck
        .iter()
        .find(|o| o.kind == ObjectiveKind::Common)
        .cloned();
    for player in players.iter_mut() {
        let self_targeted = matches!(
            player.objective.as_ref().map(|o| &o.kind),
            Some(ObjectiveKind::Destruction { color }) if *color == player.color
        );
        if self_targeted {
            player.objective.clone_from(&common);
        }
    }
    Ok(dealt)
}
