//! Dice rolling and battle resolution.
//!
//! The attacker rolls one die per committed army, the defender one per
//! stationed army, both capped at [`MAX_DICE`]. Dice are compared highest
//! against highest; each pair costs the loser one army and ties go to the
//! defender.

use rand::Rng;

/// Most dice either side may roll.
pub const MAX_DICE: u32 = 3;

/// Armies lost by each side in one battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Losses {
    /// Armies the attacker lost.
    pub attacker: u32,
    /// Armies the defender lost.
    pub defender: u32,
}

/// Roll `count` dice (capped at [`MAX_DICE`]), highest first.
pub fn roll<R: Rng + ?Sized>(rng: &mut R, count: u32) -> Vec<u8> {
    let mut dice: Vec<u8> = (0..count.min(MAX_DICE))
        .map(|_| rng.random_range(1..=6))
        .collect();
    dice.sort_unstable_by(|a, b| b.cmp(a));
    dice
}

/// Compare sorted rolls pair by pair.
pub fn resolve(attack: &[u8], defence: &[u8]) -> Losses {
    attack
        .iter()
        .zip(defence)
        .fold(Losses::default(), |mut losses, (a, d)| {
            if a > d {
                losses.defender = losses.defender.saturating_add(1);
            } else {
                losses.attacker = losses.attacker.saturating_add(1);
            }
            losses
        })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn ties_go_to_the_defender() {
        let losses = resolve(&[6, 4, 2], &[6, 3, 2]);
        assert_eq!(
            losses,
            Losses {
                attacker: 2,
                defender: 1,
            }
        );
    }

    #[test]
    fn only_matched_pairs_count() {
        let losses = resolve(&[5, 5, 5], &[4]);
        assert_eq!(
            losses,
            Losses {
                attacker: 0,
                defender: 1,
            }
        );
    }

    #[test]
    fn rolls_are_capped_sorted_and_in_range() {
        let mut rng = SmallRng::seed_from_u64(9);
        for count in 0..6 {
            let dice = roll(&mut rng, count);
            assert_eq!(dice.len(), usize::try_from(count.min(MAX_DICE)).unwrap_or(0));
            assert!(dice.iter().all(|d| (1..=6).contains(d)));
            assert!(dice.windows(2).all(|w| w.first() >= w.get(1)));
        }
    }

    #[test]
    fn same_seed_same_rolls() {
        let mut a = SmallRng::seed_from_u64(42);
        let mut b = SmallRng::seed_from_u64(42);
        assert_eq!(roll(&mut a, 3), roll(&mut b, 3));
    }
}
