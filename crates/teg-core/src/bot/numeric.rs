//! Shared numeric helpers: army allocation, attack probability tables,
//! attack force sizing and fortify amounts.
//!
//! Everything here is pure integer arithmetic over army counts. Ratios are
//! compared by cross-multiplication so that no float ever stands in for an
//! army count.

use teg_types::{ArmyPlan, TerritoryId};

use super::params::{ForceSizing, ObjectiveFocus, ProbabilityTable};

/// Garrison-adjusted table: `(ratio in tenths, probability)`, best first.
const GARRISON_ADJUSTED_STEPS: [(u64, f64); 4] = [(20, 0.90), (15, 0.75), (12, 0.60), (10, 0.40)];

/// Probability when the garrison-adjusted ratio is below every step.
const GARRISON_ADJUSTED_FLOOR: f64 = 0.20;

/// Raw-ratio table: `(ratio in tenths, probability)`, best first.
const RAW_RATIO_STEPS: [(u64, f64); 4] = [(30, 0.85), (20, 0.70), (15, 0.55), (10, 0.40)];

/// Probability when the raw ratio is below every step.
const RAW_RATIO_FLOOR: f64 = 0.25;

/// Share of its source a destruction-focused fortify sends, in percent.
const DESTRUCTION_FORTIFY_PERCENT: u32 = 80;

fn count(ids: &[TerritoryId]) -> u32 {
    u32::try_from(ids.len()).unwrap_or(u32::MAX)
}

// ---------------------------------------------------------------------------
// Allocation
// ---------------------------------------------------------------------------

/// Split a budget evenly. The remainder goes to the first (highest
/// priority) territory. An empty list yields an empty plan.
pub fn split_evenly(ids: &[TerritoryId], budget: u32) -> ArmyPlan {
    let mut plan = ArmyPlan::new();
    let n = count(ids);
    let share = budget.checked_div(n).unwrap_or(0);
    let remainder = budget.checked_rem(n).unwrap_or(0);
    for (index, id) in ids.iter().enumerate() {
        let bonus = if index == 0 { remainder } else { 0 };
        plan.add(*id, share.saturating_add(bonus));
    }
    plan
}

/// Give the first territory `primary_percent` of the budget (rounded up) and
/// split the rest evenly among the others, remainder to the first. A single
/// territory receives everything.
pub fn front_loaded(ranked: &[TerritoryId], budget: u32, primary_percent: u32) -> ArmyPlan {
    let Some((first, rest)) = ranked.split_first() else {
        return ArmyPlan::new();
    };
    let mut plan = ArmyPlan::new();
    if rest.is_empty() {
        plan.add(*first, budget);
        return plan;
    }
    let primary = budget
        .saturating_mul(primary_percent.min(100))
        .div_ceil(100)
        .min(budget);
    let leftover = budget.saturating_sub(primary);
    let others = count(rest);
    let share = leftover.checked_div(others).unwrap_or(0);
    let remainder = leftover.checked_rem(others).unwrap_or(0);
    plan.add(*first, primary.saturating_add(remainder));
    for id in rest {
        plan.add(*id, share);
    }
    plan
}

// ---------------------------------------------------------------------------
// Attack estimates
// ---------------------------------------------------------------------------

/// Estimated probability that an attack succeeds.
///
/// A defender with no armies is treated as one. An attacker with nothing to
/// send scores zero.
pub fn attack_probability(table: ProbabilityTable, attacker: u32, defender: u32) -> f64 {
    let defender = u64::from(defender.max(1));
    let (numerator, steps, floor) = match table {
        ProbabilityTable::GarrisonAdjusted => (
            attacker.saturating_sub(1),
            &GARRISON_ADJUSTED_STEPS,
            GARRISON_ADJUSTED_FLOOR,
        ),
        ProbabilityTable::RawRatio => (attacker, &RAW_RATIO_STEPS, RAW_RATIO_FLOOR),
    };
    if numerator == 0 {
        return 0.0;
    }
    let scaled = u64::from(numerator).saturating_mul(10);
    steps
        .iter()
        .find(|(tenths, _)| scaled >= defender.saturating_mul(*tenths))
        .map_or(floor, |(_, probability)| *probability)
}

/// Armies to commit to an attack. Always within `1..=attacker - 1`, or zero
/// when the attacker cannot attack at all.
pub fn attack_force(
    sizing: ForceSizing,
    attacker: u32,
    defender: u32,
    focus: &ObjectiveFocus,
) -> u32 {
    let available = attacker.saturating_sub(1);
    if available == 0 {
        return 0;
    }
    let defender = defender.max(1);
    let force = match sizing {
        ForceSizing::AllIn => available,
        ForceSizing::Measured => {
            let reserve = if defender > 4 { 3 } else { 1 };
            match attacker.saturating_sub(reserve) {
                0 => defender.min(available),
                spare => defender.min(spare),
            }
        }
        ForceSizing::Overkill => {
            let overwhelming = defender.saturating_add(2);
            if focus.is_destruction() && available >= overwhelming {
                overwhelming
            } else {
                defender.min(available)
            }
        }
    };
    force.clamp(1, available)
}

// ---------------------------------------------------------------------------
// Fortify amounts
// ---------------------------------------------------------------------------

/// Armies needed to bring a target up to `ideal` (at least one), limited by
/// what may move and by the garrison the source keeps.
pub fn ideal_fortify_amount(
    source: u32,
    target: u32,
    max_movable: u32,
    ideal: u32,
    garrison: u32,
) -> u32 {
    let need = ideal.saturating_sub(target).max(1);
    need.min(max_movable).min(source.saturating_sub(garrison))
}

/// Expert move size: most of the source under a destruction focus, half of
/// it otherwise, at least one, limited by what may move.
pub fn expert_fortify_amount(source: u32, max_movable: u32, focus: &ObjectiveFocus) -> u32 {
    let amount = if focus.is_destruction() {
        source
            .saturating_mul(DESTRUCTION_FORTIFY_PERCENT)
            .checked_div(100)
            .unwrap_or(0)
            .saturating_sub(1)
    } else {
        source.checked_div(2).unwrap_or(0)
    };
    amount.max(1).min(max_movable)
}

#[cfg(test)]
mod tests {
    use teg_types::PlayerColor;

    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn ids(n: usize) -> Vec<TerritoryId> {
        (0..n).map(|_| TerritoryId::new()).collect()
    }

    fn destruction() -> ObjectiveFocus {
        ObjectiveFocus::Destruction {
            color: PlayerColor::Blue,
        }
    }

    fn occupation() -> ObjectiveFocus {
        ObjectiveFocus::Occupation {
            continents: vec!["Europe".to_owned()],
        }
    }

    #[test]
    fn split_evenly_gives_remainder_to_first() {
        let territories = ids(3);
        let plan = split_evenly(&territories, 8);
        assert_eq!(plan.total(), 8);
        let amounts: Vec<u32> = territories.iter().map(|id| plan.get(*id)).collect();
        assert_eq!(amounts, vec![4, 2, 2]);
    }

    #[test]
    fn split_evenly_handles_degenerate_inputs() {
        assert!(split_evenly(&[], 5).is_empty());
        let one = ids(1);
        assert_eq!(split_evenly(&one, 5).total(), 5);
        let many = ids(4);
        let plan = split_evenly(&many, 2);
        assert_eq!(plan.total(), 2);
        assert_eq!(plan.len(), 1);
        assert_eq!(many.first().map(|id| plan.get(*id)), Some(2));
    }

    #[test]
    fn front_loaded_favours_primary() {
        let territories = ids(3);
        let plan = front_loaded(&territories, 7, 50);
        let amounts: Vec<u32> = territories.iter().map(|id| plan.get(*id)).collect();
        // ceil(3.5) = 4 to the primary, 3 left: 1 each plus remainder 1 to primary.
        assert_eq!(amounts, vec![5, 1, 1]);
        assert_eq!(plan.total(), 7);
    }

    #[test]
    fn front_loaded_sums_exactly_for_every_size() {
        for n in 0..6 {
            for budget in 0..12 {
                let territories = ids(n);
                let plan = front_loaded(&territories, budget, 75);
                let expected = if n == 0 { 0 } else { budget };
                assert_eq!(plan.total(), expected, "n={n} budget={budget}");
            }
        }
    }

    #[test]
    fn garrison_adjusted_table() {
        let p = |a, d| attack_probability(ProbabilityTable::GarrisonAdjusted, a, d);
        assert!(approx(p(15, 5), 0.9));
        assert!(approx(p(10, 5), 0.75));
        assert!(approx(p(6, 4), 0.6));
        assert!(approx(p(5, 4), 0.4));
        assert!(approx(p(4, 4), 0.2));
        assert!(approx(p(1, 5), 0.0));
    }

    #[test]
    fn raw_ratio_table() {
        let p = |a, d| attack_probability(ProbabilityTable::RawRatio, a, d);
        assert!(approx(p(6, 2), 0.85));
        assert!(approx(p(4, 2), 0.70));
        assert!(approx(p(3, 2), 0.55));
        assert!(approx(p(3, 3), 0.40));
        assert!(approx(p(2, 3), 0.25));
        assert!(approx(p(0, 3), 0.0));
    }

    #[test]
    fn empty_defender_counts_as_one() {
        let p = attack_probability(ProbabilityTable::GarrisonAdjusted, 3, 0);
        assert!(approx(p, 0.9));
    }

    #[test]
    fn measured_force_keeps_a_reserve() {
        let f = |a, d| attack_force(ForceSizing::Measured, a, d, &ObjectiveFocus::General);
        assert_eq!(f(5, 2), 2);
        assert_eq!(f(6, 3), 3);
        assert_eq!(f(8, 6), 5);
        assert_eq!(f(3, 6), 2);
        assert_eq!(f(1, 1), 0);
    }

    #[test]
    fn overkill_force_overcommits_for_destruction() {
        assert_eq!(attack_force(ForceSizing::Overkill, 6, 3, &destruction()), 5);
        assert_eq!(attack_force(ForceSizing::Overkill, 6, 3, &occupation()), 3);
        assert_eq!(attack_force(ForceSizing::Overkill, 4, 3, &destruction()), 3);
    }

    #[test]
    fn all_in_leaves_one_behind() {
        let focus = ObjectiveFocus::General;
        assert_eq!(attack_force(ForceSizing::AllIn, 7, 2, &focus), 6);
        assert_eq!(attack_force(ForceSizing::AllIn, 2, 9, &focus), 1);
    }

    #[test]
    fn ideal_fortify_amounts() {
        assert_eq!(ideal_fortify_amount(6, 2, 4, 4, 2), 2);
        assert_eq!(ideal_fortify_amount(6, 5, 4, 4, 2), 1);
        assert_eq!(ideal_fortify_amount(3, 1, 2, 4, 2), 1);
        assert_eq!(ideal_fortify_amount(2, 1, 1, 4, 2), 0);
    }

    #[test]
    fn expert_fortify_amounts() {
        assert_eq!(expert_fortify_amount(10, 9, &destruction()), 7);
        assert_eq!(expert_fortify_amount(10, 9, &occupation()), 5);
        assert_eq!(expert_fortify_amount(2, 1, &destruction()), 1);
        assert_eq!(expert_fortify_amount(10, 3, &ObjectiveFocus::General), 3);
    }
}
