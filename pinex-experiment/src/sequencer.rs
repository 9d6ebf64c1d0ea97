//! Deterministic assignment of condition order and stimulus order.
//!
//! Both are pure functions of the participant number so any session can be
//! reconstructed exactly. Nothing here is random in the cryptographic
//! sense; reproducibility is the requirement, not unpredictability.

use pinex_core::{Condition, ConditionOrder, ParticipantId};

/// Counterbalancing table: each condition appears once per row and once per
/// column, consecutive rows are cyclic rotations. Participants cycle
/// through the four rows, so condition order is balanced across every block
/// of four participants.
pub const LATIN_SQUARE: [ConditionOrder; 4] = [
    [
        Condition::NormalKeypad,
        Condition::RandomKeypadShuffledOnce,
        Condition::DrawingTouchscreen,
        Condition::RandomKeypad,
    ],
    [
        Condition::RandomKeypadShuffledOnce,
        Condition::DrawingTouchscreen,
        Condition::RandomKeypad,
        Condition::NormalKeypad,
    ],
    [
        Condition::DrawingTouchscreen,
        Condition::RandomKeypad,
        Condition::NormalKeypad,
        Condition::RandomKeypadShuffledOnce,
    ],
    [
        Condition::RandomKeypad,
        Condition::NormalKeypad,
        Condition::RandomKeypadShuffledOnce,
        Condition::DrawingTouchscreen,
    ],
];

/// The measured-condition order for one participant:
/// `LATIN_SQUARE[(id - 1) % 4]`.
pub fn condition_order_for(participant: ParticipantId) -> ConditionOrder {
    let row = ((participant.get() - 1) % 4) as usize;
    LATIN_SQUARE[row]
}

/// Fisher–Yates driven by a seeded sine sequence: draw `n` is
/// `frac(sin(seed + n) * 10000)`, one draw per remaining-element step,
/// iterating from the last index down. Same slice order and same seed
/// always produce the same permutation.
pub fn deterministic_shuffle<T>(items: &mut [T], seed: u32) {
    let mut seed = f64::from(seed);
    for remaining in (1..=items.len()).rev() {
        let draw = seeded_unit(seed);
        seed += 1.0;
        let pick = (draw * remaining as f64).floor() as usize;
        items.swap(remaining - 1, pick);
    }
}

/// Uniform-ish value in [0, 1) derived from the seed.
fn seeded_unit(seed: f64) -> f64 {
    let x = seed.sin() * 10000.0;
    x - x.floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> ParticipantId {
        ParticipantId::new(n).expect("valid id")
    }

    #[test]
    fn order_is_a_permutation_of_all_conditions() {
        for n in 1..=20 {
            let order = condition_order_for(id(n));
            for condition in Condition::ALL {
                assert!(order.contains(&condition), "participant {n}");
            }
        }
    }

    #[test]
    fn order_cycles_every_four_participants() {
        for n in 1..=8 {
            assert_eq!(condition_order_for(id(n)), condition_order_for(id(n + 4)));
        }
    }

    #[test]
    fn participant_five_shares_row_zero_with_participant_one() {
        assert_eq!(condition_order_for(id(5)), LATIN_SQUARE[0]);
        assert_eq!(condition_order_for(id(1)), condition_order_for(id(5)));
    }

    #[test]
    fn every_condition_appears_once_per_column() {
        for col in 0..4 {
            let mut column: Vec<Condition> = LATIN_SQUARE.iter().map(|row| row[col]).collect();
            column.sort_by_key(|c| c.wire_name());
            let mut all = Condition::ALL.to_vec();
            all.sort_by_key(|c| c.wire_name());
            assert_eq!(column, all);
        }
    }

    #[test]
    fn shuffle_is_a_bijection() {
        let mut items: Vec<u32> = (0..5).collect();
        deterministic_shuffle(&mut items, 3);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..5).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_is_reproducible() {
        for seed in 1..=12 {
            let mut a: Vec<u32> = (0..5).collect();
            let mut b: Vec<u32> = (0..5).collect();
            deterministic_shuffle(&mut a, seed);
            deterministic_shuffle(&mut b, seed);
            assert_eq!(a, b, "seed {seed}");
        }
    }

    #[test]
    fn shuffle_handles_trivial_slices() {
        let mut empty: Vec<u32> = Vec::new();
        deterministic_shuffle(&mut empty, 1);
        assert!(empty.is_empty());

        let mut single = vec![42];
        deterministic_shuffle(&mut single, 1);
        assert_eq!(single, vec![42]);
    }
}
