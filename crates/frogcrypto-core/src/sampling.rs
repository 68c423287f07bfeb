// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weighted random selection and attribute rolls.
//!
//! Selection walks the candidates in the given order accumulating weights,
//! draws a uniform value in `[0, total)`, and returns the first candidate
//! whose cumulative weight exceeds the draw. Callers are responsible for a
//! stable candidate order.

use rand::Rng;

use crate::types::AttributeRange;

/// Clamp a raw weight to something usable: negative, NaN, and infinite
/// weights count as zero.
fn effective_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// Pick the index of one candidate with probability proportional to its weight.
///
/// Returns `None` when there are no candidates or every weight is zero.
/// Zero-weight candidates are never returned.
pub fn pick_weighted<T, F, R>(candidates: &[T], weight: F, rng: &mut R) -> Option<usize>
where
    F: Fn(&T) -> f64,
    R: Rng + ?Sized,
{
    let weights: Vec<f64> = candidates.iter().map(|c| effective_weight(weight(c))).collect();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return None;
    }

    let draw = rng.gen_range(0.0..total);
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (index, w) in weights.iter().enumerate() {
        if *w <= 0.0 {
            continue;
        }
        cumulative += w;
        last_positive = Some(index);
        if cumulative > draw {
            return Some(index);
        }
    }
    // Floating point summation can leave `cumulative` a hair below `draw`.
    last_positive
}

/// Roll an attribute uniformly from its inclusive range.
pub fn roll_attribute<R: Rng + ?Sized>(range: AttributeRange, rng: &mut R) -> Option<i64> {
    if range.min > range.max {
        return None;
    }
    Some(rng.gen_range(range.min..=range.max))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn empty_candidates_yield_none() {
        let mut rng = StdRng::seed_from_u64(7);
        let items: Vec<f64> = vec![];
        assert_eq!(pick_weighted(&items, |w| *w, &mut rng), None);
    }

    #[test]
    fn all_zero_weights_yield_none() {
        let mut rng = StdRng::seed_from_u64(7);
        let items = vec![0.0, 0.0, -3.0, f64::NAN];
        assert_eq!(pick_weighted(&items, |w| *w, &mut rng), None);
    }

    #[test]
    fn zero_weight_is_never_selected() {
        let mut rng = StdRng::seed_from_u64(42);
        let items = vec![0.0, 1.0, 0.0, 2.0, 0.0];
        for _ in 0..20_000 {
            let index = pick_weighted(&items, |w| *w, &mut rng).unwrap();
            assert!(index == 1 || index == 3, "picked zero-weight index {index}");
        }
    }

    #[test]
    fn three_to_one_weights_converge_to_seventy_five_percent() {
        let mut rng = StdRng::seed_from_u64(1234);
        let items = vec![("A", 3.0), ("B", 1.0)];
        let draws = 40_000;
        let a_count = (0..draws)
            .filter(|_| pick_weighted(&items, |(_, w)| *w, &mut rng) == Some(0))
            .count();
        let ratio = a_count as f64 / draws as f64;
        assert!((ratio - 0.75).abs() < 0.02, "A ratio was {ratio}");
    }

    #[test]
    fn single_positive_candidate_always_wins() {
        let mut rng = StdRng::seed_from_u64(9);
        let items = vec![0.0, 0.5];
        for _ in 0..1000 {
            assert_eq!(pick_weighted(&items, |w| *w, &mut rng), Some(1));
        }
    }

    #[test]
    fn inverted_range_rolls_nothing() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(roll_attribute(AttributeRange::new(5, 4), &mut rng), None);
    }

    #[test]
    fn degenerate_range_rolls_its_value() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(roll_attribute(AttributeRange::new(4, 4), &mut rng), Some(4));
    }

    proptest! {
        #[test]
        fn rolled_attributes_stay_in_range(min in -1000i64..1000, span in 0i64..1000, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let range = AttributeRange::new(min, min + span);
            let value = roll_attribute(range, &mut rng).unwrap();
            prop_assert!(range.contains(value));
        }

        #[test]
        fn picked_index_always_has_positive_weight(
            weights in proptest::collection::vec(0.0f64..10.0, 1..20),
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            match pick_weighted(&weights, |w| *w, &mut rng) {
                Some(index) => prop_assert!(weights[index] > 0.0),
                None => prop_assert!(weights.iter().all(|w| *w <= 0.0)),
            }
        }
    }
}
