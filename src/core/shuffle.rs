//! Fisher–Yates shuffle
//!
//! The random source is injected so callers can seed it for reproducible runs.

use rand::Rng;

/// Return a uniformly shuffled copy of `items`.
///
/// Walks from the last index down to 1, swapping each element with one at a
/// uniformly chosen index in `0..=i`. The input slice is left untouched.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn sorted<T: Ord + Clone>(items: &[T]) -> Vec<T> {
        let mut v = items.to_vec();
        v.sort();
        v
    }

    #[test]
    fn test_shuffle_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let empty: Vec<String> = Vec::new();
        assert!(shuffle(&empty, &mut rng).is_empty());
    }

    #[test]
    fn test_shuffle_single() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(shuffle(&["x"], &mut rng), vec!["x"]);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let items: Vec<u32> = (0..50).collect();
        for _ in 0..100 {
            let out = shuffle(&items, &mut rng);
            assert_eq!(out.len(), items.len());
            assert_eq!(sorted(&out), items);
        }
    }

    #[test]
    fn test_shuffle_keeps_duplicates() {
        let mut rng = StdRng::seed_from_u64(3);
        let items = vec!["a", "b", "a", "c", "a"];
        let out = shuffle(&items, &mut rng);
        assert_eq!(sorted(&out), sorted(&items));
    }

    #[test]
    fn test_shuffle_does_not_mutate_input() {
        let mut rng = StdRng::seed_from_u64(11);
        let items = vec![1, 2, 3, 4, 5];
        let _ = shuffle(&items, &mut rng);
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_shuffle_same_seed_same_order() {
        let items: Vec<u32> = (0..20).collect();
        let a = shuffle(&items, &mut StdRng::seed_from_u64(42));
        let b = shuffle(&items, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn shuffle_is_a_permutation(
            items in prop::collection::vec(any::<String>(), 0..64),
            seed in any::<u64>(),
        ) {
            let before = items.clone();
            let out = shuffle(&items, &mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(&items, &before);
            prop_assert_eq!(sorted(&out), sorted(&items));
        }
    }

    /// Chi-square goodness of fit against the uniform distribution over n!.
    fn chi_square(n: usize, trials: usize, seed: u64) -> (f64, usize) {
        let mut rng = StdRng::seed_from_u64(seed);
        let items: Vec<usize> = (0..n).collect();
        let mut counts: HashMap<Vec<usize>, usize> = HashMap::new();
        for _ in 0..trials {
            *counts.entry(shuffle(&items, &mut rng)).or_default() += 1;
        }
        let orderings: usize = (1..=n).product();
        let expected = trials as f64 / orderings as f64;
        let stat = counts
            .values()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum::<f64>();
        (stat, counts.len())
    }

    #[test]
    fn test_shuffle_uniform_three() {
        let (stat, seen) = chi_square(3, 60_000, 2024);
        assert_eq!(seen, 6);
        // df = 5, p = 0.001
        assert!(stat < 20.52, "chi-square {} too large", stat);
    }

    #[test]
    fn test_shuffle_uniform_four() {
        let (stat, seen) = chi_square(4, 96_000, 99);
        assert_eq!(seen, 24);
        // df = 23, p = 0.001
        assert!(stat < 49.73, "chi-square {} too large", stat);
    }
}
