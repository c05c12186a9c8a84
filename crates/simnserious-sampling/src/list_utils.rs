//! List helpers.

use crate::random::RandomSource;

/// Shuffle `list` in place with the Fisher–Yates algorithm.
pub fn shuffle<T>(rng: &mut impl RandomSource, list: &mut [T]) {
    let mut i = list.len();
    while i > 1 {
        i -= 1;
        // Swap with an element at or below i.
        let j = rng.uniform_index(i + 1);
        list.swap(i, j);
    }
}

/// Elements of `lhs` that do not appear in `rhs`, in their original order.
pub fn negation<T: PartialEq + Clone>(lhs: &[T], rhs: &[T]) -> Vec<T> {
    lhs.iter()
        .filter(|item| !rhs.contains(item))
        .cloned()
        .collect()
}
