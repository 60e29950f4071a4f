//! Unbiased shuffling of question lists.

use rand::Rng;
use rand::seq::SliceRandom;

/// Returns a uniformly shuffled copy of `items` using the thread-local RNG.
///
/// The input slice is left untouched.
#[must_use]
pub fn shuffled<T: Clone>(items: &[T]) -> Vec<T> {
    shuffled_with(items, &mut rand::rng())
}

/// Returns a uniformly shuffled copy of `items` using the given RNG.
///
/// `SliceRandom::shuffle` is a Fisher–Yates shuffle, so every permutation is equally likely.
/// Slices of length 0 or 1 come back unchanged.
#[must_use]
pub fn shuffled_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    if out.len() > 1 {
        out.shuffle(rng);
    }
    out
}
