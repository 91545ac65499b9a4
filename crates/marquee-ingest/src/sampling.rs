//! Random subset selection for browse results.
//!
//! Not suitable for anything security-sensitive; the goal is UI variety.

use rand::seq::SliceRandom;
use rand::Rng;

/// Draw `count` items without replacement using the thread-local generator.
pub fn sample<T: Clone>(items: &[T], count: usize) -> Vec<T> {
    sample_with(items, count, &mut rand::thread_rng())
}

/// Draw `count` items without replacement from `rng`.
///
/// The whole input is Fisher–Yates shuffled before truncation, so every
/// ordering is equally likely. `count >= items.len()` returns everything.
pub fn sample_with<T: Clone, R: Rng + ?Sized>(items: &[T], count: usize, rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count);
    shuffled
}
