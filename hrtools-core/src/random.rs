//! Randomization primitives shared by the draw and grouping engines.

use crate::error::{HrError, Result};
use rand::Rng;

/// Uniformly random permutation of `items` using the thread-local RNG.
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::thread_rng())
}

/// Fisher-Yates shuffle. The input is left untouched.
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Split into contiguous runs of at most `size` elements, preserving order.
pub fn chunk<T: Clone>(items: &[T], size: usize) -> Result<Vec<Vec<T>>> {
    if size == 0 {
        return Err(HrError::invalid_input("Chunk size must be at least 1"));
    }

    Ok(items.chunks(size).map(|c| c.to_vec()).collect())
}

/// Uniform index in `0..len`, or `None` when there is nothing to pick from.
pub fn pick_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(rng.gen_range(0..len))
    }
}
