//! Bootstrap resampling and out-of-bag hold-out.

use crate::core::error::{CartError, Result};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws `n` row indices from `0..len` with replacement.
pub fn bootstrap_indices(len: usize, n: usize, seed: u64) -> Result<Vec<usize>> {
    crate::ensure!(len > 0, CartError::empty_input("cannot bootstrap from zero rows"));
    let mut rng = StdRng::seed_from_u64(seed);
    Ok((0..n).map(|_| rng.gen_range(0..len)).collect())
}

/// Draws `n` rows with replacement. The same seed always yields the same
/// sample.
pub fn bootstrap_sample<R: Clone>(rows: &[R], n: usize, seed: u64) -> Result<Vec<R>> {
    Ok(bootstrap_indices(rows.len(), n, seed)?
        .into_iter()
        .map(|i| rows[i].clone())
        .collect())
}

/// Bootstrap training set of `fraction * rows.len()` rows plus the
/// out-of-bag rows that were never drawn, as `(train, test)`.
pub fn train_test_split<R: Clone>(
    rows: &[R],
    fraction: f64,
    seed: u64,
) -> Result<(Vec<R>, Vec<R>)> {
    crate::ensure!(
        fraction > 0.0 && fraction <= 1.0,
        CartError::invalid_parameter("fraction", fraction.to_string(), "must be in (0, 1]")
    );
    let n = (rows.len() as f64 * fraction).floor() as usize;
    let indices = bootstrap_indices(rows.len(), n, seed)?;

    let mut drawn = vec![false; rows.len()];
    for &i in &indices {
        drawn[i] = true;
    }
    let train = indices.iter().map(|&i| rows[i].clone()).collect();
    let test: Vec<R> = rows
        .iter()
        .zip(&drawn)
        .filter(|&(_, &was_drawn)| !was_drawn)
        .map(|(row, _)| row.clone())
        .collect();

    debug!(
        "bootstrap drew {} of {} rows, {} out of bag",
        n,
        rows.len(),
        test.len()
    );
    Ok((train, test))
}
