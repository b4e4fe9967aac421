// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::error::{CryptoError, Result};
use rand::Rng;
use std::collections::HashSet;

/// Draws `n` ballot values uniformly from `[min, max)`.
pub fn sample_ballot_fields(n: usize, min: u64, max: u64, unique: bool) -> Result<Vec<u64>> {
    sample_ballot_fields_with(&mut rand::thread_rng(), n, min, max, unique)
}

/// Same as [`sample_ballot_fields`] with a caller-provided generator.
///
/// With `unique`, values are rejection-sampled until one not yet drawn appears.
/// The range is checked up front so this always terminates.
pub fn sample_ballot_fields_with<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    min: u64,
    max: u64,
    unique: bool,
) -> Result<Vec<u64>> {
    if max <= min {
        return Err(CryptoError::EmptyRange { min, max });
    }
    let available = max - min;
    if unique && (n as u64) > available {
        return Err(CryptoError::InsufficientRange {
            requested: n,
            available,
        });
    }

    let mut seen = HashSet::with_capacity(n);
    let mut values = Vec::with_capacity(n);
    while values.len() < n {
        let value = rng.gen_range(min..max);
        if unique && !seen.insert(value) {
            continue;
        }
        values.push(value);
    }
    Ok(values)
}
