// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::error::HashError;
use crate::field::Scalar;
use crate::hash::FieldHasher;
use tracing::debug;

/// Inputs per chunk in the aggregated hash.
pub const CHUNK_SIZE: usize = 16;

/// At most 16 chunks of 16, so the chunk hashes fit in a single final call.
pub const MAX_INPUTS: usize = CHUNK_SIZE * CHUNK_SIZE;

pub(crate) fn check_bounds(len: usize, max: usize) -> Result<(), HashError> {
    if len == 0 {
        return Err(HashError::NoInputs);
    }
    if len > max {
        return Err(HashError::TooManyInputs { len, max });
    }
    Ok(())
}

/// Hashes up to 256 scalars with a hasher limited to 16 inputs per call.
///
/// Inputs are split into consecutive chunks of 16 (the last may be shorter but is
/// never empty). A single chunk returns its own hash, otherwise the ordered chunk
/// hashes are hashed once more.
pub fn multi_hash<H: FieldHasher + ?Sized>(
    hasher: &H,
    inputs: &[Scalar],
) -> Result<Scalar, HashError> {
    check_bounds(inputs.len(), MAX_INPUTS)?;

    let chunk_hashes = inputs
        .chunks(CHUNK_SIZE)
        .map(|chunk| hasher.hash(chunk))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        hasher = hasher.name(),
        inputs = inputs.len(),
        chunks = chunk_hashes.len(),
        "aggregating hash inputs"
    );

    match chunk_hashes.as_slice() {
        [single] => Ok(*single),
        _ => hasher.hash(&chunk_hashes),
    }
}
