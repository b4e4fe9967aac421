// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use super::FieldHasher;
use crate::error::HashError;
use crate::field::{to_decimal, Scalar};
use ark_ff::PrimeField;
use ff::{PrimeField as _, PrimeFieldRepr};
use poseidon_rs::{Fr as PoseidonFr, Poseidon};

/// Widest Poseidon instance with circomlib round constants.
pub const POSEIDON_MAX_ARITY: usize = 16;

const NAME: &str = "poseidon";

/// circomlib Poseidon over BN254, 1 to 16 inputs.
pub struct PoseidonHasher {
    inner: Poseidon,
}

impl PoseidonHasher {
    pub fn new() -> Self {
        Self {
            inner: Poseidon::new(),
        }
    }
}

impl Default for PoseidonHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn primitive_error(reason: impl Into<String>) -> HashError {
    HashError::Primitive {
        hasher: NAME,
        reason: reason.into(),
    }
}

fn to_poseidon_fr(value: &Scalar) -> Result<PoseidonFr, HashError> {
    let decimal = to_decimal(value);
    PoseidonFr::from_str(&decimal)
        .ok_or_else(|| primitive_error(format!("cannot convert {decimal}")))
}

fn from_poseidon_fr(value: &PoseidonFr) -> Result<Scalar, HashError> {
    let mut bytes = Vec::with_capacity(32);
    value
        .into_repr()
        .write_be(&mut bytes)
        .map_err(|e| primitive_error(e.to_string()))?;
    Ok(Scalar::from_be_bytes_mod_order(&bytes))
}

impl FieldHasher for PoseidonHasher {
    fn name(&self) -> &'static str {
        NAME
    }

    fn max_arity(&self) -> Option<usize> {
        Some(POSEIDON_MAX_ARITY)
    }

    fn hash(&self, inputs: &[Scalar]) -> Result<Scalar, HashError> {
        if inputs.is_empty() {
            return Err(HashError::NoInputs);
        }
        if inputs.len() > POSEIDON_MAX_ARITY {
            return Err(HashError::ArityExceeded {
                hasher: NAME,
                len: inputs.len(),
                max: POSEIDON_MAX_ARITY,
            });
        }
        let elements = inputs
            .iter()
            .map(to_poseidon_fr)
            .collect::<Result<Vec<_>, _>>()?;
        let digest = self.inner.hash(elements).map_err(primitive_error)?;
        from_poseidon_fr(&digest)
    }
}
