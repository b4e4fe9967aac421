// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! iden3 MiMC7: 91 rounds of `x ↦ (x + k + c_i)^7` with keccak-derived constants.

use super::FieldHasher;
use crate::error::HashError;
use crate::field::Scalar;
use crate::multihash::{check_bounds, MAX_INPUTS};
use ark_ff::{Field, PrimeField, Zero};
use num_bigint::BigUint;
use sha3::{Digest, Keccak256};
use std::sync::OnceLock;

pub const MIMC7_ROUNDS: usize = 91;

const SEED: &[u8] = b"mimc";
const NAME: &str = "mimc7";

fn keccak(bytes: &[u8]) -> Vec<u8> {
    let mut hasher = Keccak256::new();
    hasher.update(bytes);
    hasher.finalize().to_vec()
}

/// `c_0 = 0`, then each constant is the keccak of the previous (unreduced) digest,
/// reduced into the field.
fn round_constants() -> Vec<Scalar> {
    let mut constants = Vec::with_capacity(MIMC7_ROUNDS);
    constants.push(Scalar::zero());
    let mut c = BigUint::from_bytes_be(&keccak(SEED));
    for _ in 1..MIMC7_ROUNDS {
        c = BigUint::from_bytes_be(&keccak(&c.to_bytes_be()));
        constants.push(Scalar::from_be_bytes_mod_order(&c.to_bytes_be()));
    }
    constants
}

static CONSTANTS: OnceLock<Vec<Scalar>> = OnceLock::new();

fn constants() -> &'static [Scalar] {
    CONSTANTS.get_or_init(round_constants)
}

fn permute(constants: &[Scalar], x: Scalar, k: Scalar) -> Scalar {
    let mut r = Scalar::zero();
    for (i, c) in constants.iter().enumerate() {
        let t = if i == 0 { x + k } else { r + k + c };
        r = t.pow([7u64]);
    }
    r + k
}

/// Single MiMC7 permutation of `x` under key `k` with the default constants.
pub fn mimc7(x: &Scalar, k: &Scalar) -> Scalar {
    permute(constants(), *x, *k)
}

/// MiMC7 in Miyaguchi-Preneel multi-hash mode with a zero key.
pub struct Mimc7Hasher {
    constants: &'static [Scalar],
}

impl Mimc7Hasher {
    pub fn new() -> Self {
        Self {
            constants: constants(),
        }
    }

    fn sponge(&self, inputs: &[Scalar], key: Scalar) -> Scalar {
        inputs.iter().fold(key, |r, x| {
            let h = permute(self.constants, *x, r);
            r + x + h
        })
    }
}

impl Default for Mimc7Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldHasher for Mimc7Hasher {
    fn name(&self) -> &'static str {
        NAME
    }

    fn max_arity(&self) -> Option<usize> {
        None
    }

    fn hash(&self, inputs: &[Scalar]) -> Result<Scalar, HashError> {
        if inputs.is_empty() {
            return Err(HashError::NoInputs);
        }
        Ok(self.sponge(inputs, Scalar::zero()))
    }

    fn aggregate(&self, inputs: &[Scalar]) -> Result<Scalar, HashError> {
        check_bounds(inputs.len(), MAX_INPUTS)?;
        self.hash(inputs)
    }
}
