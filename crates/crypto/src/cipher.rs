// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Exponential ElGamal over Baby Jubjub.

use crate::babyjubjub::CurvePoint;
use crate::error::{CryptoError, Result};
use crate::field::Scalar;
use crate::nonce::NonceChain;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ciphertext {
    pub c1: CurvePoint,
    pub c2: CurvePoint,
}

impl Ciphertext {
    /// Placeholder for unused ballot slots: `((0,0),(0,0))`, not the curve identity.
    pub fn empty() -> Self {
        Self {
            c1: CurvePoint::zero_pair(),
            c2: CurvePoint::zero_pair(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    /// `[c1.x, c1.y, c2.x, c2.y]`
    pub fn coordinates(&self) -> [Scalar; 4] {
        [self.c1.x, self.c1.y, self.c2.x, self.c2.y]
    }

    /// `[[c1x, c1y], [c2x, c2y]]` as decimal strings.
    pub fn to_strings(&self) -> [[String; 2]; 2] {
        [self.c1.to_strings(), self.c2.to_strings()]
    }
}

/// `c1 = nonce·B`, `c2 = message·B + nonce·public`.
pub fn encrypt(message: &Scalar, public: &CurvePoint, nonce: &Scalar) -> Ciphertext {
    let base = CurvePoint::base();
    let c1 = base.mul_scalar(nonce);
    let shared = public.mul_scalar(nonce);
    let encoded = base.mul_scalar(message);
    Ciphertext {
        c1,
        c2: encoded.add(&shared),
    }
}

/// An encrypted ballot of fixed width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CipherBallot {
    /// One ciphertext per circuit slot.
    pub ciphertexts: Vec<Ciphertext>,
    /// `4·n` coordinates in slot order.
    pub flat: Vec<Scalar>,
}

impl CipherBallot {
    pub fn to_strings(&self) -> Vec<[[String; 2]; 2]> {
        self.ciphertexts.iter().map(Ciphertext::to_strings).collect()
    }
}

/// Encrypts `fields` into `n` slots, slot `i` under the `i`-th nonce derived from `k`.
///
/// Padding slots still consume a nonce so slot `i` always pairs with `nonce_i`.
pub fn cipher_ballot(
    fields: &[Scalar],
    n: usize,
    public: &CurvePoint,
    k: &Scalar,
) -> Result<CipherBallot> {
    if fields.len() > n {
        return Err(CryptoError::TooManyFields {
            fields: fields.len(),
            slots: n,
        });
    }

    let ciphertexts: Vec<Ciphertext> = NonceChain::new(*k)
        .take(n)
        .enumerate()
        .map(|(i, nonce)| match fields.get(i) {
            Some(field) => encrypt(field, public, &nonce),
            None => Ciphertext::empty(),
        })
        .collect();

    let flat = ciphertexts.iter().flat_map(Ciphertext::coordinates).collect();

    debug!(fields = fields.len(), slots = n, "encrypted ballot");
    Ok(CipherBallot { ciphertexts, flat })
}
