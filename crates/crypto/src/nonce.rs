// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::field::Scalar;
use crate::hash::mimc7;
use ark_ff::Zero;
use tracing::debug;

/// Per-field encryption nonces: `H(k), H(H(k)), ...` with `H` the zero-keyed
/// MiMC7 multi-hash of a single element.
///
/// The chain is infinite; take as many nonces as the ballot has slots.
#[derive(Clone, Debug)]
pub struct NonceChain {
    last: Scalar,
}

impl NonceChain {
    pub fn new(k: Scalar) -> Self {
        Self { last: k }
    }
}

impl Iterator for NonceChain {
    type Item = Scalar;

    fn next(&mut self) -> Option<Scalar> {
        // one-element sponge with a zero key: x + E_0(x)
        let next = self.last + mimc7(&self.last, &Scalar::zero());
        self.last = next;
        Some(next)
    }
}

pub fn derive_chain(k: Scalar, n: usize) -> Vec<Scalar> {
    debug!(n, "deriving nonce chain");
    NonceChain::new(k).take(n).collect()
}
