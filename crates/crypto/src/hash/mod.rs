// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Field hash primitives usable by the aggregator and the identity tagger.

mod mimc7;
mod poseidon;

pub use mimc7::{mimc7, Mimc7Hasher, MIMC7_ROUNDS};
pub use poseidon::{PoseidonHasher, POSEIDON_MAX_ARITY};

use crate::error::HashError;
use crate::field::Scalar;
use crate::multihash::multi_hash;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A hash over circuit scalars.
pub trait FieldHasher: Send + Sync {
    fn name(&self) -> &'static str;

    /// Maximum number of inputs a single [`FieldHasher::hash`] call accepts, if bounded.
    fn max_arity(&self) -> Option<usize>;

    fn hash(&self, inputs: &[Scalar]) -> Result<Scalar, HashError>;

    /// Hashes an arbitrarily long (bounded) vector into a single scalar.
    ///
    /// Defaults to the 16-ary chunked aggregation.
    fn aggregate(&self, inputs: &[Scalar]) -> Result<Scalar, HashError> {
        multi_hash(self, inputs)
    }
}

impl<H: FieldHasher + ?Sized> FieldHasher for &H {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn max_arity(&self) -> Option<usize> {
        (**self).max_arity()
    }

    fn hash(&self, inputs: &[Scalar]) -> Result<Scalar, HashError> {
        (**self).hash(inputs)
    }

    fn aggregate(&self, inputs: &[Scalar]) -> Result<Scalar, HashError> {
        (**self).aggregate(inputs)
    }
}

/// Selects a hash primitive by name, e.g. from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashPrimitive {
    Poseidon,
    Mimc7,
}

static POSEIDON: OnceLock<PoseidonHasher> = OnceLock::new();
static MIMC7: OnceLock<Mimc7Hasher> = OnceLock::new();

impl HashPrimitive {
    /// Shared hasher instance. Round constants are built once per process.
    pub fn hasher(&self) -> &'static dyn FieldHasher {
        match self {
            HashPrimitive::Poseidon => POSEIDON.get_or_init(PoseidonHasher::new),
            HashPrimitive::Mimc7 => MIMC7.get_or_init(Mimc7Hasher::new),
        }
    }
}

impl fmt::Display for HashPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashPrimitive::Poseidon => write!(f, "poseidon"),
            HashPrimitive::Mimc7 => write!(f, "mimc7"),
        }
    }
}

/// Consistency hash as the circuit recomputes it.
///
/// Poseidon goes through the chunked aggregation. MiMC7 has no arity limit and
/// hashes the whole vector in one sponge, under the same length bounds.
pub fn inputs_hash(primitive: HashPrimitive, inputs: &[Scalar]) -> Result<Scalar, HashError> {
    primitive.hasher().aggregate(inputs)
}
