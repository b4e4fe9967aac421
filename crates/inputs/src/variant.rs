// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Declarative description of each compiled circuit: the JSON keys it reads and
//! the order in which its inputs hash absorbs values.

use crate::error::{InputsError, Result};
use ballot_crypto::HashPrimitive;
use std::fmt;

/// A named circuit input. Doubles as an inputs-hash slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputSlot {
    Fields,
    MaxCount,
    ForceUniqueness,
    MaxValue,
    MinValue,
    MaxTotalCost,
    MinTotalCost,
    CostExp,
    CostFromWeight,
    Weight,
    PublicKey,
    K,
    Msg,
    C1,
    C2,
    CipherFields,
    Nullifier,
    Commitment,
    Secret,
    Address,
    ProcessId,
    VoteId,
    InputsHash,
}

impl InputSlot {
    /// JSON key the circuit expects.
    pub fn key(&self) -> &'static str {
        match self {
            InputSlot::Fields => "fields",
            InputSlot::MaxCount => "max_count",
            InputSlot::ForceUniqueness => "force_uniqueness",
            InputSlot::MaxValue => "max_value",
            InputSlot::MinValue => "min_value",
            InputSlot::MaxTotalCost => "max_total_cost",
            InputSlot::MinTotalCost => "min_total_cost",
            InputSlot::CostExp => "cost_exp",
            InputSlot::CostFromWeight => "cost_from_weight",
            InputSlot::Weight => "weight",
            InputSlot::PublicKey => "pk",
            InputSlot::K => "k",
            InputSlot::Msg => "msg",
            InputSlot::C1 => "c1",
            InputSlot::C2 => "c2",
            InputSlot::CipherFields => "cipherfields",
            InputSlot::Nullifier => "nullifier",
            InputSlot::Commitment => "commitment",
            InputSlot::Secret => "secret",
            InputSlot::Address => "address",
            InputSlot::ProcessId => "process_id",
            InputSlot::VoteId => "vote_id",
            InputSlot::InputsHash => "inputs_hash",
        }
    }

    /// Number of scalars this slot contributes to a flattened hash vector.
    pub fn width(&self, n_fields: usize) -> usize {
        match self {
            InputSlot::Fields => n_fields,
            InputSlot::PublicKey | InputSlot::C1 | InputSlot::C2 => 2,
            InputSlot::CipherFields => 4 * n_fields,
            _ => 1,
        }
    }
}

impl fmt::Display for InputSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

use InputSlot::*;

const CHECKER_KEYS: &[InputSlot] = &[
    Fields,
    MaxCount,
    ForceUniqueness,
    MaxValue,
    MinValue,
    MaxTotalCost,
    MinTotalCost,
    CostExp,
    CostFromWeight,
    Weight,
];

const CIPHER_KEYS: &[InputSlot] = &[PublicKey, K, Msg, C1, C2];

const PROOF_KEYS: &[InputSlot] = &[
    Fields,
    MaxCount,
    ForceUniqueness,
    MaxValue,
    MinValue,
    MaxTotalCost,
    MinTotalCost,
    CostExp,
    CostFromWeight,
    Weight,
    PublicKey,
    K,
    CipherFields,
    Nullifier,
    Commitment,
    Secret,
];

const HASHED_PROOF_KEYS: &[InputSlot] = &[
    Fields,
    MaxCount,
    ForceUniqueness,
    MaxValue,
    MinValue,
    MaxTotalCost,
    MinTotalCost,
    CostExp,
    CostFromWeight,
    Weight,
    PublicKey,
    K,
    CipherFields,
    Nullifier,
    Commitment,
    Secret,
    InputsHash,
];

const VOTE_ID_KEYS: &[InputSlot] = &[
    Fields,
    MaxCount,
    ForceUniqueness,
    MaxValue,
    MinValue,
    MaxTotalCost,
    MinTotalCost,
    CostExp,
    CostFromWeight,
    Weight,
    PublicKey,
    K,
    CipherFields,
    ProcessId,
    Address,
    VoteId,
    InputsHash,
];

const MIMC_HASH_LAYOUT: &[InputSlot] = &[
    MaxCount,
    ForceUniqueness,
    MaxValue,
    MinValue,
    MaxTotalCost,
    MinTotalCost,
    CostExp,
    CostFromWeight,
    Weight,
    PublicKey,
    K,
    Nullifier,
    Commitment,
    Secret,
    Fields,
    CipherFields,
];

const POSEIDON_HASH_LAYOUT: &[InputSlot] = &[
    MaxCount,
    ForceUniqueness,
    MaxValue,
    MinValue,
    MaxTotalCost,
    MinTotalCost,
    CostExp,
    CostFromWeight,
    Weight,
    PublicKey,
    Nullifier,
    Commitment,
    CipherFields,
];

// public parameters, key material, ciphertexts, identity tags, then weight
const VOTE_ID_HASH_LAYOUT: &[InputSlot] = &[
    MaxCount,
    ForceUniqueness,
    MaxValue,
    MinValue,
    MaxTotalCost,
    MinTotalCost,
    CostExp,
    CostFromWeight,
    PublicKey,
    CipherFields,
    ProcessId,
    Address,
    VoteId,
    Weight,
];

/// Width of the ballot in every shipped circuit.
pub const DEFAULT_N_FIELDS: usize = 8;

/// A compiled circuit and the shape of its inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CircuitVariant {
    pub name: &'static str,
    /// Ballot width `N`.
    pub n_fields: usize,
    /// JSON keys in emission order.
    pub keys: &'static [InputSlot],
    /// Primitive for `inputs_hash`, if the circuit checks one.
    pub inputs_hash: Option<HashPrimitive>,
    /// Primitive for commitment, nullifier and vote id.
    pub tag_hash: Option<HashPrimitive>,
    /// Ordered values absorbed by the inputs hash.
    pub hash_layout: &'static [InputSlot],
}

impl CircuitVariant {
    pub const BALLOT_CHECKER: CircuitVariant = CircuitVariant {
        name: "ballot_checker",
        n_fields: DEFAULT_N_FIELDS,
        keys: CHECKER_KEYS,
        inputs_hash: None,
        tag_hash: None,
        hash_layout: &[],
    };

    pub const BALLOT_CIPHER: CircuitVariant = CircuitVariant {
        name: "ballot_cipher",
        n_fields: 1,
        keys: CIPHER_KEYS,
        inputs_hash: None,
        tag_hash: None,
        hash_layout: &[],
    };

    pub const BALLOT_PROOF: CircuitVariant = CircuitVariant {
        name: "ballot_proof",
        n_fields: DEFAULT_N_FIELDS,
        keys: PROOF_KEYS,
        inputs_hash: None,
        tag_hash: Some(HashPrimitive::Poseidon),
        hash_layout: &[],
    };

    pub const BALLOT_PROOF_MIMC: CircuitVariant = CircuitVariant {
        name: "ballot_proof_mimc",
        n_fields: DEFAULT_N_FIELDS,
        keys: HASHED_PROOF_KEYS,
        inputs_hash: Some(HashPrimitive::Mimc7),
        tag_hash: Some(HashPrimitive::Poseidon),
        hash_layout: MIMC_HASH_LAYOUT,
    };

    pub const BALLOT_PROOF_POSEIDON: CircuitVariant = CircuitVariant {
        name: "ballot_proof_poseidon",
        n_fields: DEFAULT_N_FIELDS,
        keys: HASHED_PROOF_KEYS,
        inputs_hash: Some(HashPrimitive::Poseidon),
        tag_hash: Some(HashPrimitive::Poseidon),
        hash_layout: POSEIDON_HASH_LAYOUT,
    };

    pub const BALLOT_PROOF_VOTE_ID: CircuitVariant = CircuitVariant {
        name: "ballot_proof_vote_id",
        n_fields: DEFAULT_N_FIELDS,
        keys: VOTE_ID_KEYS,
        inputs_hash: Some(HashPrimitive::Poseidon),
        tag_hash: Some(HashPrimitive::Mimc7),
        hash_layout: VOTE_ID_HASH_LAYOUT,
    };

    pub fn all() -> &'static [CircuitVariant] {
        &[
            Self::BALLOT_CHECKER,
            Self::BALLOT_CIPHER,
            Self::BALLOT_PROOF,
            Self::BALLOT_PROOF_MIMC,
            Self::BALLOT_PROOF_POSEIDON,
            Self::BALLOT_PROOF_VOTE_ID,
        ]
    }

    pub fn by_name(name: &str) -> Result<CircuitVariant> {
        Self::all()
            .iter()
            .find(|v| v.name == name)
            .copied()
            .ok_or_else(|| InputsError::UnknownVariant(name.to_string()))
    }

    /// Same circuit family compiled for a different ballot width.
    pub fn with_n_fields(mut self, n_fields: usize) -> Self {
        self.n_fields = n_fields;
        self
    }

    pub fn uses(&self, slot: InputSlot) -> bool {
        self.keys.contains(&slot) || self.hash_layout.contains(&slot)
    }

    /// Length of the flattened inputs-hash vector.
    pub fn hash_len(&self) -> usize {
        self.hash_layout
            .iter()
            .map(|slot| slot.width(self.n_fields))
            .sum()
    }
}

impl fmt::Display for CircuitVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
