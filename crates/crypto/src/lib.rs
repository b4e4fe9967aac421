// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Cryptographic building blocks for ballot proofs: Baby Jubjub keys, exponential
//! ElGamal with a deterministic nonce chain, identity tags and the circuit hashes.

mod babyjubjub;
mod cipher;
mod error;
mod field;
mod hash;
mod multihash;
mod nonce;
mod sampler;
mod tags;

pub use babyjubjub::{
    generate_key_pair, random_k, BabyJubJubAffine, BabyJubJubConfig, BabyJubJubProjective,
    CurvePoint, KeyPair,
};
pub use cipher::{cipher_ballot, encrypt, CipherBallot, Ciphertext};
pub use error::{CryptoError, HashError, Result};
pub use field::{
    bytes_to_field, from_decimal, from_subgroup, hex_to_field, pad_to, scalars_from_u64,
    subgroup_to_decimal, to_decimal, to_subgroup_scalar, truncate_160, Scalar, SubgroupScalar,
    VOTE_ID_BITS,
};
pub use hash::{
    inputs_hash, mimc7, FieldHasher, HashPrimitive, Mimc7Hasher, PoseidonHasher, MIMC7_ROUNDS,
    POSEIDON_MAX_ARITY,
};
pub use multihash::{multi_hash, CHUNK_SIZE, MAX_INPUTS};
pub use nonce::{derive_chain, NonceChain};
pub use sampler::{sample_ballot_fields, sample_ballot_fields_with};
pub use tags::{IdentityTagger, IdentityTags};
