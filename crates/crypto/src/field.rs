// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Scalar types and conversions shared by every stage of the ballot pipeline.
//!
//! Two prime fields are in play:
//! - [`Scalar`]: the BN254 scalar field. Circuit signals, hash inputs/outputs and
//!   Baby Jubjub coordinates all live here.
//! - [`SubgroupScalar`]: integers modulo the order of the Baby Jubjub prime subgroup.
//!   Private keys and the per-ballot nonce seed `k` live here.

use crate::error::{CryptoError, Result};
use ark_ff::{BigInteger, PrimeField, Zero};
use num_bigint::BigUint;
use num_traits::One;
use std::str::FromStr;

/// Element of the BN254 scalar field (the circuit field).
pub type Scalar = ark_bn254::Fr;

/// Element of the Baby Jubjub prime-order subgroup scalar field.
pub type SubgroupScalar = ark_ed_on_bn254::Fr;

/// Number of low bits kept by [`truncate_160`].
pub const VOTE_ID_BITS: u64 = 160;

/// Formats a scalar as the decimal string circom expects.
pub fn to_decimal(value: &Scalar) -> String {
    let big: BigUint = (*value).into();
    big.to_string()
}

/// Formats a subgroup scalar as a decimal string.
pub fn subgroup_to_decimal(value: &SubgroupScalar) -> String {
    let big: BigUint = (*value).into();
    big.to_string()
}

/// Parses a canonical decimal string into a [`Scalar`].
///
/// Values greater than or equal to the field modulus are rejected rather than
/// silently reduced.
pub fn from_decimal(value: &str) -> Result<Scalar> {
    let big = BigUint::from_str(value.trim())
        .map_err(|_| CryptoError::InvalidScalar(value.to_string()))?;
    let modulus: BigUint = Scalar::MODULUS.into();
    if big >= modulus {
        return Err(CryptoError::InvalidScalar(value.to_string()));
    }
    Ok(Scalar::from(big))
}

/// Interprets big-endian bytes as an unsigned integer reduced into the circuit field.
pub fn bytes_to_field(bytes: &[u8]) -> Scalar {
    Scalar::from_be_bytes_mod_order(bytes)
}

/// Decodes a hex string (with or without `0x`) and reduces it into the circuit field.
pub fn hex_to_field(value: &str) -> Result<Scalar> {
    let trimmed = value.trim_start_matches("0x").trim_start_matches("0X");
    let padded = if trimmed.len() % 2 == 1 {
        format!("0{trimmed}")
    } else {
        trimmed.to_string()
    };
    let bytes = hex::decode(&padded).map_err(|e| CryptoError::InvalidHex {
        input: value.to_string(),
        reason: e.to_string(),
    })?;
    Ok(bytes_to_field(&bytes))
}

/// Reduces a circuit scalar modulo the Baby Jubjub subgroup order.
pub fn to_subgroup_scalar(value: &Scalar) -> SubgroupScalar {
    SubgroupScalar::from_le_bytes_mod_order(&value.into_bigint().to_bytes_le())
}

/// Lifts a subgroup scalar into the circuit field. The subgroup order is smaller
/// than the BN254 modulus so the integer value is preserved.
pub fn from_subgroup(value: &SubgroupScalar) -> Scalar {
    Scalar::from_le_bytes_mod_order(&value.into_bigint().to_bytes_le())
}

/// Keeps the low 160 bits of `value`.
pub fn truncate_160(value: &Scalar) -> Scalar {
    let big: BigUint = (*value).into();
    let mask = (BigUint::one() << VOTE_ID_BITS) - BigUint::one();
    Scalar::from(big & mask)
}

/// Copies `values` into a vector of exactly `n` positions, zero-filling the tail.
/// Extra values beyond `n` are dropped.
pub fn pad_to(values: &[Scalar], n: usize) -> Vec<Scalar> {
    (0..n)
        .map(|i| values.get(i).copied().unwrap_or_else(Scalar::zero))
        .collect()
}

/// Lifts plain integers into circuit scalars.
pub fn scalars_from_u64(values: &[u64]) -> Vec<Scalar> {
    values.iter().map(|v| Scalar::from(*v)).collect()
}
