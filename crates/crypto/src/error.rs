// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("no inputs provided")]
    NoInputs,

    #[error("too many inputs: {len} (maximum is {max})")]
    TooManyInputs { len: usize, max: usize },

    #[error("{hasher} accepts at most {max} inputs per call, got {len}")]
    ArityExceeded {
        hasher: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{hasher} failed: {reason}")]
    Primitive {
        hasher: &'static str,
        reason: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("secure randomness source unavailable: {0}")]
    Randomness(String),

    #[error("empty sampling range [{min}, {max})")]
    EmptyRange { min: u64, max: u64 },

    #[error("cannot draw {requested} unique values from a range of {available}")]
    InsufficientRange { requested: usize, available: u64 },

    #[error("ballot has {fields} fields but the circuit only has {slots} slots")]
    TooManyFields { fields: usize, slots: usize },

    #[error("invalid scalar '{0}'")]
    InvalidScalar(String),

    #[error("point ({x}, {y}) is not a Baby Jubjub subgroup point")]
    InvalidPoint { x: String, y: String },

    #[error("invalid hex '{input}': {reason}")]
    InvalidHex { input: String, reason: String },

    #[error(transparent)]
    Hash(#[from] HashError),
}

pub type Result<T> = std::result::Result<T, CryptoError>;
