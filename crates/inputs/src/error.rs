// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use ballot_crypto::{CryptoError, HashError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputsError {
    #[error("Unknown circuit variant '{0}'")]
    UnknownVariant(String),

    #[error("Ballot has {fields} fields but circuit '{variant}' only takes {n_fields}")]
    TooManyFields {
        variant: &'static str,
        fields: usize,
        n_fields: usize,
    },

    #[error("Circuit '{0}' needs voter key material")]
    MissingVoter(&'static str),

    #[error("Circuit '{variant}' needs a value for '{slot}'")]
    MissingValue {
        variant: &'static str,
        slot: &'static str,
    },

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, InputsError>;
