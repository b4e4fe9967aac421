// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use ballot_inputs::InputsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProverError {
    #[error("Tool '{0}' not found. Install it or set its path in the configuration.")]
    ToolNotFound(String),

    #[error("Circuit artifact not found: {}", .0.display())]
    ArtifactNotFound(PathBuf),

    #[error("Witness calculation failed: {0}")]
    WitnessFailed(String),

    #[error("Proof generation failed: {0}")]
    ProveFailed(String),

    #[error("Proof verification failed: {0}")]
    VerifyFailed(String),

    #[error("Malformed proof output: {0}")]
    MalformedOutput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Inputs(#[from] InputsError),
}

pub type Result<T> = std::result::Result<T, ProverError>;
