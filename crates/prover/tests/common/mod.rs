// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

#![allow(dead_code)]

use ballot_crypto::{KeyPair, SubgroupScalar};
use ballot_inputs::{Ballot, BallotParams, CircuitInputs, CircuitVariant, InputAssembler, VoterMaterial};
use std::path::PathBuf;
use std::process::Command;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::{fmt, EnvFilter};

pub fn init_tracing() -> DefaultGuard {
    let subscriber = fmt()
        .with_env_filter(EnvFilter::new("info"))
        .with_test_writer()
        .finish();
    tracing::subscriber::set_default(subscriber)
}

/// Returns `None` when snarkjs is not installed; tests should skip gracefully.
pub fn find_snarkjs() -> Option<PathBuf> {
    let output = Command::new("which").arg("snarkjs").output().ok()?;
    if !output.status.success() {
        return None;
    }
    let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!path.is_empty()).then(|| PathBuf::from(path))
}

/// Inputs for the single-field cipher circuit, `msg = 3` under a fixed key.
pub fn cipher_inputs() -> CircuitInputs {
    let pair = KeyPair::from_private(SubgroupScalar::from(7u64));
    let voter = VoterMaterial::new(pair.public, &SubgroupScalar::from(5u64));
    let ballot = Ballot::new(vec![3], BallotParams::default()).with_voter(voter);
    InputAssembler::new(CircuitVariant::BALLOT_CIPHER)
        .assemble(&ballot)
        .unwrap()
}
