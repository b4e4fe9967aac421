// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::backend::ProvingBackend;
use crate::error::{ProverError, Result};
use crate::proof::{Proof, ProofBundle, PublicSignals};
use crate::rapidsnark::RapidsnarkBackend;
use crate::snarkjs::SnarkjsBackend;
use ballot_config::{ArtifactPaths, BackendKind, BridgeConfig};
use ballot_inputs::CircuitInputs;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Hands assembled circuit inputs to a proving backend and checks proofs against
/// on-disk key material.
pub struct ProofBridge {
    backend: Box<dyn ProvingBackend>,
}

impl ProofBridge {
    pub fn new(backend: Box<dyn ProvingBackend>) -> Self {
        Self { backend }
    }

    pub fn from_config(config: &BridgeConfig) -> Self {
        let snarkjs = SnarkjsBackend::new(&config.snarkjs, config.work_dir());
        let backend: Box<dyn ProvingBackend> = match config.backend {
            BackendKind::Snarkjs => Box::new(snarkjs),
            BackendKind::Rapidsnark => {
                Box::new(RapidsnarkBackend::new(snarkjs, &config.rapidsnark))
            }
        };
        info!(backend = backend.name(), variant = %config.variant, "proof bridge ready");
        Self::new(backend)
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn generate_proof(
        &self,
        inputs: &CircuitInputs,
        artifacts: &ArtifactPaths,
    ) -> Result<ProofBundle> {
        require(&artifacts.wasm)?;
        require(&artifacts.zkey)?;

        let inputs_json = inputs.to_json()?;
        debug!(
            variant = inputs.variant,
            backend = self.backend.name(),
            wasm = %artifacts.wasm.display(),
            zkey = %artifacts.zkey.display(),
            "generating proof"
        );
        let (proof, public_signals) =
            self.backend
                .prove(&inputs_json, &artifacts.wasm, &artifacts.zkey)?;
        Ok(ProofBundle::new(proof, public_signals))
    }

    pub fn verify_proof(
        &self,
        proof: &Proof,
        signals: &PublicSignals,
        artifacts: &ArtifactPaths,
    ) -> Result<()> {
        let verification_key = read_verification_key(&artifacts.vkey)?;
        debug!(
            backend = self.backend.name(),
            vkey = %artifacts.vkey.display(),
            "verifying proof"
        );
        self.backend.verify(proof, signals, &verification_key)
    }

    /// Generates a proof and checks it before handing it back.
    pub fn prove_and_verify(
        &self,
        inputs: &CircuitInputs,
        artifacts: &ArtifactPaths,
    ) -> Result<ProofBundle> {
        let bundle = self.generate_proof(inputs, artifacts)?;
        self.verify_proof(&bundle.proof, &bundle.public_signals, artifacts)?;
        Ok(bundle)
    }
}

fn require(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ProverError::ArtifactNotFound(path.to_path_buf()))
    }
}

fn read_verification_key(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ProverError::ArtifactNotFound(path.to_path_buf()),
        _ => ProverError::Io(e),
    })?;
    Ok(serde_json::from_str(&raw)?)
}
