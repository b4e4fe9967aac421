// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::error::{ProverError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Groth16 proof as snarkjs and rapidsnark emit it, coordinates as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    pub pi_a: Vec<String>,
    pub pi_b: Vec<Vec<String>>,
    pub pi_c: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<String>,
}

impl Proof {
    /// Parses and checks the `{pi_a: [3], pi_b: [[2]; 3], pi_c: [3]}` shape.
    pub fn from_json(json: &str) -> Result<Self> {
        let proof: Proof = serde_json::from_str(json)?;
        proof.check_shape()?;
        Ok(proof)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn check_shape(&self) -> Result<()> {
        let ok = self.pi_a.len() == 3
            && self.pi_c.len() == 3
            && self.pi_b.len() == 3
            && self.pi_b.iter().all(|row| row.len() == 2);
        if !ok {
            return Err(ProverError::MalformedOutput(format!(
                "unexpected proof shape: pi_a[{}], pi_b[{}], pi_c[{}]",
                self.pi_a.len(),
                self.pi_b.len(),
                self.pi_c.len()
            )));
        }
        Ok(())
    }
}

/// Ordered public signals of a proof.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicSignals(pub Vec<String>);

impl PublicSignals {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofBundle {
    pub proof: Proof,
    pub public_signals: PublicSignals,
}

impl ProofBundle {
    pub fn new(proof: Proof, public_signals: PublicSignals) -> Self {
        Self {
            proof,
            public_signals,
        }
    }

    fn paths(dir: &Path, id: &str) -> (PathBuf, PathBuf) {
        (
            dir.join(format!("{id}_proof.json")),
            dir.join(format!("{id}_pub_signals.json")),
        )
    }

    /// Writes `<id>_proof.json` and `<id>_pub_signals.json` under `dir`, creating it if needed.
    pub fn persist(&self, dir: &Path, id: &str) -> Result<(PathBuf, PathBuf)> {
        fs::create_dir_all(dir)?;
        let (proof_path, signals_path) = Self::paths(dir, id);
        fs::write(&proof_path, self.proof.to_json()?)?;
        fs::write(&signals_path, self.public_signals.to_json()?)?;
        info!(dir = %dir.display(), id, "persisted proof");
        Ok((proof_path, signals_path))
    }

    pub fn load(dir: &Path, id: &str) -> Result<Self> {
        let (proof_path, signals_path) = Self::paths(dir, id);
        let proof = Proof::from_json(&fs::read_to_string(proof_path)?)?;
        let public_signals = PublicSignals::from_json(&fs::read_to_string(signals_path)?)?;
        Ok(Self::new(proof, public_signals))
    }
}
