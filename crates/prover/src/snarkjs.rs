// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::backend::{describe_failure, job_dir, path_arg, run_tool, JobFiles, ProvingBackend};
use crate::error::{ProverError, Result};
use crate::proof::{Proof, PublicSignals};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Proves and verifies by shelling out to the `snarkjs` CLI.
pub struct SnarkjsBackend {
    binary: PathBuf,
    work_dir: PathBuf,
}

impl SnarkjsBackend {
    pub fn new(binary: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            work_dir: work_dir.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// `snarkjs wtns calculate <wasm> <input.json> <witness.wtns>`
    pub(crate) fn calculate_witness(&self, program: &Path, files: &JobFiles) -> Result<()> {
        let output = run_tool(
            &self.binary,
            &[
                "wtns",
                "calculate",
                &path_arg(program),
                &path_arg(&files.inputs),
                &path_arg(&files.witness),
            ],
        )?;
        if !output.status.success() {
            return Err(ProverError::WitnessFailed(describe_failure(
                "snarkjs wtns calculate",
                &output,
            )));
        }
        if !files.witness.exists() {
            return Err(ProverError::WitnessFailed(format!(
                "snarkjs did not write {}",
                files.witness.display()
            )));
        }
        debug!(witness = %files.witness.display(), "witness calculated");
        Ok(())
    }
}

impl ProvingBackend for SnarkjsBackend {
    fn name(&self) -> &'static str {
        "snarkjs"
    }

    fn prove(
        &self,
        inputs_json: &str,
        program: &Path,
        proving_key: &Path,
    ) -> Result<(Proof, PublicSignals)> {
        let job = job_dir(&self.work_dir)?;
        let files = JobFiles::new(job.path());
        fs::write(&files.inputs, inputs_json)?;

        self.calculate_witness(program, &files)?;

        let output = run_tool(
            &self.binary,
            &[
                "groth16",
                "prove",
                &path_arg(proving_key),
                &path_arg(&files.witness),
                &path_arg(&files.proof),
                &path_arg(&files.public),
            ],
        )?;
        if !output.status.success() {
            return Err(ProverError::ProveFailed(describe_failure(
                "snarkjs groth16 prove",
                &output,
            )));
        }

        let (proof, signals) = files.read_outputs()?;
        info!(signals = signals.len(), "snarkjs proof generated");
        Ok((proof, signals))
    }

    fn verify(
        &self,
        proof: &Proof,
        signals: &PublicSignals,
        verification_key: &Value,
    ) -> Result<()> {
        let job = job_dir(&self.work_dir)?;
        let files = JobFiles::new(job.path());
        fs::write(&files.vkey, serde_json::to_string(verification_key)?)?;
        fs::write(&files.public, signals.to_json()?)?;
        fs::write(&files.proof, proof.to_json()?)?;

        let output = run_tool(
            &self.binary,
            &[
                "groth16",
                "verify",
                &path_arg(&files.vkey),
                &path_arg(&files.public),
                &path_arg(&files.proof),
            ],
        )?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if output.status.success() && stdout.contains("OK") {
            info!("proof verified");
            Ok(())
        } else {
            warn!(status = %output.status, "proof rejected");
            Err(ProverError::VerifyFailed(describe_failure(
                "snarkjs groth16 verify",
                &output,
            )))
        }
    }
}
