// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::backend::{describe_failure, job_dir, path_arg, run_tool, JobFiles, ProvingBackend};
use crate::error::{ProverError, Result};
use crate::proof::{Proof, PublicSignals};
use crate::snarkjs::SnarkjsBackend;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// snarkjs computes the witness, the native `rapidsnark` prover produces the proof.
/// Verification goes through snarkjs.
pub struct RapidsnarkBackend {
    snarkjs: SnarkjsBackend,
    prover: PathBuf,
}

impl RapidsnarkBackend {
    pub fn new(snarkjs: SnarkjsBackend, prover: impl Into<PathBuf>) -> Self {
        Self {
            snarkjs,
            prover: prover.into(),
        }
    }
}

impl ProvingBackend for RapidsnarkBackend {
    fn name(&self) -> &'static str {
        "rapidsnark"
    }

    fn prove(
        &self,
        inputs_json: &str,
        program: &Path,
        proving_key: &Path,
    ) -> Result<(Proof, PublicSignals)> {
        let job = job_dir(self.snarkjs.work_dir())?;
        let files = JobFiles::new(job.path());
        fs::write(&files.inputs, inputs_json)?;

        self.snarkjs.calculate_witness(program, &files)?;

        // rapidsnark <zkey> <witness> <proof.json> <public.json>
        let output = run_tool(
            &self.prover,
            &[
                &path_arg(proving_key),
                &path_arg(&files.witness),
                &path_arg(&files.proof),
                &path_arg(&files.public),
            ],
        )?;
        if !output.status.success() {
            return Err(ProverError::ProveFailed(describe_failure(
                "rapidsnark",
                &output,
            )));
        }

        let (proof, signals) = files.read_outputs()?;
        info!(signals = signals.len(), "rapidsnark proof generated");
        Ok((proof, signals))
    }

    fn verify(
        &self,
        proof: &Proof,
        signals: &PublicSignals,
        verification_key: &Value,
    ) -> Result<()> {
        self.snarkjs.verify(proof, signals, verification_key)
    }
}
