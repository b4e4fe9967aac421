// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::error::{ProverError, Result};
use crate::proof::{Proof, PublicSignals};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;
use tracing::debug;

/// Witness calculation plus Groth16 proving and verification.
///
/// Implementations block the calling thread.
pub trait ProvingBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Computes the witness for `inputs_json` with the circuit `program` and proves it
    /// with `proving_key`.
    fn prove(
        &self,
        inputs_json: &str,
        program: &Path,
        proving_key: &Path,
    ) -> Result<(Proof, PublicSignals)>;

    fn verify(
        &self,
        proof: &Proof,
        signals: &PublicSignals,
        verification_key: &Value,
    ) -> Result<()>;
}

/// Fresh per-job directory under `work_dir`, removed on drop.
pub(crate) fn job_dir(work_dir: &Path) -> Result<TempDir> {
    fs::create_dir_all(work_dir)?;
    Ok(tempfile::Builder::new()
        .prefix("ballot-proof-")
        .tempdir_in(work_dir)?)
}

/// Runs `binary` with `args`, mapping a missing executable to [`ProverError::ToolNotFound`].
pub(crate) fn run_tool(binary: &Path, args: &[&str]) -> Result<Output> {
    debug!(tool = %binary.display(), ?args, "running");
    Command::new(binary).args(args).output().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ProverError::ToolNotFound(binary.display().to_string())
        } else {
            ProverError::Io(e)
        }
    })
}

pub(crate) fn describe_failure(tool: &str, output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    format!(
        "{} exited with {}:\nstderr: {}\nstdout: {}",
        tool,
        output.status,
        stderr.trim(),
        stdout.trim()
    )
}

pub(crate) fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Files a proving job reads and writes inside its job directory.
pub(crate) struct JobFiles {
    pub inputs: PathBuf,
    pub witness: PathBuf,
    pub proof: PathBuf,
    pub public: PathBuf,
    pub vkey: PathBuf,
}

impl JobFiles {
    pub fn new(dir: &Path) -> Self {
        Self {
            inputs: dir.join("input.json"),
            witness: dir.join("witness.wtns"),
            proof: dir.join("proof.json"),
            public: dir.join("public.json"),
            vkey: dir.join("verification_key.json"),
        }
    }

    pub fn read_outputs(&self) -> Result<(Proof, PublicSignals)> {
        let proof = Proof::from_json(&fs::read_to_string(&self.proof)?)?;
        let signals = PublicSignals::from_json(&fs::read_to_string(&self.public)?)?;
        Ok((proof, signals))
    }
}
