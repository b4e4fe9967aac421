// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Compiled circuit program plus its Groth16 key material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    /// Witness calculator program.
    pub wasm: PathBuf,
    /// Proving key.
    pub zkey: PathBuf,
    /// Verification key.
    pub vkey: PathBuf,
}

impl ArtifactPaths {
    /// `<dir>/<circuit>.wasm`, `<dir>/<circuit>_pkey.zkey` and `<dir>/<circuit>_vkey.json`.
    pub fn for_circuit(dir: &Path, circuit: &str) -> Self {
        Self {
            wasm: dir.join(format!("{circuit}.wasm")),
            zkey: dir.join(format!("{circuit}_pkey.zkey")),
            vkey: dir.join(format!("{circuit}_vkey.json")),
        }
    }

    /// Paths that do not exist on disk.
    pub fn missing(&self) -> Vec<&Path> {
        [&self.wasm, &self.zkey, &self.vkey]
            .into_iter()
            .filter(|p| !p.exists())
            .map(PathBuf::as_path)
            .collect()
    }
}
