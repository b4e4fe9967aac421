// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::artifacts::ArtifactPaths;
use crate::load_config::{find_in_parent, relative_to, resolve_config_path};
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::{env, fmt, path::PathBuf};
use tracing::{debug, info};

pub const DEFAULT_CONFIG_NAME: &str = "ballot.config.yaml";
pub const ENV_PREFIX: &str = "BALLOT_";

/// Which external tool produces the Groth16 proof.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// `snarkjs` for witness, proof and verification
    #[default]
    Snarkjs,
    /// `snarkjs` witness, `rapidsnark` proof, `snarkjs` verification
    Rapidsnark,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Snarkjs => write!(f, "snarkjs"),
            BackendKind::Rapidsnark => write!(f, "rapidsnark"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    pub backend: BackendKind,
    /// Circuit variant name, also the artifact file stem.
    pub variant: String,
    /// snarkjs executable, looked up on `PATH` when not absolute
    pub snarkjs: PathBuf,
    /// rapidsnark prover executable
    pub rapidsnark: PathBuf,
    /// Directory holding `<variant>.wasm`, `<variant>_pkey.zkey` and `<variant>_vkey.json`.
    /// Relative paths resolve against the config file's directory.
    pub artifacts_dir: PathBuf,
    /// Parent for per-job temporary directories. Defaults to the OS temp dir.
    pub work_dir: Option<PathBuf>,
    /// Where the configuration was loaded from, if anywhere.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found_config_file: Option<PathBuf>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            variant: "ballot_proof_poseidon".to_string(),
            snarkjs: PathBuf::from("snarkjs"),
            rapidsnark: PathBuf::from("rapidsnark"),
            artifacts_dir: PathBuf::from("artifacts"),
            work_dir: None,
            found_config_file: None,
        }
    }
}

impl BridgeConfig {
    fn base_dir(&self) -> PathBuf {
        self.found_config_file
            .as_ref()
            .and_then(|f| f.parent().map(PathBuf::from))
            .or_else(|| env::current_dir().ok())
            .unwrap_or_default()
    }

    pub fn artifacts_dir(&self) -> PathBuf {
        relative_to(&self.base_dir(), &self.artifacts_dir)
    }

    /// Artifacts of the configured variant.
    pub fn artifacts(&self) -> ArtifactPaths {
        self.artifacts_for(&self.variant)
    }

    pub fn artifacts_for(&self, variant: &str) -> ArtifactPaths {
        ArtifactPaths::for_circuit(&self.artifacts_dir(), variant)
    }

    pub fn work_dir(&self) -> PathBuf {
        match &self.work_dir {
            Some(dir) => relative_to(&self.base_dir(), dir),
            None => env::temp_dir(),
        }
    }
}

pub struct OsDirs;
impl OsDirs {
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ballot")
    }
}

/// Defaults, then the YAML file, then `BALLOT_*` environment variables.
fn extract(yaml: Option<&PathBuf>, found_config_file: Option<PathBuf>) -> Result<BridgeConfig> {
    let mut figment = Figment::from(Serialized::defaults(BridgeConfig::default()));
    if let Some(path) = yaml {
        figment = figment.merge(Yaml::file(path));
    }
    let mut config: BridgeConfig = figment
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()
        .context("Could not parse configuration")?;
    config.found_config_file = found_config_file;
    Ok(config)
}

/// Load the config at `config_file`, or search for `ballot.config.yaml` from the
/// cwd upwards and then in the OS config dir.
///
/// An explicit file that does not exist is an error; a missing default file just
/// leaves the defaults and environment in place.
pub fn load_config(config_file: Option<String>) -> Result<BridgeConfig> {
    let explicit = config_file.is_some();
    let resolved_config_path = resolve_config_path(
        find_in_parent,
        env::current_dir()?,
        OsDirs::config_dir(),
        DEFAULT_CONFIG_NAME,
        config_file.map(PathBuf::from),
    );

    if !resolved_config_path.exists() {
        if explicit {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", resolved_config_path.display()),
            ))
            .context("Configuration file not found");
        }
        debug!(path = %resolved_config_path.display(), "no configuration file, using defaults");
        return extract(None, None);
    }

    let config = extract(Some(&resolved_config_path), Some(resolved_config_path.clone()))?;
    info!(
        path = %resolved_config_path.display(),
        backend = %config.backend,
        variant = %config.variant,
        "loaded bridge configuration"
    );
    Ok(config)
}

/// Parse configuration from a YAML string, still honouring environment overrides.
pub fn load_config_from_str(yaml: &str) -> Result<BridgeConfig> {
    let config: BridgeConfig = Figment::from(Serialized::defaults(BridgeConfig::default()))
        .merge(Yaml::string(yaml))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()
        .context("Could not parse configuration")?;
    Ok(config)
}
