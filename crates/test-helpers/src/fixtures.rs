// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::rule_checker::RULE_CHECKER_PROTOCOL;
use crate::utils::write_file_with_dirs;
use ballot_config::ArtifactPaths;
use ballot_crypto::{generate_key_pair, random_k, KeyPair, Scalar, SubgroupScalar};
use ballot_inputs::VoterMaterial;
use rand::{rngs::StdRng, SeedableRng};
use serde_json::json;
use std::path::Path;

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Deterministic voter: private key `seed + 1`, `k = seed + 100`.
pub fn voter_material(seed: u64) -> VoterMaterial {
    let pair = KeyPair::from_private(SubgroupScalar::from(seed + 1));
    VoterMaterial::new(pair.public, &SubgroupScalar::from(seed + 100)).with_identity(
        Scalar::from(seed + 0xad),
        Scalar::from(seed + 0x1d),
        Scalar::from(seed + 0x5ec),
    )
}

/// Fresh key pair and `k` from the OS RNG with fixed identity values.
pub fn random_voter_material() -> ballot_crypto::Result<VoterMaterial> {
    let pair = generate_key_pair()?;
    let k = random_k()?;
    Ok(VoterMaterial::new(pair.public, &k).with_identity(
        Scalar::from(0xadu64),
        Scalar::from(0x1du64),
        Scalar::from(0x5ecu64),
    ))
}

/// Writes stand-in artifacts for `circuit` under `dir`. The verification key
/// targets the rule-checking backend.
pub fn placeholder_artifacts(dir: &Path, circuit: &str) -> std::io::Result<ArtifactPaths> {
    let paths = ArtifactPaths::for_circuit(dir, circuit);
    write_file_with_dirs(&paths.wasm, b"\0asm")?;
    write_file_with_dirs(&paths.zkey, b"zkey")?;
    let vkey = json!({
        "protocol": RULE_CHECKER_PROTOCOL,
        "curve": "bn128",
        "circuit": circuit,
    });
    write_file_with_dirs(&paths.vkey, vkey.to_string().as_bytes())?;
    Ok(paths)
}
