// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::Result;
use ballot_config::{load_config, ArtifactPaths};
use ballot_crypto::{sample_ballot_fields, sample_ballot_fields_with, to_decimal};
use ballot_inputs::{Ballot, BallotParams, CircuitVariant, InputAssembler, VoterMaterial};
use ballot_prover::{ProofBridge, ProofBundle, ProverError};
use ballot_test_helpers::{
    init_test_tracing, placeholder_artifacts, random_voter_material, seeded_rng, voter_material,
    RuleCheckingBackend,
};
use figment::Jail;
use proptest::prelude::*;
use tempfile::TempDir;

fn rating_params() -> BallotParams {
    BallotParams {
        max_count: 3,
        force_uniqueness: true,
        max_value: 5,
        min_value: 0,
        max_total_cost: 15,
        min_total_cost: 0,
        cost_exp: 1,
        cost_from_weight: false,
        weight: 0,
    }
}

fn quadratic_params(max_total_cost: u64) -> BallotParams {
    BallotParams {
        max_count: 3,
        force_uniqueness: false,
        max_value: 4,
        max_total_cost,
        cost_exp: 2,
        ..Default::default()
    }
}

struct Harness {
    _dir: TempDir,
    artifacts: ArtifactPaths,
    bridge: ProofBridge,
    assembler: InputAssembler,
}

impl Harness {
    fn new(variant: CircuitVariant) -> Result<Self> {
        let dir = TempDir::new_in(env!("CARGO_TARGET_TMPDIR"))?;
        let artifacts = placeholder_artifacts(dir.path(), variant.name)?;
        Ok(Self {
            _dir: dir,
            artifacts,
            bridge: ProofBridge::new(Box::new(RuleCheckingBackend)),
            assembler: InputAssembler::new(variant),
        })
    }

    fn prove(&self, ballot: &Ballot) -> Result<ProofBundle, ProverError> {
        let inputs = self.assembler.assemble(ballot)?;
        self.bridge.prove_and_verify(&inputs, &self.artifacts)
    }
}

#[test]
fn test_voting_scenarios() -> Result<()> {
    let _guard = init_test_tracing();
    let voter = voter_material(7);
    let scenarios: [(&str, Vec<u64>, BallotParams, bool); 5] = [
        ("unique rating", vec![3, 2, 5], rating_params(), true),
        ("repeated rating", vec![3, 3, 1], rating_params(), false),
        (
            "value above max",
            vec![13, 0, 0],
            BallotParams {
                force_uniqueness: false,
                max_value: 12,
                ..rating_params()
            },
            false,
        ),
        ("quadratic at limit", vec![2, 2, 2], quadratic_params(12), true),
        ("quadratic over limit", vec![2, 2, 2], quadratic_params(11), false),
    ];

    for variant in [
        CircuitVariant::BALLOT_PROOF,
        CircuitVariant::BALLOT_PROOF_MIMC,
        CircuitVariant::BALLOT_PROOF_POSEIDON,
        CircuitVariant::BALLOT_PROOF_VOTE_ID,
    ] {
        let harness = Harness::new(variant)?;
        for (name, fields, params, expect_pass) in &scenarios {
            let ballot = Ballot::new(fields.clone(), params.clone()).with_voter(voter.clone());
            let outcome = harness.prove(&ballot);
            assert_eq!(
                outcome.is_ok(),
                *expect_pass,
                "{variant} / {name}: {outcome:?}"
            );
            if let Err(e) = outcome {
                assert!(matches!(e, ProverError::WitnessFailed(_)), "{e}");
            }
        }
    }
    Ok(())
}

#[test]
fn test_weight_bounds_cost() -> Result<()> {
    let harness = Harness::new(CircuitVariant::BALLOT_PROOF_POSEIDON)?;
    let weighted = |weight| BallotParams {
        cost_from_weight: true,
        weight,
        ..quadratic_params(0)
    };

    let ballot = Ballot::new(vec![2, 2, 2], weighted(12)).with_voter(voter_material(1));
    harness.prove(&ballot)?;

    let ballot = Ballot::new(vec![2, 2, 2], weighted(11)).with_voter(voter_material(1));
    assert!(harness.prove(&ballot).is_err());
    Ok(())
}

#[test]
fn test_public_signal_is_inputs_hash() -> Result<()> {
    let harness = Harness::new(CircuitVariant::BALLOT_PROOF_VOTE_ID)?;
    let ballot = Ballot::new(vec![1, 4, 2], rating_params()).with_voter(random_voter_material()?);

    let inputs = harness.assembler.assemble(&ballot)?;
    let bundle = harness.bridge.generate_proof(&inputs, &harness.artifacts)?;
    let hash = inputs.inputs_hash.map(|h| to_decimal(&h));
    assert_eq!(bundle.public_signals.0.first(), hash.as_ref());

    // a fresh k changes every ciphertext and so the hash
    let other = Ballot::new(vec![1, 4, 2], rating_params()).with_voter(random_voter_material()?);
    let other_inputs = harness.assembler.assemble(&other)?;
    assert_ne!(inputs.inputs_hash, other_inputs.inputs_hash);

    let mut forged = bundle.public_signals.clone();
    forged.0[0] = to_decimal(&other_inputs.inputs_hash.unwrap_or_default());
    assert!(matches!(
        harness
            .bridge
            .verify_proof(&bundle.proof, &forged, &harness.artifacts),
        Err(ProverError::VerifyFailed(_))
    ));
    Ok(())
}

#[test]
fn test_sampled_ballot_persists() -> Result<()> {
    let _guard = init_test_tracing();
    let harness = Harness::new(CircuitVariant::BALLOT_PROOF_MIMC)?;
    let fields = sample_ballot_fields(5, 0, 16, true)?;
    let params = BallotParams {
        max_count: 5,
        force_uniqueness: true,
        max_value: 16,
        max_total_cost: BallotParams::max_total_cost_for(16, 2, 5),
        cost_exp: 2,
        ..Default::default()
    };
    let bundle = harness.prove(&Ballot::new(fields, params).with_voter(voter_material(3)))?;

    let out = TempDir::new_in(env!("CARGO_TARGET_TMPDIR"))?;
    let dir = out.path().join("proofs");
    let (proof_path, signals_path) = bundle.persist(&dir, "ballot_proof_mimc")?;
    assert!(proof_path.exists() && signals_path.exists());

    let loaded = ProofBundle::load(&dir, "ballot_proof_mimc")?;
    harness
        .bridge
        .verify_proof(&loaded.proof, &loaded.public_signals, &harness.artifacts)?;
    Ok(())
}

#[test]
fn test_cipher_circuit() -> Result<()> {
    let harness = Harness::new(CircuitVariant::BALLOT_CIPHER)?;
    let ballot = Ballot::new(vec![9], BallotParams::default()).with_voter(voter_material(2));
    let bundle = harness.prove(&ballot)?;
    // pk, c1 and c2
    assert_eq!(bundle.public_signals.len(), 6);

    let too_wide = Ballot::new(vec![9, 1], BallotParams::default()).with_voter(voter_material(2));
    assert!(matches!(harness.prove(&too_wide), Err(ProverError::Inputs(_))));
    Ok(())
}

#[test]
fn test_bridge_from_config_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "ballot.config.yaml",
            r#"
variant: ballot_proof_poseidon
artifacts_dir: zk
"#,
        )?;
        let config = load_config(None).map_err(|e| e.to_string())?;
        let artifacts = config.artifacts();
        assert!(artifacts.wasm.ends_with("zk/ballot_proof_poseidon.wasm"));

        placeholder_artifacts(&config.artifacts_dir(), &config.variant)
            .map_err(|e| e.to_string())?;
        assert!(config.artifacts().missing().is_empty());

        // the configured snarkjs backend is swapped for the in-process checker
        assert_eq!(ProofBridge::from_config(&config).backend_name(), "snarkjs");
        let bridge = ProofBridge::new(Box::new(RuleCheckingBackend));
        let variant = CircuitVariant::by_name(&config.variant).map_err(|e| e.to_string())?;
        let ballot = Ballot::new(vec![3, 2, 5], rating_params()).with_voter(voter_material(9));
        let inputs = InputAssembler::new(variant)
            .assemble(&ballot)
            .map_err(|e| e.to_string())?;
        bridge
            .prove_and_verify(&inputs, &artifacts)
            .map_err(|e| e.to_string())?;
        Ok(())
    });
}

fn voter_for(seed: u64) -> VoterMaterial {
    voter_material(seed % 64)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn sampled_ballots_within_bounds_prove(
        seed in any::<u64>(),
        n in 1usize..=8,
        unique in any::<bool>(),
    ) {
        let max_value = 10u64;
        let mut rng = seeded_rng(seed);
        let fields = sample_ballot_fields_with(&mut rng, n, 0, max_value + 1, unique).unwrap();
        let params = BallotParams {
            max_count: n as u64,
            force_uniqueness: unique,
            max_value,
            max_total_cost: BallotParams::max_total_cost_for(max_value, 2, n as u64),
            cost_exp: 2,
            ..Default::default()
        };

        let harness = Harness::new(CircuitVariant::BALLOT_PROOF_POSEIDON).unwrap();
        let ballot = Ballot::new(fields, params).with_voter(voter_for(seed));
        prop_assert!(harness.prove(&ballot).is_ok());
    }
}
