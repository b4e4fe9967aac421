// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use ballot_crypto::{
    encrypt, from_decimal, inputs_hash, to_decimal, Ciphertext, CurvePoint, HashPrimitive,
    NonceChain, Scalar,
};
use ballot_inputs::{CircuitVariant, InputSlot};
use ballot_prover::{Proof, ProverError, ProvingBackend, PublicSignals, Result};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// `protocol` tag of proofs and verification keys produced for [`RuleCheckingBackend`].
pub const RULE_CHECKER_PROTOCOL: &str = "rule-check";

/// Inputs that never become public signals.
const PRIVATE_KEYS: &[&str] = &["fields", "k", "msg", "secret"];

type Check<T = ()> = std::result::Result<T, String>;

/// In-process stand-in for snarkjs. Evaluates the ballot constraints directly on
/// the assembled JSON and emits a proof bound to the public signals.
///
/// The circuit is identified by the file stem of `program`, so artifacts must be
/// named after the variant.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleCheckingBackend;

impl ProvingBackend for RuleCheckingBackend {
    fn name(&self) -> &'static str {
        "rule-check"
    }

    fn prove(
        &self,
        inputs_json: &str,
        program: &Path,
        _proving_key: &Path,
    ) -> Result<(Proof, PublicSignals)> {
        let circuit = program
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let variant = CircuitVariant::by_name(&circuit)
            .map_err(|e| ProverError::WitnessFailed(e.to_string()))?;
        let inputs: Map<String, Value> = serde_json::from_str(inputs_json)
            .map_err(|e| ProverError::WitnessFailed(format!("invalid inputs: {e}")))?;

        let witness = Witness {
            variant,
            inputs: &inputs,
        };
        if let Err(reason) = witness.check() {
            warn!(circuit = %circuit, %reason, "constraint not satisfied");
            return Err(ProverError::WitnessFailed(format!(
                "Assert Failed in {circuit}: {reason}"
            )));
        }

        let signals = witness
            .public_signals()
            .map_err(ProverError::WitnessFailed)?;
        let proof = seal(&signals)?;
        debug!(circuit = %circuit, signals = signals.len(), "rule check passed");
        Ok((proof, signals))
    }

    fn verify(
        &self,
        proof: &Proof,
        signals: &PublicSignals,
        verification_key: &Value,
    ) -> Result<()> {
        if verification_key["protocol"] != RULE_CHECKER_PROTOCOL {
            return Err(ProverError::VerifyFailed(format!(
                "verification key protocol {} is not {RULE_CHECKER_PROTOCOL}",
                verification_key["protocol"]
            )));
        }
        let expected = seal(signals).map_err(|e| ProverError::VerifyFailed(e.to_string()))?;
        if expected.pi_a != proof.pi_a {
            return Err(ProverError::VerifyFailed(
                "proof does not match public signals".to_string(),
            ));
        }
        Ok(())
    }
}

/// Binds a stand-in proof to its public signals through a Poseidon digest.
fn seal(signals: &PublicSignals) -> Result<Proof> {
    let scalars = signals
        .0
        .iter()
        .map(|s| from_decimal(s))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| ProverError::MalformedOutput(e.to_string()))?;
    let digest = inputs_hash(HashPrimitive::Poseidon, &scalars)
        .map_err(|e| ProverError::MalformedOutput(e.to_string()))?;

    let zero_pair = vec!["0".to_string(), "0".to_string()];
    Ok(Proof {
        pi_a: vec![to_decimal(&digest), "0".to_string(), "1".to_string()],
        pi_b: vec![zero_pair.clone(), zero_pair, vec!["1".to_string(), "0".to_string()]],
        pi_c: vec!["0".to_string(), "0".to_string(), "1".to_string()],
        protocol: Some(RULE_CHECKER_PROTOCOL.to_string()),
        curve: Some("bn128".to_string()),
    })
}

fn flatten(value: &Value, out: &mut Vec<Scalar>) -> Check {
    match value {
        Value::String(s) => {
            out.push(from_decimal(s).map_err(|e| e.to_string())?);
            Ok(())
        }
        Value::Array(items) => items.iter().try_for_each(|v| flatten(v, out)),
        other => Err(format!("unexpected value {other}")),
    }
}

fn small(key: &str, value: &Value) -> Check<u128> {
    match value {
        Value::String(s) => s
            .parse::<u128>()
            .map_err(|_| format!("'{key}' is not a small integer: {s}")),
        other => Err(format!("'{key}' is not a decimal string: {other}")),
    }
}

struct Witness<'a> {
    variant: CircuitVariant,
    inputs: &'a Map<String, Value>,
}

impl<'a> Witness<'a> {
    fn value(&self, key: &str) -> Check<&'a Value> {
        self.inputs
            .get(key)
            .ok_or_else(|| format!("missing input '{key}'"))
    }

    fn scalars(&self, key: &str) -> Check<Vec<Scalar>> {
        let mut out = Vec::new();
        flatten(self.value(key)?, &mut out).map_err(|e| format!("{key}: {e}"))?;
        Ok(out)
    }

    fn scalar(&self, key: &str) -> Check<Scalar> {
        match self.scalars(key)?.as_slice() {
            [single] => Ok(*single),
            _ => Err(format!("'{key}' is not a single value")),
        }
    }

    fn number(&self, key: &str) -> Check<u128> {
        small(key, self.value(key)?)
    }

    fn numbers(&self, key: &str) -> Check<Vec<u128>> {
        match self.value(key)? {
            Value::Array(items) => items.iter().map(|v| small(key, v)).collect(),
            other => Err(format!("'{key}' is not an array: {other}")),
        }
    }

    fn point(&self, key: &str) -> Check<CurvePoint> {
        match self.scalars(key)?.as_slice() {
            [x, y] => CurvePoint::from_coordinates(*x, *y).map_err(|e| e.to_string()),
            _ => Err(format!("'{key}' is not a point")),
        }
    }

    fn check(&self) -> Check {
        let variant = &self.variant;
        if variant.uses(InputSlot::Fields) {
            self.check_ballot()?;
        }
        if variant.uses(InputSlot::C1) {
            self.check_message_cipher()?;
        }
        if variant.uses(InputSlot::CipherFields) {
            self.check_cipherfields()?;
        }
        if let Some(primitive) = variant.inputs_hash {
            self.check_inputs_hash(primitive)?;
        }
        Ok(())
    }

    fn check_ballot(&self) -> Check {
        let fields = self.numbers("fields")?;
        let max_count = usize::try_from(self.number("max_count")?)
            .map_err(|_| "max_count out of range".to_string())?;
        let unique = self.number("force_uniqueness")? == 1;
        let max_value = self.number("max_value")?;
        let min_value = self.number("min_value")?;
        let max_total_cost = self.number("max_total_cost")?;
        let min_total_cost = self.number("min_total_cost")?;
        let cost_exp = u32::try_from(self.number("cost_exp")?)
            .map_err(|_| "cost_exp out of range".to_string())?;
        let cost_from_weight = self.number("cost_from_weight")? == 1;
        let weight = self.number("weight")?;

        if max_count > fields.len() {
            return Err(format!(
                "max_count {max_count} exceeds {} fields",
                fields.len()
            ));
        }
        let (active, rest) = fields.split_at(max_count);
        if let Some(i) = rest.iter().position(|f| *f != 0) {
            return Err(format!("field {} is beyond max_count but not zero", max_count + i));
        }

        for (i, field) in active.iter().enumerate() {
            if *field > max_value {
                return Err(format!("field {i} = {field} exceeds max_value {max_value}"));
            }
            if *field < min_value {
                return Err(format!("field {i} = {field} is below min_value {min_value}"));
            }
        }

        if unique {
            let mut seen = HashSet::new();
            if let Some(dup) = active.iter().find(|f| !seen.insert(**f)) {
                return Err(format!("value {dup} repeated while uniqueness is forced"));
            }
        }

        let cost = active
            .iter()
            .try_fold(0u128, |acc, f| {
                f.checked_pow(cost_exp).and_then(|c| acc.checked_add(c))
            })
            .ok_or_else(|| "total cost overflows".to_string())?;

        if cost_from_weight {
            if cost > weight {
                return Err(format!("total cost {cost} exceeds weight {weight}"));
            }
        } else if max_total_cost != 0 && cost > max_total_cost {
            return Err(format!(
                "total cost {cost} exceeds max_total_cost {max_total_cost}"
            ));
        }
        if cost < min_total_cost {
            return Err(format!(
                "total cost {cost} is below min_total_cost {min_total_cost}"
            ));
        }
        Ok(())
    }

    fn check_message_cipher(&self) -> Check {
        let public = self.point("pk")?;
        let k = self.scalar("k")?;
        let msg = self.scalar("msg")?;
        let expected = encrypt(&msg, &public, &k);

        let mut got = self.scalars("c1")?;
        got.extend(self.scalars("c2")?);
        if got[..] != expected.coordinates()[..] {
            return Err("c1, c2 do not encrypt msg under pk with k".to_string());
        }
        Ok(())
    }

    fn check_cipherfields(&self) -> Check {
        let public = self.point("pk")?;
        let k = self.scalar("k")?;
        let fields = self.scalars("fields")?;
        let flat = self.scalars("cipherfields")?;
        if flat.len() != 4 * fields.len() {
            return Err(format!(
                "{} cipherfield coordinates for {} fields",
                flat.len(),
                fields.len()
            ));
        }

        let empty = Ciphertext::empty().coordinates();
        let zero = Scalar::from(0u64);
        let slots = fields.iter().zip(NonceChain::new(k)).zip(flat.chunks(4));
        for (i, ((field, nonce), got)) in slots.enumerate() {
            let expected = encrypt(field, &public, &nonce).coordinates();
            let padding = *field == zero && got == &empty[..];
            if got != &expected[..] && !padding {
                return Err(format!("cipherfield {i} does not encrypt field {i}"));
            }
        }
        Ok(())
    }

    fn check_inputs_hash(&self, primitive: HashPrimitive) -> Check {
        let mut flat = Vec::new();
        for slot in self.variant.hash_layout {
            flat.extend(self.scalars(slot.key())?);
        }
        let expected = inputs_hash(primitive, &flat).map_err(|e| e.to_string())?;
        if self.scalar("inputs_hash")? != expected {
            return Err(format!("inputs_hash does not match the {primitive} digest"));
        }
        Ok(())
    }

    /// `inputs_hash` alone when the circuit has one, otherwise every input outside
    /// [`PRIVATE_KEYS`] in emission order.
    fn public_signals(&self) -> Check<PublicSignals> {
        if self.inputs.contains_key("inputs_hash") {
            let hash = self.scalar("inputs_hash")?;
            return Ok(PublicSignals(vec![to_decimal(&hash)]));
        }
        let mut flat = Vec::new();
        for (key, value) in self.inputs {
            if !PRIVATE_KEYS.contains(&key.as_str()) {
                flatten(value, &mut flat)?;
            }
        }
        Ok(PublicSignals(flat.iter().map(to_decimal).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{placeholder_artifacts, voter_material};
    use ballot_inputs::{Ballot, BallotParams, CircuitInputs, InputAssembler};
    use ballot_prover::ProofBridge;
    use serde_json::json;

    fn params() -> BallotParams {
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

    fn assemble(variant: CircuitVariant, fields: Vec<u64>) -> CircuitInputs {
        let ballot = Ballot::new(fields, params()).with_voter(voter_material(1));
        InputAssembler::new(variant).assemble(&ballot).unwrap()
    }

    fn prove(inputs: &CircuitInputs) -> Result<(Proof, PublicSignals)> {
        let program = format!("{}.wasm", inputs.variant);
        RuleCheckingBackend.prove(
            &inputs.to_json().unwrap(),
            Path::new(&program),
            Path::new("unused.zkey"),
        )
    }

    #[test]
    fn test_valid_ballots_prove_for_every_variant() {
        for variant in CircuitVariant::all() {
            let fields = if variant.n_fields == 1 { vec![3] } else { vec![3, 2, 5] };
            let inputs = assemble(*variant, fields);
            let (proof, signals) = prove(&inputs).unwrap();
            let vkey = json!({"protocol": RULE_CHECKER_PROTOCOL});
            RuleCheckingBackend.verify(&proof, &signals, &vkey).unwrap();
            if let Some(hash) = inputs.inputs_hash {
                assert_eq!(signals.0, vec![to_decimal(&hash)], "{variant}");
            }
        }
    }

    #[test]
    fn test_checker_signals_are_the_parameters() {
        let inputs = assemble(CircuitVariant::BALLOT_CHECKER, vec![3, 2, 5]);
        let (_, signals) = prove(&inputs).unwrap();
        assert_eq!(signals.0, vec!["3", "1", "5", "0", "15", "0", "1", "0", "0"]);
    }

    #[test]
    fn test_duplicate_is_a_witness_failure() {
        let inputs = assemble(CircuitVariant::BALLOT_CHECKER, vec![3, 3, 1]);
        match prove(&inputs) {
            Err(ProverError::WitnessFailed(msg)) => assert!(msg.contains("repeated"), "{msg}"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_tampered_inputs_are_rejected() {
        let mut inputs = assemble(CircuitVariant::BALLOT_PROOF_POSEIDON, vec![3, 2, 5]);
        let mut cipherfields = inputs.values["cipherfields"].clone();
        cipherfields[0][1][0] = json!("1");
        inputs.values.insert("cipherfields".into(), cipherfields);
        assert!(matches!(prove(&inputs), Err(ProverError::WitnessFailed(_))));

        let mut inputs = assemble(CircuitVariant::BALLOT_PROOF_MIMC, vec![3, 2, 5]);
        inputs.values.insert("weight".into(), json!("1"));
        match prove(&inputs) {
            Err(ProverError::WitnessFailed(msg)) => assert!(msg.contains("inputs_hash"), "{msg}"),
            other => panic!("unexpected {other:?}"),
        }

        let mut inputs = assemble(CircuitVariant::BALLOT_CIPHER, vec![4]);
        inputs.values.insert("msg".into(), json!("5"));
        assert!(matches!(prove(&inputs), Err(ProverError::WitnessFailed(_))));
    }

    #[test]
    fn test_unknown_circuit() {
        let inputs = assemble(CircuitVariant::BALLOT_CHECKER, vec![1]);
        assert!(matches!(
            RuleCheckingBackend.prove(
                &inputs.to_json().unwrap(),
                Path::new("other_circuit.wasm"),
                Path::new("other_circuit_pkey.zkey"),
            ),
            Err(ProverError::WitnessFailed(_))
        ));
    }

    #[test]
    fn test_verify_binds_signals() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts =
            placeholder_artifacts(dir.path(), CircuitVariant::BALLOT_PROOF.name).unwrap();
        let bridge = ProofBridge::new(Box::new(RuleCheckingBackend));
        let inputs = assemble(CircuitVariant::BALLOT_PROOF, vec![1, 2, 3]);

        let bundle = bridge.prove_and_verify(&inputs, &artifacts).unwrap();
        let mut forged = bundle.public_signals.clone();
        forged.0[0] = "4".into();
        assert!(matches!(
            bridge.verify_proof(&bundle.proof, &forged, &artifacts),
            Err(ProverError::VerifyFailed(_))
        ));

        let groth16 = json!({"protocol": "groth16"});
        assert!(matches!(
            RuleCheckingBackend.verify(&bundle.proof, &bundle.public_signals, &groth16),
            Err(ProverError::VerifyFailed(_))
        ));
    }
}
