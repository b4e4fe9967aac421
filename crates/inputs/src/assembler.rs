// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Turns a ballot and the voter's key material into the JSON object a circuit's
//! witness calculator consumes.

use crate::error::{InputsError, Result};
use crate::params::{Ballot, BallotParams, VoterMaterial};
use crate::variant::{CircuitVariant, InputSlot};
use ballot_crypto::{
    cipher_ballot, encrypt, inputs_hash, pad_to, scalars_from_u64, to_decimal, CipherBallot,
    Ciphertext, IdentityTagger, Scalar,
};
use serde_json::{Map, Value};
use tracing::{debug, info};

/// Every value a circuit may ask for, computed once per ballot.
#[derive(Clone, Debug)]
pub struct PreparedBallot {
    pub fields: Vec<Scalar>,
    pub params: BallotParams,
    pub voter: Option<VoterMaterial>,
    pub cipher: Option<CipherBallot>,
    /// Single-message ciphertext for the cipher check circuit.
    pub message_cipher: Option<Ciphertext>,
    pub commitment: Option<Scalar>,
    pub nullifier: Option<Scalar>,
    pub vote_id: Option<Scalar>,
}

/// Circuit input object ready to hand to a witness calculator.
#[derive(Clone, Debug, PartialEq)]
pub struct CircuitInputs {
    pub variant: &'static str,
    pub values: Map<String, Value>,
    pub inputs_hash: Option<Scalar>,
}

impl CircuitInputs {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.values)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.values)?)
    }
}

fn bool_scalar(value: bool) -> Scalar {
    Scalar::from(value as u64)
}

fn strings(values: &[Scalar]) -> Value {
    Value::Array(values.iter().map(|v| Value::String(to_decimal(v))).collect())
}

fn decimal(value: &Scalar) -> Value {
    Value::String(to_decimal(value))
}

pub struct InputAssembler {
    variant: CircuitVariant,
}

impl InputAssembler {
    pub fn new(variant: CircuitVariant) -> Self {
        Self { variant }
    }

    pub fn variant(&self) -> &CircuitVariant {
        &self.variant
    }

    fn missing(&self, slot: InputSlot) -> InputsError {
        InputsError::MissingValue {
            variant: self.variant.name,
            slot: slot.key(),
        }
    }

    /// Runs the encryption and tagging the variant needs.
    ///
    /// # Arguments
    /// * `ballot` - Plain field values, ballot rules and (for crypto circuits) voter material
    ///
    /// # Returns
    /// The ballot with fields padded to `N` and all derived values filled in
    pub fn prepare(&self, ballot: &Ballot) -> Result<PreparedBallot> {
        let variant = &self.variant;
        let n = variant.n_fields;
        if ballot.fields.len() > n {
            return Err(InputsError::TooManyFields {
                variant: variant.name,
                fields: ballot.fields.len(),
                n_fields: n,
            });
        }
        let fields = pad_to(&scalars_from_u64(&ballot.fields), n);

        let needs_voter = variant.uses(InputSlot::PublicKey) || variant.uses(InputSlot::K);
        let voter = match (&ballot.voter, needs_voter) {
            (Some(voter), _) => Some(voter.clone()),
            (None, true) => return Err(InputsError::MissingVoter(variant.name)),
            (None, false) => None,
        };

        let mut prepared = PreparedBallot {
            fields,
            params: ballot.params.clone(),
            voter,
            cipher: None,
            message_cipher: None,
            commitment: None,
            nullifier: None,
            vote_id: None,
        };

        let Some(voter) = prepared.voter.as_ref() else {
            return Ok(prepared);
        };

        if variant.uses(InputSlot::CipherFields) {
            prepared.cipher = Some(cipher_ballot(
                &scalars_from_u64(&ballot.fields),
                n,
                &voter.public_key,
                &voter.k,
            )?);
        }
        if variant.uses(InputSlot::C1) || variant.uses(InputSlot::C2) {
            // the cipher check circuit uses k directly as the nonce
            let message = prepared.fields.first().copied().unwrap_or_default();
            prepared.message_cipher = Some(encrypt(&message, &voter.public_key, &voter.k));
        }

        if let Some(primitive) = variant.tag_hash {
            let tagger = IdentityTagger::new(primitive.hasher());
            if variant.uses(InputSlot::Commitment) || variant.uses(InputSlot::Nullifier) {
                let commitment =
                    tagger.commitment(&voter.address, &voter.process_id, &voter.secret)?;
                prepared.nullifier = Some(tagger.nullifier(&commitment, &voter.secret)?);
                prepared.commitment = Some(commitment);
            }
            if variant.uses(InputSlot::VoteId) {
                prepared.vote_id =
                    Some(tagger.vote_id(&voter.process_id, &voter.address, &voter.k)?);
            }
        }

        debug!(variant = %variant.name, "prepared ballot");
        Ok(prepared)
    }

    fn voter<'a>(
        &self,
        prepared: &'a PreparedBallot,
        slot: InputSlot,
    ) -> Result<&'a VoterMaterial> {
        prepared.voter.as_ref().ok_or_else(|| self.missing(slot))
    }

    fn slot_scalars(&self, slot: InputSlot, prepared: &PreparedBallot) -> Result<Vec<Scalar>> {
        let params = &prepared.params;
        let one = |v: u64| -> Result<Vec<Scalar>> { Ok(vec![Scalar::from(v)]) };
        let tag = |v: Option<Scalar>| v.map(|s| vec![s]).ok_or_else(|| self.missing(slot));

        match slot {
            InputSlot::Fields => Ok(prepared.fields.clone()),
            InputSlot::MaxCount => one(params.max_count),
            InputSlot::ForceUniqueness => Ok(vec![bool_scalar(params.force_uniqueness)]),
            InputSlot::MaxValue => one(params.max_value),
            InputSlot::MinValue => one(params.min_value),
            InputSlot::MaxTotalCost => one(params.max_total_cost),
            InputSlot::MinTotalCost => one(params.min_total_cost),
            InputSlot::CostExp => one(params.cost_exp),
            InputSlot::CostFromWeight => Ok(vec![bool_scalar(params.cost_from_weight)]),
            InputSlot::Weight => one(params.weight),
            InputSlot::PublicKey => {
                Ok(self.voter(prepared, slot)?.public_key.coordinates().to_vec())
            }
            InputSlot::K => Ok(vec![self.voter(prepared, slot)?.k]),
            InputSlot::Msg => prepared
                .fields
                .first()
                .map(|m| vec![*m])
                .ok_or_else(|| self.missing(slot)),
            InputSlot::C1 => prepared
                .message_cipher
                .map(|c| c.c1.coordinates().to_vec())
                .ok_or_else(|| self.missing(slot)),
            InputSlot::C2 => prepared
                .message_cipher
                .map(|c| c.c2.coordinates().to_vec())
                .ok_or_else(|| self.missing(slot)),
            InputSlot::CipherFields => prepared
                .cipher
                .as_ref()
                .map(|c| c.flat.clone())
                .ok_or_else(|| self.missing(slot)),
            InputSlot::Nullifier => tag(prepared.nullifier),
            InputSlot::Commitment => tag(prepared.commitment),
            InputSlot::Secret => Ok(vec![self.voter(prepared, slot)?.secret]),
            InputSlot::Address => Ok(vec![self.voter(prepared, slot)?.address]),
            InputSlot::ProcessId => Ok(vec![self.voter(prepared, slot)?.process_id]),
            InputSlot::VoteId => tag(prepared.vote_id),
            // never part of a layout
            InputSlot::InputsHash => Err(self.missing(slot)),
        }
    }

    /// The ordered vector the variant's inputs hash absorbs.
    pub fn flatten_hash_inputs(&self, prepared: &PreparedBallot) -> Result<Vec<Scalar>> {
        let mut flat = Vec::with_capacity(self.variant.hash_len());
        for slot in self.variant.hash_layout {
            flat.extend(self.slot_scalars(*slot, prepared)?);
        }
        Ok(flat)
    }

    fn slot_json(&self, slot: InputSlot, prepared: &PreparedBallot) -> Result<Value> {
        let value = match slot {
            InputSlot::Fields | InputSlot::PublicKey | InputSlot::C1 | InputSlot::C2 => {
                strings(&self.slot_scalars(slot, prepared)?)
            }
            InputSlot::CipherFields => {
                let cipher = prepared.cipher.as_ref().ok_or_else(|| self.missing(slot))?;
                serde_json::to_value(cipher.to_strings())?
            }
            _ => {
                let scalars = self.slot_scalars(slot, prepared)?;
                let first = scalars.first().ok_or_else(|| self.missing(slot))?;
                decimal(first)
            }
        };
        Ok(value)
    }

    /// Builds the circuit input object, attaching `inputs_hash` when the variant
    /// defines one.
    pub fn assemble(&self, ballot: &Ballot) -> Result<CircuitInputs> {
        let prepared = self.prepare(ballot)?;
        self.assemble_prepared(&prepared)
    }

    pub fn assemble_prepared(&self, prepared: &PreparedBallot) -> Result<CircuitInputs> {
        let hash = match self.variant.inputs_hash {
            Some(primitive) => {
                let flat = self.flatten_hash_inputs(prepared)?;
                Some(inputs_hash(primitive, &flat)?)
            }
            None => None,
        };

        let mut values = Map::new();
        for slot in self.variant.keys {
            let value = match (slot, &hash) {
                (InputSlot::InputsHash, Some(h)) => decimal(h),
                (InputSlot::InputsHash, None) => return Err(self.missing(*slot)),
                _ => self.slot_json(*slot, prepared)?,
            };
            values.insert(slot.key().to_string(), value);
        }

        info!(
            variant = %self.variant.name,
            keys = values.len(),
            hashed = hash.is_some(),
            "assembled circuit inputs"
        );

        Ok(CircuitInputs {
            variant: self.variant.name,
            values,
            inputs_hash: hash,
        })
    }
}
