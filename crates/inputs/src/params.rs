// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use ballot_crypto::{from_subgroup, CurvePoint, Scalar, SubgroupScalar};
use serde::{Deserialize, Serialize};

/// Public ballot-shape rules the circuit enforces.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotParams {
    /// Number of meaningful fields; the rest of the circuit slots must be zero.
    pub max_count: u64,
    pub force_uniqueness: bool,
    pub max_value: u64,
    pub min_value: u64,
    /// Zero disables the upper cost bound.
    pub max_total_cost: u64,
    pub min_total_cost: u64,
    /// Each field costs `field^cost_exp`.
    pub cost_exp: u64,
    /// Use `weight` as the upper cost bound instead of `max_total_cost`.
    pub cost_from_weight: bool,
    pub weight: u64,
}

impl BallotParams {
    /// `max_value^cost_exp · max_count`, saturating on overflow.
    pub fn max_total_cost_for(max_value: u64, cost_exp: u64, max_count: u64) -> u64 {
        let exp = u32::try_from(cost_exp).unwrap_or(u32::MAX);
        max_value.saturating_pow(exp).saturating_mul(max_count)
    }
}

/// Secret and identifying material of one voter for one process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoterMaterial {
    pub public_key: CurvePoint,
    /// Nonce-chain seed.
    pub k: Scalar,
    pub address: Scalar,
    pub process_id: Scalar,
    pub secret: Scalar,
}

impl VoterMaterial {
    pub fn new(public_key: CurvePoint, k: &SubgroupScalar) -> Self {
        Self {
            public_key,
            k: from_subgroup(k),
            address: Scalar::from(0u64),
            process_id: Scalar::from(0u64),
            secret: Scalar::from(0u64),
        }
    }

    pub fn with_identity(mut self, address: Scalar, process_id: Scalar, secret: Scalar) -> Self {
        self.address = address;
        self.process_id = process_id;
        self.secret = secret;
        self
    }
}

/// Plain ballot values plus everything needed to turn them into circuit inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ballot {
    pub fields: Vec<u64>,
    pub params: BallotParams,
    pub voter: Option<VoterMaterial>,
}

impl Ballot {
    pub fn new(fields: Vec<u64>, params: BallotParams) -> Self {
        Self {
            fields,
            params,
            voter: None,
        }
    }

    pub fn with_voter(mut self, voter: VoterMaterial) -> Self {
        self.voter = Some(voter);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_total_cost_for() {
        assert_eq!(BallotParams::max_total_cost_for(16, 2, 5), 1280);
        assert_eq!(BallotParams::max_total_cost_for(5, 1, 3), 15);
        assert_eq!(BallotParams::max_total_cost_for(7, 0, 4), 4);
        assert_eq!(BallotParams::max_total_cost_for(u64::MAX, 3, 2), u64::MAX);
    }

    #[test]
    fn test_params_serde() {
        let params = BallotParams {
            max_count: 3,
            force_uniqueness: true,
            max_value: 5,
            max_total_cost: 15,
            cost_exp: 1,
            ..Default::default()
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["force_uniqueness"], serde_json::json!(true));
        let back: BallotParams = serde_json::from_value(json).unwrap();
        assert_eq!(back, params);
    }
}
