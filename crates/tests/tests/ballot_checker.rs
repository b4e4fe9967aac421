// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{bail, Result};
use ballot_inputs::{Ballot, BallotParams, CircuitVariant, InputAssembler};
use ballot_prover::ProofBridge;
use ballot_test_helpers::{init_test_tracing, placeholder_artifacts, RuleCheckingBackend};
use tempfile::TempDir;
use tracing::info;

struct Case {
    name: &'static str,
    fields: &'static [u64],
    max_count: u64,
    force_unique: bool,
    max_value: u64,
    min_value: u64,
    max_total_cost: u64,
    min_total_cost: u64,
    cost_exp: u64,
    expect_pass: bool,
}

impl Case {
    fn params(&self) -> BallotParams {
        BallotParams {
            max_count: self.max_count,
            force_uniqueness: self.force_unique,
            max_value: self.max_value,
            min_value: self.min_value,
            max_total_cost: self.max_total_cost,
            min_total_cost: self.min_total_cost,
            cost_exp: self.cost_exp,
            cost_from_weight: false,
            weight: 0,
        }
    }
}

const CASES: &[Case] = &[
    Case {
        name: "five star rating",
        fields: &[3, 2, 5],
        max_count: 3,
        force_unique: true,
        max_value: 5,
        min_value: 0,
        max_total_cost: 15,
        min_total_cost: 0,
        cost_exp: 1,
        expect_pass: true,
    },
    Case {
        name: "duplicate with uniqueness forced",
        fields: &[3, 3, 1],
        max_count: 3,
        force_unique: true,
        max_value: 5,
        min_value: 0,
        max_total_cost: 16,
        min_total_cost: 0,
        cost_exp: 1,
        expect_pass: false,
    },
    Case {
        name: "max value inclusive and zero max cost ignored",
        fields: &[50, 49, 48],
        max_count: 3,
        force_unique: false,
        max_value: 50,
        min_value: 0,
        max_total_cost: 0,
        min_total_cost: 0,
        cost_exp: 1,
        expect_pass: true,
    },
    Case {
        name: "value above max value",
        fields: &[13, 0, 0],
        max_count: 3,
        force_unique: false,
        max_value: 12,
        min_value: 0,
        max_total_cost: 15,
        min_total_cost: 0,
        cost_exp: 1,
        expect_pass: false,
    },
    Case {
        name: "value below min value",
        fields: &[1, 0, 0],
        max_count: 3,
        force_unique: false,
        max_value: 11,
        min_value: 5,
        max_total_cost: 1000,
        min_total_cost: 0,
        cost_exp: 1,
        expect_pass: false,
    },
    Case {
        name: "quadratic cost at the limit",
        fields: &[2, 2, 2],
        max_count: 3,
        force_unique: false,
        max_value: 4,
        min_value: 0,
        max_total_cost: 12,
        min_total_cost: 0,
        cost_exp: 2,
        expect_pass: true,
    },
    Case {
        name: "quadratic cost over the limit",
        fields: &[3, 2, 1],
        max_count: 3,
        force_unique: false,
        max_value: 4,
        min_value: 0,
        max_total_cost: 13,
        min_total_cost: 0,
        cost_exp: 2,
        expect_pass: false,
    },
    Case {
        name: "min total cost not reached",
        fields: &[2, 0, 0],
        max_count: 3,
        force_unique: false,
        max_value: 4,
        min_value: 0,
        max_total_cost: 20,
        min_total_cost: 5,
        cost_exp: 2,
        expect_pass: false,
    },
    Case {
        name: "duplicates allowed without uniqueness",
        fields: &[5, 5, 0],
        max_count: 3,
        force_unique: false,
        max_value: 5,
        min_value: 0,
        max_total_cost: 15,
        min_total_cost: 0,
        cost_exp: 1,
        expect_pass: true,
    },
    Case {
        name: "approval, three of six",
        fields: &[1, 0, 1, 0, 1, 0],
        max_count: 6,
        force_unique: false,
        max_value: 1,
        min_value: 0,
        max_total_cost: 3,
        min_total_cost: 3,
        cost_exp: 1,
        expect_pass: true,
    },
    Case {
        name: "approval, four of six",
        fields: &[1, 1, 1, 1, 0, 0],
        max_count: 6,
        force_unique: false,
        max_value: 1,
        min_value: 0,
        max_total_cost: 3,
        min_total_cost: 3,
        cost_exp: 1,
        expect_pass: false,
    },
    Case {
        name: "ranked choice, unique ranks",
        fields: &[1, 2, 3],
        max_count: 3,
        force_unique: true,
        max_value: 3,
        min_value: 1,
        max_total_cost: 6,
        min_total_cost: 6,
        cost_exp: 1,
        expect_pass: true,
    },
    Case {
        name: "ranked choice, duplicate rank",
        fields: &[1, 1, 2],
        max_count: 3,
        force_unique: true,
        max_value: 3,
        min_value: 1,
        max_total_cost: 6,
        min_total_cost: 6,
        cost_exp: 1,
        expect_pass: false,
    },
    Case {
        name: "all zeros with positive min total cost",
        fields: &[0, 0, 0],
        max_count: 3,
        force_unique: false,
        max_value: 5,
        min_value: 0,
        max_total_cost: 10,
        min_total_cost: 1,
        cost_exp: 1,
        expect_pass: false,
    },
];

#[test]
fn test_ballot_checker_cases() -> Result<()> {
    let _guard = init_test_tracing();
    let variant = CircuitVariant::BALLOT_CHECKER;
    let dir = TempDir::new_in(env!("CARGO_TARGET_TMPDIR"))?;
    let artifacts = placeholder_artifacts(dir.path(), variant.name)?;
    let bridge = ProofBridge::new(Box::new(RuleCheckingBackend));
    let assembler = InputAssembler::new(variant);

    for case in CASES {
        let ballot = Ballot::new(case.fields.to_vec(), case.params());
        let inputs = assembler.assemble(&ballot)?;
        info!(case = case.name, inputs = %inputs.to_json()?, "checking ballot");

        // a rejection at either stage counts as failure
        let outcome = bridge.prove_and_verify(&inputs, &artifacts);
        match (case.expect_pass, outcome) {
            (true, Ok(_)) | (false, Err(_)) => {}
            (true, Err(e)) => bail!("'{}' should pass: {e}", case.name),
            (false, Ok(_)) => bail!("'{}' should fail", case.name),
        }
    }
    Ok(())
}
