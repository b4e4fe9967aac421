// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod assembler;
mod error;
mod params;
mod variant;

pub use assembler::{CircuitInputs, InputAssembler, PreparedBallot};
pub use error::{InputsError, Result};
pub use params::{Ballot, BallotParams, VoterMaterial};
pub use variant::{CircuitVariant, InputSlot, DEFAULT_N_FIELDS};
