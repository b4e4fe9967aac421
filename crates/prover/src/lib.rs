// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod backend;
mod bridge;
mod error;
mod proof;
mod rapidsnark;
mod snarkjs;

pub use backend::ProvingBackend;
pub use bridge::ProofBridge;
pub use error::{ProverError, Result};
pub use proof::{Proof, ProofBundle, PublicSignals};
pub use rapidsnark::RapidsnarkBackend;
pub use snarkjs::SnarkjsBackend;
