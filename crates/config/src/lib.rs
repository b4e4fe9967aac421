// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod artifacts;
mod bridge_config;
pub mod load_config;

pub use artifacts::*;
pub use bridge_config::*;
