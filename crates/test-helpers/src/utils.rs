// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::{fs, path::Path};

use tracing::{subscriber::DefaultGuard, trace};
use tracing_subscriber::{fmt, EnvFilter};

/// Installs a test-writer subscriber for the current thread. Keep the guard alive
/// for the duration of the test.
pub fn init_test_tracing() -> DefaultGuard {
    let subscriber = fmt()
        .with_env_filter(EnvFilter::new("info"))
        .with_test_writer()
        .finish();
    tracing::subscriber::set_default(subscriber)
}

pub fn write_file_with_dirs(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let abs_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    if let Some(parent) = abs_path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&abs_path, content)?;
    trace!(path = %abs_path.display(), "File written");
    Ok(())
}
