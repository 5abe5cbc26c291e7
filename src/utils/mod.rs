//! Shared helpers: tracing setup and filesystem locations.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

use crate::errors::Result;

/// Directory under the home directory that holds all persisted state.
const DEFAULT_DIR_NAME: &str = ".budget_saver";

/// Environment variable that overrides the data directory, mainly for tests.
pub const HOME_OVERRIDE_VAR: &str = "BUDGET_SAVER_HOME";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
///
/// Safe to call multiple times; only the first call installs the subscriber.
/// Honors `RUST_LOG` when set, otherwise logs `budget_saver` at info level.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("budget_saver=info"));

        fmt().with_env_filter(filter).init();
    });
}

/// Returns the application data directory.
///
/// Resolution order: the [`HOME_OVERRIDE_VAR`] environment variable if set,
/// otherwise `~/.budget_saver`, falling back to the current directory when no
/// home directory can be determined.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_OVERRIDE_VAR) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Creates `path` and any missing parents.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}
