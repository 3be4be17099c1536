//! Centralized path definitions for unitspec
//!
//! ## Layout
//!
//! ### Per-Project
//!
//! ```text
//! role/
//! └── test/integration/          # Default suite directory
//!     ├── launch/default.toml
//!     └── config_unit/default.toml
//! ```
//!
//! ### Global (User-Level)
//!
//! ```text
//! ~/.config/unitspec/
//! └── config.toml               # Target, timeouts, ssh and systemd settings
//! ```

use std::path::{Path, PathBuf};

// =============================================================================
// Project-level paths
// =============================================================================

/// Directory searched for suites when no path is given
pub const DEFAULT_SUITE_DIR: &str = "test/integration";

/// File extension of suite files
pub const SUITE_EXTENSION: &str = "toml";

/// Suite file written by `unitspec init`
const DEFAULT_SUITE_FILE: &str = "default.toml";

/// Get the default suite directory below `root`.
#[must_use]
pub fn default_suite_dir(root: &Path) -> PathBuf {
    root.join(DEFAULT_SUITE_DIR)
}

/// Get the path of the suite file created by `init` inside `dir`.
#[must_use]
pub fn default_suite_file(dir: &Path) -> PathBuf {
    dir.join(DEFAULT_SUITE_FILE)
}

/// Whether a path looks like a suite file
#[must_use]
pub fn is_suite_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SUITE_EXTENSION)
}

// =============================================================================
// Global paths (user-level)
// =============================================================================

/// Global config directory name
const GLOBAL_DIR: &str = "unitspec";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get the global unitspec directory.
///
/// Returns `~/.config/unitspec/` (XDG config dir on Linux).
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join(GLOBAL_DIR)
}

/// Get the global config file path.
///
/// Returns `~/.config/unitspec/config.toml`.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}
