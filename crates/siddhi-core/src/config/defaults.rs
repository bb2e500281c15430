//! Default values for Siddhi configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Storage Defaults
// ============================================================================

/// Default data directory.
pub const DEFAULT_DATA_DIR: &str = ".siddhi";

/// Default crash report file name.
pub const DEFAULT_CRASH_FILE: &str = "crash.log";

/// Default log file name, used while the terminal form owns the screen.
pub const DEFAULT_LOG_FILE: &str = "siddhi.log";

/// Project-local config file name.
pub const DEFAULT_CONFIG_FILE: &str = "siddhi.toml";

// ============================================================================
// Scanner Defaults
// ============================================================================

/// Prefix of synthetic resource ids.
pub const DEFAULT_SCAN_PREFIX: &str = "RES";

/// Number of zero-padded digits after the prefix.
pub const DEFAULT_SCAN_DIGITS: u32 = 4;

/// Simulated scan duration in milliseconds.
pub const DEFAULT_SCAN_DELAY_MS: u64 = 1400;

// ============================================================================
// Server Defaults
// ============================================================================

/// Default port for the web form.
pub const DEFAULT_SERVE_PORT: u16 = 3333;

// ============================================================================
// Logging Defaults
// ============================================================================

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "siddhi=info";
