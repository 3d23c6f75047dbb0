//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Registry-level constants are defined in `startlog_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "startlog.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "startlog";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "STARTLOG";

/// Separator between the prefix and nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding an `EnvFilter` directive override
pub const LOG_FILTER_ENV: &str = "STARTLOG_LOG";

/// File name prefix used for rolling log files when none can be derived
pub const LOG_FILE_PREFIX: &str = "startlog";
