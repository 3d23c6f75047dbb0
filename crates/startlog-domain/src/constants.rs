//! Domain layer constants
//!
//! Values that are part of the observable contract of the registry.
//! Infrastructure-specific constants (config paths, env prefixes) live in
//! `startlog_infrastructure::constants`.

// ============================================================================
// CATEGORY CONSTANTS
// ============================================================================

/// Logger category used by steps that do not name one explicitly
pub const DEFAULT_STARTUP_CATEGORY: &str = "Microsoft.Hosting.Startup";

// ============================================================================
// HOOK CONSTANTS
// ============================================================================

/// Name under which the deferred log registry registers its startup hook
pub const STARTUP_LOG_HOOK_NAME: &str = "startlog.deferred-registry";
