//! Shared configuration constants for the APY scrapers
//!
//! Default values used throughout the codebase to avoid magic numbers.

/// User agent sent by the static extractor
///
/// The dynamic extractor deliberately does not override the browser's own
/// user agent.
pub const STATIC_USER_AGENT: &str = "ScopeBot/1.0";

/// Default timeout for the static HTTP fetch
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 30_000;

/// Default per-command timeout for the Chrome DevTools Protocol connection
pub const DEFAULT_CDP_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Prefix for per-call browser profile directories under the system temp dir
pub const PROFILE_DIR_PREFIX: &str = "hysa_apy_chrome";
