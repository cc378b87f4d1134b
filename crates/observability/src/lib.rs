//! Tracing/logging setup shared by the gatepass binaries.

/// Initialize process-wide tracing with the given level and output format.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init(level: &str, format: LogFormat) {
    self::tracing::init(level, format);
}

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use self::tracing::{LogFormat, env_filter};
