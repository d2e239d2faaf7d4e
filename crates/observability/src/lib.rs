//! Tracing/logging setup shared by the shop admin binaries.

/// Initialize process-wide logging.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

pub use tracing::service_span;

/// Tracing configuration (filters, layers).
pub mod tracing;
