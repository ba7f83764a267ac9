//! Tracing and logging setup shared by the storefront binaries and tests.

/// Tracing configuration (filters, formats).
pub mod tracing;

pub use self::tracing::LogFormat;

/// Initialize process-wide observability with JSON logs.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    init_with(LogFormat::Json);
}

/// Like [`init`], with an explicit log format.
pub fn init_with(format: LogFormat) {
    self::tracing::init(format);
}
