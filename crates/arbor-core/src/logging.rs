//! Logging facilities for Arbor.
//!
//! Arbor uses the `tracing` crate for instrumentation. The library itself
//! never installs a subscriber; to see logs, install one in the consuming
//! application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("arbor=trace,arbor_core=trace")
//!     .init();
//! ```
//!
//! Rejected model operations (out-of-range arguments, cross-model indexes,
//! refused mutations) are reported at `trace` level only — the boolean
//! return value is the API, the log is diagnostics.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "arbor_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "arbor_core::signal";
    /// Item-model protocol target.
    pub const MODEL: &str = "arbor::model";
}
