//! Observability infrastructure for the storefront platform.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with request context
//! - `LogSink` - Where log lines go (stderr, or memory for tests)

mod logging;

pub use logging::*;

// Re-export RequestId from edge-core for convenience
pub use edge_core::RequestId;
