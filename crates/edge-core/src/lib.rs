//! Core abstractions for the storefront platform.
//!
//! This crate provides the fundamental types:
//! - `RequestId` - Correlation identifier for logs
//! - `GridConfig` / `StoreConfig` - Workload configuration
//! - `ConfigError` - Configuration loading failures

mod config;
mod context;

pub use config::*;
pub use context::*;
