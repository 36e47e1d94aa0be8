//! Common utilities shared by the tyguard crates.
//!
//! - Centralized limits (instantiation depth, validation depth)
//! - Tracing subscriber setup for the CLI

// Centralized limits and thresholds
pub mod limits;

// Tracing subscriber configuration (TYGUARD_LOG / TYGUARD_LOG_FORMAT)
pub mod tracing_config;
