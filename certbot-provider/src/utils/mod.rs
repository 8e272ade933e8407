//! Utility modules.

/// Date/time serde helpers shared by the clients.
pub mod datetime;

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;
