//! Error types for WSSE verification.
//!
//! Provides a unified error handling system using thiserror.

mod types;

pub use types::*;
