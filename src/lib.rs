//! WSSE Guard Library
//!
//! This crate provides stateless, header-carried challenge-response
//! authentication (WSSE-style) for protecting API endpoints without
//! server-side sessions. A client proves knowledge of a shared secret
//! using a timestamp, a single-use nonce, and a SHA-1 digest; the
//! verification engine checks the time window, detects replays, and
//! recompares the digest in constant time.

pub mod audit;
pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod protocol;
pub mod token;
