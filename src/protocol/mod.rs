//! Challenge extraction from transport headers.
//!
//! ## Header Format
//!
//! The challenge is carried in a single custom header (conventionally
//! `X-WSSE`) with quoted fields:
//! ```text
//! UsernameToken Username="U", PasswordDigest="D", Nonce="N", Created="C"
//! ```

mod header;

pub use header::extract_challenge;
