//! Authentication engine.
//!
//! Handles challenge verification, nonce replay tracking, constant-time
//! digest comparison, credential resolution, and dispatch across
//! authentication schemes.

mod authenticator;
mod digest;
mod dispatcher;
mod nonce;
mod resolver;

pub use authenticator::{Authenticator, WsseAuthenticator};
pub use digest::{compute_digest, verify_digest};
pub use dispatcher::{AuthenticationDispatcher, DispatchOutcome};
pub use nonce::{NonceCache, NonceKey};
pub use resolver::{CredentialResolver, Principal, Secret, StaticCredentialResolver};
