//! Credential hashing for identity services.
//!
//! Derives and verifies password credentials with Argon2id. Every stored
//! record carries its own cost parameters, so operators can raise the
//! defaults without invalidating existing credentials.

mod credential;
mod entropy;
mod error;
mod user;

pub use crate::credential::{
    ALGORITHM, Credential, DEFAULT_KEY_LEN, DEFAULT_SALT_LEN, HashingParams, MIN_KEY_LEN,
    MIN_SALT_LEN, RECORD_VERSION, derive, verify,
};
pub use crate::entropy::seed;
pub use crate::error::CredentialError;
pub use crate::user::User;
