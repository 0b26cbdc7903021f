use std::fmt;

/// Errors produced by credential derivation and verification.
///
/// A wrong password is *not* an error: `verify` reports it as `Ok(false)`.
/// `MalformedRecord` signals a corrupted stored record, which callers must
/// keep distinct from an ordinary authentication failure.
#[derive(Debug)]
pub enum CredentialError {
    EntropyUnavailable,
    InvalidParameters(String),
    MalformedRecord(String),
    Hashing(String),
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::EntropyUnavailable => {
                write!(f, "OS random generator unavailable")
            }
            CredentialError::InvalidParameters(msg) => {
                write!(f, "invalid hashing parameters: {msg}")
            }
            CredentialError::MalformedRecord(msg) => {
                write!(f, "malformed credential record: {msg}")
            }
            CredentialError::Hashing(msg) => {
                write!(f, "argon2 key derivation failed: {msg}")
            }
        }
    }
}

impl std::error::Error for CredentialError {}
