use serde::{Deserialize, Serialize};

use super::params::HashingParams;
use super::{ALGORITHM, RECORD_VERSION};

/// A stored credential: parameters snapshot plus encoded salt and derived key.
///
/// The record is the only persisted artifact of the hashing subsystem.
/// Collaborators store and return it verbatim; the salt and key fields are
/// opaque and must never be parsed, queried by, or indexed.
///
/// Records are immutable. A password change produces a brand-new record with
/// fresh salt and key; the old one is replaced wholesale, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    algorithm: String,
    version: u8,
    params: HashingParams,
    salt: String,
    key: String,
}

impl Credential {
    pub(crate) fn new(params: HashingParams, salt: String, key: String) -> Self {
        Self {
            algorithm: ALGORITHM.to_string(),
            version: RECORD_VERSION,
            params,
            salt,
            key,
        }
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    /// The parameters this record was derived under. Verification always uses
    /// these, never the caller's current defaults.
    pub fn params(&self) -> &HashingParams {
        &self.params
    }

    /// URL-safe base64 of the random salt.
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// URL-safe base64 of the derived key.
    pub fn key(&self) -> &str {
        &self.key
    }
}
