use serde::{Deserialize, Serialize};

use super::{DEFAULT_KEY_LEN, DEFAULT_SALT_LEN, MIN_KEY_LEN, MIN_SALT_LEN};
use crate::error::CredentialError;

/// Cost and shape parameters for Argon2id password hashing.
///
/// A full copy of these is snapshotted into every [`Credential`] record, so
/// stored credentials keep verifying under their original settings even after
/// the operator raises the defaults. Parameters are immutable once
/// constructed; there are no mutators and no ambient global configuration.
///
/// [`Credential`]: super::Credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashingParams {
    key_len: u32,
    salt_len: u32,
    time_cost: u32,
    mem_cost_kib: u32,
    parallelism: u32,
}

impl Default for HashingParams {
    fn default() -> Self {
        Self {
            key_len: DEFAULT_KEY_LEN,
            salt_len: DEFAULT_SALT_LEN,
            // default number of iterations
            time_cost: 3,
            // default memory cost, 64 MiB
            mem_cost_kib: 64 * 1024,
            // default number of lanes
            parallelism: 1,
        }
    }
}

impl HashingParams {
    pub fn new(
        key_len: u32,
        salt_len: u32,
        time_cost: u32,
        mem_cost_kib: u32,
        parallelism: u32,
    ) -> Result<Self, CredentialError> {
        let params = Self {
            key_len,
            salt_len,
            time_cost,
            mem_cost_kib,
            parallelism,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn key_len(&self) -> u32 {
        self.key_len
    }

    pub fn salt_len(&self) -> u32 {
        self.salt_len
    }

    pub fn time_cost(&self) -> u32 {
        self.time_cost
    }

    pub fn mem_cost_kib(&self) -> u32 {
        self.mem_cost_kib
    }

    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }

    pub fn validate(&self) -> Result<(), CredentialError> {
        if self.key_len < MIN_KEY_LEN {
            return Err(invalid(format!(
                "key length must be >= {MIN_KEY_LEN} bytes"
            )));
        }
        if self.salt_len < MIN_SALT_LEN {
            return Err(invalid(format!(
                "salt length must be >= {MIN_SALT_LEN} bytes"
            )));
        }
        if self.time_cost < 1 {
            return Err(invalid("time cost must be >= 1".into()));
        }
        if self.parallelism < 1 {
            return Err(invalid("parallelism must be >= 1".into()));
        }
        if self.mem_cost_kib < 8 {
            return Err(invalid("memory cost too low".into()));
        }
        // Argon2 requires at least 8 KiB per lane
        if self.mem_cost_kib < 8 * self.parallelism {
            return Err(invalid(
                "memory cost must be at least 8 * parallelism".into(),
            ));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> CredentialError {
    CredentialError::InvalidParameters(msg)
}
