use crate::error::CredentialError;
use getrandom::fill;

/// Fill a buffer of `length` bytes with cryptographically secure randomness.
///
/// Sourced from the operating system generator; there is no fallback to a
/// non-cryptographic generator. If the OS cannot supply the requested bytes
/// the calling operation fails with [`CredentialError::EntropyUnavailable`].
pub fn seed(length: usize) -> Result<Vec<u8>, CredentialError> {
    let mut buf = vec![0u8; length];
    fill(&mut buf).map_err(|_| CredentialError::EntropyUnavailable)?;
    Ok(buf)
}
