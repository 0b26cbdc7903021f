use argon2::{Algorithm, Argon2, Params, Version};
use base64::{Engine as _, engine::general_purpose::URL_SAFE};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::params::HashingParams;
use super::record::Credential;
use super::{ALGORITHM, RECORD_VERSION};
use crate::entropy;
use crate::error::CredentialError;

/// Derive a new credential record for `password`.
///
/// Draws a fresh salt from the OS generator, runs Argon2id under the given
/// parameters, and returns a record carrying a copy of those parameters plus
/// the URL-safe base64 of salt and derived key. The password itself is never
/// stored or echoed.
///
/// This call is deliberately CPU- and memory-expensive; each invocation may
/// claim `mem_cost_kib` of working memory. Callers serving concurrent
/// requests should bound in-flight derivations and keep the call off any
/// latency-sensitive event loop.
pub fn derive(password: &str, params: HashingParams) -> Result<Credential, CredentialError> {
    params.validate()?;

    let salt = entropy::seed(params.salt_len() as usize)?;
    let key = derive_key(password, &salt, params)?;

    Ok(Credential::new(
        params,
        URL_SAFE.encode(&salt),
        URL_SAFE.encode(&key),
    ))
}

/// Check `password` against a stored credential record.
///
/// Re-derives a candidate key under the record's *own* stored parameters
/// (never the caller's current defaults) and compares it to the stored key in
/// constant time. Returns `Ok(false)` on an honest mismatch; a record that
/// fails to decode or carries corrupt parameters is a
/// [`CredentialError::MalformedRecord`], which callers must not conflate with
/// a wrong password.
pub fn verify(password: &str, record: &Credential) -> Result<bool, CredentialError> {
    if record.algorithm() != ALGORITHM || record.version() != RECORD_VERSION {
        return Err(CredentialError::MalformedRecord(format!(
            "unknown record format '{}' v{}",
            record.algorithm(),
            record.version()
        )));
    }

    let params = *record.params();
    params.validate().map_err(|e| {
        CredentialError::MalformedRecord(format!("stored parameters are invalid: {e}"))
    })?;

    let salt = decode_exact(record.salt(), params.salt_len() as usize, "salt")?;
    let stored = Zeroizing::new(decode_exact(record.key(), params.key_len() as usize, "key")?);

    let candidate = derive_key(password, &salt, params)?;

    // lengths are pinned by decode_exact; a mismatch here is a no-match,
    // never a variable-time comparison
    if candidate.len() != stored.len() {
        return Ok(false);
    }

    Ok(candidate.as_slice().ct_eq(stored.as_slice()).into())
}

/// Run Argon2id over `password` and `salt`, producing `params.key_len` bytes.
fn derive_key(
    password: &str,
    salt: &[u8],
    params: HashingParams,
) -> Result<Zeroizing<Vec<u8>>, CredentialError> {
    let argon_params = Params::new(
        params.mem_cost_kib(),
        params.time_cost(),
        params.parallelism(),
        Some(params.key_len() as usize),
    )
    .map_err(|e| CredentialError::Hashing(format!("failed to construct Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params);

    let mut key = Zeroizing::new(vec![0u8; params.key_len() as usize]);
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut key)
        .map_err(|e| CredentialError::Hashing(e.to_string()))?;

    Ok(key)
}

fn decode_exact(
    text: &str,
    expected_len: usize,
    field: &str,
) -> Result<Vec<u8>, CredentialError> {
    let bytes = URL_SAFE.decode(text).map_err(|e| {
        CredentialError::MalformedRecord(format!("{field} is not valid base64: {e}"))
    })?;

    if bytes.len() != expected_len {
        return Err(CredentialError::MalformedRecord(format!(
            "{field} decodes to {} bytes, expected {expected_len}",
            bytes.len()
        )));
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    // cheap costs so the suite stays fast
    fn fast_params() -> HashingParams {
        HashingParams::new(32, 16, 1, 8, 1).unwrap()
    }

    #[test]
    fn kdf_is_deterministic() {
        let salt = [42u8; 16];
        let params = fast_params();

        let k1 = derive_key("password", &salt, params).unwrap();
        let k2 = derive_key("password", &salt, params).unwrap();

        assert_eq!(*k1, *k2);
    }

    #[test]
    fn kdf_params_affect_output() {
        let salt = [7u8; 16];

        let p1 = HashingParams::new(32, 16, 1, 8, 1).unwrap();
        let p2 = HashingParams::new(32, 16, 2, 8, 1).unwrap();

        let k1 = derive_key("pw", &salt, p1).unwrap();
        let k2 = derive_key("pw", &salt, p2).unwrap();

        assert_ne!(*k1, *k2);
    }

    #[test]
    fn kdf_honors_key_length() {
        let salt = [1u8; 16];
        let params = HashingParams::new(64, 16, 1, 8, 1).unwrap();

        let key = derive_key("pw", &salt, params).unwrap();
        assert_eq!(key.len(), 64);
    }

    #[test]
    fn derive_then_verify_matches() {
        let record = derive("hunter2", fast_params()).unwrap();
        assert!(verify("hunter2", &record).unwrap());
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let record = derive("hunter2", fast_params()).unwrap();
        assert!(!verify("hunter3", &record).unwrap());
    }

    #[test]
    fn derive_uses_fresh_entropy_per_call() {
        let r1 = derive("pw", fast_params()).unwrap();
        let r2 = derive("pw", fast_params()).unwrap();

        assert_ne!(r1.salt(), r2.salt());
        assert_ne!(r1.key(), r2.key());
    }

    #[test]
    fn record_snapshots_parameters() {
        let params = HashingParams::new(48, 24, 2, 16, 2).unwrap();
        let record = derive("pw", params).unwrap();

        assert_eq!(*record.params(), params);
    }

    #[test]
    fn encoded_fields_decode_to_declared_lengths() {
        let record = derive("pw", fast_params()).unwrap();

        let salt = URL_SAFE.decode(record.salt()).unwrap();
        let key = URL_SAFE.decode(record.key()).unwrap();

        assert_eq!(salt.len(), record.params().salt_len() as usize);
        assert_eq!(key.len(), record.params().key_len() as usize);
    }

    #[test]
    fn derive_rejects_invalid_parameters_before_hashing() {
        // deserialization is the one path that can smuggle in unvalidated
        // fields; derive must still reject them up front
        let bad: HashingParams = serde_json::from_str(
            r#"{"key_len":32,"salt_len":16,"time_cost":0,"mem_cost_kib":8,"parallelism":1}"#,
        )
        .unwrap();

        let err = derive("pw", bad).unwrap_err();
        assert!(matches!(err, CredentialError::InvalidParameters(_)));
    }

    #[test]
    fn decode_exact_rejects_bad_base64() {
        let err = decode_exact("not base64!!", 16, "salt").unwrap_err();
        assert!(matches!(err, CredentialError::MalformedRecord(_)));
    }

    #[test]
    fn decode_exact_rejects_wrong_length() {
        let short = URL_SAFE.encode([0u8; 8]);
        let err = decode_exact(&short, 16, "salt").unwrap_err();
        assert!(matches!(err, CredentialError::MalformedRecord(_)));
    }
}
