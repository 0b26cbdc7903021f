//! Credential hashing for password-based authentication.
//!
//! Provides Argon2id key derivation, persisted cost parameters, and
//! timing-safe verification.

pub mod kdf;
pub mod params;
pub mod record;

pub use kdf::{derive, verify};
pub use params::HashingParams;
pub use record::Credential;

/// Algorithm tag stored in every credential record.
pub const ALGORITHM: &str = "argon2id";
/// Record format version.
pub const RECORD_VERSION: u8 = 1;
/// Default salt length (16 bytes).
pub const DEFAULT_SALT_LEN: u32 = 16;
/// Default derived key length (32 bytes / 256 bits).
pub const DEFAULT_KEY_LEN: u32 = 32;
/// Minimum salt length accepted by Argon2 (8 bytes).
pub const MIN_SALT_LEN: u32 = 8;
/// Minimum derived key length accepted by Argon2 (4 bytes).
pub const MIN_KEY_LEN: u32 = 4;
