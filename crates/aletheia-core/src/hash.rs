use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::AletheiaError;
use crate::serde::to_canonical_json_bytes;

/// Marker prefixed to every digest rendered by the engine.
pub const DIGEST_PREFIX: &str = "0x";

/// Renders a SHA-256 digest of `bytes` as `0x` followed by lowercase hex.
pub fn prefixed_sha256(bytes: &[u8]) -> String {
    format!("{DIGEST_PREFIX}{}", hex::encode(Sha256::digest(bytes)))
}

/// Computes a stable SHA-256 hash over the canonical JSON encoding of `value`.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, AletheiaError> {
    let bytes = to_canonical_json_bytes(value)?;
    Ok(prefixed_sha256(&bytes))
}
