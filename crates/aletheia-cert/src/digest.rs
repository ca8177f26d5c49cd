use std::fs::File;
use std::io::Read;
use std::path::Path;

use aletheia_core::errors::{io_error, AletheiaError};
use aletheia_core::{stable_hash_string, DIGEST_PREFIX};
use sha2::{Digest, Sha256};

use crate::certificate::Certificate;

const CHUNK_SIZE: usize = 8192;

/// `0x`-prefixed SHA-256 of the certificate's canonical JSON encoding.
///
/// Canonical means recursively key-sorted and whitespace free, so the digest
/// does not depend on how the document was assembled in memory.
pub fn certificate_hash(cert: &Certificate) -> Result<String, AletheiaError> {
    stable_hash_string(cert)
}

/// `0x`-prefixed SHA-256 over the raw bytes of `path`, read in 8 KiB chunks.
pub fn verify_file<P: AsRef<Path>>(path: P) -> Result<String, AletheiaError> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|err| io_error("certificate_open", path, err))?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; CHUNK_SIZE];
    loop {
        let read = file
            .read(&mut buffer)
            .map_err(|err| io_error("certificate_read", path, err))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(format!("{DIGEST_PREFIX}{}", hex::encode(hasher.finalize())))
}
