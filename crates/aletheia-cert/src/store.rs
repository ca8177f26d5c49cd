use std::fs;
use std::path::Path;

use aletheia_core::errors::{io_error, AletheiaError, ErrorInfo};
use aletheia_core::serde::{from_json_slice, to_sorted_pretty_json_bytes};
use aletheia_core::DIGEST_PREFIX;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::certificate::{Certificate, CERT_VERSION};
use crate::digest::{certificate_hash, verify_file};

/// Hashes recomputed for a certificate on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    /// Canonical hash of the parsed document.
    pub certificate_hash: String,
    /// Digest of the file bytes.
    pub file_hash: String,
}

fn malformed(code: &str, path: &Path, message: impl Into<String>) -> AletheiaError {
    AletheiaError::MalformedCertificate(
        ErrorInfo::new(code, message).with_context("path", path.display().to_string()),
    )
}

/// Writes `cert` as indented JSON with sorted keys and returns the file digest.
///
/// Parent directories are created as needed.
pub fn save_certificate<P: AsRef<Path>>(
    cert: &Certificate,
    path: P,
) -> Result<String, AletheiaError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| io_error("certificate_dir", parent, err))?;
    }
    let bytes = to_sorted_pretty_json_bytes(cert)?;
    fs::write(path, bytes).map_err(|err| io_error("certificate_write", path, err))?;
    let digest = verify_file(path)?;
    info!(path = %path.display(), file_hash = %digest, "certificate written");
    Ok(digest)
}

/// Parses a certificate, rejecting documents that are missing required fields.
pub fn load_certificate<P: AsRef<Path>>(path: P) -> Result<Certificate, AletheiaError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| io_error("certificate_read", path, err))?;
    let cert: Certificate = from_json_slice(&bytes)
        .map_err(|err| malformed("certificate_schema", path, err.info().message.clone()))?;
    if cert.cert_version != CERT_VERSION {
        return Err(malformed(
            "certificate_version",
            path,
            format!(
                "unsupported certificate version `{}` (expected `{CERT_VERSION}`)",
                cert.cert_version
            ),
        ));
    }
    Ok(cert)
}

/// Recomputes the canonical and file hashes of a stored certificate.
pub fn verify_certificate<P: AsRef<Path>>(path: P) -> Result<VerificationReport, AletheiaError> {
    let path = path.as_ref();
    let cert = load_certificate(path)?;
    Ok(VerificationReport {
        certificate_hash: certificate_hash(&cert)?,
        file_hash: verify_file(path)?,
    })
}

/// Verifies a stored certificate against the file digest reported when it was written.
///
/// `expected_file_hash` is compared case-insensitively; the `0x` prefix is optional.
pub fn verify_against<P: AsRef<Path>>(
    path: P,
    expected_file_hash: &str,
) -> Result<VerificationReport, AletheiaError> {
    let path = path.as_ref();
    let report = verify_certificate(path)?;
    let expected = expected_file_hash.trim().to_ascii_lowercase();
    let expected = if expected.starts_with(DIGEST_PREFIX) {
        expected
    } else {
        format!("{DIGEST_PREFIX}{expected}")
    };
    if report.file_hash != expected {
        warn!(
            path = %path.display(),
            expected = %expected,
            actual = %report.file_hash,
            "certificate digest mismatch"
        );
        return Err(AletheiaError::MalformedCertificate(
            ErrorInfo::new("file_hash_mismatch", "certificate file digest does not match")
                .with_context("path", path.display().to_string())
                .with_context("expected", expected)
                .with_context("actual", report.file_hash.clone())
                .with_hint("the file was modified after it was written"),
        ));
    }
    Ok(report)
}
