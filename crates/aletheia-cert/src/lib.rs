#![deny(missing_docs)]
#![doc = "Belief certificates: construction, canonical hashing, persistence and verification."]

/// Certificate document model and builder.
pub mod certificate;
/// Canonical document hash and streamed file digest.
pub mod digest;
/// Reading, writing and verifying certificates on disk.
pub mod store;

pub use certificate::{
    build, Certificate, ClaimSummary, PowerSummary, ResultSummary, CERT_VERSION,
};
pub use digest::{certificate_hash, verify_file};
pub use store::{
    load_certificate, save_certificate, verify_against, verify_certificate, VerificationReport,
};
