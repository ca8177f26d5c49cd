#![deny(missing_docs)]
#![doc = "Core claim model, capability contracts, seeding and canonical hashing for Aletheia."]

pub mod capability;
pub mod claim;
pub mod config;
pub mod errors;
/// Canonical hashing helpers.
pub mod hash;
pub mod rng;
pub mod serde;

pub use capability::{
    param_f64, param_i64, param_range, CapabilityKind, Details, Generator, Implementation, Oracle,
    Params, Verdict,
};
pub use claim::{BetaPrior, Claim, Domain, ProofArtifact};
pub use config::{load_claim_set, ClaimEntry, ClaimSet};
pub use errors::{AletheiaError, ErrorInfo};
pub use hash::{prefixed_sha256, stable_hash_string, DIGEST_PREFIX};
pub use rng::{derive_seed, rng_commit, RngHandle};
