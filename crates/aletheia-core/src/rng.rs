//! Deterministic RNG wrapper and seed-derivation helpers.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use sha2::{Digest, Sha256};

/// Deterministic RNG handle exposed to generators and implementations.
///
/// The handle is a thin wrapper around `StdRng` that documents the seeding
/// policy used throughout the project. Every trial owns exactly one handle,
/// seeded from [`derive_seed`] over `(master_seed, claim_id, trial_index)`.
/// Plugins must draw all of their randomness from the handle they are given;
/// process-wide randomness would break reproducibility under concurrency.
#[derive(Debug, Clone)]
pub struct RngHandle {
    rng: StdRng,
}

impl RngHandle {
    /// Creates a new RNG handle from a 64-bit seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates the handle for a specific `(master_seed, namespace, index)` triple.
    pub fn derived(master_seed: &str, namespace: &str, index: u64) -> Self {
        Self::from_seed(derive_seed(master_seed, namespace, index))
    }
}

impl RngCore for RngHandle {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Derives the deterministic seed for trial `index` of `namespace`.
///
/// SHA-256 over `master_seed | namespace | index` (index in decimal), with the
/// first eight digest bytes read big-endian.
pub fn derive_seed(master_seed: &str, namespace: &str, index: u64) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(master_seed.as_bytes());
    hasher.update(b"|");
    hasher.update(namespace.as_bytes());
    hasher.update(b"|");
    hasher.update(index.to_string().as_bytes());
    let digest = hasher.finalize();
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head)
}

/// Commitment binding a master seed to the claim and implementation it drove.
pub fn rng_commit(master_seed: &str, claim_id: &str, implementation: &str) -> String {
    let payload = format!("{master_seed}|{claim_id}|{implementation}");
    hex::encode(Sha256::digest(payload.as_bytes()))
}
