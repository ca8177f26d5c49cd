//! YAML claim sets pairing each claim with the implementation it is run against.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::claim::Claim;
use crate::errors::{invalid_input, io_error, AletheiaError};
use crate::serde::from_yaml_slice;

/// One claim bound to the implementation under test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimEntry {
    /// Claim to evaluate.
    pub claim: Claim,
    /// Registered implementation name.
    pub implementation: String,
}

impl ClaimEntry {
    /// Pairs `claim` with `implementation`.
    pub fn new(claim: Claim, implementation: impl Into<String>) -> Self {
        Self {
            claim,
            implementation: implementation.into(),
        }
    }
}

/// Ordered list of claims evaluated by a single compile run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClaimSet {
    /// Entries, evaluated in file order.
    pub claims: Vec<ClaimEntry>,
}

impl ClaimSet {
    /// Overrides the trial budget of every claim.
    pub fn with_trials(mut self, trials: u64) -> Self {
        for entry in &mut self.claims {
            entry.claim.trials = trials;
        }
        self
    }
}

/// Loads a claim set from a YAML document with a top-level `claims` list.
///
/// Empty sets and duplicate `(claim id, implementation)` pairs are rejected.
pub fn load_claim_set<P: AsRef<Path>>(path: P) -> Result<ClaimSet, AletheiaError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| io_error("claim_set_read", path, err))?;
    let set: ClaimSet = from_yaml_slice(&bytes)?;
    if set.claims.is_empty() {
        return Err(invalid_input("claim_set_empty", "claim set lists no claims"));
    }
    let mut seen = std::collections::BTreeSet::new();
    for entry in &set.claims {
        if !seen.insert((entry.claim.id.as_str(), entry.implementation.as_str())) {
            return Err(invalid_input(
                "claim_set_duplicate",
                format!(
                    "claim `{}` is listed twice for `{}`",
                    entry.claim.id, entry.implementation
                ),
            ));
        }
    }
    Ok(set)
}
