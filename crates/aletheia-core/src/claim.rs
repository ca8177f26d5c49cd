//! Claim data model shared by the engine, the belief calculators and certificates.

use serde::{Deserialize, Serialize};

use crate::capability::Params;
use crate::errors::{invalid_input, AletheiaError};

/// Named input-space descriptor with generator options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// Human readable domain label (e.g. `int_array`).
    pub name: String,
    /// Options forwarded verbatim to the generator.
    #[serde(default)]
    pub params: Params,
}

impl Domain {
    /// Creates a domain with no options.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Params::new(),
        }
    }

    /// Adds a generator option, returning the updated domain.
    pub fn with_param(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// Opaque reference to out-of-band formal evidence. Never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofArtifact {
    /// Kind tag such as `TLA+`, `SMT` or `ProofSketch`.
    pub kind: String,
    /// Path or URL locating the artifact.
    pub uri: String,
    /// Optional content hash of the artifact.
    #[serde(default)]
    pub hash: Option<String>,
}

/// Beta prior over a win probability, used by comparative claims.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetaPrior {
    /// Pseudo-count of successes.
    pub alpha: f64,
    /// Pseudo-count of failures.
    pub beta: f64,
}

impl BetaPrior {
    /// Creates a prior after checking both parameters are finite and positive.
    pub fn new(alpha: f64, beta: f64) -> Result<Self, AletheiaError> {
        if !(alpha.is_finite() && beta.is_finite() && alpha > 0.0 && beta > 0.0) {
            return Err(invalid_input(
                "beta_prior",
                format!("Beta prior parameters must be positive, got ({alpha}, {beta})"),
            ));
        }
        Ok(Self { alpha, beta })
    }
}

impl Default for BetaPrior {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
        }
    }
}

/// A falsifiable proposition bound to a domain, generator and oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique claim identifier; also the seed namespace for its trials.
    pub id: String,
    /// Natural-language statement of the claim.
    pub proposition: String,
    /// Input space the claim quantifies over.
    pub domain: Domain,
    /// Registered generator name.
    pub adversary: String,
    /// Registered oracle name.
    pub oracle: String,
    /// Significance level used when judging the claim.
    #[serde(default = "Claim::default_power_alpha")]
    pub power_alpha: f64,
    /// Trial budget.
    #[serde(default = "Claim::default_trials")]
    pub trials: u64,
    /// Stop dispatching new trials once a failure is observed.
    #[serde(default = "Claim::default_stop_on_first_failure")]
    pub stop_on_first_failure: bool,
    /// Prior belief for comparative claims.
    #[serde(default)]
    pub prior: BetaPrior,
    /// External proof artifacts carried through to the certificate.
    #[serde(default)]
    pub proofs: Vec<ProofArtifact>,
}

impl Claim {
    fn default_power_alpha() -> f64 {
        0.05
    }

    fn default_trials() -> u64 {
        10_000
    }

    fn default_stop_on_first_failure() -> bool {
        true
    }

    /// Creates a claim with default budget, significance and prior.
    pub fn new(
        id: impl Into<String>,
        proposition: impl Into<String>,
        domain: Domain,
        adversary: impl Into<String>,
        oracle: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            proposition: proposition.into(),
            domain,
            adversary: adversary.into(),
            oracle: oracle.into(),
            power_alpha: Self::default_power_alpha(),
            trials: Self::default_trials(),
            stop_on_first_failure: Self::default_stop_on_first_failure(),
            prior: BetaPrior::default(),
            proofs: Vec::new(),
        }
    }

    /// Sets the trial budget.
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    /// Sets the stop-on-first-failure policy.
    pub fn with_stop_on_first_failure(mut self, stop: bool) -> Self {
        self.stop_on_first_failure = stop;
        self
    }

    /// Sets the significance level.
    pub fn with_power_alpha(mut self, alpha: f64) -> Self {
        self.power_alpha = alpha;
        self
    }

    /// Sets the Beta prior.
    pub fn with_prior(mut self, prior: BetaPrior) -> Self {
        self.prior = prior;
        self
    }

    /// Attaches a proof artifact.
    pub fn with_proof(mut self, proof: ProofArtifact) -> Self {
        self.proofs.push(proof);
        self
    }
}
