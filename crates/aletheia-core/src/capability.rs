//! Capability contracts for generators, implementations under test and oracles.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{invalid_input, AletheiaError};
use crate::rng::RngHandle;

/// Domain configuration handed to generators.
pub type Params = BTreeMap<String, Value>;

/// Diagnostic payload produced by an oracle on failure.
pub type Details = BTreeMap<String, Value>;

/// The three kinds of pluggable capability known to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityKind {
    /// Adversarial input generator.
    Generator,
    /// Pass/fail oracle.
    Oracle,
    /// Implementation under test.
    Implementation,
}

impl Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CapabilityKind::Generator => "generator",
            CapabilityKind::Oracle => "oracle",
            CapabilityKind::Implementation => "implementation",
        };
        f.write_str(label)
    }
}

/// Oracle decision for a single input/output pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Verdict {
    /// Whether the output is acceptable for the input.
    pub passed: bool,
    /// Diagnostic data; empty whenever `passed` is true.
    #[serde(default)]
    pub details: Details,
}

impl Verdict {
    /// A passing verdict with no details.
    pub fn pass() -> Self {
        Self {
            passed: true,
            details: Details::new(),
        }
    }

    /// A failing verdict carrying the provided diagnostics.
    pub fn fail(details: Details) -> Self {
        Self {
            passed: false,
            details,
        }
    }

    /// Adds a diagnostic entry, returning the updated verdict.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// Produces adversarial inputs from a seeded random source.
///
/// Implementations must be a pure function of the draws taken from `rng`.
pub trait Generator: Send + Sync {
    /// Generates one input for the supplied domain parameters.
    fn generate(&self, rng: &mut RngHandle, params: &Params) -> Result<Value, AletheiaError>;
}

/// Code under test. May only be nondeterministic through `rng`.
pub trait Implementation: Send + Sync {
    /// Runs the implementation on one generated input.
    fn run(&self, input: &Value, rng: &mut RngHandle) -> Result<Value, AletheiaError>;
}

/// Decides whether an output is correct for an input.
pub trait Oracle: Send + Sync {
    /// Checks one input/output pair.
    fn check(&self, input: &Value, output: &Value) -> Result<Verdict, AletheiaError>;
}

impl<F> Generator for F
where
    F: Fn(&mut RngHandle, &Params) -> Result<Value, AletheiaError> + Send + Sync,
{
    fn generate(&self, rng: &mut RngHandle, params: &Params) -> Result<Value, AletheiaError> {
        self(rng, params)
    }
}

impl<F> Implementation for F
where
    F: Fn(&Value, &mut RngHandle) -> Result<Value, AletheiaError> + Send + Sync,
{
    fn run(&self, input: &Value, rng: &mut RngHandle) -> Result<Value, AletheiaError> {
        self(input, rng)
    }
}

impl<F> Oracle for F
where
    F: Fn(&Value, &Value) -> Result<Verdict, AletheiaError> + Send + Sync,
{
    fn check(&self, input: &Value, output: &Value) -> Result<Verdict, AletheiaError> {
        self(input, output)
    }
}

/// Reads an integer option, falling back to `default` when absent.
pub fn param_i64(params: &Params, key: &str, default: i64) -> Result<i64, AletheiaError> {
    match params.get(key) {
        None => Ok(default),
        Some(value) => value
            .as_i64()
            .ok_or_else(|| invalid_input("param_type", format!("`{key}` must be an integer"))),
    }
}

/// Reads a floating point option, falling back to `default` when absent.
pub fn param_f64(params: &Params, key: &str, default: f64) -> Result<f64, AletheiaError> {
    match params.get(key) {
        None => Ok(default),
        Some(value) => value
            .as_f64()
            .ok_or_else(|| invalid_input("param_type", format!("`{key}` must be a number"))),
    }
}

/// Reads an inclusive `[lo, hi]` integer pair, falling back to `default`.
pub fn param_range(
    params: &Params,
    key: &str,
    default: (i64, i64),
) -> Result<(i64, i64), AletheiaError> {
    let Some(value) = params.get(key) else {
        return Ok(default);
    };
    let pair = value
        .as_array()
        .filter(|items| items.len() == 2)
        .and_then(|items| Some((items[0].as_i64()?, items[1].as_i64()?)));
    match pair {
        Some((lo, hi)) if lo <= hi => Ok((lo, hi)),
        _ => Err(invalid_input(
            "param_range",
            format!("`{key}` must be an ordered pair of integers"),
        )),
    }
}
