//! Structured error types shared across Aletheia crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capability::CapabilityKind;

/// Structured payload attached to every [`AletheiaError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (claim ids, trial indices, paths, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the Aletheia engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum AletheiaError {
    /// A generator, oracle or implementation name is not registered.
    #[error("unknown capability: {0}")]
    UnknownCapability(ErrorInfo),
    /// Code under test, its generator or its oracle failed during a trial.
    #[error("trial execution error: {0}")]
    TrialExecution(ErrorInfo),
    /// A certificate document is missing required fields or does not verify.
    #[error("malformed certificate: {0}")]
    MalformedCertificate(ErrorInfo),
    /// Filesystem read or write failures.
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
    /// Caller supplied parameters outside their valid range.
    #[error("invalid input: {0}")]
    InvalidInput(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl AletheiaError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            AletheiaError::UnknownCapability(info)
            | AletheiaError::TrialExecution(info)
            | AletheiaError::MalformedCertificate(info)
            | AletheiaError::Io(info)
            | AletheiaError::Serde(info)
            | AletheiaError::InvalidInput(info) => info,
        }
    }

    /// Builds the error raised when a registry lookup misses.
    pub fn unknown_capability(kind: CapabilityKind, name: &str) -> Self {
        AletheiaError::UnknownCapability(
            ErrorInfo::new(
                "unknown_capability",
                format!("no {kind} registered under `{name}`"),
            )
            .with_context("kind", kind.to_string())
            .with_context("name", name),
        )
    }

    /// Builds a trial execution error tagged with the trial index and stage.
    pub fn trial_execution(index: u64, stage: &str, message: impl Into<String>) -> Self {
        AletheiaError::TrialExecution(
            ErrorInfo::new("trial_execution", message)
                .with_context("index", index.to_string())
                .with_context("stage", stage),
        )
    }

    /// Returns the trial index attached to a [`AletheiaError::TrialExecution`] error.
    pub fn trial_index(&self) -> Option<u64> {
        match self {
            AletheiaError::TrialExecution(info) => info
                .context
                .get("index")
                .and_then(|value| value.parse().ok()),
            _ => None,
        }
    }
}

/// Wraps an I/O failure with a stable code and the offending path.
pub fn io_error(code: &str, path: &std::path::Path, err: impl ToString) -> AletheiaError {
    AletheiaError::Io(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}

/// Wraps a serialization failure with a stable code.
pub fn serde_error(code: &str, err: impl ToString) -> AletheiaError {
    AletheiaError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// Wraps an argument validation failure with a stable code.
pub fn invalid_input(code: &str, message: impl Into<String>) -> AletheiaError {
    AletheiaError::InvalidInput(ErrorInfo::new(code, message))
}
