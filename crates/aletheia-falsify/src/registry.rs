use std::collections::BTreeMap;
use std::fmt;

use aletheia_core::{AletheiaError, CapabilityKind, Claim, Generator, Implementation, Oracle};

/// Name-keyed lookup tables for generators, oracles and implementations.
///
/// Populated once at startup and shared read-only (typically behind an `Arc`)
/// while claims are evaluated. Registering a name twice replaces the earlier
/// entry.
#[derive(Default)]
pub struct Registry {
    generators: BTreeMap<String, Box<dyn Generator>>,
    oracles: BTreeMap<String, Box<dyn Oracle>>,
    implementations: BTreeMap<String, Box<dyn Implementation>>,
}

/// The three capabilities a claim needs, resolved up front.
#[derive(Clone, Copy)]
pub struct Resolved<'a> {
    /// Input generator named by `claim.adversary`.
    pub generator: &'a dyn Generator,
    /// Oracle named by `claim.oracle`.
    pub oracle: &'a dyn Oracle,
    /// Implementation under test.
    pub implementation: &'a dyn Implementation,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a generator under `name`.
    pub fn register_generator(
        &mut self,
        name: impl Into<String>,
        generator: impl Generator + 'static,
    ) -> &mut Self {
        self.generators.insert(name.into(), Box::new(generator));
        self
    }

    /// Registers an oracle under `name`.
    pub fn register_oracle(
        &mut self,
        name: impl Into<String>,
        oracle: impl Oracle + 'static,
    ) -> &mut Self {
        self.oracles.insert(name.into(), Box::new(oracle));
        self
    }

    /// Registers an implementation under test under `name`.
    pub fn register_implementation(
        &mut self,
        name: impl Into<String>,
        implementation: impl Implementation + 'static,
    ) -> &mut Self {
        self.implementations
            .insert(name.into(), Box::new(implementation));
        self
    }

    /// Looks up a generator.
    pub fn generator(&self, name: &str) -> Result<&dyn Generator, AletheiaError> {
        self.generators
            .get(name)
            .map(|entry| entry.as_ref())
            .ok_or_else(|| AletheiaError::unknown_capability(CapabilityKind::Generator, name))
    }

    /// Looks up an oracle.
    pub fn oracle(&self, name: &str) -> Result<&dyn Oracle, AletheiaError> {
        self.oracles
            .get(name)
            .map(|entry| entry.as_ref())
            .ok_or_else(|| AletheiaError::unknown_capability(CapabilityKind::Oracle, name))
    }

    /// Looks up an implementation under test.
    pub fn implementation(&self, name: &str) -> Result<&dyn Implementation, AletheiaError> {
        self.implementations
            .get(name)
            .map(|entry| entry.as_ref())
            .ok_or_else(|| AletheiaError::unknown_capability(CapabilityKind::Implementation, name))
    }

    /// Resolves every capability `claim` needs against `implementation`.
    pub fn resolve(
        &self,
        claim: &Claim,
        implementation: &str,
    ) -> Result<Resolved<'_>, AletheiaError> {
        Ok(Resolved {
            generator: self.generator(&claim.adversary)?,
            oracle: self.oracle(&claim.oracle)?,
            implementation: self.implementation(implementation)?,
        })
    }

    /// Registered names of one capability kind, sorted.
    pub fn names(&self, kind: CapabilityKind) -> Vec<&str> {
        match kind {
            CapabilityKind::Generator => self.generators.keys().map(String::as_str).collect(),
            CapabilityKind::Oracle => self.oracles.keys().map(String::as_str).collect(),
            CapabilityKind::Implementation => {
                self.implementations.keys().map(String::as_str).collect()
            }
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("generators", &self.names(CapabilityKind::Generator))
            .field("oracles", &self.names(CapabilityKind::Oracle))
            .field(
                "implementations",
                &self.names(CapabilityKind::Implementation),
            )
            .finish()
    }
}
