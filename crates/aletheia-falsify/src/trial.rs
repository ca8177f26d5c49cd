use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use aletheia_core::{AletheiaError, Claim, RngHandle, Verdict};
use serde_json::Value;

use crate::outcome::TrialOutcome;
use crate::registry::{Registry, Resolved};

/// Runs trial `index` of `claim` against `implementation`.
///
/// Unregistered names fail with `UnknownCapability`. Errors or panics raised by
/// the generator, implementation or oracle surface as `TrialExecution` tagged
/// with the index; the engine turns those into failing outcomes.
pub fn run_trial(
    registry: &Registry,
    claim: &Claim,
    implementation: &str,
    master_seed: &str,
    index: u64,
) -> Result<TrialOutcome, AletheiaError> {
    let resolved = registry.resolve(claim, implementation)?;
    execute_trial(&resolved, claim, master_seed, index)
}

pub(crate) fn execute_trial(
    resolved: &Resolved<'_>,
    claim: &Claim,
    master_seed: &str,
    index: u64,
) -> Result<TrialOutcome, AletheiaError> {
    let mut rng = RngHandle::derived(master_seed, &claim.id, index);
    let input = guarded(index, "generator", None, || {
        resolved.generator.generate(&mut rng, &claim.domain.params)
    })?;
    let output = guarded(index, "implementation", Some(&input), || {
        resolved.implementation.run(&input, &mut rng)
    })?;
    let verdict = guarded(index, "oracle", Some(&input), || {
        resolved.oracle.check(&input, &output)
    })?;
    Ok(into_outcome(index, input, output, verdict))
}

fn into_outcome(index: u64, input: Value, output: Value, verdict: Verdict) -> TrialOutcome {
    let mut details = verdict.details;
    if verdict.passed {
        details.clear();
    } else if details.is_empty() {
        details.insert("reason".into(), Value::from("oracle_rejected"));
    }
    TrialOutcome {
        index,
        input,
        output,
        passed: verdict.passed,
        details,
    }
}

fn guarded<T>(
    index: u64,
    stage: &str,
    input: Option<&Value>,
    call: impl FnOnce() -> Result<T, AletheiaError>,
) -> Result<T, AletheiaError> {
    let message = match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(value)) => return Ok(value),
        Ok(Err(err)) => err.to_string(),
        Err(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
    };
    let mut err = AletheiaError::trial_execution(index, stage, message);
    if let (AletheiaError::TrialExecution(info), Some(input)) = (&mut err, input) {
        info.context.insert("input".into(), input.to_string());
    }
    Err(err)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
