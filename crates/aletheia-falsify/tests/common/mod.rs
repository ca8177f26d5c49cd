#![allow(dead_code)]

use std::sync::Arc;

use aletheia_core::{AletheiaError, Claim, Domain, Params, RngHandle, Verdict};
use aletheia_falsify::Registry;
use rand::Rng;
use serde_json::{json, Value};

/// Registry whose oracle rejects every value divisible by `modulus`.
pub fn modulus_registry(modulus: i64) -> Arc<Registry> {
    let mut registry = Registry::new();
    registry
        .register_generator(
            "ints",
            |rng: &mut RngHandle, params: &Params| -> Result<Value, AletheiaError> {
                let lo = params.get("lo").and_then(Value::as_i64).unwrap_or(0);
                let hi = params.get("hi").and_then(Value::as_i64).unwrap_or(1_000);
                Ok(json!(rng.gen_range(lo..=hi)))
            },
        )
        .register_implementation(
            "identity",
            |input: &Value, _rng: &mut RngHandle| -> Result<Value, AletheiaError> {
                Ok(input.clone())
            },
        )
        .register_implementation(
            "explodes",
            |_input: &Value, _rng: &mut RngHandle| -> Result<Value, AletheiaError> {
                panic!("implementation blew up")
            },
        )
        .register_implementation(
            "refuses",
            |_input: &Value, _rng: &mut RngHandle| -> Result<Value, AletheiaError> {
                Err(AletheiaError::trial_execution(0, "implementation", "refused"))
            },
        )
        .register_oracle(
            "not_multiple",
            move |_input: &Value, output: &Value| -> Result<Verdict, AletheiaError> {
                let value = output.as_i64().unwrap_or(0);
                if value % modulus == 0 {
                    Ok(Verdict::default().with_detail("observed", value))
                } else {
                    Ok(Verdict::pass())
                }
            },
        );
    Arc::new(registry)
}

pub fn modulus_claim(trials: u64, stop: bool) -> Claim {
    Claim::new(
        "NoMultiples@identity",
        "identity never emits a multiple of the modulus",
        Domain::new("ints").with_param("hi", 1_000),
        "ints",
        "not_multiple",
    )
    .with_trials(trials)
    .with_stop_on_first_failure(stop)
}
