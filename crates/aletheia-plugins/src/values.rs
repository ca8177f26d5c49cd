use aletheia_core::errors::{invalid_input, AletheiaError};
use serde_json::Value;

/// Decodes a JSON array of integers.
pub fn int_array(value: &Value) -> Result<Vec<i64>, AletheiaError> {
    try_int_array(value)
        .ok_or_else(|| invalid_input("int_array", "expected a JSON array of integers"))
}

/// Like [`int_array`], but returns `None` instead of an error.
pub fn try_int_array(value: &Value) -> Option<Vec<i64>> {
    value.as_array()?.iter().map(Value::as_i64).collect()
}

/// Decodes a `{"x": [..], "y": [..]}` vector pair of equal length.
pub fn float_pair(value: &Value) -> Result<(Vec<f64>, Vec<f64>), AletheiaError> {
    let decode = |key: &str| -> Result<Vec<f64>, AletheiaError> {
        value
            .get(key)
            .and_then(Value::as_array)
            .and_then(|items| items.iter().map(Value::as_f64).collect::<Option<Vec<_>>>())
            .ok_or_else(|| {
                invalid_input("float_pair", format!("`{key}` must be an array of numbers"))
            })
    };
    let x = decode("x")?;
    let y = decode("y")?;
    if x.len() != y.len() {
        return Err(invalid_input(
            "float_pair",
            format!("vector lengths differ: {} vs {}", x.len(), y.len()),
        ));
    }
    Ok((x, y))
}
