use crate::generate::value::{truncate_float, Value};
use crate::rules::types::DataType;

/// Coerce a single value to `dtype` with the fixed null policy:
/// `0` / `0.0` / `""` for missing or unconvertible input.
pub fn coerce_value(value: Value, dtype: DataType) -> Value {
    match dtype {
        DataType::Int => Value::Int(value.as_i64().unwrap_or(0)),
        DataType::Float => Value::Float(round2(value.as_f64().unwrap_or(0.0))),
        DataType::Str => match value {
            Value::Null => Value::String(String::new()),
            Value::String(s) => Value::String(s),
            other => Value::String(other.to_text()),
        },
    }
}

/// Coerce every value of a column in place.
pub fn coerce_column(values: &mut [Value], dtype: DataType) {
    for value in values.iter_mut() {
        let raw = std::mem::replace(value, Value::Null);
        *value = coerce_value(raw, dtype);
    }
}

/// Round to exactly two decimal places.
fn round2(f: f64) -> f64 {
    let rounded = (f * 100.0).round() / 100.0;
    // Huge magnitudes overflow the scaling step; those are already whole.
    if rounded.is_finite() {
        rounded
    } else {
        truncate_float(f).map(|i| i as f64).unwrap_or(0.0)
    }
}
