//! Dynamic field values and the ordering used by field sorts.
//!
//! Field values are plain [`serde_json::Value`]s; field maps preserve
//! insertion order (the `preserve_order` feature), which `get` with a
//! field map and `get_or_create` merging both rely on.

use std::cmp::Ordering;

pub use serde_json::{Value, from_value, json, to_value};

/// Total order over optional dynamic values, used by [`Registry::sort`].
///
/// Numbers compare numerically and strings lexicographically. Values of
/// different kinds order by kind: absent, null, booleans, numbers, strings,
/// arrays, objects. Arrays compare element-wise, objects by their serialized
/// text.
///
/// [`Registry::sort`]: crate::Registry::sort
#[must_use]
pub fn value_cmp(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => non_absent_cmp(a, b),
    }
}

fn non_absent_cmp(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            x.as_f64().partial_cmp(&y.as_f64()).unwrap_or(Ordering::Equal)
        },
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (ex, ey) in x.iter().zip(y) {
                match non_absent_cmp(ex, ey) {
                    Ordering::Equal => {},
                    other => return other,
                }
            }
            x.len().cmp(&y.len())
        },
        (Value::Object(_), Value::Object(_)) => a.to_string().cmp(&b.to_string()),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

const fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
