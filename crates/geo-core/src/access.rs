//! Defensive accessors over untyped JSON payloads.
//!
//! Every function here is total: missing keys, `null`, wrong-typed values and
//! non-finite numbers all degrade to a caller-supplied default instead of an
//! error or a panic.
//!
//! Truthiness follows the provider's own conventions: `null`, `false`, `0`,
//! `NaN` and `""` are falsy; every array and object (even empty) is truthy.
//! Alias chains come in two flavors matching how the provider's fields are
//! tried: [`first_present`] skips only absent/`null` values, while
//! [`first_truthy`] also skips falsy ones.

use serde_json::Value;

/// Walk a dot-separated `path` through nested objects.
///
/// Numeric segments index into arrays. Returns `None` as soon as a segment is
/// missing, an intermediate value is not a container, or the final value is
/// `null`.
#[must_use]
pub fn safe_get<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for key in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(key)?,
            Value::Array(items) => items.get(key.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    (!current.is_null()).then_some(current)
}

/// Coerce a JSON value to a finite number.
///
/// Booleans become `1`/`0`, numeric strings are parsed (blank strings are
/// `0`, `0x` prefixes are hexadecimal), and an empty or single-scalar array
/// coerces through its element. Anything else, and any non-finite result,
/// is `None`.
#[must_use]
pub fn to_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Null | Value::Object(_) => return None,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_numeric(s)?,
        Value::Array(items) => match items.as_slice() {
            [] | [Value::Null] => 0.0,
            [single @ (Value::Number(_) | Value::String(_))] => to_number(single)?,
            _ => return None,
        },
    };
    n.is_finite().then_some(n)
}

fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        #[allow(clippy::cast_precision_loss)]
        return u64::from_str_radix(hex, 16).ok().map(|n| n as f64);
    }
    trimmed.parse::<f64>().ok()
}

/// Numeric coercion with a default for absent or unusable values.
#[must_use]
pub fn safe_num(value: Option<&Value>, default: f64) -> f64 {
    value.and_then(to_number).unwrap_or(default)
}

/// Numeric coercion that keeps "absent" distinct from zero.
#[must_use]
pub fn safe_num_opt(value: Option<&Value>) -> Option<f64> {
    value.and_then(to_number)
}

/// [`safe_num`] followed by rounding to `decimals` places.
#[must_use]
pub fn safe_fixed(value: Option<&Value>, decimals: i32, default: f64) -> f64 {
    round_to(safe_num(value, default), decimals)
}

/// Round to a fixed number of decimal places.
#[must_use]
pub fn round_to(n: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    let rounded = (n * factor).round() / factor;
    if rounded.is_finite() { rounded } else { n }
}

/// Round to the nearest integer, with halves going towards positive infinity
/// (`-2.5` rounds to `-2`).
#[must_use]
pub fn round_half_up(n: f64) -> f64 {
    (n + 0.5).floor()
}

/// The value itself when it is an array, otherwise an empty slice.
#[must_use]
pub fn safe_array(value: Option<&Value>) -> &[Value] {
    match value {
        Some(Value::Array(items)) => items,
        _ => &[],
    }
}

/// Loose truthiness of a JSON value.
#[must_use]
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// First alias whose value is present and not `null`.
#[must_use]
pub fn first_present<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let map = value.as_object()?;
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|v| !v.is_null())
}

/// First alias whose value is truthy.
#[must_use]
pub fn first_truthy<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let map = value.as_object()?;
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|v| truthy(v))
}

/// First truthy alias that can be shown as text (strings and numbers).
#[must_use]
pub fn first_text(value: &Value, keys: &[&str]) -> Option<String> {
    let map = value.as_object()?;
    keys.iter()
        .filter_map(|key| map.get(*key))
        .filter(|v| truthy(v))
        .find_map(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

/// Clamp a coerced number into a non-negative integer count.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_count(n: f64) -> u64 {
    if n > 0.0 { n.round() as u64 } else { 0 }
}
