//! Canonical JSON text for hashing
//!
//! Produces the exact text of Python's `json.dumps(obj, sort_keys=True)`:
//! keys sorted, `", "` and `": "` separators, non-ASCII escaped as `\uXXXX`
//! and floats written in `repr` form, so block digests agree with ledgers
//! written in Python byte for byte.

use serde_json::{Map, Number, Value};
use std::fmt::Write;

/// Render a JSON value in canonical form
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(value, &mut out);
    out
}

fn write_value(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => write_number(n, out),
        Value::String(s) => write_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => write_object(map, out),
    }
}

fn write_object(map: &Map<String, Value>, out: &mut String) {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();

    out.push('{');
    for (i, key) in keys.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_string(key, out);
        out.push_str(": ");
        write_value(&map[key], out);
    }
    out.push('}');
}

fn write_number(n: &Number, out: &mut String) {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            out.push_str(&python_float_repr(f));
            return;
        }
    }
    // Integers print identically in both worlds.
    let _ = write!(out, "{}", n);
}

fn write_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            ' '..='~' => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{:04x}", unit);
                }
            }
        }
    }
    out.push('"');
}

/// Format a float the way Python's `float.__repr__` does
///
/// Shortest round-trip digits; scientific notation when the decimal
/// exponent is below -4 or at least 16, with a signed two-digit exponent.
/// Non-finite values use the `NaN`/`Infinity` spellings `json.dumps` emits.
pub fn python_float_repr(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "-1.2345e-7".
    let sci = format!("{:e}", value);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or_default();
    let negative = mantissa.starts_with('-');
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut out = String::new();
    if negative {
        out.push('-');
    }

    if !(-4..16).contains(&exponent) {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        let sign = if exponent < 0 { '-' } else { '+' };
        let _ = write!(out, "e{}{:02}", sign, exponent.abs());
    } else if exponent < 0 {
        out.push_str("0.");
        for _ in 0..(-exponent - 1) {
            out.push('0');
        }
        out.push_str(&digits);
    } else {
        let int_len = exponent as usize + 1;
        if digits.len() <= int_len {
            out.push_str(&digits);
            for _ in digits.len()..int_len {
                out.push('0');
            }
            out.push_str(".0");
        } else {
            out.push_str(&digits[..int_len]);
            out.push('.');
            out.push_str(&digits[int_len..]);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sorted_keys_and_separators() {
        let value = json!({"b": 1, "a": [true, null], "c": {"z": "x", "y": 2}});
        assert_eq!(
            canonical_json(&value),
            r#"{"a": [true, null], "b": 1, "c": {"y": 2, "z": "x"}}"#
        );
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(canonical_json(&json!([])), "[]");
        assert_eq!(canonical_json(&json!({})), "{}");
    }

    #[test]
    fn test_ascii_escaping() {
        let value = json!("Café \"bill\"\n\t\\");
        assert_eq!(canonical_json(&value), r#""Caf\u00e9 \"bill\"\n\t\\""#);
    }

    #[test]
    fn test_astral_plane_uses_surrogate_pair() {
        assert_eq!(canonical_json(&json!("\u{1F4B0}")), r#""\ud83d\udcb0""#);
    }

    #[test]
    fn test_control_characters_escaped() {
        assert_eq!(canonical_json(&json!("\u{01}\u{7f}")), r#""\u0001\u007f""#);
    }

    #[test]
    fn test_python_float_repr() {
        assert_eq!(python_float_repr(1700000000.5), "1700000000.5");
        assert_eq!(python_float_repr(12.75), "12.75");
        assert_eq!(python_float_repr(500.0), "500.0");
        assert_eq!(python_float_repr(0.0), "0.0");
        assert_eq!(python_float_repr(-0.0), "-0.0");
        assert_eq!(python_float_repr(0.1), "0.1");
        assert_eq!(python_float_repr(0.0001), "0.0001");
        assert_eq!(python_float_repr(1e-5), "1e-05");
        assert_eq!(python_float_repr(1e15), "1000000000000000.0");
        assert_eq!(python_float_repr(1e16), "1e+16");
        assert_eq!(python_float_repr(123456789012345678.0), "1.2345678901234568e+17");
        assert_eq!(python_float_repr(-2.5), "-2.5");
        assert_eq!(python_float_repr(f64::NAN), "NaN");
        assert_eq!(python_float_repr(f64::INFINITY), "Infinity");
        assert_eq!(python_float_repr(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_integers_and_floats_differ() {
        assert_eq!(canonical_json(&json!(500)), "500");
        assert_eq!(canonical_json(&json!(500.0)), "500.0");
        assert_eq!(canonical_json(&json!(-7)), "-7");
    }
}
