//! Typed scalar accessors over one JSON object
//!
//! Every getter resolves a named member with a caller-supplied default:
//! absent keys, wrong JSON types, and unparseable text all degrade to the
//! default instead of failing, so a partially hand-mangled config file
//! still loads everything that is readable. Setters unconditionally
//! overwrite the key with a freshly built value; an existing key keeps its
//! position in the object and new keys append.

use serde_json::Value;

use crate::JsonObject;
use crate::color::{Color, Rgba};
use crate::enums::EnumTable;

/// C-`atoi`-style integer scan: optional sign, leading decimal digits,
/// 0 when the string does not start with a number. Saturates on overflow.
///
/// Kept for compatibility with existing config files, where `"12x"` has
/// always read as 12 and `"yes"` as 0.
fn atoi(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let mut n: i64 = 0;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        n = n.saturating_mul(10).saturating_add((b - b'0') as i64);
    }
    if negative { n.saturating_neg() } else { n }
}

/// Integer member: JSON integers directly, reals truncated toward zero,
/// strings through the `atoi` scan, anything else the default
pub fn get_int(json: &JsonObject, key: &str, default: i64) -> i64 {
    match json.get(key) {
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i
            } else if let Some(f) = n.as_f64() {
                f as i64
            } else {
                default
            }
        }
        Some(Value::String(s)) => atoi(s),
        _ => default,
    }
}

/// Boolean member: JSON true/false directly, everything else coerced
/// through [`get_int`], so `"1"` and `1` both read as true
pub fn get_bool(json: &JsonObject, key: &str, default: bool) -> bool {
    match json.get(key) {
        Some(Value::Bool(b)) => *b,
        _ => get_int(json, key, default as i64) != 0,
    }
}

/// Enum member: resolved through the table's name/numeric lookup;
/// non-string members read as the default
pub fn get_enum(json: &JsonObject, key: &str, table: &EnumTable, default: i32) -> i32 {
    match json.get(key) {
        Some(Value::String(s)) => table.name_to_value(s, default),
        _ => default,
    }
}

/// RGB color member: parsed from its textual form, default on any failure
pub fn get_color(json: &JsonObject, key: &str, default: Color) -> Color {
    match json.get(key) {
        Some(Value::String(s)) => s.parse().unwrap_or(default),
        _ => default,
    }
}

/// RGBA color member: parsed from its textual form, default on any failure
pub fn get_rgba(json: &JsonObject, key: &str, default: Rgba) -> Rgba {
    match json.get(key) {
        Some(Value::String(s)) => s.parse().unwrap_or(default),
        _ => default,
    }
}

/// String member, or `None` when absent or not a string
///
/// The engine uses this form during load so an absent key leaves the
/// record's field (and its allocation) completely untouched.
pub fn try_get_str<'a>(json: &'a JsonObject, key: &str) -> Option<&'a str> {
    match json.get(key) {
        Some(Value::String(s)) => Some(s.as_str()),
        _ => None,
    }
}

/// String member with a default for absent or non-string values
pub fn get_str<'a>(json: &'a JsonObject, key: &str, default: &'a str) -> &'a str {
    try_get_str(json, key).unwrap_or(default)
}

pub fn set_int(json: &mut JsonObject, key: &str, value: i64) {
    json.insert(key.to_string(), Value::from(value));
}

pub fn set_bool(json: &mut JsonObject, key: &str, value: bool) {
    json.insert(key.to_string(), Value::Bool(value));
}

/// Writes the value's canonical symbolic name; a value missing from the
/// table writes the empty string
pub fn set_enum(json: &mut JsonObject, key: &str, table: &EnumTable, value: i32) {
    set_str(json, key, table.value_to_name(value, ""));
}

pub fn set_color(json: &mut JsonObject, key: &str, value: Color) {
    set_str(json, key, &value.to_string());
}

pub fn set_rgba(json: &mut JsonObject, key: &str, value: Rgba) {
    set_str(json, key, &value.to_string());
}

pub fn set_str(json: &mut JsonObject, key: &str, value: &str) {
    json.insert(key.to_string(), Value::from(value));
}
