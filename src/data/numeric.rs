//! Number handling for form fields and the JSON wire format.
//!
//! Form fields hold free text. Parameter and bound fields are read leniently
//! (the longest numeric prefix wins), combination tokens strictly (the whole
//! token must be a number). Text that cannot be read becomes `NaN`.
//!
//! On the wire, integral values are written as JSON integers and non-finite
//! values as `null`; the backend relies on both.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest magnitude for which every integer is exactly representable.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

const INFINITY_LITERAL: &str = "Infinity";

/// Read a number from the start of `text`.
///
/// Leading whitespace is skipped, then the longest prefix forming a decimal
/// literal (optional sign, digits, optional fraction, optional exponent) or
/// `Infinity` is parsed. Trailing garbage is ignored: `"5abc"` reads as `5`.
/// Returns `NaN` when no such prefix exists (including for empty text).
pub fn parse_lenient(text: &str) -> f64 {
    let (sign, rest) = split_sign(text.trim_start());
    if rest.starts_with(INFINITY_LITERAL) {
        return sign * f64::INFINITY;
    }
    match decimal_prefix_len(rest) {
        0 => f64::NAN,
        len => rest[..len].parse::<f64>().map_or(f64::NAN, |v| sign * v),
    }
}

/// Read `token` as a number only if the whole (trimmed) token is one.
///
/// `"3"` reads as `3`, `"3x"` and `""` as `NaN`.
/// Only decimal literals are accepted; `0x`, `0o` and `0b` prefixes read as `NaN`.
pub fn parse_strict(token: &str) -> f64 {
    let (sign, rest) = split_sign(token.trim());
    if rest == INFINITY_LITERAL {
        return sign * f64::INFINITY;
    }
    let len = decimal_prefix_len(rest);
    if len == 0 || len != rest.len() {
        return f64::NAN;
    }
    rest.parse::<f64>().map_or(f64::NAN, |v| sign * v)
}

fn split_sign(s: &str) -> (f64, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (-1.0, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (1.0, rest)
    } else {
        (1.0, s)
    }
}

/// Length in bytes of the decimal literal at the start of `s` (no sign).
fn decimal_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let int_end = digits_from(0);
    let mut end = int_end;
    let mut has_digits = int_end > 0;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_end = digits_from(end + 1);
        has_digits |= frac_end > end + 1;
        end = frac_end;
    }
    if !has_digits {
        return 0;
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut i = end + 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let exp_end = digits_from(i);
        if exp_end > i {
            end = exp_end;
        }
    }
    end
}

/// Format `value` with exactly `decimals` digits after the point.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else {
        format!("{:.*}", decimals, value)
    }
}

/// Text shown in a form field for a stored number (`1` rather than `1.0`).
pub fn format_plain(value: f64) -> String {
    if value == 0.0 {
        // Covers -0.0 as well.
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire encoding
// ─────────────────────────────────────────────────────────────────────────────

/// A number as written into request bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireNumber(pub f64);

impl Serialize for WireNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let v = self.0;
        if !v.is_finite() {
            serializer.serialize_none()
        } else if v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER {
            // `as` is exact here and maps -0.0 to 0.
            serializer.serialize_i64(v as i64)
        } else {
            serializer.serialize_f64(v)
        }
    }
}

impl<'de> Deserialize<'de> for WireNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = Option::<f64>::deserialize(deserializer)?;
        Ok(WireNumber(v.unwrap_or(f64::NAN)))
    }
}

/// `serialize_with` helper for a single `f64` field.
pub fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    WireNumber(*value).serialize(serializer)
}

/// `deserialize_with` helper: `null` reads back as `NaN`.
pub fn deserialize_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    WireNumber::deserialize(deserializer).map(|n| n.0)
}

/// `serialize_with` helper for a sequence of `f64`.
pub fn serialize_numbers<S: Serializer>(
    values: &[f64],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter().copied().map(WireNumber))
}
