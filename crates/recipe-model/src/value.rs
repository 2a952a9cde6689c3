//! Literal codec for recipe values.
//!
//! Decoding is tolerant by construction: any literal that fails every typed
//! class degrades to [`Value::Text`] rather than erroring, so a parse never
//! rejects a file over an odd value.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static INT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+$").expect("invalid int regex"));

/// Optional fraction on purpose: an integer literal too large for `i64`
/// still decodes on this path instead of degrading to text.
static FLOAT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+(?:\.\d+)?$").expect("invalid float regex"));

/// A decoded recipe literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Decode a raw literal as it appears after `:=` on an assignment line.
    ///
    /// Strips a trailing `//` comment and normalizes non-breaking space
    /// variants before trimming. Class order matters: `16#` hex and
    /// TRUE/FALSE are checked before the numeric classes because hex text
    /// is digit-like after the `#`.
    pub fn decode(raw: &str) -> Value {
        let s = clean_literal(raw);
        let s = s.trim();
        if let Some(hex) = strip_hex_prefix(s)
            && let Ok(n) = i64::from_str_radix(hex, 16)
        {
            return Value::Int(n);
        }
        if s.eq_ignore_ascii_case("TRUE") {
            return Value::Bool(true);
        }
        if s.eq_ignore_ascii_case("FALSE") {
            return Value::Bool(false);
        }
        if INT_REGEX.is_match(s)
            && let Ok(n) = s.parse::<i64>()
        {
            return Value::Int(n);
        }
        if FLOAT_REGEX.is_match(s)
            && let Ok(f) = s.parse::<f64>()
        {
            return Value::Float(f);
        }
        Value::Text(s.to_string())
    }

    /// Render the value back to literal text.
    ///
    /// With `integer_style` set, a float whose fractional part is exactly
    /// zero renders without a decimal point (`42.0` becomes `42`). That is
    /// the formatting used for edited numeric fields; everything else keeps
    /// full precision.
    pub fn encode(&self, integer_style: bool) -> String {
        match self {
            Value::Bool(true) => "TRUE".to_string(),
            Value::Bool(false) => "FALSE".to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => {
                if integer_style && f.is_finite() && f.fract() == 0.0 {
                    format!("{}", *f as i64)
                } else {
                    // Debug formatting keeps the trailing `.0` that Display
                    // drops, so whole floats survive a re-decode as floats.
                    format!("{f:?}")
                }
            }
            Value::Text(s) => s.clone(),
        }
    }

    /// Numeric view over both `Int` and `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            Value::Bool(_) | Value::Text(_) => None,
        }
    }

    /// Integer view: `Int`, or a `Float` with zero fractional part.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.as_f64().is_some()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode(false))
    }
}

/// Cut a trailing `//` comment and normalize NBSP variants to plain spaces.
fn clean_literal(raw: &str) -> String {
    let head = match raw.find("//") {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    head.replace(['\u{00A0}', '\u{2007}', '\u{202F}'], " ")
}

fn strip_hex_prefix(s: &str) -> Option<&str> {
    // `get` rather than slicing: a multibyte char straddling the boundary
    // means this is not a hex literal, not a panic.
    let prefix = s.get(..3)?;
    if prefix.eq_ignore_ascii_case("16#") && s.len() > 3 {
        Some(&s[3..])
    } else {
        None
    }
}
