//! Float value tolerant of the quoted forms the chains endpoint emits.

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[cfg(test)]
mod tests;

/// An `f64` that decodes from a JSON number or a JSON string holding a number.
///
/// The broker reports undefined greeks as `"NaN"` and sometimes quotes regular
/// values, so decoding tries a bare number first and falls back to parsing the
/// string contents. `"NaN"`, `"Infinity"` and `"-Infinity"` are accepted, along
/// with every other spelling [`f64::from_str`](std::str::FromStr) understands.
/// Quoted literals beyond the `f64` range are rejected, as bare ones are.
/// A JSON `null` decodes to `0.0`.
///
/// Encoding writes finite values as bare numbers and non-finite values as the
/// strings `"NaN"`, `"Infinity"` and `"-Infinity"`, since JSON has no literal
/// for them.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct SpecialFloat(pub f64);

impl SpecialFloat {
    /// Wraps a raw value.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Returns `true` if the value is NaN.
    #[must_use]
    pub fn is_nan(self) -> bool {
        self.0.is_nan()
    }

    /// Returns `true` if the value is neither infinite nor NaN.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl From<f64> for SpecialFloat {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<SpecialFloat> for f64 {
    fn from(value: SpecialFloat) -> Self {
        value.0
    }
}

impl fmt::Display for SpecialFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match non_finite_text(self.0) {
            Some(text) => f.write_str(text),
            None => fmt::Display::fmt(&self.0, f),
        }
    }
}

/// Wire spelling for values JSON cannot represent as a number.
fn non_finite_text(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value == f64::INFINITY {
        Some("Infinity")
    } else if value == f64::NEG_INFINITY {
        Some("-Infinity")
    } else {
        None
    }
}

impl Serialize for SpecialFloat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match non_finite_text(self.0) {
            Some(text) => serializer.serialize_str(text),
            None => serializer.serialize_f64(self.0),
        }
    }
}

fn is_infinity_text(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

struct SpecialFloatVisitor;

impl<'de> Visitor<'de> for SpecialFloatVisitor {
    type Value = SpecialFloat;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a string containing a number")
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(SpecialFloat(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(SpecialFloat(v as f64))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(SpecialFloat(v as f64))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let value = v
            .parse::<f64>()
            .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))?;
        // Overflowing literals parse to infinity; only explicit spellings may.
        if value.is_infinite() && !is_infinity_text(v) {
            return Err(E::invalid_value(Unexpected::Str(v), &"a number within f64 range"));
        }
        Ok(SpecialFloat(value))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(SpecialFloat::default())
    }
}

impl<'de> Deserialize<'de> for SpecialFloat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(SpecialFloatVisitor)
    }
}
