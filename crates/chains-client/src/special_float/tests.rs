//! Unit tests for special_float module.

use super::*;

fn decode(json: &str) -> Result<SpecialFloat, serde_json::Error> {
    serde_json::from_str(json)
}

fn encode(value: f64) -> String {
    serde_json::to_string(&SpecialFloat(value)).unwrap()
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_decode_bare_number() {
    assert_eq!(decode("0.25").unwrap().get(), 0.25);
    assert_eq!(decode("-1.5e-3").unwrap().get(), -0.0015);
}

#[test]
fn test_decode_integer() {
    assert_eq!(decode("42").unwrap().get(), 42.0);
    assert_eq!(decode("-7").unwrap().get(), -7.0);
}

#[test]
fn test_decode_quoted_number() {
    assert_eq!(decode("\"0.25\"").unwrap().get(), 0.25);
    assert_eq!(decode("\"-12\"").unwrap().get(), -12.0);
}

#[test]
fn test_decode_nan_string() {
    assert!(decode("\"NaN\"").unwrap().is_nan());
}

#[test]
fn test_decode_infinity_strings() {
    assert_eq!(decode("\"Infinity\"").unwrap().get(), f64::INFINITY);
    assert_eq!(decode("\"-Infinity\"").unwrap().get(), f64::NEG_INFINITY);
    assert_eq!(decode("\"inf\"").unwrap().get(), f64::INFINITY);
}

#[test]
fn test_decode_out_of_range_rejected_bare_and_quoted() {
    assert!(decode("1e400").is_err());

    let err = decode("\"1e400\"").unwrap_err();
    assert!(err.to_string().contains("1e400"));
    assert!(decode("\"-1e400\"").is_err());
    assert_eq!(decode("\"+Infinity\"").unwrap().get(), f64::INFINITY);
    assert_eq!(decode("\"-inf\"").unwrap().get(), f64::NEG_INFINITY);
}

#[test]
fn test_decode_null_is_zero() {
    assert_eq!(decode("null").unwrap().get(), 0.0);
}

#[test]
fn test_decode_garbage_string_fails() {
    let err = decode("\"not-a-number-at-all\"").unwrap_err();
    assert!(err.to_string().contains("not-a-number-at-all"));
}

#[test]
fn test_decode_wrong_type_fails() {
    assert!(decode("true").is_err());
    assert!(decode("[1.0]").is_err());
    assert!(decode("{\"v\": 1.0}").is_err());
}

// ============================================================================
// Encoding
// ============================================================================

#[test]
fn test_encode_finite_is_bare_number() {
    assert_eq!(encode(0.25), "0.25");
    assert_eq!(encode(-3.5), "-3.5");
}

#[test]
fn test_encode_non_finite_is_quoted() {
    assert_eq!(encode(f64::NAN), "\"NaN\"");
    assert_eq!(encode(f64::INFINITY), "\"Infinity\"");
    assert_eq!(encode(f64::NEG_INFINITY), "\"-Infinity\"");
}

#[test]
fn test_round_trip_finite_values() {
    let values = [
        0.0,
        0.1,
        0.015,
        1.0 / 3.0,
        123_456.789,
        f64::MIN_POSITIVE,
        f64::MAX,
        f64::MIN,
        f64::EPSILON,
        5e-324,
    ];

    for value in values {
        let decoded = decode(&encode(value)).unwrap().get();
        assert_eq!(decoded.to_bits(), value.to_bits(), "value {value:e}");
    }
}

#[test]
fn test_round_trip_non_finite_values() {
    assert!(decode(&encode(f64::NAN)).unwrap().is_nan());
    assert_eq!(
        decode(&encode(f64::INFINITY)).unwrap().get(),
        f64::INFINITY
    );
    assert_eq!(
        decode(&encode(f64::NEG_INFINITY)).unwrap().get(),
        f64::NEG_INFINITY
    );
}

// ============================================================================
// Helpers
// ============================================================================

#[test]
fn test_display_matches_wire_text() {
    assert_eq!(SpecialFloat(f64::NAN).to_string(), "NaN");
    assert_eq!(SpecialFloat(f64::NEG_INFINITY).to_string(), "-Infinity");
    assert_eq!(SpecialFloat(0.5).to_string(), "0.5");
}

#[test]
fn test_conversions() {
    let value = SpecialFloat::from(1.25);
    assert_eq!(f64::from(value), 1.25);
    assert!(value.is_finite());
    assert!(!SpecialFloat::new(f64::INFINITY).is_finite());
    assert_eq!(SpecialFloat::default().get(), 0.0);
}
