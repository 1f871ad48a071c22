//! Conversion of raw text into typed parameter values.
//!
//! Surrounding whitespace is ignored for numeric and boolean parameters and kept
//! verbatim for strings. Numbers must be complete: `"42abc"` is rejected rather
//! than read as `42`.

use crate::error::{Error, Result};
use crate::param::{Category, ParamValue};

/// Converts `raw` into a value of `category` for the parameter `name`.
///
/// Booleans accept any integer (non-zero is `true`) as well as `true`/`false`
/// in any letter case.
pub fn coerce(name: &str, category: Category, raw: &str) -> Result<ParamValue> {
    let parsed = match category {
        Category::Bool => parse_bool(raw).map(ParamValue::Bool),
        Category::Int => raw.trim().parse::<i32>().ok().map(ParamValue::Int),
        Category::Double => raw.trim().parse::<f64>().ok().map(ParamValue::Double),
        Category::String => Some(ParamValue::String(raw.to_string())),
    };

    parsed.ok_or_else(|| Error::MalformedValue {
        name: name.to_string(),
        value: raw.to_string(),
        expected: category,
    })
}

fn parse_bool(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        raw.parse::<i64>().ok().map(|n| n != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_from_integers() {
        assert_eq!(coerce("F", Category::Bool, "1").unwrap(), ParamValue::Bool(true));
        assert_eq!(coerce("F", Category::Bool, "0").unwrap(), ParamValue::Bool(false));
        assert_eq!(coerce("F", Category::Bool, "-3").unwrap(), ParamValue::Bool(true));
    }

    #[test]
    fn test_bool_from_words() {
        assert_eq!(coerce("F", Category::Bool, "TRUE").unwrap(), ParamValue::Bool(true));
        assert_eq!(coerce("F", Category::Bool, "false").unwrap(), ParamValue::Bool(false));
        assert!(coerce("F", Category::Bool, "yes please").is_err());
    }

    #[test]
    fn test_int_trims_whitespace() {
        assert_eq!(coerce("N", Category::Int, " 42 ").unwrap(), ParamValue::Int(42));
    }

    #[test]
    fn test_int_rejects_trailing_garbage() {
        let err = coerce("N", Category::Int, "42abc").unwrap_err();
        match err {
            Error::MalformedValue {
                name,
                value,
                expected,
            } => {
                assert_eq!(name, "N");
                assert_eq!(value, "42abc");
                assert_eq!(expected, Category::Int);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_int_rejects_out_of_range() {
        assert!(coerce("N", Category::Int, "4294967296").is_err());
    }

    #[test]
    fn test_double_forms() {
        assert_eq!(
            coerce("D", Category::Double, "345.678").unwrap(),
            ParamValue::Double(345.678)
        );
        assert_eq!(
            coerce("D", Category::Double, "-6001.45e-2").unwrap(),
            ParamValue::Double(-60.0145)
        );
        assert!(coerce("D", Category::Double, "").is_err());
        assert!(coerce("D", Category::Double, "pi").is_err());
    }

    #[test]
    fn test_string_is_verbatim() {
        assert_eq!(
            coerce("S", Category::String, " spaced ").unwrap(),
            ParamValue::from(" spaced ")
        );
        assert_eq!(coerce("S", Category::String, "").unwrap(), ParamValue::from(""));
    }
}
