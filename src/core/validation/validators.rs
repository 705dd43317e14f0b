//! Reusable field validators
//!
//! These validators are used by the macro system to validate entity fields.
//! Each one ignores values of a type it does not handle so that validators
//! can be chained freely; type mismatches are reported by deserialization.

use crate::core::field::{FieldFormat, FieldValue};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Parse a JSON number or numeric string as a Decimal
pub(crate) fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

/// Validator: field is required (not null, not blank)
pub fn required() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::Null => Err(format!("The field '{}' is required", field)),
        Value::String(s) if s.trim().is_empty() => {
            Err(format!("The field '{}' may not be blank", field))
        }
        _ => Ok(()),
    }
}

/// Validator: field is optional (always valid)
pub fn optional() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, _: &Value| Ok(())
}

/// Validator: number must be strictly positive
pub fn positive() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match as_decimal(value) {
        Some(num) if num <= Decimal::ZERO => Err(format!(
            "The field '{}' must be positive (value: {})",
            field, num
        )),
        _ => Ok(()),
    }
}

/// Validator: number must not be negative
pub fn non_negative() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match as_decimal(value) {
        Some(num) if num < Decimal::ZERO => Err(format!(
            "The field '{}' must not be negative (value: {})",
            field, num
        )),
        _ => Ok(()),
    }
}

/// Validator: string length must be within range
pub fn string_length(
    min: usize,
    max: usize,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            let len = s.chars().count();
            if len < min {
                Err(format!(
                    "'{}' must be at least {} characters (currently: {})",
                    field, min, len
                ))
            } else if len > max {
                Err(format!(
                    "'{}' must not exceed {} characters (currently: {})",
                    field, max, len
                ))
            } else {
                Ok(())
            }
        } else {
            Ok(())
        }
    }
}

/// Validator: number must not exceed maximum
pub fn max_value(max: f64) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        let limit = Decimal::from_f64_retain(max).unwrap_or(Decimal::MAX);
        match as_decimal(value) {
            Some(num) if num > limit => Err(format!(
                "'{}' must not exceed {} (value: {})",
                field, max, num
            )),
            _ => Ok(()),
        }
    }
}

/// Validator: value must be in allowed list
pub fn in_list(
    allowed: Vec<String>,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if !allowed.iter().any(|a| a == s) {
                Err(format!(
                    "'{}' must be one of: {:?} (got: {})",
                    field, allowed, s
                ))
            } else {
                Ok(())
            }
        } else {
            Ok(())
        }
    }
}

/// Validator: date must match format
pub fn date_format(
    format: &'static str,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            match chrono::NaiveDate::parse_from_str(s, format) {
                Ok(_) => Ok(()),
                Err(_) => Err(format!(
                    "'{}' must use the format {} (got: {})",
                    field, format, s
                )),
            }
        } else {
            Ok(())
        }
    }
}

/// Validator: string must be a well-formed email address (empty is allowed)
pub fn email() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value.as_str() {
        Some(s) if !s.is_empty() && !FieldFormat::Email.validate(&FieldValue::String(s.to_string())) => {
            Err(format!("'{}' is not a valid email address (got: {})", field, s))
        }
        _ => Ok(()),
    }
}

/// Validator: string must be a valid UUID
pub fn uuid() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::Null => Ok(()),
        Value::String(s) if uuid::Uuid::parse_str(s.trim()).is_ok() => Ok(()),
        other => Err(format!("'{}' is not a valid id (got: {})", field, other)),
    }
}

/// Validator: value must be a decimal number (JSON number or numeric string)
pub fn decimal() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::Null => Ok(()),
        Value::Number(_) | Value::String(_) if as_decimal(value).is_some() => Ok(()),
        other => Err(format!("'{}' must be a decimal number (got: {})", field, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // === required() ===

    #[test]
    fn test_required_null_value_returns_error() {
        let v = required();
        let result = v("name", &json!(null));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("required"));
    }

    #[test]
    fn test_required_blank_string_returns_error() {
        let v = required();
        assert!(v("username", &json!("   ")).is_err());
    }

    #[test]
    fn test_required_values_return_ok() {
        let v = required();
        assert!(v("name", &json!("hello")).is_ok());
        assert!(v("age", &json!(42)).is_ok());
        assert!(v("items", &json!([1, 2, 3])).is_ok());
    }

    // === optional() ===

    #[test]
    fn test_optional_always_ok() {
        let v = optional();
        assert!(v("field", &json!(null)).is_ok());
        assert!(v("field", &json!("value")).is_ok());
    }

    // === positive() ===

    #[test]
    fn test_positive_negative_number_returns_error() {
        let v = positive();
        let result = v("price", &json!(-5.0));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("positive"));
    }

    #[test]
    fn test_positive_zero_returns_error() {
        let v = positive();
        assert!(v("quantity", &json!(0)).is_err());
    }

    #[test]
    fn test_positive_numeric_string() {
        let v = positive();
        assert!(v("amount", &json!("12.50")).is_ok());
        assert!(v("amount", &json!("-0.01")).is_err());
    }

    #[test]
    fn test_positive_non_number_passthrough() {
        let v = positive();
        assert!(v("name", &json!("hello")).is_ok());
    }

    #[test]
    fn test_non_negative_accepts_zero() {
        let v = non_negative();
        assert!(v("price", &json!(0)).is_ok());
        assert!(v("price", &json!(-1)).is_err());
    }

    // === string_length() ===

    #[test]
    fn test_string_length_bounds() {
        let v = string_length(3, 5);
        assert!(v("name", &json!("ab")).unwrap_err().contains("at least 3"));
        assert!(v("name", &json!("abcdef")).unwrap_err().contains("exceed 5"));
        assert!(v("name", &json!("abc")).is_ok());
        assert!(v("name", &json!("abcde")).is_ok());
    }

    #[test]
    fn test_string_length_counts_characters() {
        let v = string_length(1, 5);
        assert!(v("name", &json!("Ελένη")).is_ok());
    }

    // === max_value() ===

    #[test]
    fn test_max_value() {
        let v = max_value(100.0);
        assert!(v("score", &json!(101.0)).unwrap_err().contains("exceed 100"));
        assert!(v("score", &json!(100)).is_ok());
        assert!(v("score", &json!("99.99")).is_ok());
    }

    // === in_list() ===

    #[test]
    fn test_in_list() {
        let v = in_list(vec!["xlsx".into(), "pdf".into()]);
        assert!(v("format", &json!("pdf")).is_ok());
        assert!(v("format", &json!("csv")).unwrap_err().contains("one of"));
        assert!(v("format", &json!(42)).is_ok());
    }

    // === date_format() ===

    #[test]
    fn test_date_format() {
        let v = date_format("%Y-%m-%d");
        assert!(v("date", &json!("2024-01-15")).is_ok());
        assert!(v("date", &json!("15/01/2024")).unwrap_err().contains("format"));
        assert!(v("date", &json!(null)).is_ok());
    }

    // === email() ===

    #[test]
    fn test_email() {
        let v = email();
        assert!(v("email", &json!("maria@example.gr")).is_ok());
        assert!(v("email", &json!("maria")).is_err());
        assert!(v("email", &json!(null)).is_ok());
    }

    // === uuid() ===

    #[test]
    fn test_uuid() {
        let v = uuid();
        assert!(v("customer", &json!(uuid::Uuid::new_v4().to_string())).is_ok());
        assert!(v("customer", &json!("42")).is_err());
        assert!(v("customer", &json!(42)).is_err());
        assert!(v("customer", &json!(null)).is_ok());
    }

    // === decimal() ===

    #[test]
    fn test_decimal() {
        let v = decimal();
        assert!(v("price", &json!(5)).is_ok());
        assert!(v("price", &json!("5.20")).is_ok());
        assert!(v("price", &json!("five")).is_err());
        assert!(v("price", &json!(true)).is_err());
    }
}
