//! Field filters applied to a payload before its validators run
//!
//! A filter never rejects input: values of a type it does not handle are
//! passed through untouched.

use super::validators::as_decimal;
use anyhow::Result;
use rust_decimal::RoundingStrategy;
use serde_json::Value;

/// Apply `f` to string values only
fn map_str<F>(f: F) -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone
where
    F: Fn(&str) -> String + Send + Sync + Clone,
{
    move |_: &str, value: Value| match value {
        Value::String(s) => Ok(Value::String(f(&s))),
        other => Ok(other),
    }
}

pub fn trim() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    map_str(|s| s.trim().to_string())
}

/// Used for tax ids, which are compared case-sensitively
pub fn uppercase() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    map_str(str::to_uppercase)
}

pub fn lowercase() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    map_str(str::to_lowercase)
}

/// Round a money value to `decimals` places, midpoints away from zero.
///
/// Numbers and numeric strings are both accepted and the result is always a
/// decimal string, so nothing goes through `f64` on the way to `Decimal`.
pub fn round_decimals(
    decimals: u32,
) -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    move |_: &str, value: Value| {
        Ok(match as_decimal(&value) {
            Some(num) => Value::String(
                num.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
                    .to_string(),
            ),
            None => value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_filters() {
        let trim = trim();
        let upper = uppercase();
        let lower = lowercase();

        assert_eq!(trim("first_name", json!("  Maria ")).unwrap(), json!("Maria"));
        assert_eq!(upper("tax_id", json!("el123456789")).unwrap(), json!("EL123456789"));
        assert_eq!(lower("email", json!("Maria@Example.GR")).unwrap(), json!("maria@example.gr"));
    }

    #[test]
    fn test_string_filters_ignore_other_types() {
        for value in [json!(42), json!(null), json!(true), json!(["a"])] {
            assert_eq!(trim()("field", value.clone()).unwrap(), value);
            assert_eq!(lowercase()("field", value.clone()).unwrap(), value);
        }
    }

    #[test]
    fn test_round_decimals() {
        let round = round_decimals(2);
        assert_eq!(round("price", json!(3.14159)).unwrap(), json!("3.14"));
        assert_eq!(round("amount", json!(15)).unwrap(), json!("15"));
        assert_eq!(round("amount", json!("19.999")).unwrap(), json!("20.00"));
        assert_eq!(round("name", json!("feta")).unwrap(), json!("feta"));
    }

    #[test]
    fn test_round_decimals_midpoints() {
        let round = round_decimals(1);
        assert_eq!(round("price", json!("2.55")).unwrap(), json!("2.6"));
        assert_eq!(round("price", json!("-3.45")).unwrap(), json!("-3.5"));
    }
}
