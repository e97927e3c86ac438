use serde_json::{Map, Value};

/// Presence test used when probing optional fields: `null`, `false`, `0`
/// and `""` count as absent.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Field lookup that treats absent-like values as missing.
pub fn field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|value| is_present(value))
}

/// Plain text for a scalar value. Objects and arrays are not plain text.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(format_number(number)),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

pub fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(scalar_text)
}

/// Items of a list field. A lone scalar is read as a one-item list;
/// non-text items are dropped.
pub fn text_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar_text).collect(),
        other => scalar_text(other).into_iter().collect(),
    }
}

/// Integral floats print without a fractional part (`72.0` → `72`).
pub fn format_number(number: &serde_json::Number) -> String {
    if number.is_f64() {
        if let Some(float) = number.as_f64() {
            if float.fract() == 0.0 && float.abs() < 1e15 {
                return format!("{}", float as i64);
            }
        }
    }
    number.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_like_values_are_not_present() {
        for value in [json!(null), json!(false), json!(0), json!("")] {
            assert!(!is_present(&value), "{value} should be absent");
        }
        for value in [json!("x"), json!(1), json!([]), json!({})] {
            assert!(is_present(&value), "{value} should be present");
        }
    }

    #[test]
    fn scalar_text_rejects_structures() {
        assert_eq!(scalar_text(&json!("text")), Some("text".to_string()));
        assert_eq!(scalar_text(&json!(50000)), Some("50000".to_string()));
        assert_eq!(scalar_text(&json!({"cost": 1})), None);
        assert_eq!(scalar_text(&json!(["a"])), None);
        assert_eq!(scalar_text(&json!("")), None);
    }

    #[test]
    fn text_list_accepts_scalars_and_skips_structures() {
        assert_eq!(text_list(&json!(["a", 2, {"b": 1}])), vec!["a", "2"]);
        assert_eq!(text_list(&json!("solo")), vec!["solo"]);
        assert!(text_list(&json!(null)).is_empty());
    }

    #[test]
    fn integral_floats_drop_fraction() {
        assert_eq!(scalar_text(&json!(72.0)), Some("72".to_string()));
        assert_eq!(scalar_text(&json!(72.5)), Some("72.5".to_string()));
    }
}
