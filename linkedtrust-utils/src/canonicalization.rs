use serde::Serialize;
use serde_json::{Number, Value};

// Largest integer that JavaScript numbers represent exactly (2^53)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

#[derive(thiserror::Error, Debug)]
#[error("canonicalization error")]
pub struct CanonicalizationError(#[from] serde_json::Error);

/// JCS: https://www.rfc-editor.org/rfc/rfc8785
pub fn canonicalize_object(object: &impl Serialize) -> Result<String, CanonicalizationError> {
    let object_str = serde_jcs::to_string(object)?;
    Ok(object_str)
}

/// Serializes entries as a compact JSON object, in the given order.
/// Keys and values are written with JCS rules, so numbers and strings
/// are formatted the same way as by JavaScript's `JSON.stringify`.
pub fn serialize_ordered(
    entries: &[(&str, Value)],
) -> Result<String, CanonicalizationError> {
    let mut object_str = String::from("{");
    for (index, (key, value)) in entries.iter().enumerate() {
        if index > 0 {
            object_str.push(',');
        };
        object_str.push_str(&serde_jcs::to_string(key)?);
        object_str.push(':');
        object_str.push_str(&serde_jcs::to_string(value)?);
    };
    object_str.push('}');
    Ok(object_str)
}

/// Converts float to JSON number.
/// Integral values have no fractional part, and `serialize_ordered`
/// prints other values as ECMAScript `Number.prototype.toString` does.
/// Returns `None` for NaN and infinities.
pub fn js_number(value: f64) -> Option<Value> {
    if !value.is_finite() {
        return None;
    };
    if value.fract() == 0.0 && value.abs() < MAX_SAFE_INTEGER {
        // -0.0 is printed as 0
        return Some(Value::from(value as i64));
    };
    Number::from_f64(value).map(Value::Number)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use super::*;

    #[test]
    fn test_canonicalize_object() {
        let object = json!({
            "type": "Note",
            "content": "test",
            "tags": [3, 1],
        });
        let result = canonicalize_object(&object).unwrap();
        assert_eq!(result, r#"{"content":"test","tags":[3,1],"type":"Note"}"#);
    }

    #[test]
    fn test_serialize_ordered() {
        let entries = vec![
            ("subject", json!("https://example.com")),
            ("claim", json!("rated")),
            ("amt", json!(5)),
        ];
        let result = serialize_ordered(&entries).unwrap();
        assert_eq!(
            result,
            r#"{"subject":"https://example.com","claim":"rated","amt":5}"#,
        );
    }

    #[test]
    fn test_js_number() {
        assert_eq!(js_number(4.0), Some(json!(4)));
        assert_eq!(js_number(-0.0), Some(json!(0)));
        assert_eq!(js_number(0.75), Some(json!(0.75)));
        assert_eq!(
            serde_json::to_string(&js_number(0.1).unwrap()).unwrap(),
            "0.1",
        );
        assert_eq!(js_number(f64::NAN), None);
        assert_eq!(js_number(f64::INFINITY), None);
    }

    #[test]
    fn test_serialize_ordered_js_numbers() {
        let entries = vec![
            ("large", js_number(1e16).unwrap()),
            ("unsafe", js_number(9_007_199_254_740_992.0).unwrap()),
            ("small", js_number(0.000001).unwrap()),
            ("tiny", js_number(1e-7).unwrap()),
            ("huge", js_number(1e21).unwrap()),
            ("fraction", js_number(-2.5).unwrap()),
        ];
        let result = serialize_ordered(&entries).unwrap();
        assert_eq!(
            result,
            concat!(
                r#"{"large":10000000000000000,"unsafe":9007199254740992,"#,
                r#""small":0.000001,"tiny":1e-7,"huge":1e+21,"fraction":-2.5}"#,
            ),
        );
    }

    #[test]
    fn test_serialize_ordered_escapes_strings() {
        let entries = vec![
            ("statement", json!("line \"one\"\nline two")),
        ];
        let result = serialize_ordered(&entries).unwrap();
        assert_eq!(result, r#"{"statement":"line \"one\"\nline two"}"#);
    }
}
