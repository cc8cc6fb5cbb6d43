use serde_json::Value;

use crate::errors::ValidationError;
use super::types::{EffectiveDate, LinkedClaim};

fn get_text(raw: &Value, key: &str) -> Option<String> {
    raw.get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(|value| value.to_string())
}

fn get_number(raw: &Value, key: &str) -> Result<Option<f64>, ValidationError> {
    match raw.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_f64()
            .map(Some)
            .ok_or(ValidationError("claim field is not a number")),
    }
}

fn get_integer(raw: &Value, key: &str) -> Result<Option<i64>, ValidationError> {
    match raw.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => {
            if let Some(integer) = value.as_i64() {
                return Ok(Some(integer));
            };
            // Form inputs may produce 4.0
            match value.as_f64() {
                Some(number) if number.fract() == 0.0 => Ok(Some(number as i64)),
                _ => Err(ValidationError("claim field is not an integer")),
            }
        },
    }
}

/// Converts loosely-typed claim payload (e.g. form data) to a claim.
/// Empty strings and nulls are treated as absent values.
pub fn to_linked_claim(raw: &Value) -> Result<LinkedClaim, ValidationError> {
    if !raw.is_object() {
        return Err(ValidationError("claim is not an object"));
    };
    let subject = get_text(raw, "subject")
        .ok_or(ValidationError("claim subject is missing"))?;
    let claim_type = get_text(raw, "claim")
        .ok_or(ValidationError("claim type is missing"))?;
    let claim = LinkedClaim {
        subject,
        claim: claim_type,
        object: get_text(raw, "object"),
        statement: get_text(raw, "statement"),
        effective_date: get_text(raw, "effectiveDate").map(EffectiveDate::Text),
        source_uri: get_text(raw, "sourceURI"),
        how_known: get_text(raw, "howKnown"),
        confidence: get_number(raw, "confidence")?,
        aspect: get_text(raw, "aspect"),
        stars: get_integer(raw, "stars")?,
        score: get_number(raw, "score")?,
        amt: get_number(raw, "amt")?,
        unit: get_text(raw, "unit"),
    };
    Ok(claim)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use super::*;

    #[test]
    fn test_to_linked_claim() {
        let raw = json!({
            "subject": "https://example.com",
            "claim": "rated",
            "object": "",
            "statement": "Good",
            "sourceURI": null,
            "aspect": "",
            "confidence": 0,
            "stars": 4.0,
            "amt": null,
            "effectiveDate": "2024-01-15",
            "issuerId": "did:key:abc",
        });
        let claim = to_linked_claim(&raw).unwrap();
        assert_eq!(claim.subject, "https://example.com");
        assert_eq!(claim.claim, "rated");
        assert_eq!(claim.object, None);
        assert_eq!(claim.statement.as_deref(), Some("Good"));
        assert_eq!(claim.source_uri, None);
        assert_eq!(claim.aspect, None);
        assert_eq!(claim.confidence, Some(0.0));
        assert_eq!(claim.stars, Some(4));
        assert_eq!(claim.amt, None);
        assert_eq!(
            claim.effective_date,
            Some(EffectiveDate::Text("2024-01-15".to_string())),
        );
    }

    #[test]
    fn test_to_linked_claim_missing_subject() {
        let raw = json!({"claim": "rated"});
        let error = to_linked_claim(&raw).unwrap_err();
        assert_eq!(error, ValidationError("claim subject is missing"));

        let raw = json!({"subject": "", "claim": "rated"});
        assert!(to_linked_claim(&raw).is_err());
    }

    #[test]
    fn test_to_linked_claim_invalid_number() {
        let raw = json!({
            "subject": "https://example.com",
            "claim": "rated",
            "score": "high",
        });
        let error = to_linked_claim(&raw).unwrap_err();
        assert_eq!(error, ValidationError("claim field is not a number"));

        let raw = json!({
            "subject": "https://example.com",
            "claim": "rated",
            "stars": 4.5,
        });
        assert!(to_linked_claim(&raw).is_err());
    }

    #[test]
    fn test_to_linked_claim_not_object() {
        assert!(to_linked_claim(&json!("claim")).is_err());
    }
}
