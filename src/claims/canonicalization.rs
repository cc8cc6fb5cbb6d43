use serde_json::{Map, Value};

use linkedtrust_utils::{
    canonicalization::{canonicalize_object, js_number, serialize_ordered},
    datetime::{format_iso_datetime, parse_datetime},
};

use crate::errors::ValidationError;
use super::types::{EffectiveDate, LinkedClaim};

pub type ClaimEntries = Vec<(&'static str, Value)>;

fn string_field(value: &Option<String>) -> Option<Value> {
    value.as_ref().map(|value| Value::from(value.as_str()))
}

fn number_field(value: Option<f64>) -> Result<Option<Value>, ValidationError> {
    value
        .map(|value| js_number(value).ok_or(ValidationError("number is not finite")))
        .transpose()
}

fn date_field(value: &Option<EffectiveDate>) -> Result<Option<Value>, ValidationError> {
    let maybe_date = match value {
        Some(EffectiveDate::DateTime(datetime)) => Some(*datetime),
        Some(EffectiveDate::Text(text)) => {
            let datetime = parse_datetime(text)
                .map_err(|_| ValidationError("invalid effective date"))?;
            Some(datetime)
        },
        None => None,
    };
    Ok(maybe_date.map(|datetime| Value::from(format_iso_datetime(&datetime))))
}

/// Returns claim fields in canonical order:
/// subject, claim, object, then other defined fields sorted by name
pub fn canonical_claim_entries(
    claim: &LinkedClaim,
) -> Result<ClaimEntries, ValidationError> {
    if claim.subject.is_empty() {
        return Err(ValidationError("claim subject is missing"));
    };
    if claim.claim.is_empty() {
        return Err(ValidationError("claim type is missing"));
    };
    let mut optional_fields = [
        ("amt", number_field(claim.amt)?),
        ("aspect", string_field(&claim.aspect)),
        ("confidence", number_field(claim.confidence)?),
        ("effectiveDate", date_field(&claim.effective_date)?),
        ("howKnown", string_field(&claim.how_known)),
        ("score", number_field(claim.score)?),
        ("sourceURI", string_field(&claim.source_uri)),
        ("stars", claim.stars.map(Value::from)),
        ("statement", string_field(&claim.statement)),
        ("unit", string_field(&claim.unit)),
    ];
    optional_fields.sort_by_key(|(name, _)| *name);

    let mut entries = vec![
        ("subject", Value::from(claim.subject.as_str())),
        ("claim", Value::from(claim.claim.as_str())),
    ];
    if let Some(object) = string_field(&claim.object) {
        entries.push(("object", object));
    };
    entries.extend(optional_fields.into_iter()
        .filter_map(|(name, maybe_value)| maybe_value.map(|value| (name, value))));
    Ok(entries)
}

/// Creates canonical JSON representation of a claim for signing
pub fn canonicalize_claim(claim: &LinkedClaim) -> Result<String, ValidationError> {
    let entries = canonical_claim_entries(claim)?;
    serialize_ordered(&entries)
        .map_err(|_| ValidationError("claim can't be serialized"))
}

/// Same fields as canonical representation, with all keys sorted (JCS)
pub fn canonicalize_claim_sorted(claim: &LinkedClaim) -> Result<String, ValidationError> {
    let object: Map<String, Value> = canonical_claim_entries(claim)?
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();
    canonicalize_object(&object)
        .map_err(|_| ValidationError("claim can't be serialized"))
}
