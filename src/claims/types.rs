use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Effective date of a claim, either parsed or as provided by the author
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum EffectiveDate {
    DateTime(DateTime<Utc>),
    Text(String),
}

impl From<DateTime<Utc>> for EffectiveDate {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

impl From<&str> for EffectiveDate {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Subject-predicate-object assertion with optional metadata
/// https://identity.foundation/labs-linkedclaims/
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedClaim {
    pub subject: String,
    pub claim: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<EffectiveDate>,
    #[serde(rename = "sourceURI", default, skip_serializing_if = "Option::is_none")]
    pub source_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub how_known: Option<String>,
    // Signer's confidence at the time of signing (0-1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl LinkedClaim {
    pub fn new(subject: &str, claim: &str) -> Self {
        Self {
            subject: subject.to_string(),
            claim: claim.to_string(),
            ..Default::default()
        }
    }
}
