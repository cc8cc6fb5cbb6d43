/// https://www.w3.org/TR/did-core/
use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::Error as DeserializerError,
};

use crate::errors::ValidationError;
use super::did_ethr::DidEthr;
use super::did_pkh::DidPkh;

pub const DID_PREFIX: &str = "did:";

/// DID of any method, without method-specific validation
#[derive(Clone, Debug, PartialEq)]
pub struct GenericDid {
    pub method: String,
    pub method_specific_id: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Did {
    Pkh(DidPkh),
    Ethr(DidEthr),
    Other(GenericDid),
}

#[derive(thiserror::Error, Debug)]
#[error("DID parse error")]
pub struct DidParseError;

/// Checks "did:<method>:<method-specific-id>" shape.
/// Method name is not checked against any registry.
pub fn validate_did_format(value: &str) -> Result<(), ValidationError> {
    let is_valid = value.strip_prefix(DID_PREFIX)
        .and_then(|did_str| did_str.split_once(':'))
        .map(|(method, method_id)| !method.is_empty() && !method_id.is_empty())
        .unwrap_or(false);
    if !is_valid {
        return Err(ValidationError("Invalid DID format"));
    };
    Ok(())
}

impl Did {
    pub fn method(&self) -> &str {
        match self {
            Self::Pkh(_) => "pkh",
            Self::Ethr(_) => "ethr",
            Self::Other(did) => &did.method,
        }
    }

    /// Returns ethereum address controlled by DID subject, if known
    pub fn ethereum_address(&self) -> Option<String> {
        match self {
            Self::Pkh(did_pkh) if did_pkh.chain_id.is_ethereum() => {
                Some(did_pkh.address.clone())
            },
            Self::Ethr(did_ethr) => Some(did_ethr.address.clone()),
            _ => None,
        }
    }
}

impl FromStr for Did {
    type Err = DidParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        validate_did_format(value).map_err(|_| DidParseError)?;
        let (method, method_specific_id) = value[DID_PREFIX.len()..]
            .split_once(':')
            .ok_or(DidParseError)?;
        let did = match method {
            "pkh" => DidPkh::from_str(value).ok().map(Self::Pkh),
            "ethr" => DidEthr::from_str(value).ok().map(Self::Ethr),
            _ => None,
        };
        let did = did.unwrap_or_else(|| Self::Other(GenericDid {
            method: method.to_string(),
            method_specific_id: method_specific_id.to_string(),
        }));
        Ok(did)
    }
}

impl fmt::Display for Did {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let did_str = match self {
            Self::Pkh(did_pkh) => did_pkh.to_string(),
            Self::Ethr(did_ethr) => did_ethr.to_string(),
            Self::Other(did) => {
                format!("{}{}:{}", DID_PREFIX, did.method, did.method_specific_id)
            },
        };
        write!(formatter, "{}", did_str)
    }
}

impl<'de> Deserialize<'de> for Did {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: Deserializer<'de>
    {
        let did_str: String = Deserialize::deserialize(deserializer)?;
        did_str.parse().map_err(DeserializerError::custom)
    }
}

impl Serialize for Did {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        let did_str = self.to_string();
        serializer.serialize_str(&did_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_did_format() {
        assert!(validate_did_format("did:key:abc123").is_ok());
        assert!(validate_did_format("did:web:example.com:users:alice").is_ok());
        assert_eq!(
            validate_did_format("not-a-did"),
            Err(ValidationError("Invalid DID format")),
        );
        assert!(validate_did_format("did:key").is_err());
        assert!(validate_did_format("DID:key:abc").is_err());
        assert!(validate_did_format("").is_err());
    }

    #[test]
    fn test_validate_did_format_empty_segments() {
        assert!(validate_did_format("did:key:").is_err());
        assert!(validate_did_format("did::abc").is_err());
        assert!(validate_did_format("did::").is_err());
        // Empty segments inside method-specific ID are allowed
        assert!(validate_did_format("did:web:example.com::alice").is_ok());
    }

    #[test]
    fn test_did_pkh_string_conversion() {
        let did_str = "did:pkh:eip155:1:0xb9c5714089478a327f09197987f16f9e5d936e8a";
        let did: Did = did_str.parse().unwrap();
        assert!(matches!(did, Did::Pkh(_)));
        assert_eq!(did.method(), "pkh");
        assert_eq!(
            did.ethereum_address().as_deref(),
            Some("0xb9c5714089478a327f09197987f16f9e5d936e8a"),
        );
        assert_eq!(did.to_string(), did_str);
    }

    #[test]
    fn test_did_ethr_string_conversion() {
        let did_str = "did:ethr:0xb9c5714089478a327f09197987f16f9e5d936e8a";
        let did: Did = did_str.parse().unwrap();
        assert!(matches!(did, Did::Ethr(_)));
        assert_eq!(did.to_string(), did_str);
    }

    #[test]
    fn test_other_did_string_conversion() {
        let did_str = "did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK";
        let did: Did = did_str.parse().unwrap();
        assert_eq!(did.method(), "key");
        assert_eq!(did.ethereum_address(), None);
        assert_eq!(did.to_string(), did_str);

        // Unrecognized pkh DID is kept as is
        let did_str = "did:pkh:unknown";
        let did: Did = did_str.parse().unwrap();
        assert!(matches!(did, Did::Other(_)));
        assert_eq!(did.to_string(), did_str);
    }

    #[test]
    fn test_did_serialization() {
        let did: Did = "did:web:example.com".parse().unwrap();
        let value = serde_json::to_value(&did).unwrap();
        assert_eq!(value, "did:web:example.com");
        let deserialized: Did = serde_json::from_value(value).unwrap();
        assert_eq!(deserialized, did);
        assert!(serde_json::from_str::<Did>(r#""not-a-did""#).is_err());
    }
}
