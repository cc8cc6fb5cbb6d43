use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::ethereum::utils::parse_address;
use super::did::validate_did_format;
use super::did_ethr::create_did_from_address;
use super::session::{
    SessionStore,
    SessionStoreError,
    ETH_ADDRESS_KEY,
    USER_DID_KEY,
    USER_ID_TYPE_KEY,
    USE_RAW_ETH_ADDRESS_KEY,
};

#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdType {
    Did,
    EthereumAddress,
}

impl Default for IdType {
    fn default() -> Self { Self::Did }
}

impl IdType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Did => "DID",
            Self::EthereumAddress => "ETHEREUM_ADDRESS",
        }
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub did: Option<String>,
    pub id_type: IdType,
}

impl UserIdentity {
    pub fn is_empty(&self) -> bool {
        self.did.is_none() && self.address.is_none()
    }

    /// Short form of identity for display
    pub fn display_name(&self) -> String {
        if let Some(ref did) = self.did {
            if did.chars().count() > 20 {
                return shorten(did, 15, 4);
            };
            return did.clone();
        };
        if let Some(ref address) = self.address {
            return shorten(address, 6, 4);
        };
        "No identity set".to_string()
    }
}

fn shorten(value: &str, head: usize, tail: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= head + tail {
        return value.to_string();
    };
    let head_str: String = chars[..head].iter().collect();
    let tail_str: String = chars[chars.len() - tail..].iter().collect();
    format!("{}...{}", head_str, tail_str)
}

#[derive(thiserror::Error, Debug)]
pub enum IdentityError {
    #[error(transparent)]
    ValidationError(#[from] ValidationError),

    #[error("session storage error")]
    StorageError(#[from] SessionStoreError),
}

/// Derives user identity from session state
pub struct IdentityResolver<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> IdentityResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn use_raw_address(&self) -> Result<bool, SessionStoreError> {
        let value = self.store.get(USE_RAW_ETH_ADDRESS_KEY)?;
        Ok(value.as_deref() == Some("true"))
    }

    /// Returns identity using the following precedence:
    /// custom DID, DID derived from stored address, raw address
    pub fn resolve_identity(&self) -> Result<UserIdentity, SessionStoreError> {
        if let Some(custom_did) = self.store.get(USER_DID_KEY)? {
            if validate_did_format(&custom_did).is_ok() {
                let identity = UserIdentity {
                    did: Some(custom_did),
                    ..Default::default()
                };
                return Ok(identity);
            };
            log::warn!("ignoring invalid custom DID: {}", custom_did);
        };
        let maybe_address = self.store.get(ETH_ADDRESS_KEY)?
            .filter(|address| !address.is_empty());
        if let Some(address) = maybe_address {
            let identity = if self.use_raw_address()? {
                UserIdentity {
                    address: Some(address),
                    did: None,
                    id_type: IdType::EthereumAddress,
                }
            } else {
                UserIdentity {
                    did: Some(create_did_from_address(&address)),
                    address: Some(address),
                    id_type: IdType::Did,
                }
            };
            return Ok(identity);
        };
        Ok(UserIdentity::default())
    }

    pub fn set_custom_did(&mut self, did: &str) -> Result<(), IdentityError> {
        validate_did_format(did)?;
        self.store.set(USER_DID_KEY, did)?;
        self.store.set(USER_ID_TYPE_KEY, IdType::Did.as_str())?;
        log::info!("custom DID set to {}", did);
        Ok(())
    }

    /// Reverts to ethereum-based identity
    pub fn clear_custom_did(&mut self) -> Result<(), IdentityError> {
        self.store.remove(USER_DID_KEY)?;
        self.store.remove(USER_ID_TYPE_KEY)?;
        log::info!("custom DID removed");
        Ok(())
    }

    /// Stores address of connected wallet
    pub fn set_ethereum_address(&mut self, address: &str) -> Result<(), IdentityError> {
        parse_address(address)
            .map_err(|_| ValidationError("Invalid ethereum address"))?;
        self.store.set(ETH_ADDRESS_KEY, address)?;
        log::info!("ethereum address set to {}", address);
        Ok(())
    }

    pub fn clear_ethereum_address(&mut self) -> Result<(), IdentityError> {
        self.store.remove(ETH_ADDRESS_KEY)?;
        log::info!("ethereum address removed");
        Ok(())
    }

    pub fn set_use_raw_address(&mut self, use_raw_address: bool) -> Result<(), IdentityError> {
        if use_raw_address {
            self.store.set(USE_RAW_ETH_ADDRESS_KEY, "true")?;
        } else {
            self.store.remove(USE_RAW_ETH_ADDRESS_KEY)?;
        };
        Ok(())
    }

    pub fn identity_display_name(&self) -> Result<String, SessionStoreError> {
        let identity = self.resolve_identity()?;
        Ok(identity.display_name())
    }

    pub fn has_identity(&self) -> Result<bool, SessionStoreError> {
        let identity = self.resolve_identity()?;
        Ok(!identity.is_empty())
    }
}
