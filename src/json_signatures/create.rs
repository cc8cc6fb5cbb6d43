use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use linkedtrust_utils::{
    caip2::ChainId,
    canonicalization::{serialize_ordered, CanonicalizationError},
    datetime::format_iso_datetime,
};

use crate::claims::canonicalization::canonical_claim_entries;
use crate::claims::types::LinkedClaim;
use crate::errors::{InvalidContextError, ValidationError};
use crate::identity::did_pkh::DidPkh;
use super::proofs::{PROOF_PURPOSE, PROOF_TYPE_ETHEREUM_EIP712};

const TIMESTAMP_KEY: &str = "timestamp";
const SIGNER_KEY: &str = "signer";

/// Proof attached to a submitted claim
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedClaimProof {
    #[serde(rename = "type")]
    pub proof_type: String,
    pub created: String,
    pub verification_method: String,
    pub proof_purpose: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethereum_address: Option<String>,
}

impl LinkedClaimProof {
    /// Returns signed proof
    pub fn attach_signature(self, proof_value: String) -> Self {
        Self { proof_value: Some(proof_value), ..self }
    }

    pub fn is_signed(&self) -> bool {
        self.proof_value.is_some()
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningContext {
    #[serde(rename = "signerDID", default, skip_serializing_if = "Option::is_none")]
    pub signer_did: Option<String>,
    pub signer_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl SigningContext {
    pub fn new(signer_address: &str) -> Self {
        Self {
            signer_address: signer_address.to_string(),
            ..Default::default()
        }
    }
}

/// Message to be signed by the wallet, and unsigned proof
#[derive(Debug, Serialize)]
pub struct PreparedSigning {
    pub message: String,
    pub proof: LinkedClaimProof,
}

#[derive(thiserror::Error, Debug)]
pub enum SigningError {
    #[error(transparent)]
    ValidationError(#[from] ValidationError),

    #[error(transparent)]
    InvalidContextError(#[from] InvalidContextError),

    #[error(transparent)]
    CanonicalizationError(#[from] CanonicalizationError),
}

/// Creates message for EIP-191 signing:
/// canonical claim followed by timestamp and signer address
pub fn create_signing_message(
    claim: &LinkedClaim,
    timestamp: &str,
    signer_address: &str,
) -> Result<String, SigningError> {
    let mut entries = canonical_claim_entries(claim)?;
    entries.push((TIMESTAMP_KEY, Value::from(timestamp)));
    entries.push((SIGNER_KEY, Value::from(signer_address)));
    let message = serialize_ordered(&entries)?;
    Ok(message)
}

pub fn get_verification_method(context: &SigningContext) -> String {
    match context.signer_did.as_deref() {
        Some(signer_did) if !signer_did.is_empty() => signer_did.to_string(),
        _ => {
            let did = DidPkh::new(
                ChainId::ethereum_mainnet(),
                &context.signer_address,
            );
            did.to_string()
        },
    }
}

pub fn prepare_did_signing_at(
    claim: &LinkedClaim,
    context: &SigningContext,
    now: &DateTime<Utc>,
) -> Result<PreparedSigning, SigningError> {
    if context.signer_address.trim().is_empty() {
        return Err(InvalidContextError("signer address is missing").into());
    };
    let created = format_iso_datetime(now);
    let timestamp = match context.timestamp.as_deref() {
        Some(timestamp) if !timestamp.is_empty() => timestamp,
        _ => created.as_str(),
    };
    let message = create_signing_message(
        claim,
        timestamp,
        &context.signer_address,
    )?;
    let proof = LinkedClaimProof {
        proof_type: PROOF_TYPE_ETHEREUM_EIP712.to_string(),
        created: created.clone(),
        verification_method: get_verification_method(context),
        proof_purpose: PROOF_PURPOSE.to_string(),
        proof_value: None,
        authentication_method: None,
        ethereum_address: Some(context.signer_address.clone()),
    };
    log::debug!(
        "prepared claim signing; signer = {}",
        proof.verification_method,
    );
    Ok(PreparedSigning { message, proof })
}

/// Prepares claim for signing by external wallet
pub fn prepare_did_signing(
    claim: &LinkedClaim,
    context: &SigningContext,
) -> Result<PreparedSigning, SigningError> {
    prepare_did_signing_at(claim, context, &Utc::now())
}
