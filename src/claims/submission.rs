use chrono::Utc;
use serde::{Deserialize, Serialize};

use linkedtrust_utils::datetime::format_iso_datetime;

use crate::ethereum::{
    signatures::SignatureError,
    wallet::MessageSigner,
};
use crate::identity::{
    did_ethr::create_did_from_address,
    resolver::{IdType, IdentityResolver},
    session::{SessionStore, SessionStoreError},
};
use crate::json_signatures::{
    create::{
        create_signing_message,
        prepare_did_signing_at,
        LinkedClaimProof,
        SigningContext,
        SigningError,
    },
    verify::{verify_claim_proof, ProofVerificationError},
};
use super::types::LinkedClaim;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EthereumSignature {
    pub signature: String,
    pub signer_address: String,
    // Timestamp included in the signed message
    pub signed_at: String,
}

/// Signed claim, ready to be sent to the backend
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSubmission {
    #[serde(flatten)]
    pub claim: LinkedClaim,
    pub issuer_id: String,
    pub issuer_id_type: IdType,
    pub proof: LinkedClaimProof,
    pub ethereum_signature: EthereumSignature,
}

#[derive(thiserror::Error, Debug)]
pub enum SubmissionError {
    #[error("session storage error")]
    StorageError(#[from] SessionStoreError),

    #[error(transparent)]
    SigningError(#[from] SigningError),

    #[error("wallet error")]
    WalletError(#[from] SignatureError),

    #[error(transparent)]
    VerificationError(#[from] ProofVerificationError),
}

/// Signs claim on behalf of the current user and attaches the proof
pub fn sign_and_prepare_claim<S: SessionStore>(
    claim: &LinkedClaim,
    resolver: &IdentityResolver<S>,
    signer: &impl MessageSigner,
) -> Result<ClaimSubmission, SubmissionError> {
    let identity = resolver.resolve_identity()?;
    let signer_address = signer.address();
    if let Some(ref address) = identity.address {
        if address.to_lowercase() != signer_address.to_lowercase() {
            log::warn!(
                "wallet address {} differs from stored address {}",
                signer_address,
                address,
            );
        };
    };
    let now = Utc::now();
    let signed_at = format_iso_datetime(&now);
    let context = SigningContext {
        signer_did: identity.did.clone(),
        signer_address: signer_address.clone(),
        timestamp: Some(signed_at.clone()),
    };
    let prepared = prepare_did_signing_at(claim, &context, &now)?;
    let signature = signer.sign_message(prepared.message.as_bytes())?;
    let proof = prepared.proof.attach_signature(signature.clone());
    let issuer_id = identity.did
        .or(identity.address)
        .unwrap_or_else(|| create_did_from_address(&signer_address));
    log::info!("claim signed; issuer = {}", issuer_id);
    let submission = ClaimSubmission {
        claim: claim.clone(),
        issuer_id,
        issuer_id_type: identity.id_type,
        proof,
        ethereum_signature: EthereumSignature {
            signature,
            signer_address,
            signed_at,
        },
    };
    Ok(submission)
}

/// Re-creates signed message and verifies the proof
pub fn verify_claim_submission(
    submission: &ClaimSubmission,
) -> Result<(), SubmissionError> {
    let ethereum_signature = &submission.ethereum_signature;
    if submission.proof.proof_value.as_ref() != Some(&ethereum_signature.signature) {
        return Err(ProofVerificationError::InvalidProof("signature mismatch").into());
    };
    let message = create_signing_message(
        &submission.claim,
        &ethereum_signature.signed_at,
        &ethereum_signature.signer_address,
    )?;
    verify_claim_proof(&message, &submission.proof)?;
    Ok(())
}
