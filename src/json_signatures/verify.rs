use linkedtrust_utils::caip2::ChainId;

use crate::ethereum::{
    signatures::{recover_address, SignatureData, SignatureError},
    utils::address_to_string,
};
use crate::identity::did::{Did, DID_PREFIX};
use crate::identity::did_pkh::DidPkh;
use super::create::LinkedClaimProof;
use super::proofs::{ProofType, PROOF_PURPOSE};

#[derive(thiserror::Error, Debug)]
pub enum ProofVerificationError {
    #[error("{0}")]
    InvalidProof(&'static str),

    #[error("no proof value")]
    NoProofValue,

    #[error("unknown signer")]
    UnknownSigner,

    #[error("invalid signature")]
    InvalidSignature,

    #[error(transparent)]
    SignatureError(#[from] SignatureError),
}

fn remove_fragment(value: &str) -> &str {
    value.split('#').next().unwrap_or(value)
}

/// Returns ID of the claim issuer
pub fn get_issuer_from_proof(proof: &LinkedClaimProof) -> String {
    if proof.verification_method.starts_with(DID_PREFIX) {
        return remove_fragment(&proof.verification_method).to_string();
    };
    if let Some(ref address) = proof.ethereum_address {
        let did = DidPkh::new(ChainId::ethereum_mainnet(), address);
        return did.to_string();
    };
    proof.verification_method.clone()
}

/// Returns address that is expected to have produced the signature.
/// Address embedded in verification method takes precedence and
/// must match `ethereumAddress` if both are present.
pub fn get_signer_address(
    proof: &LinkedClaimProof,
) -> Result<String, ProofVerificationError> {
    let proof_address = proof.ethereum_address.as_ref()
        .filter(|address| !address.is_empty());
    let method_address = remove_fragment(&proof.verification_method)
        .parse::<Did>().ok()
        .and_then(|did| did.ethereum_address());
    match (method_address, proof_address) {
        (Some(method_address), Some(proof_address)) => {
            if method_address.to_lowercase() != proof_address.to_lowercase() {
                return Err(ProofVerificationError::InvalidProof(
                    "verification method does not match signer",
                ));
            };
            Ok(method_address)
        },
        (Some(method_address), None) => Ok(method_address),
        (None, Some(proof_address)) => Ok(proof_address.clone()),
        (None, None) => Err(ProofVerificationError::UnknownSigner),
    }
}

/// Verifies EIP-191 signature created by personal_sign
pub fn verify_eip191_signature(
    message: &str,
    signature: &str,
    expected_address: &str,
) -> Result<(), ProofVerificationError> {
    let signature_data: SignatureData = signature.parse()?;
    let signer = recover_address(message.as_bytes(), &signature_data)?;
    if address_to_string(signer) != expected_address.to_lowercase() {
        return Err(ProofVerificationError::InvalidSignature);
    };
    Ok(())
}

pub fn verify_claim_proof(
    message: &str,
    proof: &LinkedClaimProof,
) -> Result<(), ProofVerificationError> {
    proof.proof_type.parse::<ProofType>()
        .map_err(|_| ProofVerificationError::InvalidProof("unsupported proof type"))?;
    if proof.proof_purpose != PROOF_PURPOSE {
        return Err(ProofVerificationError::InvalidProof("invalid proof purpose"));
    };
    let signature = proof.proof_value.as_ref()
        .ok_or(ProofVerificationError::NoProofValue)?;
    let signer_address = get_signer_address(proof)?;
    verify_eip191_signature(message, signature, &signer_address)
}

#[cfg(test)]
mod tests {
    use crate::claims::types::LinkedClaim;
    use crate::ethereum::wallet::{LocalWallet, MessageSigner};
    use crate::identity::did_ethr::create_did_from_address;
    use crate::json_signatures::create::{prepare_did_signing, SigningContext};
    use super::*;

    fn create_proof(verification_method: &str, ethereum_address: Option<&str>) -> LinkedClaimProof {
        LinkedClaimProof {
            proof_type: "EthereumEip712Signature2021".to_string(),
            created: "2024-05-01T10:00:00.000Z".to_string(),
            verification_method: verification_method.to_string(),
            proof_purpose: "assertionMethod".to_string(),
            proof_value: None,
            authentication_method: None,
            ethereum_address: ethereum_address.map(|value| value.to_string()),
        }
    }

    fn sign_claim(wallet: &LocalWallet, signer_did: Option<&str>) -> (String, LinkedClaimProof) {
        let claim = LinkedClaim::new("https://example.com", "rated");
        let context = SigningContext {
            signer_did: signer_did.map(|value| value.to_string()),
            ..SigningContext::new(&wallet.address())
        };
        let prepared = prepare_did_signing(&claim, &context).unwrap();
        let signature = wallet.sign_message(prepared.message.as_bytes()).unwrap();
        (prepared.message, prepared.proof.attach_signature(signature))
    }

    #[test]
    fn test_get_issuer_from_proof() {
        let proof = create_proof("did:key:z6Mkabc#z6Mkabc", None);
        assert_eq!(get_issuer_from_proof(&proof), "did:key:z6Mkabc");

        let proof = create_proof("https://server.example/keys/1", Some("0xABCD"));
        assert_eq!(get_issuer_from_proof(&proof), "did:pkh:eip155:1:0xABCD");

        let proof = create_proof("https://server.example/keys/1", None);
        assert_eq!(get_issuer_from_proof(&proof), "https://server.example/keys/1");
    }

    #[test]
    fn test_get_signer_address() {
        let address = "0xb9c5714089478a327f09197987f16f9e5d936e8a";
        let proof = create_proof("did:key:z6Mkabc", Some(address));
        assert_eq!(get_signer_address(&proof).unwrap(), address);

        let did_pkh = format!("did:pkh:eip155:1:{}", address);
        let proof = create_proof(&did_pkh, None);
        assert_eq!(get_signer_address(&proof).unwrap(), address);

        let did_ethr = format!("did:ethr:{}#controller", address);
        let proof = create_proof(&did_ethr, None);
        assert_eq!(get_signer_address(&proof).unwrap(), address);

        let checksummed = "0xB9C5714089478a327F09197987f16f9E5d936E8a";
        let proof = create_proof(&did_ethr, Some(checksummed));
        assert_eq!(get_signer_address(&proof).unwrap(), address);

        let proof = create_proof("did:key:z6Mkabc", None);
        let error = get_signer_address(&proof).unwrap_err();
        assert!(matches!(error, ProofVerificationError::UnknownSigner));
    }

    #[test]
    fn test_get_signer_address_mismatch() {
        let did_ethr = "did:ethr:0xb9c5714089478a327f09197987f16f9e5d936e8a";
        let other_address = "0x14b1d8d4e6aa1d4a4d2b4c9c36d4ce3f8a0c2083";
        let proof = create_proof(did_ethr, Some(other_address));
        let error = get_signer_address(&proof).unwrap_err();
        assert!(matches!(
            error,
            ProofVerificationError::InvalidProof("verification method does not match signer"),
        ));
    }

    #[test]
    fn test_verify_claim_proof_with_impersonated_did() {
        let wallet = LocalWallet::generate().unwrap();
        let other_wallet = LocalWallet::generate().unwrap();
        // Signed by wallet, but claims to be issued by other wallet's DID
        let other_did = create_did_from_address(&other_wallet.address());
        let (message, proof) = sign_claim(&wallet, Some(&other_did));
        assert_eq!(get_issuer_from_proof(&proof), other_did);
        let error = verify_claim_proof(&message, &proof).unwrap_err();
        assert!(matches!(error, ProofVerificationError::InvalidProof(_)));
    }

    #[test]
    fn test_verify_claim_proof() {
        let wallet = LocalWallet::generate().unwrap();
        let (message, proof) = sign_claim(&wallet, None);
        let result = verify_claim_proof(&message, &proof);
        assert_eq!(result.is_ok(), true);
    }

    #[test]
    fn test_verify_claim_proof_with_custom_did() {
        let wallet = LocalWallet::generate().unwrap();
        let (message, proof) = sign_claim(&wallet, Some("did:web:example.com"));
        assert_eq!(proof.verification_method, "did:web:example.com");
        assert_eq!(get_issuer_from_proof(&proof), "did:web:example.com");
        assert_eq!(verify_claim_proof(&message, &proof).is_ok(), true);
    }

    #[test]
    fn test_verify_claim_proof_tampered_message() {
        let wallet = LocalWallet::generate().unwrap();
        let (message, proof) = sign_claim(&wallet, None);
        let tampered = message.replace("rated", "disputed");
        let error = verify_claim_proof(&tampered, &proof).unwrap_err();
        assert!(matches!(error, ProofVerificationError::InvalidSignature));
    }

    #[test]
    fn test_verify_claim_proof_wrong_signer() {
        let wallet = LocalWallet::generate().unwrap();
        let other_wallet = LocalWallet::generate().unwrap();
        let (message, proof) = sign_claim(&wallet, None);
        let proof = LinkedClaimProof {
            ethereum_address: Some(other_wallet.address()),
            ..proof
        };
        assert!(verify_claim_proof(&message, &proof).is_err());
    }

    #[test]
    fn test_verify_unsigned_proof() {
        let proof = create_proof("did:key:z6Mkabc", Some("0xabcd"));
        let error = verify_claim_proof("{}", &proof).unwrap_err();
        assert!(matches!(error, ProofVerificationError::NoProofValue));
    }

    #[test]
    fn test_verify_proof_with_invalid_purpose() {
        let mut proof = create_proof("did:key:z6Mkabc", Some("0xabcd"));
        proof.proof_purpose = "authentication".to_string();
        let error = verify_claim_proof("{}", &proof).unwrap_err();
        assert!(matches!(error, ProofVerificationError::InvalidProof(_)));
    }
}
