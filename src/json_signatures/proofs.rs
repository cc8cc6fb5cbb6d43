/// Proof types
use std::str::FromStr;

use crate::errors::ConversionError;

// Name used by LinkedTrust clients for EIP-191 personal message signatures.
// The message is not EIP-712 typed data despite the name.
pub const PROOF_TYPE_ETHEREUM_EIP712: &str = "EthereumEip712Signature2021";

pub const PROOF_PURPOSE: &str = "assertionMethod";

#[derive(Debug, PartialEq)]
pub enum ProofType {
    EthereumPersonalSignature,
}

impl FromStr for ProofType {
    type Err = ConversionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let proof_type = match value {
            PROOF_TYPE_ETHEREUM_EIP712 => Self::EthereumPersonalSignature,
            _ => return Err(ConversionError),
        };
        Ok(proof_type)
    }
}

impl ProofType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EthereumPersonalSignature => PROOF_TYPE_ETHEREUM_EIP712,
        }
    }
}
