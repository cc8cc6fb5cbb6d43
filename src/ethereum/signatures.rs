use std::fmt;
use std::str::FromStr;

use secp256k1::{Error as KeyError, SecretKey, rand::rngs::OsRng};
use web3::signing::{
    keccak256,
    recover,
    Key,
    RecoveryError,
    SecretKeyRef,
    SigningError,
};
use web3::types::{Address, H256, Recovery};

/// Generates signing key
pub fn generate_ecdsa_key() -> Result<SecretKey, SignatureError> {
    let mut rng = OsRng::new()
        .map_err(|_| SignatureError::RngError)?;
    Ok(SecretKey::new(&mut rng))
}

#[derive(Clone, Debug, PartialEq)]
pub struct SignatureData {
    pub v: u64,
    pub r: [u8; 32],
    pub s: [u8; 32],
}

#[derive(thiserror::Error, Debug)]
pub enum SignatureError {
    #[error("invalid key")]
    InvalidKey(#[from] KeyError),

    #[error("invalid data")]
    InvalidData,

    #[error("signing error")]
    SigningError(#[from] SigningError),

    #[error("invalid signature")]
    InvalidSignature,

    #[error("recovery error")]
    RecoveryError(#[from] RecoveryError),

    #[error("failed to initialize RNG")]
    RngError,
}

/// Formats signature as 0x-prefixed hex string (r || s || v),
/// same as eth_sign and personal_sign
impl fmt::Display for SignatureData {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = [
            self.r.as_ref(),
            self.s.as_ref(),
            &[self.v as u8],
        ].concat();
        write!(formatter, "0x{}", hex::encode(bytes))
    }
}

impl FromStr for SignatureData {
    type Err = SignatureError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let hex_str = value.strip_prefix("0x").unwrap_or(value);
        let bytes = hex::decode(hex_str)
            .map_err(|_| SignatureError::InvalidSignature)?;
        if bytes.len() != 65 {
            return Err(SignatureError::InvalidSignature);
        };
        let mut r = [0; 32];
        let mut s = [0; 32];
        r.copy_from_slice(&bytes[0..32]);
        s.copy_from_slice(&bytes[32..64]);
        let v = match bytes[64] {
            // Some wallets return bare recovery ID
            value @ (0 | 1) => u64::from(value) + 27,
            value @ (27 | 28) => u64::from(value),
            _ => return Err(SignatureError::InvalidSignature),
        };
        Ok(Self { v, r, s })
    }
}

fn prepare_message(message: &[u8]) -> [u8; 32] {
    let eip_191_message = [
        "\x19Ethereum Signed Message:\n".as_bytes(),
        message.len().to_string().as_bytes(),
        message,
    ].concat();
    keccak256(&eip_191_message)
}

/// Create EIP-191 signature
/// https://eips.ethereum.org/EIPS/eip-191
pub fn sign_message(
    signing_key: &SecretKey,
    message: &[u8],
) -> Result<SignatureData, SignatureError> {
    let key_ref = SecretKeyRef::new(signing_key);
    let eip_191_message_hash = prepare_message(message);
    // Create signature without replay protection (chain ID is None)
    let signature = key_ref.sign(&eip_191_message_hash, None)?;
    let signature_data = SignatureData {
        v: signature.v,
        r: signature.r.to_fixed_bytes(),
        s: signature.s.to_fixed_bytes(),
    };
    Ok(signature_data)
}

/// Verify EIP-191 signature
pub fn recover_address(
    message: &[u8],
    signature: &SignatureData,
) -> Result<Address, SignatureError> {
    let eip_191_message_hash = prepare_message(message);
    let recovery = Recovery::new(
        "", // this message is not used
        signature.v,
        H256(signature.r),
        H256(signature.s),
    );
    let (signature_raw, recovery_id) = recovery.as_signature()
        .ok_or(SignatureError::InvalidSignature)?;
    let address = recover(
        &eip_191_message_hash,
        &signature_raw,
        recovery_id,
    )?;
    Ok(address)
}

pub fn parse_private_key(value: &str) -> Result<SecretKey, SignatureError> {
    let hex_str = value.trim();
    let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    let key = SecretKey::from_str(hex_str)?;
    Ok(key)
}
