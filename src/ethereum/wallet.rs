use secp256k1::SecretKey;

use super::signatures::{
    generate_ecdsa_key,
    parse_private_key,
    sign_message,
    SignatureError,
};
use super::utils::{address_to_string, key_to_ethereum_address};

/// Wallet provider capable of producing personal message signatures
pub trait MessageSigner {
    /// Address of the signing account
    fn address(&self) -> String;

    /// Returns EIP-191 signature as 0x-prefixed hex string
    fn sign_message(&self, message: &[u8]) -> Result<String, SignatureError>;
}

/// Signer holding secp256k1 secret key in memory
pub struct LocalWallet {
    secret_key: SecretKey,
}

impl LocalWallet {
    pub fn new(secret_key: SecretKey) -> Self {
        Self { secret_key }
    }

    pub fn generate() -> Result<Self, SignatureError> {
        let secret_key = generate_ecdsa_key()?;
        Ok(Self::new(secret_key))
    }

    pub fn from_private_key(value: &str) -> Result<Self, SignatureError> {
        let secret_key = parse_private_key(value)?;
        Ok(Self::new(secret_key))
    }
}

impl MessageSigner for LocalWallet {
    fn address(&self) -> String {
        address_to_string(key_to_ethereum_address(&self.secret_key))
    }

    fn sign_message(&self, message: &[u8]) -> Result<String, SignatureError> {
        let signature = sign_message(&self.secret_key, message)?;
        Ok(signature.to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::ethereum::signatures::recover_address;
    use crate::ethereum::utils::parse_address;
    use super::*;

    #[test]
    fn test_local_wallet_sign_message() {
        let wallet = LocalWallet::generate().unwrap();
        let address = wallet.address();
        assert!(address.starts_with("0x"));
        assert_eq!(address, address.to_lowercase());

        let signature = wallet.sign_message(b"test").unwrap();
        let recovered = recover_address(b"test", &signature.parse().unwrap()).unwrap();
        assert_eq!(recovered, parse_address(&address).unwrap());
    }

    #[test]
    fn test_local_wallet_from_private_key() {
        let secret_key = generate_ecdsa_key().unwrap();
        let key_str = secret_key.display_secret().to_string();
        let wallet = LocalWallet::from_private_key(&key_str).unwrap();
        assert_eq!(wallet.address(), LocalWallet::new(secret_key).address());
    }
}
