use std::str::FromStr;

use secp256k1::SecretKey;
use web3::{
    signing::{Key, SecretKeyRef},
    types::Address,
};

#[derive(thiserror::Error, Debug)]
#[error("address error")]
pub struct AddressError;

pub fn parse_address(address: &str) -> Result<Address, AddressError> {
    let address = address.trim();
    let hex_str = address.strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or(AddressError)?;
    if hex_str.len() != 40 {
        return Err(AddressError);
    };
    Address::from_str(hex_str).map_err(|_| AddressError)
}

/// Lowercase hex representation with 0x prefix
pub fn address_to_string(address: Address) -> String {
    format!("{:#x}", address)
}

pub fn key_to_ethereum_address(private_key: &SecretKey) -> Address {
    SecretKeyRef::new(private_key).address()
}
