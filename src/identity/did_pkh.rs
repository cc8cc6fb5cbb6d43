/// https://github.com/w3c-ccg/did-pkh/blob/main/did-pkh-method-draft.md
use std::fmt;
use std::str::FromStr;

use regex::Regex;

use linkedtrust_utils::caip2::ChainId;

use super::did::DidParseError;

// https://github.com/ChainAgnostic/CAIPs/blob/master/CAIPs/caip-10.md#syntax
const DID_PKH_RE: &str = r"^did:pkh:(?P<network>[-a-z0-9]{3,8}):(?P<chain>[-a-zA-Z0-9]{1,32}):(?P<address>[a-zA-Z0-9]{1,64})$";

#[derive(Clone, Debug, PartialEq)]
pub struct DidPkh {
    pub chain_id: ChainId,
    pub address: String,
}

impl DidPkh {
    /// Address is used as is, without normalization
    pub fn new(chain_id: ChainId, address: &str) -> Self {
        Self { chain_id, address: address.to_string() }
    }
}

impl fmt::Display for DidPkh {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let did_str = format!(
            "did:pkh:{}:{}:{}",
            self.chain_id.namespace,
            self.chain_id.reference,
            self.address,
        );
        write!(formatter, "{}", did_str)
    }
}

impl FromStr for DidPkh {
    type Err = DidParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let did_pkh_re = Regex::new(DID_PKH_RE).unwrap();
        let caps = did_pkh_re.captures(value).ok_or(DidParseError)?;
        let did_pkh = Self {
            chain_id: ChainId {
                namespace: caps["network"].to_string(),
                reference: caps["chain"].to_string(),
            },
            address: caps["address"].to_string(),
        };
        Ok(did_pkh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_did_pkh_string_conversion() {
        let address = "0xB9C5714089478a327F09197987f16f9E5d936E8a";
        let did = DidPkh::new(ChainId::ethereum_mainnet(), address);
        assert!(did.chain_id.is_ethereum());
        assert_eq!(did.address, address);

        let did_str = did.to_string();
        assert_eq!(
            did_str,
            "did:pkh:eip155:1:0xB9C5714089478a327F09197987f16f9E5d936E8a",
        );

        let did: DidPkh = did_str.parse().unwrap();
        assert_eq!(did.address, address);
    }

    #[test]
    fn test_did_pkh_keeps_address_case() {
        let address = "0xB9C5714089478a327F09197987f16f9E5d936E8a";
        let did = DidPkh::new(ChainId::ethereum_mainnet(), address);
        assert_eq!(
            did.to_string(),
            "did:pkh:eip155:1:0xB9C5714089478a327F09197987f16f9E5d936E8a",
        );
    }

    #[test]
    fn test_parse_invalid_did_pkh() {
        assert!("did:pkh:eip155:1".parse::<DidPkh>().is_err());
        assert!("did:key:z6Mkabc".parse::<DidPkh>().is_err());
    }
}
