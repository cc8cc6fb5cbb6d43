/// https://github.com/decentralized-identity/ethr-did-resolver/blob/master/doc/did-method-spec.md
use std::fmt;
use std::str::FromStr;

use regex::Regex;

use super::did::DidParseError;

const DID_ETHR_RE: &str = r"^did:ethr:(?:(?P<network>[a-zA-Z0-9]+):)?(?P<address>0x[0-9a-fA-F]{40})$";

#[derive(Clone, Debug, PartialEq)]
pub struct DidEthr {
    // Network name or hex chain ID, mainnet if not present
    pub network: Option<String>,
    pub address: String,
}

impl DidEthr {
    pub fn from_address(address: &str) -> Self {
        Self { network: None, address: address.to_lowercase() }
    }
}

impl fmt::Display for DidEthr {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.network {
            Some(ref network) => {
                write!(formatter, "did:ethr:{}:{}", network, self.address)
            },
            None => write!(formatter, "did:ethr:{}", self.address),
        }
    }
}

impl FromStr for DidEthr {
    type Err = DidParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let did_ethr_re = Regex::new(DID_ETHR_RE).unwrap();
        let caps = did_ethr_re.captures(value).ok_or(DidParseError)?;
        let did_ethr = Self {
            network: caps.name("network").map(|val| val.as_str().to_string()),
            address: caps["address"].to_string(),
        };
        Ok(did_ethr)
    }
}

/// Creates DID from ethereum address
pub fn create_did_from_address(address: &str) -> String {
    DidEthr::from_address(address).to_string()
}
