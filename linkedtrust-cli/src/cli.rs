use std::io::Read;

use anyhow::{anyhow, Error};
use clap::Parser;
use serde_json::Value;

use linkedtrust::claims::{
    canonicalization::{canonicalize_claim, canonicalize_claim_sorted},
    raw::to_linked_claim,
    submission::{sign_and_prepare_claim, verify_claim_submission, ClaimSubmission},
};
use linkedtrust::ethereum::{
    signatures::generate_ecdsa_key,
    utils::{address_to_string, key_to_ethereum_address},
    wallet::LocalWallet,
};
use linkedtrust::identity::{
    resolver::IdentityResolver,
    session::FileSessionStore,
};
use linkedtrust::json_signatures::{
    create::{prepare_did_signing, SigningContext},
    verify::get_issuer_from_proof,
};

type Resolver = IdentityResolver<FileSessionStore>;

/// Claim signing and identity tool
#[derive(Parser)]
pub struct Opts {
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

#[derive(Parser)]
pub enum SubCommand {
    Canonicalize(Canonicalize),
    PrepareSigning(PrepareSigning),
    GenerateEthereumAddress(GenerateEthereumAddress),
    VerifyClaim(VerifyClaim),

    SignClaim(SignClaim),
    ShowIdentity(ShowIdentity),
    SetDid(SetDid),
    ClearDid(ClearDid),
    SetAddress(SetAddress),
    ClearAddress(ClearAddress),
    UseRawAddress(UseRawAddress),
}

/// Reads JSON from file, or from stdin if path is "-"
fn read_json(path: &str) -> Result<Value, Error> {
    let data = if path == "-" {
        let mut data = String::new();
        std::io::stdin().read_to_string(&mut data)?;
        data
    } else {
        std::fs::read_to_string(path)
            .map_err(|err| anyhow!("can't read {}: {}", path, err))?
    };
    let value = serde_json::from_str(&data)?;
    Ok(value)
}

/// Print canonical representation of a claim
#[derive(Parser)]
pub struct Canonicalize {
    /// Path to claim JSON ("-" for stdin)
    path: String,

    /// Sort all keys (JCS)
    #[clap(long)]
    sorted: bool,
}

impl Canonicalize {
    pub fn execute(&self) -> Result<(), Error> {
        let claim = to_linked_claim(&read_json(&self.path)?)?;
        let canonical = if self.sorted {
            canonicalize_claim_sorted(&claim)?
        } else {
            canonicalize_claim(&claim)?
        };
        println!("{}", canonical);
        Ok(())
    }
}

/// Print message to be signed and unsigned proof
#[derive(Parser)]
pub struct PrepareSigning {
    /// Path to claim JSON ("-" for stdin)
    path: String,

    /// Signer's ethereum address
    #[clap(long)]
    address: String,

    /// Signer's DID
    #[clap(long)]
    did: Option<String>,

    /// Timestamp to include in the message
    #[clap(long)]
    timestamp: Option<String>,
}

impl PrepareSigning {
    pub fn execute(&self) -> Result<(), Error> {
        let claim = to_linked_claim(&read_json(&self.path)?)?;
        let context = SigningContext {
            signer_did: self.did.clone(),
            signer_address: self.address.clone(),
            timestamp: self.timestamp.clone(),
        };
        let prepared = prepare_did_signing(&claim, &context)?;
        println!("{}", serde_json::to_string_pretty(&prepared)?);
        Ok(())
    }
}

/// Generate ethereum address
#[derive(Parser)]
pub struct GenerateEthereumAddress;

impl GenerateEthereumAddress {
    pub fn execute(&self) -> Result<(), Error> {
        let private_key = generate_ecdsa_key()?;
        let address = key_to_ethereum_address(&private_key);
        println!(
            "address {}; private key {}",
            address_to_string(address), private_key.display_secret(),
        );
        Ok(())
    }
}

/// Verify signed claim
#[derive(Parser)]
pub struct VerifyClaim {
    /// Path to signed claim JSON ("-" for stdin)
    path: String,
}

impl VerifyClaim {
    pub fn execute(&self) -> Result<(), Error> {
        let submission: ClaimSubmission = serde_json::from_value(read_json(&self.path)?)?;
        verify_claim_submission(&submission)?;
        println!(
            "signature is valid; issuer {}",
            get_issuer_from_proof(&submission.proof),
        );
        Ok(())
    }
}

/// Sign claim with local key on behalf of the current identity
#[derive(Parser)]
pub struct SignClaim {
    /// Path to claim JSON ("-" for stdin)
    path: String,

    /// Hex-encoded secp256k1 private key
    #[clap(long)]
    private_key: String,
}

impl SignClaim {
    pub fn execute(&self, resolver: &Resolver) -> Result<(), Error> {
        let claim = to_linked_claim(&read_json(&self.path)?)?;
        let wallet = LocalWallet::from_private_key(&self.private_key)?;
        let submission = sign_and_prepare_claim(&claim, resolver, &wallet)?;
        println!("{}", serde_json::to_string_pretty(&submission)?);
        Ok(())
    }
}

/// Show current identity
#[derive(Parser)]
pub struct ShowIdentity;

impl ShowIdentity {
    pub fn execute(&self, resolver: &Resolver) -> Result<(), Error> {
        let identity = resolver.resolve_identity()?;
        println!("{}", serde_json::to_string_pretty(&identity)?);
        println!("display name: {}", identity.display_name());
        Ok(())
    }
}

/// Use custom DID as identity
#[derive(Parser)]
pub struct SetDid {
    did: String,
}

impl SetDid {
    pub fn execute(&self, resolver: &mut Resolver) -> Result<(), Error> {
        resolver.set_custom_did(&self.did)?;
        println!("custom DID set");
        Ok(())
    }
}

/// Remove custom DID
#[derive(Parser)]
pub struct ClearDid;

impl ClearDid {
    pub fn execute(&self, resolver: &mut Resolver) -> Result<(), Error> {
        resolver.clear_custom_did()?;
        println!("custom DID removed");
        Ok(())
    }
}

/// Store connected wallet address
#[derive(Parser)]
pub struct SetAddress {
    address: String,
}

impl SetAddress {
    pub fn execute(&self, resolver: &mut Resolver) -> Result<(), Error> {
        resolver.set_ethereum_address(&self.address)?;
        println!("ethereum address set");
        Ok(())
    }
}

/// Remove stored wallet address
#[derive(Parser)]
pub struct ClearAddress;

impl ClearAddress {
    pub fn execute(&self, resolver: &mut Resolver) -> Result<(), Error> {
        resolver.clear_ethereum_address()?;
        println!("ethereum address removed");
        Ok(())
    }
}

/// Use raw ethereum address instead of derived DID
#[derive(Parser)]
pub struct UseRawAddress {
    /// Switch back to derived DID
    #[clap(long)]
    disable: bool,
}

impl UseRawAddress {
    pub fn execute(&self, resolver: &mut Resolver) -> Result<(), Error> {
        resolver.set_use_raw_address(!self.disable)?;
        let identity = resolver.resolve_identity()?;
        println!("identity type: {}", identity.id_type);
        Ok(())
    }
}
