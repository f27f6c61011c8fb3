//! # Rpcx Signer
//!
//! The signing capability used by the chain client. A [`Signer`] owns one key,
//! exposes its public half and account [`Address`], and produces signatures over
//! the canonical encoding of a transaction.
//!
//! Signatures are self-describing: one algorithm tag byte, the 32-byte public
//! key, then the 64-byte Ed25519 signature. This lets a node (or a test) recover
//! the sender's address from a signed transaction alone via [`recover_address`].
//!
//! ## Key Features
//!
//! - **Pluggable**: the client only sees `Arc<dyn Signer>`, so hardware or remote
//!   signers can be dropped in.
//! - **Zeroized key material**: hex key files are read into zeroizing buffers and
//!   the Ed25519 secret is wiped on drop.

mod address;
mod ed25519;

pub use address::{derive_address, Address, ADDRESS_LEN};
pub use ed25519::Ed25519Signer;

use ed25519_dalek::{Signature, Verifier, VerifyingKey};

/// Algorithm tag prefixed to every Ed25519 signature.
pub const ALGO_ED25519: u8 = 0x01;
pub const PUBLIC_KEY_LEN: usize = 32;
/// Tag + public key + raw signature.
pub const SIGNATURE_LEN: usize = 1 + PUBLIC_KEY_LEN + 64;

#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    #[error("invalid secret key: {0}")]
    InvalidKey(String),
    #[error("failed to read key file {path}: {source}")]
    KeyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed signature: {0}")]
    MalformedSignature(String),
    #[error("unsupported signature algorithm tag {0:#04x}")]
    UnsupportedAlgorithm(u8),
    #[error("signature verification failed")]
    VerificationFailed,
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("signing backend failure: {0}")]
    Backend(String),
}

/// A key that can sign transactions on behalf of one account.
pub trait Signer: Send + Sync {
    /// Raw public key bytes.
    fn public_key(&self) -> Vec<u8>;

    /// The account address controlled by this key.
    fn address(&self) -> Address {
        derive_address(&self.public_key())
    }

    /// Signs `message` and returns the tagged signature.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError>;
}

/// Verifies `signature` over `message` and returns the address of the key that
/// produced it.
pub fn recover_address(message: &[u8], signature: &[u8]) -> Result<Address, SignerError> {
    if signature.len() != SIGNATURE_LEN {
        return Err(SignerError::MalformedSignature(format!(
            "expected {} bytes, got {}",
            SIGNATURE_LEN,
            signature.len()
        )));
    }
    if signature[0] != ALGO_ED25519 {
        return Err(SignerError::UnsupportedAlgorithm(signature[0]));
    }

    let mut pk = [0u8; PUBLIC_KEY_LEN];
    pk.copy_from_slice(&signature[1..1 + PUBLIC_KEY_LEN]);
    let mut raw = [0u8; 64];
    raw.copy_from_slice(&signature[1 + PUBLIC_KEY_LEN..]);

    let verifying_key = VerifyingKey::from_bytes(&pk)
        .map_err(|e| SignerError::MalformedSignature(e.to_string()))?;
    verifying_key
        .verify(message, &Signature::from_bytes(&raw))
        .map_err(|_| SignerError::VerificationFailed)?;

    Ok(derive_address(&pk))
}
