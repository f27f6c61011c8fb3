use ed25519_dalek::{Signer as _, SigningKey, SECRET_KEY_LENGTH};
use rand::rngs::OsRng;
use std::fmt;
use std::path::Path;
use zeroize::Zeroizing;

use crate::{Signer, SignerError, ALGO_ED25519, SIGNATURE_LEN};

/// In-process Ed25519 key. The secret is zeroized when the signer is dropped.
pub struct Ed25519Signer {
    key: SigningKey,
}

impl Ed25519Signer {
    pub fn generate() -> Self {
        Self {
            key: SigningKey::generate(&mut OsRng),
        }
    }

    pub fn from_bytes(secret: &[u8]) -> Result<Self, SignerError> {
        let secret: &[u8; SECRET_KEY_LENGTH] = secret.try_into().map_err(|_| {
            SignerError::InvalidKey(format!(
                "expected {SECRET_KEY_LENGTH} bytes, got {}",
                secret.len()
            ))
        })?;
        Ok(Self {
            key: SigningKey::from_bytes(secret),
        })
    }

    pub fn from_hex(secret: &str) -> Result<Self, SignerError> {
        let trimmed = secret.trim();
        let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = Zeroizing::new(
            hex::decode(trimmed).map_err(|e| SignerError::InvalidKey(e.to_string()))?,
        );
        Self::from_bytes(&bytes)
    }

    /// Loads a hex-encoded secret key from `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SignerError> {
        let path = path.as_ref();
        let contents = Zeroizing::new(std::fs::read_to_string(path).map_err(|source| {
            SignerError::KeyFile {
                path: path.display().to_string(),
                source,
            }
        })?);
        Self::from_hex(&contents)
    }

    /// Hex of the secret key, for persisting freshly generated keys.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.key.to_bytes()))
    }
}

impl Signer for Ed25519Signer {
    fn public_key(&self) -> Vec<u8> {
        self.key.verifying_key().to_bytes().to_vec()
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError> {
        let signature = self.key.sign(message);
        let mut out = Vec::with_capacity(SIGNATURE_LEN);
        out.push(ALGO_ED25519);
        out.extend_from_slice(self.key.verifying_key().as_bytes());
        out.extend_from_slice(&signature.to_bytes());
        Ok(out)
    }
}

impl fmt::Debug for Ed25519Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519Signer")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}
