use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::SignerError;

/// Number of hash bytes kept in an address.
pub const ADDRESS_LEN: usize = 20;

/// A `0x`-prefixed, lowercase hex account address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Address(String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Last 20 bytes of `sha256(public_key)`.
pub fn derive_address(public_key: &[u8]) -> Address {
    let digest = Sha256::digest(public_key);
    Address(format!("0x{}", hex::encode(&digest[digest.len() - ADDRESS_LEN..])))
}

impl FromStr for Address {
    type Err = SignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| SignerError::InvalidAddress(format!("missing 0x prefix: {s:?}")))?;
        let bytes =
            hex::decode(body).map_err(|e| SignerError::InvalidAddress(format!("{s:?}: {e}")))?;
        if bytes.len() != ADDRESS_LEN {
            return Err(SignerError::InvalidAddress(format!(
                "{s:?}: expected {ADDRESS_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Address(format!("0x{}", hex::encode(bytes))))
    }
}

impl TryFrom<String> for Address {
    type Error = SignerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
