use crate::{
    crypto::{CryptoError, Digest, try_parse_digest},
    utils::serde_helpers::{bytes_deserialize_hex, bytes_serialize_hex},
};
use core::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use thiserror::Error;

/// An opaque identity, compared byte for byte.
///
/// The registry never interprets identity bytes; they are whatever the
/// environment hands in as the caller or target (typically a 32-byte public
/// key).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identity(
    #[serde(serialize_with = "bytes_serialize_hex", deserialize_with = "bytes_deserialize_hex")]
    Vec<u8>,
);

impl Identity {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Byte-exact comparison that does not exit early on the first
    /// differing byte.
    pub fn ct_matches(&self, other: &Identity) -> bool {
        self.0[..].ct_eq(&other.0[..]).into()
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity(0x{})", hex::encode(&self.0))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<&[u8]> for Identity {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Identity {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<[u8; 32]> for Identity {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes.to_vec())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoleParseError {
    #[error("unknown role discriminant {0}")]
    UnknownDiscriminant(u8),

    #[error("unknown role name '{0}'")]
    UnknownName(String),
}

/// Roles that can be bound to an identity.
///
/// `None` is a real, grantable role meaning "no privilege". It is distinct
/// from an identity having no commitment at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Role {
    None = 0u8,

    Admin = 1u8,

    Lp = 2u8,

    Trader = 3u8,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::None, Role::Admin, Role::Lp, Role::Trader];

    pub fn as_byte(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::None => "none",
            Role::Admin => "admin",
            Role::Lp => "lp",
            Role::Trader => "trader",
        }
    }
}

impl TryFrom<u8> for Role {
    type Error = RoleParseError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_byte() == byte)
            .ok_or(RoleParseError::UnknownDiscriminant(byte))
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Role::ALL
            .into_iter()
            .find(|role| role.name() == lowered)
            .ok_or_else(|| RoleParseError::UnknownName(s.to_string()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A 32-byte binding of an (identity, role) pair.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Commitment(
    #[serde(serialize_with = "bytes_serialize_hex", deserialize_with = "bytes_deserialize_hex")]
    pub Digest,
);

impl Commitment {
    pub fn as_bytes(&self) -> &Digest {
        &self.0
    }

    /// Constant-time equality over the full digest.
    pub fn ct_matches(&self, other: &Commitment) -> bool {
        self.0[..].ct_eq(&other.0[..]).into()
    }

    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(s)?;
        Ok(Self(try_parse_digest(&bytes)?))
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment(0x{})", hex::encode(self.0))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl From<Digest> for Commitment {
    fn from(bytes: Digest) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Commitment {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// The private record kept by the controller for each active commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleValue {
    pub role: Role,

    pub commitment: Commitment,

    pub index: u64,
}
