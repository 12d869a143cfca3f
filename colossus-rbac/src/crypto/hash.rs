//! Streaming hash providers with 32-byte output.
//!
//! - **BLAKE3**: default for commitments and tree nodes
//! - **SHA3-256**: alternative for verifiers that only carry Keccak

use super::CryptoError;

pub const DIGEST_BYTES: usize = 32;

pub type Digest = [u8; DIGEST_BYTES];

/// Value of a never-written leaf.
pub const EMPTY_DIGEST: Digest = [0u8; DIGEST_BYTES];

pub fn try_parse_digest(value: &[u8]) -> Result<Digest, CryptoError> {
    value.try_into().map_err(|_| {
        CryptoError::HashError(format!(
            "expected {DIGEST_BYTES} bytes but the value has {} bytes",
            value.len()
        ))
    })
}

/// A hash function fed incrementally.
///
/// Configurations feed the domain label, a purpose tag and the payload as
/// separate updates, so implementations must be true streaming hashes:
/// `update(a); update(b)` equals hashing `a ‖ b`.
pub trait HashProvider: Sized {
    const NAME: &'static str;

    fn new_hasher() -> Self;

    fn update(&mut self, data: &[u8]);

    fn finalize(self) -> Digest;

    /// Hashes `parts` concatenated in order.
    fn digest_parts(parts: &[&[u8]]) -> Digest {
        let mut hasher = Self::new_hasher();
        for part in parts {
            hasher.update(part);
        }
        hasher.finalize()
    }
}

#[derive(Clone)]
pub struct Blake3Hash(blake3::Hasher);

impl HashProvider for Blake3Hash {
    const NAME: &'static str = "blake3";

    fn new_hasher() -> Self {
        Self(blake3::Hasher::new())
    }

    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self) -> Digest {
        *self.0.finalize().as_bytes()
    }
}

#[derive(Clone)]
pub struct Sha3_256Hash(tiny_keccak::Sha3);

impl HashProvider for Sha3_256Hash {
    const NAME: &'static str = "sha3";

    fn new_hasher() -> Self {
        Self(tiny_keccak::Sha3::v256())
    }

    fn update(&mut self, data: &[u8]) {
        tiny_keccak::Hasher::update(&mut self.0, data);
    }

    fn finalize(self) -> Digest {
        let mut output = EMPTY_DIGEST;
        tiny_keccak::Hasher::finalize(self.0, &mut output);
        output
    }
}
