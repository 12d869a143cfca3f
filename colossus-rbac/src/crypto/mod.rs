//! Hash primitives used by the registry.
//!
//! Everything that needs a digest (commitments, tree nodes) goes through the
//! [`HashProvider`] trait so the hash function can be swapped per
//! [`Configuration`](crate::configuration::Configuration).
//!
//! ```ignore
//! use colossus_rbac::crypto::{Blake3Hash, HashProvider};
//!
//! let digest = Blake3Hash::digest_parts(&[b"label", b"data"]);
//! ```

pub mod error;
pub mod hash;

pub use error::CryptoError;
pub use hash::{
    Blake3Hash, DIGEST_BYTES, Digest, EMPTY_DIGEST, HashProvider, Sha3_256Hash, try_parse_digest,
};
