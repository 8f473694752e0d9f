//! Content fingerprints for marshalled streams.
//!
//! Build tooling compares fingerprints to decide whether a module on disk
//! is already current, without re-reading whole streams.

use std::fmt;

use sha2::{Digest, Sha256};

/// SHA-256 digest of a marshalled stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprint the given stream bytes.
    pub fn of(stream: &[u8]) -> Self {
        Self(Sha256::digest(stream).into())
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    /// Lowercase hex, 64 characters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
