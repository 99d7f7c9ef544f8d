//! Digest selection for key derivation
//!
//! The envelope does not record which digest produced its key, so the caller
//! picks one of the three digests OpenSSL has used as its `enc` default over
//! the years.

use std::fmt;
use std::str::FromStr;

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::error::SaltedError;

/// Digest used to stretch a password into key material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DigestChoice {
    /// MD5, the default of OpenSSL before 1.1.0
    Md5,
    /// SHA-1
    Sha1,
    /// SHA-256, the default of OpenSSL 1.1.0 and later
    #[default]
    Sha256,
}

impl DigestChoice {
    /// All supported digests
    pub const ALL: [DigestChoice; 3] = [Self::Md5, Self::Sha1, Self::Sha256];

    /// Name as accepted on the command line
    pub fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
        }
    }

    /// Length of one digest output in bytes
    pub fn output_len(self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha1 => 20,
            Self::Sha256 => 32,
        }
    }

    /// Hash the concatenation of `parts`
    pub fn digest(self, parts: &[&[u8]]) -> Vec<u8> {
        match self {
            Self::Md5 => digest_parts::<Md5>(parts),
            Self::Sha1 => digest_parts::<Sha1>(parts),
            Self::Sha256 => digest_parts::<Sha256>(parts),
        }
    }
}

fn digest_parts<D: Digest>(parts: &[&[u8]]) -> Vec<u8> {
    let mut hasher = D::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().to_vec()
}

impl FromStr for DigestChoice {
    type Err = SaltedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|choice| choice.name() == name)
            .ok_or_else(|| {
                SaltedError::Config(format!(
                    "No such Key-Derivation-Function: {:?} (expected md5, sha1 or sha256)",
                    s
                ))
            })
    }
}

impl fmt::Display for DigestChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
