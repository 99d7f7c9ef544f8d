//! Secure memory handling for passwords
//!
//! Provides a password type that zeroes its memory on drop and never prints
//! its contents.

use std::fmt;

use zeroize::Zeroizing;

use crate::error::{SaltedError, SaltedResult};

/// Password bytes used to derive key material
///
/// Opaque secret: the bytes are used verbatim (no trimming, no encoding
/// assumptions) and are wiped when the value is dropped.
#[derive(Clone)]
pub struct Password {
    inner: Zeroizing<Vec<u8>>,
}

impl Password {
    /// Create a new Password
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `bytes` is empty.
    pub fn new(bytes: impl Into<Vec<u8>>) -> SaltedResult<Self> {
        let inner = Zeroizing::new(bytes.into());
        if inner.is_empty() {
            return Err(SaltedError::Config("No key given".to_string()));
        }
        Ok(Self { inner })
    }

    /// Get the password bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    /// Get the length
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Always false: empty passwords are rejected at construction
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Password {}

// Don't print the contents in Debug output
impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Password")
            .field("len", &self.inner.len())
            .finish()
    }
}

// Don't print the contents in Display output
impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED {} bytes]", self.inner.len())
    }
}
