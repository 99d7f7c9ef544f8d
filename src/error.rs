//! Custom error types for salted
//!
//! This module defines the error hierarchy for the engine and the CLI using
//! thiserror for ergonomic error definitions.
//!
//! None of these errors ever carry password, salt, key or IV material.

use thiserror::Error;

/// Ways an envelope can be structurally malformed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Fewer bytes than the header and salt need
    #[error("too short")]
    TooShort,

    /// First eight bytes are not `Salted__`
    #[error("bad magic")]
    BadMagic,

    /// Ciphertext is empty or not a whole number of blocks
    #[error("invalid ciphertext length")]
    InvalidCiphertextLength,

    /// Base64 armor could not be decoded
    #[error("invalid base64 armor: {0}")]
    Armor(String),
}

/// The main error type for salted operations
#[derive(Error, Debug)]
pub enum SaltedError {
    /// Configuration-related errors (unknown digest, missing key, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed envelope on decrypt
    #[error("Invalid envelope: {0}")]
    Format(#[from] FormatError),

    /// Padding did not validate after decryption.
    ///
    /// Wrong password, wrong digest and tampered ciphertext all land here and
    /// are deliberately indistinguishable.
    #[error("Decryption failed")]
    Decryption,

    /// Random source or cipher primitive failure
    #[error("Cryptographic primitive failure: {0}")]
    Primitive(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl SaltedError {
    /// Check if this is a malformed-envelope error
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }

    /// Check if this is the generic decryption failure
    pub fn is_decryption(&self) -> bool {
        matches!(self, Self::Decryption)
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<std::io::Error> for SaltedError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for salted operations
pub type SaltedResult<T> = Result<T, SaltedError>;
