//! salted - OpenSSL `enc` compatible file encryption
//!
//! This library implements the salted envelope written and read by
//! `openssl enc -aes-256-cbc` (without `-pbkdf2`): an `EVP_BytesToKey` style
//! key derivation over MD5, SHA-1 or SHA-256, PKCS#7 padding and AES-256-CBC,
//! framed as `"Salted__" || salt || ciphertext`.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `crypto`: key derivation, padding, the envelope and base64 armor
//! - `config`: validated run settings
//! - `cli`: argument definitions and the command handler
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust
//! use salted::crypto::{decrypt, encrypt, DigestChoice, Password};
//!
//! let password = Password::new("test")?;
//! let envelope = encrypt(&password, DigestChoice::Sha256, b"hello world")?;
//! assert_eq!(envelope.len(), 32);
//!
//! let plaintext = decrypt(&password, DigestChoice::Sha256, &envelope)?;
//! assert_eq!(plaintext, b"hello world");
//! # Ok::<(), salted::SaltedError>(())
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;

pub use crypto::{decrypt_named, encrypt_named, DigestChoice, Password};
pub use error::{FormatError, SaltedError, SaltedResult};
