//! Cryptographic engine for salted
//!
//! Provides the OpenSSL `enc` compatible envelope: `EVP_BytesToKey` style key
//! derivation over MD5, SHA-1 or SHA-256, PKCS#7 padding and AES-256-CBC.

pub mod armor;
pub mod digest;
pub mod envelope;
pub mod key_derivation;
pub mod padding;
pub mod secure_memory;

pub use digest::DigestChoice;
pub use envelope::{decrypt, decrypt_named, encrypt, encrypt_named, encrypt_with_salt};
pub use key_derivation::{derive, derive_key_iv, DerivedMaterial, Salt};
pub use secure_memory::Password;
