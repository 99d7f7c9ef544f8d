//! OpenSSL `enc` salted envelope with AES-256-CBC
//!
//! Wire format, byte-compatible with `openssl enc -aes-256-cbc` (without
//! `-pbkdf2`):
//!
//! ```text
//! +------------+-----------+----------------------------+
//! | "Salted__" | salt (8)  | ciphertext (N * 16 bytes)  |
//! +------------+-----------+----------------------------+
//! ```
//!
//! There is no integrity tag. A wrong password or digest is only noticed
//! through invalid padding, reported as a generic decryption failure.

use aes::Aes256;
use cbc::cipher::{block_padding::NoPadding, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use zeroize::Zeroizing;

use super::digest::DigestChoice;
use super::key_derivation::{derive_key_iv, DerivedMaterial, Salt, SALT_LEN};
use super::padding::{self, BLOCK_SIZE};
use super::secure_memory::Password;
use crate::error::{FormatError, SaltedError, SaltedResult};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Magic bytes opening every envelope
pub const MAGIC: &[u8; 8] = b"Salted__";

/// Length of magic plus salt
pub const HEADER_LEN: usize = MAGIC.len() + SALT_LEN;

/// Smallest well-formed envelope: header plus one cipher block
pub const MIN_ENVELOPE_LEN: usize = HEADER_LEN + BLOCK_SIZE;

/// Encrypt `plaintext` under a fresh random salt
///
/// Fails only if the random source or the cipher primitive does.
pub fn encrypt(password: &Password, digest: DigestChoice, plaintext: &[u8]) -> SaltedResult<Vec<u8>> {
    let salt = Salt::generate()?;
    encrypt_with_salt(password, digest, plaintext, &salt)
}

/// Encrypt `plaintext` under a caller-chosen salt
///
/// Same output as `openssl enc -aes-256-cbc -md <digest> -S <salt>` with the
/// header prepended. Reusing a salt with the same password reuses key and IV,
/// so [`encrypt`] is the right call outside of tests and interop checks.
pub fn encrypt_with_salt(
    password: &Password,
    digest: DigestChoice,
    plaintext: &[u8],
    salt: &Salt,
) -> SaltedResult<Vec<u8>> {
    let material = derive_key_iv(password, salt, digest);
    let padded = Zeroizing::new(padding::pad(plaintext));

    let ciphertext = encryptor(&material)?.encrypt_padded_vec_mut::<NoPadding>(&padded);

    let mut envelope = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    envelope.extend_from_slice(MAGIC);
    envelope.extend_from_slice(salt.as_bytes());
    envelope.extend_from_slice(&ciphertext);

    tracing::debug!(
        digest = %digest,
        plaintext_len = plaintext.len(),
        envelope_len = envelope.len(),
        "encrypted payload"
    );

    Ok(envelope)
}

/// Split an envelope into its salt and ciphertext after checking its framing
pub fn split(envelope: &[u8]) -> Result<(Salt, &[u8]), FormatError> {
    if envelope.len() < HEADER_LEN {
        return Err(FormatError::TooShort);
    }
    if &envelope[..MAGIC.len()] != MAGIC {
        return Err(FormatError::BadMagic);
    }

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&envelope[MAGIC.len()..HEADER_LEN]);

    let ciphertext = &envelope[HEADER_LEN..];
    if envelope.len() < MIN_ENVELOPE_LEN || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(FormatError::InvalidCiphertextLength);
    }

    Ok((Salt::from_bytes(salt), ciphertext))
}

/// Decrypt an envelope
///
/// # Errors
///
/// - [`SaltedError::Format`] if the framing is wrong (too short, bad magic,
///   misaligned ciphertext). No key is derived in that case.
/// - [`SaltedError::Decryption`] if the padding does not validate, which is
///   what a wrong password or digest looks like.
pub fn decrypt(password: &Password, digest: DigestChoice, envelope: &[u8]) -> SaltedResult<Vec<u8>> {
    let (salt, ciphertext) = split(envelope)?;
    let material = derive_key_iv(password, &salt, digest);

    let mut decrypted = Zeroizing::new(
        decryptor(&material)?
            .decrypt_padded_vec_mut::<NoPadding>(ciphertext)
            .map_err(|e| SaltedError::Primitive(format!("CBC decryption failed: {}", e)))?,
    );

    padding::unpad(&mut decrypted)?;

    tracing::debug!(
        digest = %digest,
        envelope_len = envelope.len(),
        plaintext_len = decrypted.len(),
        "decrypted payload"
    );

    Ok(std::mem::take(&mut *decrypted))
}

/// Encrypt with the digest given by name (`md5`, `sha1` or `sha256`)
///
/// An unknown name fails before any salt is drawn or key derived.
pub fn encrypt_named(password: &Password, digest_name: &str, plaintext: &[u8]) -> SaltedResult<Vec<u8>> {
    let digest: DigestChoice = digest_name.parse()?;
    encrypt(password, digest, plaintext)
}

/// Decrypt with the digest given by name (`md5`, `sha1` or `sha256`)
pub fn decrypt_named(password: &Password, digest_name: &str, envelope: &[u8]) -> SaltedResult<Vec<u8>> {
    let digest: DigestChoice = digest_name.parse()?;
    decrypt(password, digest, envelope)
}

fn encryptor(material: &DerivedMaterial) -> SaltedResult<Aes256CbcEnc> {
    Aes256CbcEnc::new_from_slices(material.key(), material.iv())
        .map_err(|e| SaltedError::Primitive(format!("Failed to create cipher: {}", e)))
}

fn decryptor(material: &DerivedMaterial) -> SaltedResult<Aes256CbcDec> {
    Aes256CbcDec::new_from_slices(material.key(), material.iv())
        .map_err(|e| SaltedError::Primitive(format!("Failed to create cipher: {}", e)))
}
