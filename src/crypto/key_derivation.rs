//! Key derivation compatible with OpenSSL's `EVP_BytesToKey`
//!
//! Derives an AES key and CBC IV from a password and an 8-byte salt by
//! chaining single digest rounds:
//!
//! ```text
//! D_1 = H(password || salt)
//! D_i = H(D_{i-1} || password || salt)
//! material = D_1 || D_2 || ...   (truncated to key_len + iv_len)
//! ```
//!
//! There is no iteration count. This is weak by modern standards and exists
//! only so files written by `openssl enc` without `-pbkdf2` can be read.

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::digest::DigestChoice;
use super::secure_memory::Password;
use crate::error::{SaltedError, SaltedResult};

/// Size of the salt in bytes
pub const SALT_LEN: usize = 8;

/// AES-256 key length in bytes
pub const KEY_LEN: usize = 32;

/// AES block / CBC IV length in bytes
pub const IV_LEN: usize = 16;

/// Eight bytes of salt mixed into key derivation
#[derive(Clone, PartialEq, Eq)]
pub struct Salt([u8; SALT_LEN]);

impl Salt {
    /// Draw a fresh salt from the operating system's CSPRNG
    pub fn generate() -> SaltedResult<Self> {
        let mut bytes = [0u8; SALT_LEN];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| SaltedError::Primitive(format!("Random source failed: {}", e)))?;
        Ok(Self(bytes))
    }

    /// Wrap salt bytes read from an envelope
    pub fn from_bytes(bytes: [u8; SALT_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the salt bytes
    pub fn as_bytes(&self) -> &[u8; SALT_LEN] {
        &self.0
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Salt([REDACTED])")
    }
}

/// Key and IV produced by [`derive`]
///
/// Both halves are wiped when the value is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedMaterial {
    key: Vec<u8>,
    iv: Vec<u8>,
}

impl DerivedMaterial {
    /// Get the key bytes
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Get the IV bytes
    pub fn iv(&self) -> &[u8] {
        &self.iv
    }
}

impl fmt::Debug for DerivedMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedMaterial")
            .field("key_len", &self.key.len())
            .field("iv_len", &self.iv.len())
            .finish()
    }
}

/// Derive `key_len` key bytes and `iv_len` IV bytes from a password and salt
///
/// Deterministic: identical arguments always give identical output. A wrong
/// digest is not detected here; it only shows up as a padding failure when
/// decrypting.
pub fn derive(
    password: &Password,
    salt: &Salt,
    digest: DigestChoice,
    key_len: usize,
    iv_len: usize,
) -> DerivedMaterial {
    let wanted = key_len + iv_len;
    let mut material = Zeroizing::new(Vec::with_capacity(wanted + digest.output_len()));
    let mut previous = Zeroizing::new(Vec::new());

    while material.len() < wanted {
        let block = Zeroizing::new(digest.digest(&[
            previous.as_slice(),
            password.as_bytes(),
            salt.as_bytes(),
        ]));
        material.extend_from_slice(&block);
        previous = block;
    }

    tracing::trace!(
        digest = %digest,
        rounds = material.len() / digest.output_len(),
        "derived key material"
    );

    DerivedMaterial {
        key: material[..key_len].to_vec(),
        iv: material[key_len..wanted].to_vec(),
    }
}

/// Derive an AES-256 key and CBC IV
pub fn derive_key_iv(password: &Password, salt: &Salt, digest: DigestChoice) -> DerivedMaterial {
    derive(password, salt, digest, KEY_LEN, IV_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unhex(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    fn test_salt() -> Salt {
        Salt::from_bytes([1, 2, 3, 4, 5, 6, 7, 8])
    }

    fn password(s: &str) -> Password {
        Password::new(s).unwrap()
    }

    // Expected values from `openssl enc -aes-256-cbc -md <digest> -S <salt> -k <pass> -P`
    #[test]
    fn test_matches_openssl_sha256() {
        let m = derive_key_iv(&password("test"), &test_salt(), DigestChoice::Sha256);
        assert_eq!(
            m.key(),
            unhex("e66f4d594afe894039e14d59521a8a7fa3d5821af0dc16b7209603a1706e3e6a")
        );
        assert_eq!(m.iv(), unhex("c61a274269ccfaa27f4b8e18f172a9df"));
    }

    #[test]
    fn test_matches_openssl_sha1() {
        let m = derive_key_iv(&password("test"), &test_salt(), DigestChoice::Sha1);
        assert_eq!(
            m.key(),
            unhex("ccb00b918459c76fb759546a653c87d041b4b9f1c444fd10e72f51221de74c5a")
        );
        assert_eq!(m.iv(), unhex("35c811435c697337c374fd8528e16907"));
    }

    #[test]
    fn test_matches_openssl_md5() {
        let m = derive_key_iv(&password("test"), &test_salt(), DigestChoice::Md5);
        assert_eq!(
            m.key(),
            unhex("d5e2ad1215fca1925ca04478222a1851925adb7b9bc2dc7b1e887ee1d41afb38")
        );
        assert_eq!(m.iv(), unhex("424171e215213187b1d979ae24e2ab83"));

        let salt = Salt::from_bytes([0xa1, 0xb2, 0xc3, 0xd4, 0xe5, 0xf6, 0x07, 0x18]);
        let m = derive_key_iv(&password("correct horse"), &salt, DigestChoice::Md5);
        assert_eq!(
            m.key(),
            unhex("4686a2cfecc58fc6db96038f0385f4f6c08497b0418ac1ccc29f152c808e0bf8")
        );
        assert_eq!(m.iv(), unhex("972b262200d06e822c5551d4eb1b95b1"));
    }

    #[test]
    fn test_first_block_is_digest_of_password_and_salt() {
        let salt = test_salt();
        let m = derive(&password("pw"), &salt, DigestChoice::Sha1, 20, 0);
        let expected = DigestChoice::Sha1.digest(&[b"pw", salt.as_bytes()]);
        assert_eq!(m.key(), expected.as_slice());
        assert!(m.iv().is_empty());
    }

    #[test]
    fn test_later_blocks_chain_previous_digest() {
        let salt = test_salt();
        let m = derive(&password("pw"), &salt, DigestChoice::Md5, 32, 0);
        let d1 = DigestChoice::Md5.digest(&[b"pw", salt.as_bytes()]);
        let d2 = DigestChoice::Md5.digest(&[&d1, b"pw", salt.as_bytes()]);
        assert_eq!(&m.key()[..16], d1.as_slice());
        assert_eq!(&m.key()[16..], d2.as_slice());
    }

    #[test]
    fn test_lengths_follow_request() {
        for digest in DigestChoice::ALL {
            let m = derive(&password("pw"), &test_salt(), digest, 24, 8);
            assert_eq!(m.key().len(), 24);
            assert_eq!(m.iv().len(), 8);
        }
    }

    #[test]
    fn test_same_inputs_same_material() {
        let m1 = derive_key_iv(&password("test"), &test_salt(), DigestChoice::Sha256);
        let m2 = derive_key_iv(&password("test"), &test_salt(), DigestChoice::Sha256);
        assert_eq!(m1.key(), m2.key());
        assert_eq!(m1.iv(), m2.iv());
    }

    #[test]
    fn test_different_salt_different_key() {
        let s1 = Salt::generate().unwrap();
        let s2 = Salt::generate().unwrap();
        assert_ne!(s1, s2);

        let m1 = derive_key_iv(&password("same"), &s1, DigestChoice::Sha256);
        let m2 = derive_key_iv(&password("same"), &s2, DigestChoice::Sha256);
        assert_ne!(m1.key(), m2.key());
    }

    #[test]
    fn test_debug_is_redacted() {
        let m = derive_key_iv(&password("test"), &test_salt(), DigestChoice::Sha256);
        assert_eq!(
            format!("{:?}", m),
            "DerivedMaterial { key_len: 32, iv_len: 16 }"
        );
        assert_eq!(format!("{:?}", test_salt()), "Salt([REDACTED])");
    }
}
