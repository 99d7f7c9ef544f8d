//! PKCS#7 padding for the 16-byte AES block

use crate::error::{SaltedError, SaltedResult};

/// Cipher block size in bytes
pub const BLOCK_SIZE: usize = 16;

/// Append `N` bytes of value `N`, with `N` in 1..=16
///
/// Input already aligned to the block size gets a whole extra block.
pub fn pad(data: &[u8]) -> Vec<u8> {
    let n = BLOCK_SIZE - (data.len() % BLOCK_SIZE);
    let mut out = Vec::with_capacity(data.len() + n);
    out.extend_from_slice(data);
    out.resize(data.len() + n, n as u8);
    out
}

/// Validate the padding of `data` and return the unpadded length
///
/// Every byte of the last block is examined whatever the outcome so that the
/// work done does not depend on where a mismatch sits. Any failure is the
/// same [`SaltedError::Decryption`].
pub fn unpadded_len(data: &[u8]) -> SaltedResult<usize> {
    if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
        return Err(SaltedError::Decryption);
    }

    let last_block = &data[data.len() - BLOCK_SIZE..];
    let n = last_block[BLOCK_SIZE - 1];

    let mut bad = u8::from(n == 0) | u8::from(n as usize > BLOCK_SIZE);
    for (i, &byte) in last_block.iter().enumerate() {
        // Position counted from the end: 1 for the last byte
        let from_end = BLOCK_SIZE - i;
        let in_pad = u8::from(from_end <= n as usize);
        bad |= in_pad & u8::from(byte != n);
    }

    if bad != 0 {
        return Err(SaltedError::Decryption);
    }
    Ok(data.len() - n as usize)
}

/// Validate and strip padding in place
///
/// On failure `data` is left untouched.
pub fn unpad(data: &mut Vec<u8>) -> SaltedResult<()> {
    let len = unpadded_len(data)?;
    data.truncate(len);
    Ok(())
}
