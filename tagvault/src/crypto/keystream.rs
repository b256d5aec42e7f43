use std::fmt;
use sha2::{Digest, Sha256};
use crate::common::constants::KEYSTREAM_CHARSET;
use super::CipherError;

/// A non-empty sequence of printable symbols derived from a seed.
#[derive(Clone, PartialEq, Eq)]
pub struct Keystream(String);

impl Keystream {
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a keystream cannot be constructed empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Keys stay out of logs.
impl fmt::Debug for Keystream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keystream(len={})", self.0.len())
    }
}

/// Derives a keystream of exactly `length` symbols from `seed`.
///
/// SHA-256 is run in counter mode over `seed || block_index` and every digest byte is
/// mapped onto [`KEYSTREAM_CHARSET`]. The output depends on nothing but the two arguments.
///
/// # Errors
/// Returns [`CipherError::EmptyKey`] when `length` is zero.
pub fn derive(seed: &str, length: usize) -> Result<Keystream, CipherError> {
    if length == 0 {
        return Err(CipherError::EmptyKey);
    }

    let mut symbols = String::with_capacity(length);
    let mut block: u64 = 0;
    while symbols.len() < length {
        let mut hasher = Sha256::new();
        hasher.update(seed.as_bytes());
        hasher.update(block.to_le_bytes());
        let digest = hasher.finalize();

        for byte in digest.iter() {
            if symbols.len() == length {
                break;
            }
            let index = *byte as usize % KEYSTREAM_CHARSET.len();
            symbols.push(KEYSTREAM_CHARSET[index] as char);
        }
        block += 1;
    }

    Ok(Keystream(symbols))
}
