//! Key derivation and the XOR cipher protecting the configuration and record payloads.
//!
//! This is obfuscation against casual inspection, not a hardened cipher: the keystream is
//! a deterministic function of its seed and is simply XORed over the plaintext.

pub mod keystream;
pub mod xor;

pub use keystream::{derive, Keystream};
pub use xor::transform;

use crate::common::constants::KEYSTREAM_LEN;

/// Defines errors raised by the cipher layer.
//
// // 定义加密层产生的错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CipherError {
    /// A zero-length key or keystream was requested or supplied.
    //
    // // 请求或提供了长度为零的密钥。
    #[error("Cipher key must not be empty")]
    EmptyKey,
}

/// Holds the two keys a store works with.
///
/// The identity key always exists and protects the configuration file. The password key
/// exists only while a password is configured; record payloads use it, falling back to the
/// identity key otherwise.
#[derive(Debug, Clone)]
pub struct KeyRing {
    identity: Keystream,
    password: Option<Keystream>,
}

impl KeyRing {
    /// Builds a key ring whose configuration key is derived from `identity_seed`.
    pub fn from_identity(identity_seed: &str) -> Result<Self, CipherError> {
        Ok(Self {
            identity: derive(identity_seed, KEYSTREAM_LEN)?,
            password: None,
        })
    }

    /// Key protecting the configuration file.
    pub fn identity_key(&self) -> &Keystream {
        &self.identity
    }

    /// Key protecting record payloads: password-derived when a password is set.
    pub fn record_key(&self) -> &Keystream {
        self.password.as_ref().unwrap_or(&self.identity)
    }

    /// Re-derives the password key. `None` reverts record encryption to the identity key.
    pub fn set_password(&mut self, password: Option<&str>) -> Result<(), CipherError> {
        self.password = match password {
            Some(pw) => Some(derive(pw, KEYSTREAM_LEN)?),
            None => None,
        };
        Ok(())
    }
}
