//! Fixed-length key material
//!
//! Each key type wraps a byte array of the exact size the Ed25519 primitives
//! need, so the signing engine never has to check lengths at call time.
//! Converting an untrusted slice is the only place a size can be wrong.

use crate::error::{Result, WalletError};
use crate::utils::{hex_decode, hex_encode};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub const SEED_LENGTH: usize = 32;
pub const PUBLIC_KEY_LENGTH: usize = 32;
/// Secret keys are stored as `seed || public key`
pub const SECRET_KEY_LENGTH: usize = SEED_LENGTH + PUBLIC_KEY_LENGTH;
pub const SIGNATURE_LENGTH: usize = 64;

fn to_array<const N: usize>(bytes: &[u8], what: &str) -> Result<[u8; N]> {
    bytes.try_into().map_err(|_| {
        WalletError::ContractViolation(format!(
            "{what} requires exactly {N} bytes, got {}",
            bytes.len()
        ))
    })
}

/// Root secret of an account
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_LENGTH]);

impl Seed {
    pub fn new(bytes: [u8; SEED_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        to_array(bytes, "Seed").map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; SEED_LENGTH] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seed").field("length", &SEED_LENGTH).finish()
    }
}

/// Expanded signing key
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; SECRET_KEY_LENGTH]);

impl SecretKey {
    pub fn new(bytes: [u8; SECRET_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        to_array(bytes, "SecretKey").map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_LENGTH] {
        &self.0
    }

    pub(crate) fn seed_half(&self) -> &[u8] {
        &self.0[..SEED_LENGTH]
    }

    /// Public key bytes stored next to the seed, not yet checked against it
    pub(crate) fn embedded_public_key(&self) -> &[u8] {
        &self.0[SEED_LENGTH..]
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("length", &SECRET_KEY_LENGTH)
            .finish()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_LENGTH]);

impl PublicKey {
    pub const fn new(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        to_array(bytes, "PublicKey").map(Self)
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex_decode(s)?;
        if bytes.len() != PUBLIC_KEY_LENGTH {
            return Err(WalletError::Length {
                expected: PUBLIC_KEY_LENGTH,
                actual: bytes.len(),
            });
        }
        Self::from_slice(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex_encode(&self.0)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Detached Ed25519 signature
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_LENGTH]);

impl Signature {
    pub fn new(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        to_array(bytes, "Signature").map(Self)
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex_decode(s)?;
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(WalletError::Length {
                expected: SIGNATURE_LENGTH,
                actual: bytes.len(),
            });
        }
        Self::from_slice(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex_encode(&self.0)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
