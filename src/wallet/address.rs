use crate::error::{Result, WalletError};
use crate::wallet::keys::{PublicKey, PUBLIC_KEY_LENGTH};
use bech32::{FromBase32, ToBase32, Variant};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Human-readable part of every account address
pub const ADDRESS_HRP: &str = "erd";

/// Public key of the ESDT system smart contract that handles token issuance
pub const ESDT_SYSTEM_SC_PUBLIC_KEY: [u8; PUBLIC_KEY_LENGTH] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0xff,
    0xff,
];

/// An account address: a public key plus its cached bech32 form.
///
/// Two addresses are equal when their public keys are equal.
#[derive(Clone)]
pub struct Address {
    public_key: PublicKey,
    bech32: String,
}

impl Address {
    pub fn from_public_key(public_key: PublicKey) -> Address {
        let bech32 = encode_address(&public_key);
        Address { public_key, bech32 }
    }

    pub fn from_bech32(address: &str) -> Result<Address> {
        let public_key = decode_address(address)?;
        Ok(Address::from_public_key(public_key))
    }

    pub fn zero() -> Address {
        Address::from_public_key(PublicKey::new([0u8; PUBLIC_KEY_LENGTH]))
    }

    pub fn esdt_system_sc() -> Address {
        Address::from_public_key(PublicKey::new(ESDT_SYSTEM_SC_PUBLIC_KEY))
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn bech32(&self) -> &str {
        &self.bech32
    }

    pub fn to_hex(&self) -> String {
        self.public_key.to_hex()
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.public_key == other.public_key
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.public_key.hash(state);
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bech32)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.bech32)
    }
}

impl FromStr for Address {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self> {
        Address::from_bech32(s)
    }
}

pub fn encode_address(public_key: &PublicKey) -> String {
    // Only an invalid human-readable part can make encoding fail
    bech32::encode(
        ADDRESS_HRP,
        public_key.as_bytes().to_base32(),
        Variant::Bech32,
    )
    .expect("the address prefix is a valid bech32 human-readable part")
}

pub fn decode_address(address: &str) -> Result<PublicKey> {
    let (hrp, data, variant) = bech32::decode(address)
        .map_err(|e| WalletError::InvalidAddress(format!("{address}: {e}")))?;

    if !hrp.eq_ignore_ascii_case(ADDRESS_HRP) {
        return Err(WalletError::InvalidAddress(format!(
            "{address}: expected prefix '{ADDRESS_HRP}', found '{hrp}'"
        )));
    }
    if variant != Variant::Bech32 {
        return Err(WalletError::InvalidAddress(format!(
            "{address}: bech32m checksum is not accepted"
        )));
    }

    let payload = Vec::<u8>::from_base32(&data)
        .map_err(|e| WalletError::InvalidAddress(format!("{address}: {e}")))?;
    if payload.len() != PUBLIC_KEY_LENGTH {
        return Err(WalletError::InvalidAddress(format!(
            "{address}: payload is {} bytes, expected {PUBLIC_KEY_LENGTH}",
            payload.len()
        )));
    }

    PublicKey::from_slice(&payload)
}

pub fn validate_address(address: &str) -> bool {
    decode_address(address).is_ok()
}
