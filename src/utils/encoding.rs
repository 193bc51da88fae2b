// Codec helpers shared by the key readers, the keystore and the transaction payloads
use crate::error::{Result, WalletError};
use data_encoding::{BASE64, HEXLOWER, HEXLOWER_PERMISSIVE};
use num_bigint::BigUint;

pub fn hex_encode(data: &[u8]) -> String {
    HEXLOWER.encode(data)
}

/// Decode hex in either case
pub fn hex_decode(data: &str) -> Result<Vec<u8>> {
    HEXLOWER_PERMISSIVE
        .decode(data.trim().as_bytes())
        .map_err(|e| WalletError::Format(format!("Invalid hex encoding: {e}")))
}

pub fn base64_encode(data: &[u8]) -> String {
    BASE64.encode(data)
}

pub fn base64_decode(data: &str) -> Result<Vec<u8>> {
    BASE64
        .decode(data.trim().as_bytes())
        .map_err(|e| WalletError::Format(format!("Invalid base64 encoding: {e}")))
}

/// Hex form of the UTF-8 bytes of `s`, as used in smart contract call arguments
pub fn string_to_hex(s: &str) -> String {
    hex_encode(s.as_bytes())
}

pub fn bytes_to_string(data: &[u8]) -> Result<String> {
    String::from_utf8(data.to_vec())
        .map_err(|e| WalletError::Format(format!("Invalid UTF-8 content: {e}")))
}

/// Big-endian hex of `value`, always an even number of digits; zero becomes "00"
pub fn biguint_to_hex(value: &BigUint) -> String {
    hex_encode(&value.to_bytes_be())
}

pub fn u64_to_hex(value: u64) -> String {
    biguint_to_hex(&BigUint::from(value))
}
