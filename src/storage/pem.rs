use crate::error::{Result, WalletError, ERROR_MSG_ENVELOPE_INVALID, ERROR_MSG_FILE_EMPTY};
use crate::storage::{check_key_file, read_key_file, KeySource};
use crate::utils::{base64_decode, base64_encode, bytes_to_string, hex_decode, hex_encode};
use crate::wallet::{Address, PublicKey, Seed, Wallet, PUBLIC_KEY_LENGTH, SEED_LENGTH};
use log::info;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use zeroize::Zeroize;

pub const PEM_FILE_EXTENSION: &str = "pem";
const PEM_MARKER: &str = "-----";
const PEM_BEGIN: &str = "-----BEGIN";
const PEM_END: &str = "-----END";
const PEM_LINE_WIDTH: usize = 64;

/// Reads a plaintext PEM key file.
///
/// The payload is base64 of the hex text of `seed || public key`. The public
/// key is only used to check the file against the key derived from the seed.
pub struct PemFileReader {
    seed: Seed,
    address: Address,
}

impl PemFileReader {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        check_key_file(path, PEM_FILE_EXTENSION)?;

        let content = read_key_file(path)?;
        let mut key_bytes = key_bytes_from_content(&content)?;
        let reader = Self::from_key_bytes(&key_bytes);
        key_bytes.zeroize();
        let reader = reader?;

        info!("Loaded PEM key {} for {}", path.display(), reader.address);
        Ok(reader)
    }

    fn from_key_bytes(key_bytes: &[u8]) -> Result<Self> {
        if key_bytes.len() != SEED_LENGTH + PUBLIC_KEY_LENGTH {
            return Err(WalletError::Length {
                expected: SEED_LENGTH + PUBLIC_KEY_LENGTH,
                actual: key_bytes.len(),
            });
        }

        let (seed_bytes, pub_key_bytes) = key_bytes.split_at(SEED_LENGTH);
        let wallet = Wallet::from_seed(Seed::from_slice(seed_bytes)?);
        let file_public_key = PublicKey::from_slice(pub_key_bytes)?;
        if &file_public_key != wallet.public_key() {
            return Err(WalletError::MalformedKey(format!(
                "public key {} in file does not belong to the seed (derived {})",
                file_public_key.to_hex(),
                wallet.public_key().to_hex()
            )));
        }

        Ok(PemFileReader {
            seed: wallet.seed().clone(),
            address: wallet.address().clone(),
        })
    }
}

impl KeySource for PemFileReader {
    fn seed(&self) -> &Seed {
        &self.seed
    }

    fn address(&self) -> &Address {
        &self.address
    }
}

/// Strip the envelope and decode the payload lines into raw key bytes
fn key_bytes_from_content(content: &str) -> Result<Vec<u8>> {
    let mut has_begin = false;
    let mut has_end = false;
    let mut payload = String::new();

    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.starts_with(PEM_BEGIN) {
            has_begin = true;
        } else if line.starts_with(PEM_END) {
            has_end = true;
        } else if line.starts_with(PEM_MARKER) {
            return Err(WalletError::Format(format!(
                "{ERROR_MSG_ENVELOPE_INVALID}: unexpected marker line '{line}'"
            )));
        } else {
            payload.push_str(line);
        }
    }

    if payload.is_empty() {
        return Err(WalletError::Format(ERROR_MSG_FILE_EMPTY.to_string()));
    }
    if !has_begin || !has_end {
        return Err(WalletError::Format(ERROR_MSG_ENVELOPE_INVALID.to_string()));
    }

    let mut key_hex = base64_decode(&payload)?;
    let decoded = bytes_to_string(&key_hex).and_then(|hex| hex_decode(&hex));
    key_hex.zeroize();
    payload.zeroize();
    decoded
}

/// Render the PEM text for `wallet`
pub fn to_pem(wallet: &Wallet) -> String {
    let mut key_bytes = Vec::with_capacity(SEED_LENGTH + PUBLIC_KEY_LENGTH);
    key_bytes.extend_from_slice(wallet.seed().as_bytes());
    key_bytes.extend_from_slice(wallet.public_key().as_bytes());
    let mut key_hex = hex_encode(&key_bytes);
    let mut payload = base64_encode(key_hex.as_bytes());
    key_bytes.zeroize();
    key_hex.zeroize();

    let label = format!("PRIVATE KEY for {}", wallet.address());
    let mut pem = format!("-----BEGIN {label}-----\n");
    for chunk in payload.as_bytes().chunks(PEM_LINE_WIDTH) {
        // base64 output is ASCII, so every chunk is valid UTF-8
        pem.push_str(&String::from_utf8_lossy(chunk));
        pem.push('\n');
    }
    pem.push_str(&format!("-----END {label}-----\n"));
    payload.zeroize();
    pem
}

pub fn write_pem<P: AsRef<Path>>(path: P, wallet: &Wallet) -> Result<()> {
    let path = path.as_ref();
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)
        .map_err(|e| WalletError::FileAccess(format!("{}: {e}", path.display())))?;

    let mut pem = to_pem(wallet);
    let mut writer = BufWriter::new(file);
    let written = writer.write_all(pem.as_bytes()).and_then(|_| writer.flush());
    pem.zeroize();
    written?;

    info!("Wrote PEM key {} for {}", path.display(), wallet.address());
    Ok(())
}
