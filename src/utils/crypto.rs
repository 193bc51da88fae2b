use ring::hmac;
use ring::rand::{SecureRandom, SystemRandom};
use ring::signature::{Ed25519KeyPair, KeyPair, UnparsedPublicKey, ED25519};

use crate::error::{Result, WalletError};
use crate::wallet::keys::{
    PublicKey, SecretKey, Seed, Signature, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SEED_LENGTH,
    SIGNATURE_LENGTH,
};

pub const HMAC_SHA256_LENGTH: usize = 32;

// ring only rejects seeds of the wrong length, which the Seed type rules out
fn key_pair_from_seed_bytes(seed: &[u8]) -> Ed25519KeyPair {
    Ed25519KeyPair::from_seed_unchecked(seed)
        .expect("a 32-byte seed is always a valid Ed25519 seed")
}

pub fn public_key_from_seed(seed: &Seed) -> PublicKey {
    let key_pair = key_pair_from_seed_bytes(seed.as_bytes());
    let mut pk = [0u8; PUBLIC_KEY_LENGTH];
    pk.copy_from_slice(key_pair.public_key().as_ref());
    PublicKey::new(pk)
}

pub fn secret_key_from_seed(seed: &Seed) -> SecretKey {
    let pk = public_key_from_seed(seed);
    let mut sk = [0u8; SECRET_KEY_LENGTH];
    sk[..SEED_LENGTH].copy_from_slice(seed.as_bytes());
    sk[SEED_LENGTH..].copy_from_slice(pk.as_bytes());
    SecretKey::new(sk)
}

pub fn seed_from_secret_key(secret_key: &SecretKey) -> Seed {
    let mut seed = [0u8; SEED_LENGTH];
    seed.copy_from_slice(secret_key.seed_half());
    Seed::new(seed)
}

/// Re-derives the public key from the seed half instead of trusting the stored half
pub fn public_key_from_secret_key(secret_key: &SecretKey) -> PublicKey {
    public_key_from_seed(&seed_from_secret_key(secret_key))
}

/// Checks that the public key half of `secret_key` belongs to its seed half
pub fn check_secret_key(secret_key: &SecretKey) -> Result<()> {
    let derived = public_key_from_secret_key(secret_key);
    if derived.as_bytes().as_slice() != secret_key.embedded_public_key() {
        return Err(WalletError::MalformedKey(
            "public key half does not match the seed half".to_string(),
        ));
    }
    Ok(())
}

pub fn ed25519_sign(secret_key: &SecretKey, message: &[u8]) -> Signature {
    let key_pair = key_pair_from_seed_bytes(secret_key.seed_half());
    let mut sig = [0u8; SIGNATURE_LENGTH];
    sig.copy_from_slice(key_pair.sign(message).as_ref());
    Signature::new(sig)
}

/// Malformed signatures simply fail verification
pub fn ed25519_verify(signature: &[u8], message: &[u8], public_key: &PublicKey) -> bool {
    let peer_public_key = UnparsedPublicKey::new(&ED25519, public_key.as_bytes());
    peer_public_key.verify(message, signature).is_ok()
}

pub fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; HMAC_SHA256_LENGTH] {
    let key = hmac::Key::new(hmac::HMAC_SHA256, key);
    let tag = hmac::sign(&key, data);
    let mut out = [0u8; HMAC_SHA256_LENGTH];
    out.copy_from_slice(tag.as_ref());
    out
}

/// Constant-time comparison of HMAC-SHA256(key, data) against `expected`
pub fn hmac_sha256_verify(key: &[u8], data: &[u8], expected: &[u8]) -> bool {
    let key = hmac::Key::new(hmac::HMAC_SHA256, key);
    hmac::verify(&key, data, expected).is_ok()
}

/// Fills `buffer` from the system RNG, the only randomness source for seeds and keystores
pub fn fill_random(buffer: &mut [u8]) -> Result<()> {
    SystemRandom::new()
        .fill(buffer)
        .map_err(|e| WalletError::Crypto(format!("System RNG failure: {e}")))
}
