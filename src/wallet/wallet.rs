use crate::core::Transaction;
use crate::error::Result;
use crate::storage::KeySource;
use crate::utils::{
    check_secret_key, ed25519_sign, ed25519_verify, fill_random, public_key_from_seed,
    secret_key_from_seed, seed_from_secret_key,
};
use crate::wallet::address::Address;
use crate::wallet::keys::{PublicKey, SecretKey, Seed, Signature, SEED_LENGTH};
use std::fmt;
use zeroize::Zeroize;

/// A loaded account for the duration of a signing session.
///
/// Holds the seed, the expanded secret key and the address derived from them.
/// Secret material is zeroed when the wallet is dropped.
#[derive(Clone)]
pub struct Wallet {
    seed: Seed,
    secret_key: SecretKey,
    address: Address,
}

impl Wallet {
    /// Generate a fresh account from the system RNG
    pub fn generate() -> Result<Wallet> {
        let mut bytes = [0u8; SEED_LENGTH];
        let filled = fill_random(&mut bytes);
        let seed = Seed::new(bytes);
        bytes.zeroize();
        filled?;
        Ok(Wallet::from_seed(seed))
    }

    pub fn from_seed(seed: Seed) -> Wallet {
        let secret_key = secret_key_from_seed(&seed);
        let address = Address::from_public_key(public_key_from_seed(&seed));
        Wallet {
            seed,
            secret_key,
            address,
        }
    }

    /// Rejects secret keys whose public key half does not belong to the seed half
    pub fn from_secret_key(secret_key: SecretKey) -> Result<Wallet> {
        check_secret_key(&secret_key)?;
        Ok(Wallet::from_seed(seed_from_secret_key(&secret_key)))
    }

    pub fn from_key_source<K: KeySource + ?Sized>(source: &K) -> Wallet {
        Wallet::from_seed(source.seed().clone())
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn public_key(&self) -> &PublicKey {
        self.address.public_key()
    }

    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    pub fn sign_message(&self, message: &[u8]) -> Signature {
        ed25519_sign(&self.secret_key, message)
    }

    pub fn verify_message(&self, signature: &[u8], message: &[u8]) -> bool {
        ed25519_verify(signature, message, self.public_key())
    }

    /// Sign `transaction` in place; it must be unsigned and sent from this wallet
    pub fn sign_transaction(&self, transaction: &mut Transaction) -> Result<()> {
        transaction.sign(&self.secret_key)
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .finish()
    }
}
