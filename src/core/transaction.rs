// This file holds the canonical transaction record that the builders produce
// and the wallet signs. The JSON form doubles as the signing payload, so the
// field order below is part of the wire format.

use crate::error::{Result, WalletError};
use crate::utils::{
    base64_decode, base64_encode, ed25519_sign, ed25519_verify, from_json,
    public_key_from_secret_key, to_json, to_json_pretty,
};
use crate::wallet::{Address, SecretKey, Signature};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Everything a builder needs to assemble a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionBuilderInput {
    pub sender: Address,
    pub receiver: Address,
    /// Native value in smallest units
    pub value: BigUint,
    pub nonce: u64,
    pub gas_price: u64,
    pub gas_limit: u64,
    pub chain_id: String,
    pub version: u32,
    pub data: Option<Vec<u8>>,
}

// Wire layout: nonce, value, receiver, sender, gasPrice, gasLimit, data, chainID, version, signature
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionJson {
    nonce: u64,
    value: String,
    receiver: String,
    sender: String,
    gas_price: u64,
    gas_limit: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<String>,
    #[serde(rename = "chainID")]
    chain_id: String,
    version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    signature: Option<String>,
}

/// A transaction record.
///
/// Everything except the signature is fixed when a builder creates it. The
/// signature is set once by [`Transaction::sign`]; after that the record is
/// frozen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    nonce: u64,
    value: BigUint,
    receiver: Address,
    sender: Address,
    gas_price: u64,
    gas_limit: u64,
    data: Vec<u8>,
    chain_id: String,
    version: u32,
    signature: Option<Signature>,
}

impl Transaction {
    // Only the builders and the JSON parser create transactions
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        nonce: u64,
        value: BigUint,
        receiver: Address,
        sender: Address,
        gas_price: u64,
        gas_limit: u64,
        data: Vec<u8>,
        chain_id: String,
        version: u32,
    ) -> Transaction {
        Transaction {
            nonce,
            value,
            receiver,
            sender,
            gas_price,
            gas_limit,
            data,
            chain_id,
            version,
            signature: None,
        }
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn receiver(&self) -> &Address {
        &self.receiver
    }

    pub fn sender(&self) -> &Address {
        &self.sender
    }

    pub fn gas_price(&self) -> u64 {
        self.gas_price
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    fn to_wire(&self, with_signature: bool) -> TransactionJson {
        TransactionJson {
            nonce: self.nonce,
            value: self.value.to_string(),
            receiver: self.receiver.bech32().to_string(),
            sender: self.sender.bech32().to_string(),
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            // omitted when empty, both in the signed bytes and in the output
            data: (!self.data.is_empty()).then(|| base64_encode(&self.data)),
            chain_id: self.chain_id.clone(),
            version: self.version,
            signature: if with_signature {
                self.signature.as_ref().map(Signature::to_hex)
            } else {
                None
            },
        }
    }

    /// The bytes that get signed: compact JSON without the signature field
    pub fn signable_bytes(&self) -> Result<Vec<u8>> {
        Ok(to_json(&self.to_wire(false))?.into_bytes())
    }

    /// Sign with the sender's secret key. A transaction can only be signed once.
    pub fn sign(&mut self, secret_key: &SecretKey) -> Result<()> {
        if self.is_signed() {
            return Err(WalletError::Transaction(
                "Transaction is already signed".to_string(),
            ));
        }
        if &public_key_from_secret_key(secret_key) != self.sender.public_key() {
            return Err(WalletError::Transaction(format!(
                "Secret key does not belong to sender {}",
                self.sender
            )));
        }

        let message = self.signable_bytes()?;
        self.signature = Some(ed25519_sign(secret_key, &message));
        Ok(())
    }

    /// Check the signature against the sender's public key; unsigned records fail
    pub fn verify_signature(&self) -> bool {
        let Some(signature) = &self.signature else {
            return false;
        };
        match self.signable_bytes() {
            Ok(message) => ed25519_verify(signature.as_bytes(), &message, self.sender.public_key()),
            Err(_) => false,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        to_json(&self.to_wire(true))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        to_json_pretty(&self.to_wire(true))
    }

    /// Parse a signed or unsigned record
    pub fn from_json(text: &str) -> Result<Transaction> {
        let wire: TransactionJson = from_json(text)?;
        let value = wire
            .value
            .parse::<BigUint>()
            .map_err(|e| WalletError::Format(format!("Invalid value '{}': {e}", wire.value)))?;
        // Empty data is always omitted on the wire
        let data = match wire.data.as_deref() {
            Some("") => {
                return Err(WalletError::Format(
                    "Empty data field must be omitted".to_string(),
                ))
            }
            Some(encoded) => base64_decode(encoded)?,
            None => Vec::new(),
        };
        let signature = wire
            .signature
            .as_deref()
            .map(Signature::from_hex)
            .transpose()?;

        let mut tx = Transaction::new(
            wire.nonce,
            value,
            Address::from_bech32(&wire.receiver)?,
            Address::from_bech32(&wire.sender)?,
            wire.gas_price,
            wire.gas_limit,
            data,
            wire.chain_id,
            wire.version,
        );
        tx.signature = signature;
        Ok(tx)
    }
}
