//! Transaction builders
//!
//! Callers pick an operation with [`TransactionKind`] and hand it to
//! [`TransactionFactory::create`], which validates the input and returns a
//! boxed [`TransactionBuilder`]. The concrete builders are private to this
//! module.

use crate::core::monetary::esdt_issue_cost;
use crate::core::token::{IssueEsdtParams, TokenPayment};
use crate::core::transaction::{Transaction, TransactionBuilderInput};
use crate::error::{Result, WalletError};
use crate::utils::{biguint_to_hex, hex_encode, string_to_hex, u64_to_hex};
use crate::wallet::Address;
use log::debug;
use num_bigint::BigUint;

const ESDT_TRANSFER_PREFIX: &str = "ESDTTransfer";
const ESDT_NFT_TRANSFER_PREFIX: &str = "ESDTNFTTransfer";
const ESDT_ISSUE_PREFIX: &str = "issue";
const ARGUMENT_SEPARATOR: char = '@';

/// Produces a canonical, unsigned transaction. Building twice yields the same record.
pub trait TransactionBuilder {
    fn build(&self) -> Transaction;
}

/// The operation a transaction performs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    /// Native value transfer; the input's data is passed through unchanged
    EgldTransfer,
    /// Token transfer; fungible when the payment nonce is zero
    EsdtTransfer(TokenPayment),
    /// Token issuance through the ESDT system smart contract
    EsdtIssue(IssueEsdtParams),
}

impl TransactionKind {
    pub fn name(&self) -> &'static str {
        match self {
            TransactionKind::EgldTransfer => "egld-transfer",
            TransactionKind::EsdtTransfer(payment) if payment.is_fungible() => "esdt-transfer",
            TransactionKind::EsdtTransfer(_) => "esdt-nft-transfer",
            TransactionKind::EsdtIssue(_) => "esdt-issue",
        }
    }
}

pub struct TransactionFactory;

impl TransactionFactory {
    /// Validate the operation parameters and return the matching builder
    pub fn create(
        input: TransactionBuilderInput,
        kind: TransactionKind,
    ) -> Result<Box<dyn TransactionBuilder>> {
        if input.chain_id.trim().is_empty() {
            return Err(WalletError::Transaction(
                "Chain ID must not be empty".to_string(),
            ));
        }
        debug!("Creating {} builder for {}", kind.name(), input.sender);

        match kind {
            TransactionKind::EgldTransfer => Ok(Box::new(EgldTransferBuilder { input })),
            TransactionKind::EsdtTransfer(payment) => {
                payment.validate()?;
                Ok(Box::new(EsdtTransferBuilder { input, payment }))
            }
            TransactionKind::EsdtIssue(params) => {
                params.validate()?;
                Ok(Box::new(EsdtIssueBuilder { input, params }))
            }
        }
    }
}

fn join_arguments(function: &str, arguments: &[String]) -> Vec<u8> {
    let mut data = String::from(function);
    for argument in arguments {
        data.push(ARGUMENT_SEPARATOR);
        data.push_str(argument);
    }
    data.into_bytes()
}

fn transaction_from_input(
    input: &TransactionBuilderInput,
    receiver: Address,
    value: BigUint,
    data: Vec<u8>,
) -> Transaction {
    Transaction::new(
        input.nonce,
        value,
        receiver,
        input.sender.clone(),
        input.gas_price,
        input.gas_limit,
        data,
        input.chain_id.clone(),
        input.version,
    )
}

struct EgldTransferBuilder {
    input: TransactionBuilderInput,
}

impl TransactionBuilder for EgldTransferBuilder {
    fn build(&self) -> Transaction {
        transaction_from_input(
            &self.input,
            self.input.receiver.clone(),
            self.input.value.clone(),
            self.input.data.clone().unwrap_or_default(),
        )
    }
}

struct EsdtTransferBuilder {
    input: TransactionBuilderInput,
    payment: TokenPayment,
}

impl EsdtTransferBuilder {
    fn data(&self) -> Vec<u8> {
        let payment = &self.payment;
        if payment.is_fungible() {
            join_arguments(
                ESDT_TRANSFER_PREFIX,
                &[
                    string_to_hex(&payment.token_identifier),
                    biguint_to_hex(&payment.amount),
                ],
            )
        } else {
            join_arguments(
                ESDT_NFT_TRANSFER_PREFIX,
                &[
                    string_to_hex(&payment.token_identifier),
                    u64_to_hex(payment.nonce),
                    biguint_to_hex(&payment.amount),
                    hex_encode(self.input.receiver.public_key().as_bytes()),
                ],
            )
        }
    }
}

impl TransactionBuilder for EsdtTransferBuilder {
    fn build(&self) -> Transaction {
        // NFT and SFT transfers are calls on the sender's own account
        let receiver = if self.payment.is_fungible() {
            self.input.receiver.clone()
        } else {
            self.input.sender.clone()
        };
        transaction_from_input(&self.input, receiver, BigUint::from(0u8), self.data())
    }
}

struct EsdtIssueBuilder {
    input: TransactionBuilderInput,
    params: IssueEsdtParams,
}

impl EsdtIssueBuilder {
    fn data(&self) -> Vec<u8> {
        let params = &self.params;
        let mut arguments = vec![
            string_to_hex(&params.token_name),
            string_to_hex(&params.ticker),
            biguint_to_hex(&params.initial_supply),
            u64_to_hex(u64::from(params.num_decimals)),
        ];
        for (name, enabled) in params.properties.as_pairs() {
            arguments.push(string_to_hex(name));
            arguments.push(string_to_hex(if enabled { "true" } else { "false" }));
        }
        join_arguments(ESDT_ISSUE_PREFIX, &arguments)
    }
}

impl TransactionBuilder for EsdtIssueBuilder {
    fn build(&self) -> Transaction {
        transaction_from_input(
            &self.input,
            Address::esdt_system_sc(),
            esdt_issue_cost(),
            self.data(),
        )
    }
}
