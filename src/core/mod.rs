//! Transactions
//!
//! This module contains the transaction record, the builder family that
//! assembles records for native transfers, token transfers and token
//! issuance, and the monetary and gas constants they rely on.

pub mod builders;
pub mod gas;
pub mod monetary;
pub mod token;
pub mod transaction;

pub use builders::{TransactionBuilder, TransactionFactory, TransactionKind};
pub use gas::GasEstimator;
pub use monetary::{esdt_issue_cost, EGLD_DECIMALS, ESDT_ISSUE_COST, ONE_EGLD};
pub use token::{EsdtProperties, IssueEsdtParams, TokenPayment};
pub use transaction::{Transaction, TransactionBuilderInput};
