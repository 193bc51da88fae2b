use crate::config::Config;
use crate::core::builders::TransactionKind;
use log::debug;

/// Computes gas limits from the configured gas schedule.
///
/// The limit is the base cost of a transaction plus a per-byte charge for the
/// data field plus the execution cost of the operation.
#[derive(Debug, Clone)]
pub struct GasEstimator {
    min_gas_limit: u64,
    gas_per_data_byte: u64,
    esdt_transfer_gas: u64,
    esdt_nft_transfer_gas: u64,
    esdt_issue_gas: u64,
}

impl GasEstimator {
    pub fn new(config: &Config) -> Self {
        GasEstimator {
            min_gas_limit: config.min_gas_limit,
            gas_per_data_byte: config.gas_per_data_byte,
            esdt_transfer_gas: config.esdt_transfer_gas,
            esdt_nft_transfer_gas: config.esdt_nft_transfer_gas,
            esdt_issue_gas: config.esdt_issue_gas,
        }
    }

    fn operation_gas(&self, kind: &TransactionKind) -> u64 {
        match kind {
            TransactionKind::EgldTransfer => 0,
            TransactionKind::EsdtTransfer(payment) if payment.is_fungible() => {
                self.esdt_transfer_gas
            }
            TransactionKind::EsdtTransfer(_) => self.esdt_nft_transfer_gas,
            TransactionKind::EsdtIssue(_) => self.esdt_issue_gas,
        }
    }

    /// Gas limit for a transaction of `kind` whose data field is `data_len` bytes
    pub fn estimate(&self, kind: &TransactionKind, data_len: usize) -> u64 {
        let data_gas = self.gas_per_data_byte.saturating_mul(data_len as u64);
        let limit = self
            .min_gas_limit
            .saturating_add(data_gas)
            .saturating_add(self.operation_gas(kind));
        debug!("Estimated gas limit {limit} for {} ({data_len} data bytes)", kind.name());
        limit
    }
}
