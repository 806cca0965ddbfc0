use std::time::{Duration, Instant};

use alloy::primitives::{Address, Bytes, B256};
use alloy::sol_types::SolCall;
use serde_json::Value;
use tracing::{debug, info, warn};

use vnst_dapp_core::{PortError, TxReceipt};

use crate::eip1193::parse_hex_or_decimal;
use crate::{DappConfig, Eip1193Adapter};

/// ABI-encoded reads and writes through the EIP-1193 provider.
#[derive(Debug, Clone)]
pub struct ContractClient {
    provider: Eip1193Adapter,
    poll_interval: Duration,
    receipt_timeout: Duration,
}

impl ContractClient {
    pub fn new(provider: Eip1193Adapter, config: &DappConfig) -> Self {
        Self {
            provider,
            poll_interval: Duration::from_millis(config.receipt_poll_interval_ms),
            receipt_timeout: Duration::from_millis(config.receipt_timeout_ms),
        }
    }

    pub fn call<C: SolCall>(&self, to: Address, call: &C) -> Result<C::Return, PortError> {
        let data = Bytes::from(call.abi_encode());
        let raw = self.provider.eth_call(to, data)?;
        C::abi_decode_returns(&raw, false).map_err(|e| {
            PortError::Validation(format!("{} returned undecodable data: {e}", C::SIGNATURE))
        })
    }

    /// Submits the call as a transaction from `from` and waits for its
    /// receipt.
    pub fn send<C: SolCall>(
        &self,
        from: Address,
        to: Address,
        call: &C,
    ) -> Result<TxReceipt, PortError> {
        let data = Bytes::from(call.abi_encode());
        let hash = self.provider.send_transaction(from, to, data)?;
        info!(method = C::SIGNATURE, tx_hash = %hash, "transaction submitted");
        self.wait_for_receipt(hash)
    }

    fn wait_for_receipt(&self, hash: B256) -> Result<TxReceipt, PortError> {
        let deadline = Instant::now() + self.receipt_timeout;
        loop {
            if let Some(receipt) = self.provider.transaction_receipt(hash)? {
                return parse_receipt(hash, &receipt);
            }
            if Instant::now() >= deadline {
                warn!(tx_hash = %hash, "receipt wait timed out");
                return Err(PortError::Timeout(format!("no receipt for {hash}")));
            }
            debug!(tx_hash = %hash, "receipt pending");
            std::thread::sleep(self.poll_interval);
        }
    }
}

fn parse_receipt(hash: B256, receipt: &Value) -> Result<TxReceipt, PortError> {
    let status = receipt
        .get("status")
        .and_then(Value::as_str)
        .map(parse_hex_or_decimal)
        .transpose()?;
    if status == Some(0) {
        return Err(PortError::Reverted(format!("transaction {hash} reverted")));
    }
    let block_number = receipt
        .get("blockNumber")
        .and_then(Value::as_str)
        .map(parse_hex_or_decimal)
        .transpose()?;
    info!(tx_hash = %hash, ?block_number, "transaction confirmed");
    Ok(TxReceipt {
        tx_hash: hash,
        block_number,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_status_is_a_revert() {
        let receipt = serde_json::json!({ "status": "0x0", "blockNumber": "0x10" });
        assert!(matches!(
            parse_receipt(B256::ZERO, &receipt),
            Err(PortError::Reverted(_))
        ));
    }

    #[test]
    fn pending_block_number_is_allowed() {
        let receipt = serde_json::json!({ "status": "0x1", "blockNumber": null });
        let parsed = parse_receipt(B256::ZERO, &receipt).expect("receipt");
        assert_eq!(parsed.block_number, None);
    }
}
