//! Block explorer models

use alloy::primitives::{Address, B256};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// A block with its transaction hashes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSummary {
    pub number: u64,
    pub hash: B256,
    /// Unix seconds
    pub timestamp: u64,
    pub miner: Address,
    pub gas_used: u64,
    pub transactions: Vec<B256>,
}

impl BlockSummary {
    /// Block time in UTC, if representable
    pub fn time(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.timestamp)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

/// Receipt fields the explorer shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptSummary {
    pub hash: B256,
    pub success: bool,
    pub block_number: Option<u64>,
    pub from: Address,
    pub to: Option<Address>,
    pub contract_address: Option<Address>,
    pub gas_used: u64,
}

/// One page of the explorer, newest block first
#[derive(Debug, Clone, Default)]
pub struct BlockPage {
    /// Zero-based page index
    pub page: u64,
    /// Latest block number at fetch time
    pub latest: u64,
    pub blocks: Vec<BlockSummary>,
    pub receipts: HashMap<B256, ReceiptSummary>,
}

impl BlockPage {
    /// Total transactions across the page
    pub fn transaction_count(&self) -> usize {
        self.blocks.iter().map(|b| b.transactions.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_time() {
        let block = BlockSummary {
            number: 1,
            hash: B256::ZERO,
            timestamp: 1_700_000_000,
            miner: Address::ZERO,
            gas_used: 0,
            transactions: vec![],
        };
        assert_eq!(block.time().unwrap().timestamp(), 1_700_000_000);
    }
}
