//! Block explorer
//!
//! Pages through recent blocks, newest first. Page `p` covers
//! `latest - p * size` down to `latest - p * size - (size - 1)`, clamped at
//! the genesis block. Blocks on a page are fetched concurrently, then the
//! receipts of every transaction on the page.

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::chain::{BlockSource, ChainResult};
use crate::models::BlockPage;

/// Blocks per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Block numbers on `page`, newest first, or `None` past genesis
pub fn page_range(latest: u64, page: u64, page_size: u64) -> Option<RangeInclusive<u64>> {
    let size = page_size.max(1);
    let newest = latest.checked_sub(page.checked_mul(size)?)?;
    let oldest = newest.saturating_sub(size - 1);
    Some(oldest..=newest)
}

/// Paged view over a [`BlockSource`]
pub struct BlockExplorer {
    source: Arc<dyn BlockSource>,
    page_size: u64,
}

impl BlockExplorer {
    pub fn new(source: Arc<dyn BlockSource>, page_size: u64) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Fetch one page
    ///
    /// A page past the genesis block is empty. A receipt that cannot be
    /// fetched is left out; a block that cannot be fetched fails the page.
    pub async fn fetch_page(&self, page: u64) -> ChainResult<BlockPage> {
        let latest = self.source.latest_block_number().await?;
        let Some(range) = page_range(latest, page, self.page_size) else {
            debug!(page, latest, "page is past the genesis block");
            return Ok(BlockPage {
                page,
                latest,
                ..Default::default()
            });
        };

        let blocks = join_all(range.rev().map(|number| self.source.block(number)))
            .await
            .into_iter()
            .collect::<ChainResult<Vec<_>>>()?;

        let hashes: Vec<_> = blocks
            .iter()
            .flat_map(|block| block.transactions.iter().copied())
            .collect();
        let receipts = join_all(hashes.iter().map(|hash| self.source.receipt(*hash))).await;

        let mut by_hash = HashMap::with_capacity(receipts.len());
        for (hash, receipt) in hashes.into_iter().zip(receipts) {
            match receipt {
                Ok(receipt) => {
                    by_hash.insert(hash, receipt);
                }
                Err(err) => warn!(%hash, error = %err, "receipt unavailable"),
            }
        }

        debug!(page, latest, blocks = blocks.len(), "fetched explorer page");
        Ok(BlockPage {
            page,
            latest,
            blocks,
            receipts: by_hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ChainError;
    use crate::models::{BlockSummary, ReceiptSummary};
    use alloy::primitives::{Address, B256};
    use async_trait::async_trait;

    struct FakeChain {
        latest: u64,
        missing_receipt: Option<B256>,
    }

    fn tx_hash(block: u64) -> B256 {
        B256::left_padding_from(&block.to_be_bytes())
    }

    #[async_trait]
    impl BlockSource for FakeChain {
        async fn latest_block_number(&self) -> ChainResult<u64> {
            Ok(self.latest)
        }

        async fn block(&self, number: u64) -> ChainResult<BlockSummary> {
            if number > self.latest {
                return Err(ChainError::NotFound(format!("block {}", number)));
            }
            // Every even block carries one transaction
            let transactions = if number % 2 == 0 {
                vec![tx_hash(number)]
            } else {
                Vec::new()
            };
            Ok(BlockSummary {
                number,
                hash: B256::repeat_byte(number as u8),
                timestamp: 1_700_000_000 + number,
                miner: Address::ZERO,
                gas_used: 21_000 * transactions.len() as u64,
                transactions,
            })
        }

        async fn receipt(&self, hash: B256) -> ChainResult<ReceiptSummary> {
            if Some(hash) == self.missing_receipt {
                return Err(ChainError::NotFound(format!("receipt {}", hash)));
            }
            Ok(ReceiptSummary {
                hash,
                success: true,
                block_number: None,
                from: Address::ZERO,
                to: None,
                contract_address: None,
                gas_used: 21_000,
            })
        }
    }

    fn explorer(latest: u64) -> BlockExplorer {
        BlockExplorer::new(
            Arc::new(FakeChain {
                latest,
                missing_receipt: None,
            }),
            DEFAULT_PAGE_SIZE,
        )
    }

    #[test]
    fn test_page_ranges() {
        assert_eq!(page_range(100, 0, 20), Some(81..=100));
        assert_eq!(page_range(100, 1, 20), Some(61..=80));
        assert_eq!(page_range(100, 5, 20), Some(0..=0));
        assert_eq!(page_range(100, 6, 20), None);
        assert_eq!(page_range(5, 0, 20), Some(0..=5));
        assert_eq!(page_range(u64::MAX, u64::MAX, 20), None);
    }

    #[tokio::test]
    async fn test_first_page_is_newest_first() {
        let page = explorer(45).fetch_page(0).await.unwrap();

        assert_eq!(page.latest, 45);
        assert_eq!(page.blocks.len(), 20);
        assert_eq!(page.blocks.first().unwrap().number, 45);
        assert_eq!(page.blocks.last().unwrap().number, 26);
        assert_eq!(page.transaction_count(), 10);
        assert_eq!(page.receipts.len(), 10);
    }

    #[tokio::test]
    async fn test_last_page_stops_at_genesis() {
        let page = explorer(45).fetch_page(2).await.unwrap();

        let numbers: Vec<u64> = page.blocks.iter().map(|b| b.number).collect();
        assert_eq!(numbers, vec![5, 4, 3, 2, 1, 0]);
    }

    #[tokio::test]
    async fn test_page_past_genesis_is_empty() {
        let page = explorer(45).fetch_page(3).await.unwrap();
        assert!(page.blocks.is_empty());
        assert!(page.receipts.is_empty());
    }

    #[tokio::test]
    async fn test_missing_receipt_is_skipped() {
        let explorer = BlockExplorer::new(
            Arc::new(FakeChain {
                latest: 4,
                missing_receipt: Some(tx_hash(2)),
            }),
            DEFAULT_PAGE_SIZE,
        );
        let page = explorer.fetch_page(0).await.unwrap();

        assert_eq!(page.transaction_count(), 3);
        assert_eq!(page.receipts.len(), 2);
        assert!(!page.receipts.contains_key(&tx_hash(2)));
    }
}
