//! Block explorer display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{BlockPage, ReceiptSummary};

#[derive(Tabled)]
struct BlockRow {
    #[tabled(rename = "Block")]
    number: u64,
    #[tabled(rename = "Time (UTC)")]
    time: String,
    #[tabled(rename = "Txs")]
    transactions: usize,
    #[tabled(rename = "Gas used")]
    gas_used: u64,
    #[tabled(rename = "Hash")]
    hash: String,
}

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Block")]
    block: u64,
    #[tabled(rename = "Hash")]
    hash: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Format a page of blocks and the transactions on it
pub fn format_block_page(page: &BlockPage) -> String {
    if page.blocks.is_empty() {
        return format!(
            "No blocks on page {} (latest block {}).\n",
            page.page, page.latest
        );
    }

    let rows = page.blocks.iter().map(|block| BlockRow {
        number: block.number,
        time: block
            .time()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string()),
        transactions: block.transactions.len(),
        gas_used: block.gas_used,
        hash: short_hash(&block.hash.to_string()),
    });

    let mut output = format!(
        "Page {} (latest block {})\n{}\n",
        page.page,
        page.latest,
        Table::new(rows).with(Style::psql())
    );

    let transactions: Vec<TransactionRow> = page
        .blocks
        .iter()
        .flat_map(|block| {
            block.transactions.iter().map(move |hash| {
                let receipt = page.receipts.get(hash);
                TransactionRow {
                    block: block.number,
                    hash: short_hash(&hash.to_string()),
                    from: receipt
                        .map(|r| r.from.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    to: receipt.map(destination).unwrap_or_else(|| "-".to_string()),
                    status: match receipt {
                        Some(r) if r.success => "ok".to_string(),
                        Some(_) => "reverted".to_string(),
                        None => "unknown".to_string(),
                    },
                }
            })
        })
        .collect();

    if !transactions.is_empty() {
        output.push('\n');
        output.push_str(&Table::new(transactions).with(Style::psql()).to_string());
        output.push('\n');
    }

    output
}

fn destination(receipt: &ReceiptSummary) -> String {
    match (receipt.to, receipt.contract_address) {
        (Some(to), _) => to.to_string(),
        (None, Some(created)) => format!("{} (created)", created),
        (None, None) => "-".to_string(),
    }
}

/// Shorten a 0x-prefixed hash to its first and last six digits
pub fn short_hash(hash: &str) -> String {
    if hash.len() <= 16 {
        return hash.to_string();
    }
    format!("{}..{}", &hash[..8], &hash[hash.len() - 6..])
}
