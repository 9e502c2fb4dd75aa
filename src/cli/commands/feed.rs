use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use common::{QuoteKind, TransactionKind, format_amount, format_change, share_percent};
use engine::sources::{
    DataSource, MockBalanceSource, MockNewsSource, MockTopicSource, MockTransactionSource, filter_news, news_topics,
    total_balance,
};
use tracing::debug;

use crate::cli::FeedKind;

/// Waits like a remote source would, then fetches.
async fn fetch<D: DataSource>(source: &D, latency_ms: u64) -> Result<Vec<D::Record>> {
    if latency_ms > 0 {
        tokio::time::sleep(Duration::from_millis(latency_ms)).await;
    }
    let records = source.fetch().await?;
    debug!(count = records.len(), "Feed fetched");
    Ok(records)
}

pub async fn run(kind: FeedKind, latency_ms: u64, out: &mut dyn Write) -> Result<()> {
    match kind {
        FeedKind::News { topic } => {
            let items = fetch(&MockNewsSource, latency_ms).await?;
            writeln!(out, "Topics: {}", news_topics(&items).join(", "))?;
            for item in filter_news(&items, &topic) {
                writeln!(out, "{}  {:<20} {}", item.date, item.source, item.title)?;
            }
        }
        FeedKind::Topics { names } => {
            let names = if names.is_empty() {
                MockTopicSource::default_topics()
            } else {
                names
            };
            let mut source = MockTopicSource::default();
            for name in &names {
                source.add_topic(name);
            }
            for quote in fetch(&source, latency_ms).await? {
                let kind = match quote.kind {
                    QuoteKind::Stock => "stock",
                    QuoteKind::Currency => "currency",
                };
                writeln!(
                    out,
                    "{:<10} {:<8} {:>12} {:>8}",
                    quote.name,
                    kind,
                    format_amount(quote.value),
                    format_change(quote.change)
                )?;
            }
        }
        FeedKind::Balance => {
            let slices = fetch(&MockBalanceSource, latency_ms).await?;
            let total = total_balance(&slices);
            for slice in &slices {
                writeln!(
                    out,
                    "{:<20} {:>16} {:>6}%",
                    slice.name,
                    format_amount(slice.value),
                    share_percent(slice.value, total).to_string()
                )?;
            }
            writeln!(out, "{:<20} {:>16}", "Total", format_amount(total))?;
        }
        FeedKind::Transactions => {
            for record in fetch(&MockTransactionSource, latency_ms).await? {
                let sign = match record.kind {
                    TransactionKind::Deposit => "+",
                    TransactionKind::Withdrawal => "",
                };
                writeln!(
                    out,
                    "{}  {:<26} {:<30} {}{}",
                    record.date,
                    record.account_name,
                    record.account_number,
                    sign,
                    format_amount(record.amount)
                )?;
            }
        }
    }
    Ok(())
}
