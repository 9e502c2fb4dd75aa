//! Asynchronous data sources feeding the dashboard widgets.
//!
//! The engine never talks to a backend; the mock sources below return fixed
//! fixture data. Simulated latency, retries and backoff are the caller's
//! business, so a production source is free to fail.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use chrono::NaiveDate;
use common::{BalanceSlice, NewsItem, QuoteKind, TopicQuote, TransactionKind, TransactionRecord};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::error::Result;

/// Something that eventually yields a batch of records.
#[async_trait]
pub trait DataSource: Send + Sync {
    type Record: Send;

    async fn fetch(&self) -> Result<Vec<Self::Record>>;
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn topics(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MockNewsSource;

#[async_trait]
impl DataSource for MockNewsSource {
    type Record = NewsItem;

    #[instrument(skip(self))]
    async fn fetch(&self) -> Result<Vec<NewsItem>> {
        let items = vec![
            NewsItem {
                id: "1".to_string(),
                title: "Federal Reserve Announces Interest Rate Decision".to_string(),
                source: "Financial Times".to_string(),
                url: "https://www.ft.com".to_string(),
                date: date(2024, 10, 20),
                topics: topics(&["Monetary Policy", "Economy"]),
            },
            NewsItem {
                id: "2".to_string(),
                title: "Tech Giant Reports Record Quarterly Earnings".to_string(),
                source: "Wall Street Journal".to_string(),
                url: "https://www.wsj.com".to_string(),
                date: date(2024, 10, 19),
                topics: topics(&["Technology", "Earnings"]),
            },
            NewsItem {
                id: "3".to_string(),
                title: "Global Markets React to Geopolitical Tensions".to_string(),
                source: "Bloomberg".to_string(),
                url: "https://www.bloomberg.com".to_string(),
                date: date(2024, 10, 18),
                topics: topics(&["Global Markets", "Geopolitics"]),
            },
            NewsItem {
                id: "4".to_string(),
                title: "New Regulations Proposed for Cryptocurrency Industry".to_string(),
                source: "Reuters".to_string(),
                url: "https://www.reuters.com".to_string(),
                date: date(2024, 10, 17),
                topics: topics(&["Cryptocurrency", "Regulation"]),
            },
            NewsItem {
                id: "5".to_string(),
                title: "Major Merger Announced in Banking Sector".to_string(),
                source: "CNBC".to_string(),
                url: "https://www.cnbc.com".to_string(),
                date: date(2024, 10, 16),
                topics: topics(&["Banking", "M&A"]),
            },
        ];
        debug!(count = items.len(), "Fetched news");
        Ok(items)
    }
}

/// Breakdown of the customer's total balance per product family.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockBalanceSource;

#[async_trait]
impl DataSource for MockBalanceSource {
    type Record = BalanceSlice;

    async fn fetch(&self) -> Result<Vec<BalanceSlice>> {
        let slice = |name: &str, cents: i64| BalanceSlice {
            name: name.to_string(),
            value: Decimal::new(cents, 2),
        };
        Ok(vec![
            slice("Accounts", 549_735_612),
            slice("Loans", 172_454_605),
            slice("Guarantees", 49_735_612),
            slice("Investment Products", 735_612),
            slice("Other Accounts", 956_412),
            slice("Other Account", 495_424),
        ])
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MockTransactionSource;

#[async_trait]
impl DataSource for MockTransactionSource {
    type Record = TransactionRecord;

    async fn fetch(&self) -> Result<Vec<TransactionRecord>> {
        let record = |id: u32, account_name: &str, account_number: &str, amount: i64, day: u32| TransactionRecord {
            id,
            account_name: account_name.to_string(),
            account_number: account_number.to_string(),
            amount: Decimal::from(amount),
            kind: if amount < 0 {
                TransactionKind::Withdrawal
            } else {
                TransactionKind::Deposit
            },
            date: date(2024, 10, day),
        };
        Ok(vec![
            record(1, "Premium Business Account", "DE99 5004 0000 1122 3344 55", 25_000, 20),
            record(2, "Savings Account", "DE22 5004 0000 1122 3344 56", -200, 19),
            record(3, "Investment Account", "DE33 5004 0000 1122 3344 57", 150, 18),
        ])
    }
}

/// Quotes for a user-maintained watch list.
#[derive(Debug, Clone, Default)]
pub struct MockTopicSource {
    topics: Vec<String>,
}

impl MockTopicSource {
    pub fn new(topics: Vec<String>) -> Self {
        Self { topics }
    }

    /// The watch list a new user starts with.
    pub fn default_topics() -> Vec<String> {
        topics(&["AAPL", "GOOGL", "USD/EUR"])
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    /// Adds a topic unless it is blank or already watched.
    pub fn add_topic(&mut self, topic: &str) -> bool {
        let topic = topic.trim();
        if topic.is_empty() || self.topics.iter().any(|t| t == topic) {
            return false;
        }
        self.topics.push(topic.to_string());
        true
    }

    pub fn remove_topic(&mut self, topic: &str) -> bool {
        let before = self.topics.len();
        self.topics.retain(|t| t != topic);
        self.topics.len() != before
    }
}

#[async_trait]
impl DataSource for MockTopicSource {
    type Record = TopicQuote;

    async fn fetch(&self) -> Result<Vec<TopicQuote>> {
        Ok(self.topics.iter().map(|t| quote_for(t)).collect())
    }
}

/// Deterministic quote for a topic. Pairs like `USD/EUR` are currencies.
pub fn quote_for(topic: &str) -> TopicQuote {
    let mut hasher = DefaultHasher::new();
    topic.hash(&mut hasher);
    let seed = hasher.finish();

    TopicQuote {
        kind: if topic.contains('/') {
            QuoteKind::Currency
        } else {
            QuoteKind::Stock
        },
        name: topic.to_string(),
        value: Decimal::new((seed % 100_000) as i64, 2),
        change: Decimal::new(((seed / 100_000) % 1_000) as i64 - 500, 2),
    }
}

/// Distinct topics across `items`, in first-seen order.
pub fn news_topics(items: &[NewsItem]) -> Vec<String> {
    let mut all: Vec<String> = Vec::new();
    for topic in items.iter().flat_map(|item| item.topics.iter()) {
        if !all.contains(topic) {
            all.push(topic.clone());
        }
    }
    all
}

/// News matching any selected topic; an empty selection keeps everything.
pub fn filter_news(items: &[NewsItem], selected: &[String]) -> Vec<NewsItem> {
    if selected.is_empty() {
        return items.to_vec();
    }
    items.iter().filter(|item| item.has_any_topic(selected)).cloned().collect()
}

pub fn total_balance(slices: &[BalanceSlice]) -> Decimal {
    slices.iter().map(|s| s.value).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_news_source_returns_fixture() {
        let items = MockNewsSource.fetch().await.unwrap();
        assert_eq!(items.len(), 5);
        assert_eq!(items[0].source, "Financial Times");
        assert_eq!(news_topics(&items).len(), 10);
    }

    #[tokio::test]
    async fn test_filter_news_by_topic() {
        let items = MockNewsSource.fetch().await.unwrap();

        assert_eq!(filter_news(&items, &[]).len(), 5);

        let selected = vec!["Banking".to_string(), "Economy".to_string()];
        let ids: Vec<_> = filter_news(&items, &selected).into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["1", "5"]);
    }

    #[tokio::test]
    async fn test_transactions_are_classified_by_sign() {
        let records = MockTransactionSource.fetch().await.unwrap();
        assert_eq!(records[1].kind, TransactionKind::Withdrawal);
        assert_eq!(records[1].amount, Decimal::from(-200));
        assert_eq!(records[0].kind, TransactionKind::Deposit);
    }

    #[tokio::test]
    async fn test_balance_total() {
        let slices = MockBalanceSource.fetch().await.unwrap();
        assert_eq!(total_balance(&slices), Decimal::new(774_113_277, 2));
    }

    #[tokio::test]
    async fn test_topic_source_quotes_watch_list() {
        let mut source = MockTopicSource::new(MockTopicSource::default_topics());
        assert!(source.add_topic(" TSLA "));
        assert!(!source.add_topic("AAPL"));
        assert!(!source.add_topic("   "));
        assert!(source.remove_topic("GOOGL"));

        let quotes = source.fetch().await.unwrap();
        let names: Vec<_> = quotes.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names, vec!["AAPL", "USD/EUR", "TSLA"]);
        assert_eq!(quotes[1].kind, QuoteKind::Currency);
        assert_eq!(quotes[0].kind, QuoteKind::Stock);
    }

    #[test]
    fn test_quote_is_deterministic_and_bounded() {
        let a = quote_for("AAPL");
        assert_eq!(a, quote_for("AAPL"));
        assert!(a.value >= Decimal::ZERO && a.value < Decimal::from(1000));
        assert!(a.change >= Decimal::from(-5) && a.change < Decimal::from(5));
    }
}
