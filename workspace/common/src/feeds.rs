//! Records produced by the dashboard's asynchronous data sources.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A headline shown by the news widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub source: String,
    pub url: String,
    pub date: NaiveDate,
    pub topics: Vec<String>,
}

impl NewsItem {
    pub fn has_any_topic(&self, topics: &[String]) -> bool {
        self.topics.iter().any(|topic| topics.contains(topic))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteKind {
    Stock,
    Currency,
}

/// Latest value of a watched topic (a ticker or a currency pair).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicQuote {
    #[serde(rename = "type")]
    pub kind: QuoteKind,
    pub name: String,
    pub value: Decimal,
    /// Percentage change, signed.
    pub change: Decimal,
}

/// One product category in the total balance breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSlice {
    pub name: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

/// A booking shown by the recent transactions widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: u32,
    pub account_name: String,
    /// IBAN of the booked account.
    pub account_number: String,
    /// Negative for withdrawals.
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub date: NaiveDate,
}
