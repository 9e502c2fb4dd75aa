//! Common data types shared between the layout engine, the CLI and the
//! frontend. These structs define the shapes of catalog entries, persisted
//! layout entries and the records produced by the dashboard feeds, so every
//! consumer (de)serializes them the same way.

mod catalog;
mod feeds;
mod format;
mod layout;

pub use catalog::{Profile, ProfileId, SizeClass, SizeConstraints, UnknownSizeClass, Widget, WidgetId};
pub use feeds::{BalanceSlice, NewsItem, QuoteKind, TopicQuote, TransactionKind, TransactionRecord};
pub use format::{format_amount, format_change, share_percent};
pub use layout::LayoutEntry;

/// Number of columns the dashboard grid uses unless configured otherwise.
pub const DEFAULT_COLUMNS: u32 = 12;
