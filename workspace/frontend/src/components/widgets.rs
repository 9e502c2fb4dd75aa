//! Content of the dashboard cards, keyed by widget id.
//!
//! The grid only knows ids and rectangles; [`render_widget`] is the single
//! place that maps an id to what is drawn inside its card.

mod account_summary;
mod balance;
mod market;
mod news;
mod topics;
mod transactions;

use common::WidgetId;
use yew::prelude::*;

use account_summary::AccountSummary;
use balance::TotalBalance;
use market::{CurrencyTracker, InvestmentPortfolio, StockMarket};
use news::FinancialNews;
use topics::WatchedTopics;
use transactions::RecentTransactions;

pub fn render_widget(id: &WidgetId) -> Html {
    match id.as_str() {
        "w1" => html! { <AccountSummary /> },
        "w2" => html! { <RecentTransactions /> },
        "w3" => html! { <CurrencyTracker /> },
        "w4" => html! { <StockMarket /> },
        "w5" => html! { <InvestmentPortfolio /> },
        "w6" => html! { <TotalBalance /> },
        "w7" => html! { <FinancialNews /> },
        "w8" => html! { <WatchedTopics /> },
        other => {
            log::warn!("No content registered for widget {}", other);
            html! {
                <div class="flex items-center justify-center h-full text-sm text-gray-400">
                    {format!("No content for {}", other)}
                </div>
            }
        }
    }
}
