use common::{TopicQuote, format_amount, format_change};
use engine::sources::MockTopicSource;
use rust_decimal::Decimal;
use yew::prelude::*;

use crate::common::fetch_hook::use_feed;
use crate::common::fetch_render::FetchRender;

#[derive(Properties, PartialEq)]
pub struct QuoteTableProps {
    pub symbols: Vec<String>,
    #[prop_or_default]
    pub caption: Option<String>,
}

/// Quotes for a fixed list of symbols.
#[function_component(QuoteTable)]
pub fn quote_table(props: &QuoteTableProps) -> Html {
    let (state, refetch) = use_feed(MockTopicSource::new(props.symbols.clone()), props.symbols.clone());

    let render = Callback::from(|quotes: Vec<TopicQuote>| {
        html! {
            <table class="table table-xs">
                <tbody>
                    { for quotes.iter().map(|quote| {
                        let color = if quote.change >= Decimal::ZERO { "text-success" } else { "text-error" };
                        html! {
                            <tr key={quote.name.clone()}>
                                <td class="font-semibold">{&quote.name}</td>
                                <td class="text-right font-mono">{format_amount(quote.value)}</td>
                                <td class={classes!("text-right", "font-mono", color)}>{format_change(quote.change)}</td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
        }
    });

    html! {
        <div class="flex flex-col gap-1">
            if let Some(caption) = &props.caption {
                <p class="text-xs text-gray-500">{caption}</p>
            }
            <FetchRender<Vec<TopicQuote>> state={(*state).clone()} render={render} on_retry={Some(refetch)} />
        </div>
    }
}

fn symbols(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[function_component(CurrencyTracker)]
pub fn currency_tracker() -> Html {
    html! { <QuoteTable symbols={symbols(&["USD/EUR", "EUR/GBP", "USD/JPY", "EUR/CHF"])} /> }
}

#[function_component(StockMarket)]
pub fn stock_market() -> Html {
    html! { <QuoteTable symbols={symbols(&["AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "TSLA"])} /> }
}

#[function_component(InvestmentPortfolio)]
pub fn investment_portfolio() -> Html {
    html! {
        <QuoteTable
            symbols={symbols(&["VWRL", "IWDA", "AGGH", "EUNL"])}
            caption={Some("Funds held in the investment account".to_string())}
        />
    }
}
