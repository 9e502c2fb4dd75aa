use common::{TransactionKind, TransactionRecord, format_amount};
use engine::sources::MockTransactionSource;
use yew::prelude::*;

use crate::common::fetch_hook::use_feed;
use crate::common::fetch_render::FetchRender;

#[function_component(RecentTransactions)]
pub fn recent_transactions() -> Html {
    let (state, refetch) = use_feed(MockTransactionSource, ());
    let show_details = use_state(|| false);

    let toggle_details = {
        let show_details = show_details.clone();
        Callback::from(move |_| show_details.set(!*show_details))
    };

    let render = {
        let show_details = *show_details;
        Callback::from(move |records: Vec<TransactionRecord>| {
            html! {
                <ul class="flex flex-col gap-2">
                    { for records.iter().map(|record| {
                        let (color, sign) = match record.kind {
                            TransactionKind::Deposit => ("text-success", "+"),
                            TransactionKind::Withdrawal => ("text-error", ""),
                        };
                        html! {
                            <li key={record.id} class="flex justify-between items-start border-b border-base-200 pb-1">
                                <div class="flex flex-col">
                                    <span class="font-medium text-sm">{&record.account_name}</span>
                                    if show_details {
                                        <span class="text-xs text-gray-500">{&record.account_number}</span>
                                        <span class="text-xs text-gray-500">{record.date.format("%d.%m.%Y").to_string()}</span>
                                    }
                                </div>
                                <span class={classes!("font-mono", "text-sm", color)}>
                                    {format!("{}{}", sign, format_amount(record.amount))}
                                </span>
                            </li>
                        }
                    }) }
                </ul>
            }
        })
    };

    html! {
        <div class="flex flex-col gap-2 h-full">
            <FetchRender<Vec<TransactionRecord>>
                state={(*state).clone()}
                render={render}
                on_retry={Some(refetch)}
            />
            <button class="btn btn-xs btn-outline self-start" onclick={toggle_details}>
                { if *show_details { "Hide Details" } else { "Show Details" } }
            </button>
        </div>
    }
}
