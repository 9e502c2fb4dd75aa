use common::{QuoteKind, TopicQuote, format_amount, format_change};
use engine::sources::MockTopicSource;
use rust_decimal::Decimal;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::common::fetch_hook::use_feed;
use crate::common::fetch_render::FetchRender;

/// The user's watch list with live quotes.
#[function_component(WatchedTopics)]
pub fn watched_topics() -> Html {
    let topics = use_state(MockTopicSource::default_topics);
    let input_ref = use_node_ref();
    let (state, refetch) = use_feed(MockTopicSource::new((*topics).clone()), (*topics).clone());

    let on_add = {
        let topics = topics.clone();
        let input_ref = input_ref.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(input) = input_ref.cast::<HtmlInputElement>() else {
                return;
            };
            let mut source = MockTopicSource::new((*topics).clone());
            if source.add_topic(&input.value()) {
                topics.set(source.topics().to_vec());
                input.set_value("");
            }
        })
    };

    let on_remove = {
        let topics = topics.clone();
        Callback::from(move |topic: String| {
            let mut source = MockTopicSource::new((*topics).clone());
            if source.remove_topic(&topic) {
                topics.set(source.topics().to_vec());
            }
        })
    };

    let render = Callback::from(move |quotes: Vec<TopicQuote>| {
        html! {
            <div class="flex flex-wrap gap-2">
                { for quotes.into_iter().map(|quote| {
                    let on_remove = on_remove.clone();
                    let name = quote.name.clone();
                    let color = if quote.change >= Decimal::ZERO { "text-success" } else { "text-error" };
                    let kind = match quote.kind {
                        QuoteKind::Stock => "Stock",
                        QuoteKind::Currency => "Currency",
                    };
                    html! {
                        <div key={quote.name.clone()} class="flex items-center gap-2 bg-base-200 rounded-md px-2 py-1">
                            <div class="flex flex-col">
                                <span class="font-bold text-sm">{&quote.name}</span>
                                <span class="text-xs">{kind}</span>
                            </div>
                            <div class="flex flex-col items-end">
                                <span class="font-mono text-sm">{format_amount(quote.value)}</span>
                                <span class={classes!("text-xs", color)}>{format_change(quote.change)}</span>
                            </div>
                            <button
                                class="btn btn-ghost btn-xs btn-circle"
                                aria-label="Remove topic"
                                onclick={Callback::from(move |_| on_remove.emit(name.clone()))}
                            >
                                <i class="fas fa-times"></i>
                            </button>
                        </div>
                    }
                }) }
            </div>
        }
    });

    html! {
        <div class="flex flex-col gap-3">
            <div class="join w-full">
                <input ref={input_ref} type="text" placeholder="Search topics..." class="input input-sm input-bordered join-item flex-1" />
                <button class="btn btn-sm btn-primary join-item" onclick={on_add}>
                    <i class="fas fa-search"></i>{" Add"}
                </button>
            </div>
            if topics.is_empty() {
                <p class="text-sm text-gray-500">{"No topics watched."}</p>
            } else {
                <FetchRender<Vec<TopicQuote>> state={(*state).clone()} render={render} on_retry={Some(refetch)} />
            }
        </div>
    }
}
