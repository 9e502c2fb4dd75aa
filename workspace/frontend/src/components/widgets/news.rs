use common::NewsItem;
use engine::sources::{MockNewsSource, filter_news, news_topics};
use yew::prelude::*;

use crate::common::fetch_hook::use_feed;
use crate::common::fetch_render::FetchRender;

#[function_component(FinancialNews)]
pub fn financial_news() -> Html {
    let (state, refetch) = use_feed(MockNewsSource, ());
    let selected = use_state(Vec::<String>::new);

    let on_topic = {
        let selected = selected.clone();
        Callback::from(move |topic: String| {
            let mut next = (*selected).clone();
            if let Some(pos) = next.iter().position(|t| *t == topic) {
                next.remove(pos);
            } else {
                next.push(topic);
            }
            selected.set(next);
        })
    };

    let render = {
        let selected = (*selected).clone();
        Callback::from(move |items: Vec<NewsItem>| {
            let topics = news_topics(&items);
            let shown = filter_news(&items, &selected);
            html! {
                <div class="flex flex-col gap-2">
                    <div class="flex flex-wrap gap-1">
                        { for topics.into_iter().map(|topic| {
                            let active = selected.contains(&topic);
                            let on_click = {
                                let on_topic = on_topic.clone();
                                let topic = topic.clone();
                                Callback::from(move |_| on_topic.emit(topic.clone()))
                            };
                            html! {
                                <button
                                    class={classes!("badge", "badge-sm", "cursor-pointer", if active { "badge-primary" } else { "badge-ghost" })}
                                    onclick={on_click}
                                >
                                    {topic}
                                </button>
                            }
                        }) }
                    </div>
                    if shown.is_empty() {
                        <p class="text-sm text-gray-500">{"No news for the selected topics."}</p>
                    }
                    <ul class="flex flex-col gap-2">
                        { for shown.iter().map(|item| html! {
                            <li key={item.id.clone()} class="border-b border-base-200 pb-1">
                                <a class="link link-hover font-medium text-sm" href={item.url.clone()} target="_blank">
                                    {&item.title}
                                </a>
                                <div class="flex gap-2 text-xs text-gray-500">
                                    <span>{&item.source}</span>
                                    <span>{item.date.format("%b %d, %Y").to_string()}</span>
                                    { for item.topics.iter().take(2).map(|t| html! {
                                        <span class="badge badge-outline badge-xs">{t}</span>
                                    }) }
                                </div>
                            </li>
                        }) }
                    </ul>
                </div>
            }
        })
    };

    html! {
        <FetchRender<Vec<NewsItem>> state={(*state).clone()} render={render} on_retry={Some(refetch)} />
    }
}
