use std::rc::Rc;

use engine::sources::DataSource;
use gloo_timers::future::TimeoutFuture;
use yew::prelude::*;

use crate::common::toast::ToastContext;
use crate::hooks::FetchState;
use crate::settings::get_settings;

/// Fetches `source` on mount and whenever `deps` change, after the configured
/// feed latency. Failures end up in the state and as an error toast.
#[hook]
pub fn use_feed<D, Deps>(source: D, deps: Deps) -> (UseStateHandle<FetchState<Vec<D::Record>>>, Callback<()>)
where
    D: DataSource + 'static,
    D::Record: 'static,
    Deps: PartialEq + 'static,
{
    let fetch_state = use_state(|| FetchState::Loading);
    let toast_ctx = use_context::<ToastContext>();
    let source = Rc::new(source);

    let refetch = {
        let fetch_state = fetch_state.clone();
        let source = source.clone();

        Callback::from(move |_| {
            let fetch_state = fetch_state.clone();
            let toast_ctx = toast_ctx.clone();
            let source = source.clone();

            fetch_state.set(FetchState::Loading);

            wasm_bindgen_futures::spawn_local(async move {
                let latency = get_settings().feed_latency_ms;
                if latency > 0 {
                    TimeoutFuture::new(latency).await;
                }
                match source.fetch().await {
                    Ok(records) => {
                        log::debug!("Feed returned {} records", records.len());
                        fetch_state.set(FetchState::Success(records));
                    }
                    Err(err) => {
                        let message = err.to_string();
                        log::warn!("Feed failed: {}", message);
                        if let Some(toast_ctx) = &toast_ctx {
                            toast_ctx.show_error(message.clone());
                        }
                        fetch_state.set(FetchState::Error(message));
                    }
                }
            });
        })
    };

    {
        let refetch = refetch.clone();
        use_effect_with(deps, move |_| {
            refetch.emit(());
            || ()
        });
    }

    (fetch_state, refetch)
}
