use web_sys::{HtmlInputElement, HtmlSelectElement, window};
use yew::prelude::*;

use crate::common::toast::ToastContext;
use crate::settings::{AppSettings, get_settings, parse_level, update_settings};

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[function_component(Settings)]
pub fn settings() -> Html {
    let current = get_settings();
    let toast_ctx = use_context::<ToastContext>();

    let columns_ref = use_node_ref();
    let latency_ref = use_node_ref();
    let level_ref = use_node_ref();
    let autosave_ref = use_node_ref();
    let overlap_ref = use_node_ref();

    let on_save = {
        let columns_ref = columns_ref.clone();
        let latency_ref = latency_ref.clone();
        let level_ref = level_ref.clone();
        let autosave_ref = autosave_ref.clone();
        let overlap_ref = overlap_ref.clone();

        Callback::from(move |_: MouseEvent| {
            let mut next: AppSettings = get_settings();
            if let Some(input) = columns_ref.cast::<HtmlInputElement>() {
                match input.value().parse::<u32>() {
                    Ok(columns) if columns > 0 => next.grid_columns = columns,
                    _ => {
                        if let Some(toast) = &toast_ctx {
                            toast.show_warning("Columns must be a positive number".to_string());
                        }
                        return;
                    }
                }
            }
            if let Some(input) = latency_ref.cast::<HtmlInputElement>() {
                next.feed_latency_ms = input.value().parse().unwrap_or(next.feed_latency_ms);
            }
            if let Some(select) = level_ref.cast::<HtmlSelectElement>() {
                next.log_level = parse_level(&select.value()).unwrap_or(next.log_level);
            }
            if let Some(input) = autosave_ref.cast::<HtmlInputElement>() {
                next.autosave_layout = input.checked();
            }
            if let Some(input) = overlap_ref.cast::<HtmlInputElement>() {
                next.accept_overlap = input.checked();
            }

            if let Err(err) = next.save_to_storage() {
                log::error!("Failed to store settings: {:?}", err);
                if let Some(toast) = &toast_ctx {
                    toast.show_error("Settings could not be saved".to_string());
                }
                return;
            }
            log::info!("Settings saved: {:?}", next);
            update_settings(|settings| *settings = next);

            // The dashboard reads its options once at startup
            if let Some(window) = window() {
                let _ = window.location().reload();
            }
        })
    };

    let current_level = current.log_level.as_str().to_lowercase();

    html! {
        <div class="grid grid-cols-1 md:grid-cols-2 gap-8">
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">{"Dashboard"}</h2>
                    <div class="form-control w-full">
                        <label class="label"><span class="label-text">{"Grid columns"}</span></label>
                        <input ref={columns_ref} type="number" min="1" class="input input-bordered w-full"
                            value={current.grid_columns.to_string()} />
                    </div>
                    <label class="label cursor-pointer">
                        <span class="label-text">{"Save layout changes automatically"}</span>
                        <input ref={autosave_ref} type="checkbox" class="toggle" checked={current.autosave_layout} />
                    </label>
                    <label class="label cursor-pointer">
                        <span class="label-text">{"Allow overlapping widgets when a row is full"}</span>
                        <input ref={overlap_ref} type="checkbox" class="toggle" checked={current.accept_overlap} />
                    </label>
                </div>
            </div>
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">{"Diagnostics"}</h2>
                    <div class="form-control w-full">
                        <label class="label"><span class="label-text">{"Log level"}</span></label>
                        <select ref={level_ref} class="select select-bordered w-full">
                            { for LOG_LEVELS.iter().map(|level| html! {
                                <option value={*level} selected={*level == current_level}>{*level}</option>
                            }) }
                        </select>
                    </div>
                    <div class="form-control w-full">
                        <label class="label"><span class="label-text">{"Simulated feed latency (ms)"}</span></label>
                        <input ref={latency_ref} type="number" min="0" class="input input-bordered w-full"
                            value={current.feed_latency_ms.to_string()} />
                    </div>
                    <div class="card-actions justify-end mt-4">
                        <button class="btn btn-primary" onclick={on_save}>{"Save & Reload"}</button>
                    </div>
                </div>
            </div>
        </div>
    }
}
