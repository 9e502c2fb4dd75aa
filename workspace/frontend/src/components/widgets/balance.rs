use common::{BalanceSlice, format_amount, share_percent};
use engine::sources::{MockBalanceSource, total_balance};
use rust_decimal::prelude::ToPrimitive;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use yew::prelude::*;

use crate::common::fetch_hook::use_feed;
use crate::common::fetch_render::FetchRender;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly, js_name = newPlot)]
    fn new_plot(div_id: &str, data: JsValue, layout: JsValue, config: JsValue);
}

const COLORS: [&str; 6] = ["#2563eb", "#f97316", "#16a34a", "#a855f7", "#eab308", "#64748b"];

#[derive(Properties, PartialEq)]
struct DonutProps {
    slices: Vec<BalanceSlice>,
}

#[function_component(BalanceDonut)]
fn balance_donut(props: &DonutProps) -> Html {
    let chart_ref = use_node_ref();

    use_effect_with((chart_ref.clone(), props.slices.clone()), move |(chart_ref, slices)| {
        if let Some(element) = chart_ref.cast::<Element>() {
            let labels: Vec<&str> = slices.iter().map(|s| s.name.as_str()).collect();
            let values: Vec<f64> = slices.iter().map(|s| s.value.to_f64().unwrap_or(0.0)).collect();

            let trace = serde_json::json!([{
                "labels": labels,
                "values": values,
                "type": "pie",
                "hole": 0.6,
                "textinfo": "none",
                "marker": {"colors": COLORS},
                "sort": false
            }]);
            let layout = serde_json::json!({
                "margin": {"t": 0, "r": 0, "l": 0, "b": 0},
                "paper_bgcolor": "rgba(0,0,0,0)",
                "showlegend": false
            });
            let config = serde_json::json!({"responsive": true, "displayModeBar": false});

            let div_id = element.id();
            match (
                serde_wasm_bindgen::to_value(&trace),
                serde_wasm_bindgen::to_value(&layout),
                serde_wasm_bindgen::to_value(&config),
            ) {
                (Ok(trace), Ok(layout), Ok(config)) if !div_id.is_empty() => {
                    new_plot(&div_id, trace, layout, config);
                }
                _ => log::warn!("Could not render balance chart"),
            }
        }
        || ()
    });

    html! {
        <div ref={chart_ref} id="chart-total-balance" class="chart-container" style="height: 160px;"></div>
    }
}

#[function_component(TotalBalance)]
pub fn total_balance_widget() -> Html {
    let (state, refetch) = use_feed(MockBalanceSource, ());

    let render = Callback::from(|slices: Vec<BalanceSlice>| {
        let total = total_balance(&slices);
        html! {
            <div class="flex flex-col gap-2">
                <div>
                    <p class="text-xs text-gray-500">{"Total balance"}</p>
                    <p class="text-2xl font-bold font-mono">{format_amount(total)}</p>
                </div>
                <div class="flex gap-4 items-center">
                    <div class="w-1/2"><BalanceDonut slices={slices.clone()} /></div>
                    <ul class="w-1/2 text-xs flex flex-col gap-1">
                        { for slices.iter().zip(COLORS.iter().cycle()).map(|(slice, color)| html! {
                            <li class="flex items-center gap-2">
                                <span class="w-3 h-3 rounded-sm inline-block" style={format!("background: {}", color)}></span>
                                <span class="flex-1">{&slice.name}</span>
                                <span class="font-mono">{format!("{}%", share_percent(slice.value, total))}</span>
                            </li>
                        }) }
                    </ul>
                </div>
            </div>
        }
    });

    html! {
        <FetchRender<Vec<BalanceSlice>>
            state={(*state).clone()}
            render={render}
            on_retry={Some(refetch)}
            loading_text={Some("Loading balances".to_string())}
        />
    }
}
