use common::format_amount;
use rust_decimal::Decimal;
use yew::prelude::*;

struct Shortcut {
    label: &'static str,
    icon: &'static str,
    pending: u32,
}

const SHORTCUTS: [Shortcut; 3] = [
    Shortcut { label: "Mail", icon: "fas fa-envelope", pending: 3 },
    Shortcut { label: "GPP", icon: "fas fa-globe", pending: 0 },
    Shortcut { label: "Overview", icon: "fas fa-chart-line", pending: 0 },
];

const QUICK_ACCESS: [(&str, &str); 3] = [
    ("Help", "/help"),
    ("About Us", "/about"),
    ("Contact Support", "/contact"),
];

#[function_component(AccountSummary)]
pub fn account_summary() -> Html {
    html! {
        <div class="flex flex-col gap-3 h-full">
            <div class="flex items-center gap-3 p-3 rounded-lg bg-gradient-to-r from-blue-600 to-blue-400 text-white shadow">
                <div class="avatar placeholder">
                    <div class="w-14 rounded-full border-2 border-white bg-blue-800">
                        <i class="fas fa-user text-xl"></i>
                    </div>
                </div>
                <div class="flex flex-col">
                    <span class="font-bold text-lg">{"Account Holder"}</span>
                    <span class="text-xs opacity-80">{"Company name"}</span>
                    <span class="text-xs">
                        {format!("Account: 123456789 · Balance: ${}", format_amount(Decimal::from(10_000)))}
                    </span>
                </div>
            </div>

            <div class="flex flex-col gap-2">
                { for SHORTCUTS.iter().map(|s| html! {
                    <div class="indicator w-full">
                        if s.pending > 0 {
                            <span class="indicator-item badge badge-error badge-sm">{s.pending}</span>
                        }
                        <button class="btn btn-sm w-full justify-start">
                            <i class={s.icon}></i>{" "}{s.label}
                        </button>
                    </div>
                }) }
            </div>

            <div>
                <p class="font-semibold text-sm mb-1">{"Quick Access"}</p>
                <ul class="text-sm">
                    { for QUICK_ACCESS.iter().map(|(label, href)| html! {
                        <li><a class="link link-primary" href={*href} target="_blank">{*label}</a></li>
                    }) }
                </ul>
            </div>
        </div>
    }
}
