use yew::prelude::*;
use yew_router::prelude::*;

pub mod common;
mod components;
pub mod hooks;
pub mod settings;
pub mod storage;

use crate::common::toast::ToastProvider;
use components::dashboard::DashboardPage;
use components::layout::Layout;
use components::settings::Settings;

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/settings")]
    Settings,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    log::debug!("Routing to: {:?}", routes);
    match routes {
        Route::Home => html! { <DashboardPage /> },
        Route::Settings => html! { <Layout title="Settings"><Settings /></Layout> },
        Route::NotFound => {
            log::warn!("404 - Route not found");
            html! { <Layout title="404"><h1>{"404 Not Found"}</h1></Layout> }
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <ToastProvider>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </ToastProvider>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    settings::init_settings();

    // Engine events arrive through tracing's `log` feature
    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== Bankboard Frontend Starting ===");
    log::info!("Application settings: {:?}", settings);

    yew::Renderer::<App>::new().render();
}
