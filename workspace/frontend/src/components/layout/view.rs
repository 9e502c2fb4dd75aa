use yew::prelude::*;

use super::navbar::Navbar;
use super::sidebar::Sidebar;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub children: Children,
    pub title: String,
    /// Extra controls rendered on the right side of the navbar
    #[prop_or_default]
    pub actions: Html,
}

#[function_component(Layout)]
pub fn layout(props: &Props) -> Html {
    html! {
        <div class="drawer lg:drawer-open">
            <input id="bankboard-drawer" type="checkbox" class="drawer-toggle" />
            <div class="drawer-content flex flex-col min-h-screen bg-base-200">
                <Navbar title={props.title.clone()} actions={props.actions.clone()} />
                <main class="flex-1 p-6 overflow-y-auto">
                    { for props.children.iter() }
                </main>
            </div>
            <Sidebar />
        </div>
    }
}
