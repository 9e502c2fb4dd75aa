use common::{ProfileId, WidgetId};
use yew::prelude::*;

#[derive(Clone, PartialEq)]
pub struct ProfileSwitch {
    pub id: ProfileId,
    pub name: String,
    pub fixed: bool,
    pub active: bool,
}

#[derive(Properties, PartialEq)]
pub struct ProfileTogglesProps {
    pub profiles: Vec<ProfileSwitch>,
    pub on_toggle: Callback<ProfileId>,
}

/// Profile switches shown in the navbar. The fixed profile is always on.
#[function_component(ProfileToggles)]
pub fn profile_toggles(props: &ProfileTogglesProps) -> Html {
    html! {
        <div class="flex items-center gap-4">
            { for props.profiles.iter().map(|profile| {
                let on_change = {
                    let on_toggle = props.on_toggle.clone();
                    let id = profile.id.clone();
                    Callback::from(move |_: Event| on_toggle.emit(id.clone()))
                };
                html! {
                    <label key={profile.id.as_str().to_string()} class="label cursor-pointer gap-2">
                        <span class="label-text text-sm">{&profile.name}</span>
                        <input
                            type="checkbox"
                            class="toggle toggle-primary toggle-sm"
                            checked={profile.active}
                            disabled={profile.fixed}
                            onchange={on_change}
                        />
                    </label>
                }
            }) }
        </div>
    }
}

#[derive(Clone, PartialEq)]
pub struct WidgetSwitch {
    pub id: WidgetId,
    pub name: String,
    /// Base widgets cannot be hidden
    pub locked: bool,
    pub active: bool,
    /// Active but waiting for one of its profiles
    pub pending: bool,
}

#[derive(Properties, PartialEq)]
pub struct WidgetTogglesProps {
    pub widgets: Vec<WidgetSwitch>,
    pub on_toggle: Callback<WidgetId>,
}

#[function_component(WidgetToggles)]
pub fn widget_toggles(props: &WidgetTogglesProps) -> Html {
    html! {
        <div class="flex flex-wrap gap-2">
            { for props.widgets.iter().map(|widget| {
                let onclick = {
                    let on_toggle = props.on_toggle.clone();
                    let id = widget.id.clone();
                    Callback::from(move |_| on_toggle.emit(id.clone()))
                };
                let class = match (widget.active, widget.pending) {
                    (true, false) => "btn-primary",
                    (true, true) => "btn-warning",
                    (false, _) => "btn-outline",
                };
                let title = if widget.pending {
                    "Shown once one of its profiles is enabled"
                } else {
                    ""
                };
                html! {
                    <button
                        key={widget.id.as_str().to_string()}
                        class={classes!("btn", "btn-xs", class)}
                        disabled={widget.locked}
                        {title}
                        {onclick}
                    >
                        {&widget.name}
                    </button>
                }
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LayoutControlsProps {
    pub autosave: bool,
    pub on_save: Callback<()>,
    pub on_reset: Callback<()>,
}

#[function_component(LayoutControls)]
pub fn layout_controls(props: &LayoutControlsProps) -> Html {
    let on_save = props.on_save.reform(|_: MouseEvent| ());
    let on_reset = props.on_reset.reform(|_: MouseEvent| ());

    html! {
        <div class="flex items-center gap-2">
            if props.autosave {
                <span class="text-xs text-gray-500">{"Changes are saved automatically"}</span>
            } else {
                <button class="btn btn-sm btn-primary" onclick={on_save}>
                    <i class="fas fa-save"></i>{" Save layout"}
                </button>
            }
            <button class="btn btn-sm btn-outline" onclick={on_reset}>
                <i class="fas fa-undo"></i>{" Reset layout"}
            </button>
        </div>
    }
}
