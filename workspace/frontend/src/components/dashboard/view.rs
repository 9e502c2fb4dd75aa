use std::cell::RefCell;

use common::{LayoutEntry, ProfileId, WidgetId};
use engine::{Catalog, Dashboard, Transition};
use yew::prelude::*;

use super::grid::{Card, GridView};
use super::toolbar::{LayoutControls, ProfileSwitch, ProfileToggles, WidgetSwitch, WidgetToggles};
use crate::common::toast::ToastContext;
use crate::components::layout::Layout;
use crate::settings::get_settings;
use crate::storage::LocalStorage;

type Board = Dashboard<LocalStorage>;

/// Every user action the dashboard page reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    ToggleProfile(ProfileId),
    ToggleWidget(WidgetId),
    ReplaceLayout(Vec<LayoutEntry>),
    Save,
    Reset,
}

fn log_transition(action: &str, transition: &Transition) {
    if transition.changed {
        log::info!(
            "{}: added {:?}, removed {:?}",
            action,
            transition.added,
            transition.removed
        );
    }
}

fn apply(board: &mut Board, action: DashboardAction, toast: Option<&ToastContext>) {
    let result = match action {
        DashboardAction::ToggleProfile(id) => board
            .toggle_profile(&id)
            .map(|t| log_transition("Profile toggled", &t)),
        DashboardAction::ToggleWidget(id) => board
            .toggle_widget(&id)
            .map(|t| log_transition("Widget toggled", &t)),
        DashboardAction::ReplaceLayout(entries) => {
            board.replace_layout(entries);
            Ok(())
        }
        DashboardAction::Save => {
            if board.save_layout() {
                if let Some(toast) = toast {
                    toast.show_success("Layout saved".to_string());
                }
            }
            Ok(())
        }
        DashboardAction::Reset => {
            log_transition("Layout reset", &board.reset_layout());
            if let Some(toast) = toast {
                toast.show_info("Layout reset to defaults".to_string());
            }
            Ok(())
        }
    };

    if let Err(err) = result {
        log::error!("Dashboard action failed: {}", err);
        if let Some(toast) = toast {
            toast.show_error(err.to_string());
        }
    }

    if get_settings().debug_mode {
        if let Err(violation) = board.check_invariants() {
            log::error!("Dashboard state is inconsistent: {}", violation);
        }
    }
}

fn flush_notices(board: &RefCell<Board>, toast: Option<&ToastContext>) {
    for notice in board.borrow_mut().take_notices() {
        log::warn!("{}", notice);
        if let Some(toast) = toast {
            toast.show_notice(&notice);
        }
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let settings = get_settings();
    let board = use_mut_ref(|| {
        let options = get_settings().dashboard_options();
        Dashboard::init(Catalog::banking(), LocalStorage::new(), options)
    });
    let force_update = use_force_update();
    let toast_ctx = use_context::<ToastContext>();

    // Notices raised while restoring the saved dashboard
    {
        let board = board.clone();
        let toast_ctx = toast_ctx.clone();
        use_effect_with((), move |_| {
            flush_notices(&board, toast_ctx.as_ref());
            || ()
        });
    }

    let dispatch = {
        let board = board.clone();
        Callback::from(move |action: DashboardAction| {
            log::debug!("Dashboard action: {:?}", action);
            apply(&mut board.borrow_mut(), action, toast_ctx.as_ref());
            flush_notices(&board, toast_ctx.as_ref());
            force_update.force_update();
        })
    };

    let current = board.borrow();
    let profiles: Vec<ProfileSwitch> = current
        .catalog()
        .profiles()
        .iter()
        .map(|p| ProfileSwitch {
            id: p.id.clone(),
            name: p.name.clone(),
            fixed: p.fixed,
            active: current.is_profile_active(&p.id),
        })
        .collect();
    let widgets: Vec<WidgetSwitch> = current
        .catalog()
        .widgets()
        .iter()
        .map(|w| {
            let active = current.is_widget_active(&w.id);
            WidgetSwitch {
                id: w.id.clone(),
                name: w.name.clone(),
                locked: current.catalog().is_base_widget(&w.id),
                active,
                pending: active && !current.layout().contains(&w.id),
            }
        })
        .collect();
    let cards: Vec<Card> = current
        .layout()
        .entries()
        .iter()
        .map(|entry| Card {
            entry: entry.clone(),
            title: current
                .catalog()
                .widget(&entry.widget_id)
                .map(|w| w.name.clone())
                .unwrap_or_else(|| entry.widget_id.to_string()),
        })
        .collect();
    let columns = current.columns();
    drop(current);

    let actions = html! {
        <ProfileToggles profiles={profiles} on_toggle={dispatch.reform(DashboardAction::ToggleProfile)} />
    };

    html! {
        <Layout title="Dashboard" {actions}>
            <div class="flex flex-col gap-4">
                <div class="flex flex-wrap items-center justify-between gap-2">
                    <WidgetToggles widgets={widgets} on_toggle={dispatch.reform(DashboardAction::ToggleWidget)} />
                    <LayoutControls
                        autosave={settings.autosave_layout}
                        on_save={dispatch.reform(|_| DashboardAction::Save)}
                        on_reset={dispatch.reform(|_| DashboardAction::Reset)}
                    />
                </div>
                <GridView
                    cards={cards}
                    columns={columns}
                    on_change={dispatch.reform(DashboardAction::ReplaceLayout)}
                />
            </div>
        </Layout>
    }
}
