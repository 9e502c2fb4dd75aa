use common::{LayoutEntry, WidgetId};
use yew::prelude::*;

use crate::components::widgets::render_widget;

/// Height of one grid row in pixels.
const ROW_HEIGHT_PX: u32 = 72;

/// A one-step edit made from a card's controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Left,
    Right,
    Up,
    Down,
    Wider,
    Narrower,
    Taller,
    Shorter,
}

/// Returns the whole layout with `edit` applied to `id`. The entry stays on
/// the grid and within its size bounds; every other entry is untouched.
pub fn apply_edit(entries: &[LayoutEntry], id: &WidgetId, edit: Edit, columns: u32) -> Vec<LayoutEntry> {
    entries
        .iter()
        .cloned()
        .map(|mut entry| {
            if &entry.widget_id == id {
                edit_entry(&mut entry, edit, columns);
            }
            entry
        })
        .collect()
}

fn edit_entry(entry: &mut LayoutEntry, edit: Edit, columns: u32) {
    let bounds = entry.constraints();
    match edit {
        Edit::Left => entry.x = entry.x.saturating_sub(1),
        Edit::Right if entry.right() < columns => entry.x += 1,
        Edit::Up => entry.y = entry.y.saturating_sub(1),
        Edit::Down => entry.y = entry.y.saturating_add(1),
        Edit::Wider if entry.w < bounds.max_w && entry.right() < columns => entry.w += 1,
        Edit::Narrower if entry.w > bounds.min_w => entry.w -= 1,
        Edit::Taller if entry.h < bounds.max_h => entry.h += 1,
        Edit::Shorter if entry.h > bounds.min_h => entry.h -= 1,
        _ => {}
    }
}

/// 1-based start column and span of `entry`, cut at the right grid edge.
/// A freshly reset layout may run past it.
fn visible_columns(entry: &LayoutEntry, columns: u32) -> (u32, u32) {
    let start = entry.x.min(columns.saturating_sub(1));
    let span = entry.w.min(columns - start).max(1);
    (start + 1, span)
}

#[derive(Clone, PartialEq)]
pub struct Card {
    pub entry: LayoutEntry,
    pub title: String,
}

#[derive(Properties, PartialEq)]
pub struct GridProps {
    pub cards: Vec<Card>,
    pub columns: u32,
    /// Receives the complete edited layout
    pub on_change: Callback<Vec<LayoutEntry>>,
}

#[function_component(GridView)]
pub fn grid_view(props: &GridProps) -> Html {
    let entries: Vec<LayoutEntry> = props.cards.iter().map(|c| c.entry.clone()).collect();

    let container_style = format!(
        "display: grid; grid-template-columns: repeat({}, minmax(0, 1fr)); grid-auto-rows: {}px; gap: 12px;",
        props.columns, ROW_HEIGHT_PX
    );

    if props.cards.is_empty() {
        return html! {
            <div class="alert alert-info">
                <i class="fas fa-info-circle"></i>
                <span>{"No widgets are active."}</span>
            </div>
        };
    }

    html! {
        <div class="dashboard-grid" style={container_style}>
            { for props.cards.iter().map(|card| {
                let entry = &card.entry;
                let (column, span) = visible_columns(entry, props.columns);
                let style = format!(
                    "grid-column: {} / span {}; grid-row: {} / span {};",
                    column,
                    span,
                    entry.y.saturating_add(1),
                    entry.h
                );
                let button = |edit: Edit, icon: &'static str, label: &'static str| {
                    let on_change = props.on_change.clone();
                    let entries = entries.clone();
                    let id = entry.widget_id.clone();
                    let columns = props.columns;
                    let onclick = Callback::from(move |_| {
                        log::trace!("Editing {} with {:?}", id, edit);
                        on_change.emit(apply_edit(&entries, &id, edit, columns));
                    });
                    html! {
                        <button class="btn btn-ghost btn-xs" title={label} {onclick}>
                            <i class={icon}></i>
                        </button>
                    }
                };

                html! {
                    <div key={entry.widget_id.as_str().to_string()} class="card bg-base-100 shadow overflow-hidden" style={style}>
                        <div class="flex items-center justify-between px-3 py-1 border-b border-base-200">
                            <span class="font-semibold text-sm truncate">{&card.title}</span>
                            <div class="flex">
                                {button(Edit::Left, "fas fa-arrow-left", "Move left")}
                                {button(Edit::Right, "fas fa-arrow-right", "Move right")}
                                {button(Edit::Up, "fas fa-arrow-up", "Move up")}
                                {button(Edit::Down, "fas fa-arrow-down", "Move down")}
                                {button(Edit::Narrower, "fas fa-compress-alt", "Narrower")}
                                {button(Edit::Wider, "fas fa-expand-alt", "Wider")}
                                {button(Edit::Shorter, "fas fa-minus", "Shorter")}
                                {button(Edit::Taller, "fas fa-plus", "Taller")}
                            </div>
                        </div>
                        <div class="card-body p-3 overflow-auto">
                            { render_widget(&entry.widget_id) }
                        </div>
                    </div>
                }
            }) }
        </div>
    }
}
