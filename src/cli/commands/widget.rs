use std::io::Write;

use anyhow::Result;
use common::WidgetId;
use engine::{Dashboard, KeyValueStore};

use super::print_transition;

pub fn toggle<S: KeyValueStore>(board: &mut Dashboard<S>, id: &str, out: &mut dyn Write) -> Result<()> {
    let id = WidgetId::from(id);
    let transition = board.toggle_widget(&id)?;
    let state = if board.is_widget_active(&id) { "on" } else { "off" };

    writeln!(out, "Widget {id}: {state}")?;
    if board.is_widget_active(&id) && !board.layout().contains(&id) {
        writeln!(out, "(shown once one of its profiles is enabled)")?;
    }
    print_transition(&transition, out)
}
