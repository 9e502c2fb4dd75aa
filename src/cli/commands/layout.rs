use std::io::Write;

use anyhow::{Context, Result};
use common::WidgetId;
use engine::{Dashboard, KeyValueStore};

use super::print_transition;
use crate::cli::LayoutAction;

pub fn run<S: KeyValueStore>(board: &mut Dashboard<S>, action: LayoutAction, out: &mut dyn Write) -> Result<()> {
    match action {
        LayoutAction::Reset => {
            let transition = board.reset_layout();
            print_transition(&transition, out)?;
            writeln!(out, "Layout reset ({} widgets)", board.layout().len())?;
        }
        LayoutAction::Save => {
            if board.save_layout() {
                writeln!(out, "Layout saved")?;
            }
        }
        LayoutAction::Move { id, x, y } => {
            let id = WidgetId::from(id.as_str());
            board.move_widget(&id, x, y)?;
            print_entry(board, &id, out)?;
        }
        LayoutAction::Resize { id, w, h } => {
            let id = WidgetId::from(id.as_str());
            board.resize_widget(&id, w, h)?;
            print_entry(board, &id, out)?;
        }
        LayoutAction::Export => {
            let json = serde_json::to_string_pretty(board.layout()).context("Failed to serialize layout")?;
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}

fn print_entry<S: KeyValueStore>(board: &Dashboard<S>, id: &WidgetId, out: &mut dyn Write) -> Result<()> {
    if let Some(entry) = board.layout().get(id) {
        writeln!(out, "{id}: x={} y={} {}x{}", entry.x, entry.y, entry.w, entry.h)?;
    }
    Ok(())
}
