use std::io::Write;

use anyhow::Result;
use engine::{Dashboard, KeyValueStore};

/// Prints the active profiles, the visible widgets and the layout entries.
pub fn show<S: KeyValueStore>(board: &Dashboard<S>, out: &mut dyn Write) -> Result<()> {
    let profiles: Vec<&str> = board.active_profiles().iter().map(|p| p.as_str()).collect();
    writeln!(out, "Profiles: {}", profiles.join(", "))?;

    let pending: Vec<&str> = board
        .active_widgets()
        .iter()
        .filter(|id| !board.layout().contains(id))
        .map(|id| id.as_str())
        .collect();
    if !pending.is_empty() {
        writeln!(out, "Active without a profile: {}", pending.join(", "))?;
    }

    let hidden: Vec<String> = board.hidden_widgets().iter().map(|id| id.to_string()).collect();
    if !hidden.is_empty() {
        writeln!(out, "Hidden: {}", hidden.join(", "))?;
    }

    writeln!(out, "Layout ({} columns):", board.columns())?;
    for entry in board.layout().entries() {
        let name = board
            .catalog()
            .widget(&entry.widget_id)
            .map(|w| w.name.as_str())
            .unwrap_or("?");
        writeln!(
            out,
            "  {:<4} {:<22} x={:<2} y={:<2} {}x{}",
            entry.widget_id.as_str(),
            name,
            entry.x,
            entry.y,
            entry.w,
            entry.h
        )?;
    }

    let overlaps = board.layout().overlapping_pairs();
    for (a, b) in overlaps {
        writeln!(out, "  overlap: {a} / {b}")?;
    }
    Ok(())
}
