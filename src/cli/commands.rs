pub mod catalog;
pub mod feed;
pub mod layout;
pub mod profile;
pub mod show;
pub mod widget;

pub use catalog::catalog;
pub use show::show;

use std::io::Write;

use anyhow::Result;
use engine::Transition;

/// Prints what an event added to and removed from the layout.
pub(crate) fn print_transition(transition: &Transition, out: &mut dyn Write) -> Result<()> {
    if !transition.changed {
        writeln!(out, "Nothing changed")?;
        return Ok(());
    }
    for id in &transition.added {
        writeln!(out, "+ {id}")?;
    }
    for id in &transition.removed {
        writeln!(out, "- {id}")?;
    }
    Ok(())
}
