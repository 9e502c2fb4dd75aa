use std::io::Write;

use anyhow::Result;
use common::ProfileId;
use engine::{Dashboard, KeyValueStore};
use tracing::info;

use super::print_transition;

pub fn toggle<S: KeyValueStore>(board: &mut Dashboard<S>, id: &str, out: &mut dyn Write) -> Result<()> {
    let id = ProfileId::from(id);
    let transition = board.toggle_profile(&id)?;
    let state = if board.is_profile_active(&id) { "on" } else { "off" };
    info!(profile = %id, state, "Profile toggled");

    writeln!(out, "Profile {id}: {state}")?;
    print_transition(&transition, out)
}
