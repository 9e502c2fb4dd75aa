use std::io::Write;

use anyhow::Result;
use engine::Catalog;
use engine::size::effective_size;

pub fn catalog(catalog: &Catalog, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Profiles:")?;
    for profile in catalog.profiles() {
        let fixed = if profile.fixed { " (always on)" } else { "" };
        writeln!(out, "  {:<12} {}{}", profile.id.as_str(), profile.name, fixed)?;
    }

    writeln!(out, "Widgets:")?;
    for widget in catalog.widgets() {
        let (w, h) = effective_size(widget);
        let profiles: Vec<&str> = widget.profiles.iter().map(|p| p.as_str()).collect();
        let c = widget.constraints;
        writeln!(
            out,
            "  {:<4} {:<22} {:<8} {}x{} [{}..{} x {}..{}] {}",
            widget.id.as_str(),
            widget.name,
            widget.size_class.label(),
            w,
            h,
            c.min_w,
            c.max_w,
            c.min_h,
            c.max_h,
            profiles.join(",")
        )?;
    }
    Ok(())
}
