use std::io::{self, Write};

use crate::notice::{Notice, NoticeEntry};

/// Render the plain-text notice: a `LICENSES` header, then one block per matched artifact.
pub fn render<W: Write>(notice: &Notice, out: &mut W) -> io::Result<()> {
    writeln!(out, "LICENSES")?;
    for entry in &notice.entries {
        render_entry(entry, out)?;
    }
    Ok(())
}

fn render_entry<W: Write>(entry: &NoticeEntry, out: &mut W) -> io::Result<()> {
    let artifact = &entry.artifact;
    writeln!(out, "---")?;
    writeln!(out, "# {} ({})", artifact.title, artifact.fqdn())?;
    writeln!(out)?;
    writeln!(out, "Licence name: {}", entry.license.name)?;
    writeln!(out, "License:")?;
    writeln!(out, "{}", entry.license.content)?;
    writeln!(out)?;
    writeln!(out)
}
