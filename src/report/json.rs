use std::io::Write;

use anyhow::Result;

use crate::notice::Notice;

/// Render the notice as pretty-printed JSON.
pub fn render<W: Write>(notice: &Notice, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, notice)?;
    writeln!(out)?;
    Ok(())
}
