//! Report sinks for a generated [`Notice`](crate::notice::Notice).
//!
//! - [`text`] - the `LICENSES` plain-text notice file.
//! - [`json`] - the same notice as pretty-printed JSON.
//! - [`terminal`] - console summary, optional match table, and the sorted error channel.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::ReportFormat;
use crate::notice::Notice;

pub mod json;
pub mod terminal;
pub mod text;

/// Write `notice` to `path` in the requested format.
pub fn write_notice(notice: &Notice, format: &ReportFormat, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create notice file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    match format {
        ReportFormat::Text => text::render(notice, &mut writer)?,
        ReportFormat::Json => json::render(notice, &mut writer)?,
    }

    writer
        .flush()
        .with_context(|| format!("failed to write notice file {}", path.display()))?;
    Ok(())
}
