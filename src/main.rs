//! `license-notice` - match every artifact of an inventory to its license text and
//! write the aggregated notice file.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config and apply CLI overrides ([`config::load_config`]).
//! 3. Read the artifact list and the license catalog ([`source`]).
//! 4. Match each artifact against the catalog ([`license::matcher`], [`notice::generate`]).
//! 5. Write the notice file ([`report`]) and print the summary and unmatched artifacts.
//!
//! An ambiguous catalog, or a missing or malformed input, aborts the run with a
//! non-zero exit before the notice is written. Unmatched artifacts do not.

mod cli;
mod config;
mod error;
mod license;
mod models;
mod notice;
mod report;
mod source;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use cli::Cli;
use config::load_config;
use notice::{distinct_licenses, generate};
use source::artifacts::ArtifactSource;
use source::catalog::CatalogSource;
use source::Source;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut config = load_config(&cwd, cli.config.as_deref())?;
    config.merge_cli(&cli);
    let settings = &config.notice;

    if !cli.quiet {
        eprintln!("  {} Input: {}", "→".cyan(), settings.artifacts.display());
        eprintln!("  {} Licenses: {}", "→".cyan(), settings.licenses.display());
    }

    // Both documents are loaded before any matching happens.
    let artifacts = ArtifactSource::new().load(&settings.artifacts)?;
    let catalog = CatalogSource::new().load(&settings.licenses)?;

    if !cli.quiet {
        eprintln!(
            "  {} {} artifacts, {} license records",
            "→".cyan(),
            artifacts.len(),
            catalog.len()
        );
    }

    for record in catalog.iter().filter(|r| !r.has_valid_scope()) {
        eprintln!(
            "  {} license '{}' is scoped to artifact '{}' but lists {} groupIds; it will never match on artifact FQDN",
            "warning:".yellow().bold(),
            record.name,
            record.artifact_id.as_deref().unwrap_or_default(),
            record.group_ids.len()
        );
    }

    if cli.list_licenses {
        for license in distinct_licenses(&artifacts, &settings.excluded_licenses) {
            println!("{}", license);
        }
        return Ok(());
    }

    let notice = generate(artifacts, &catalog, &settings.excluded_licenses)?;

    let output = std::path::absolute(&settings.output).unwrap_or_else(|_| settings.output.clone());
    if !cli.quiet {
        println!("Generate {}", output.display());
    }
    report::write_notice(&notice, &cli.format, &output)?;

    report::terminal::render(&notice, &output, cli.verbose, cli.quiet);

    Ok(())
}
