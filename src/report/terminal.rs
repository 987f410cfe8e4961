use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::license::matcher::Tier;
use crate::notice::Notice;

/// Print the run summary on stdout and the unmatched artifacts on stderr.
pub fn render(notice: &Notice, output: &Path, verbose: bool, quiet: bool) {
    if quiet {
        println!(
            "Documented: {}  Matched: {}  Excluded: {}  Errors: {}",
            notice.documented,
            notice.entries.len().to_string().green(),
            notice.excluded,
            notice.errors.len().to_string().red(),
        );
    } else {
        println!(
            "{} generated with the notice of {} artifact documented",
            output.display(),
            notice.documented
        );

        if verbose && !notice.entries.is_empty() {
            println!();
            println!("{}", match_table(notice));
        }
    }

    render_errors(&notice.errors);
}

/// The error channel: `ERRORS`, every sorted line, then the count.
pub fn render_errors(errors: &[String]) {
    eprintln!("{}", "ERRORS".red().bold());
    for line in error_lines(errors) {
        eprintln!("{}", line);
    }
}

fn error_lines(errors: &[String]) -> Vec<String> {
    let mut lines = errors.to_vec();
    lines.push(format!("{} errors", errors.len()));
    lines
}

fn match_table(notice: &Notice) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Artifact").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Declared").add_attribute(Attribute::Bold),
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Matched on").add_attribute(Attribute::Bold),
        ]);

    for entry in &notice.entries {
        let tier_color = match entry.tier {
            Tier::Fqdn => Color::Magenta,
            Tier::GroupAndName => Color::Cyan,
            Tier::UnscopedName => Color::Green,
        };

        table.add_row(vec![
            Cell::new(entry.artifact.fqdn()),
            Cell::new(&entry.artifact.title),
            Cell::new(&entry.artifact.declared_license),
            Cell::new(&entry.license.name),
            Cell::new(entry.tier.to_string()).fg(tier_color),
        ]);
    }

    table
}
