use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "license-notice",
    about = "Match artifacts against a license catalog and generate an aggregated notice file",
    version
)]
pub struct Cli {
    /// Artifact list document [default: resources/artifacts.xml]
    #[arg(long, value_name = "FILE")]
    pub artifacts: Option<PathBuf>,

    /// License catalog document [default: resources/licenses.xml]
    #[arg(long, value_name = "FILE")]
    pub licenses: Option<PathBuf>,

    /// Notice file to write [default: LICENSES.txt]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Notice file format
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: ReportFormat,

    /// Config file [default: ./.license-notice/config.toml, fallback ~/.config/license-notice/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Leave artifacts declaring this license out of the notice (repeatable)
    #[arg(long = "exclude-license", value_name = "LABEL")]
    pub exclude_license: Vec<String>,

    /// Print the distinct declared licenses and exit
    #[arg(long)]
    pub list_licenses: bool,

    /// Show every matched artifact and the rule that matched it
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}
