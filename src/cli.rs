use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// Atlas CLI (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "nepal-atlas", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the current map view to an SVG file
    Render(RenderArgs),

    /// Print facts about a province or district
    Info(InfoArgs),
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Directory holding provinces.geojson and province_{1..7}.geojson
    #[arg(value_hint = ValueHint::DirPath)]
    pub data: PathBuf,

    /// Output SVG file
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub out: PathBuf,

    /// Zoom into this province (1-7) before rendering
    #[arg(long)]
    pub province: Option<u8>,

    /// Select this district inside the chosen province
    #[arg(long, requires = "province")]
    pub district: Option<String>,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Province number (1-7; other values use fallback facts)
    pub province: u8,

    /// District name; when given, district facts are printed instead
    #[arg(long)]
    pub district: Option<String>,

    /// Print machine-readable JSON instead of panel text
    #[arg(long)]
    pub json: bool,
}
