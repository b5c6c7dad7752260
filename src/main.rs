use anyhow::Result;
use clap::Parser;

use nepal_atlas::cli::{Cli, Commands};
use nepal_atlas::commands::{info, render};

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Render(args) => render::run(&cli, args),
        Commands::Info(args) => info::run(&cli, args),
    }
}
