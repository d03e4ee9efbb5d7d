//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;

use crate::config::Config;
use crate::{logging, output};

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        output::disable_color();
    }
    logging::init(cli.verbose, !cli.no_color);

    let config = Config::load()?;
    let ctx = commands::Context::new(&cli, config);
    let push_args = cli.push_args();

    match cli.command {
        Some(Commands::Config(args)) => commands::config::execute(ctx, args),
        None => commands::push::execute(ctx, push_args).await,
    }
}
