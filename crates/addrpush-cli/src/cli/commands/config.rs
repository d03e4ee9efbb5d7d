//! `addrpush config` - saved defaults.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::{self, OutputFormat};

pub fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(&ctx),
        ConfigCommands::Set { key, value } => set_config(&key, &value),
        ConfigCommands::Path => show_path(),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = Config::load()?;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Pretty => {
            let unset = || "(not set)".dimmed().to_string();
            println!("{}", "Current Configuration:".bold());
            println!();
            println!("  {} {}", "host:".bold(), config.host.clone().unwrap_or_else(unset));
            println!("  {} {}", "username:".bold(), config.username.clone().unwrap_or_else(unset));
            println!("  {} {}", "verify_tls:".bold(), config.verify_tls);
            println!("  {} {}", "max_request_len:".bold(), config.max_request_len);
            println!("  {} {}", "auth_attempts:".bold(), config.auth_attempts);
            println!("  {} {}", "timeout_secs:".bold(), config.timeout_secs);
        }
    }

    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;
    output::success(&format!("{} set to {}.", key, value.cyan()));
    Ok(())
}

fn show_path() -> Result<()> {
    println!("{}", Config::path()?.display());
    Ok(())
}
