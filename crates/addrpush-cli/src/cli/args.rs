//! Command-line argument definitions using clap.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::output::OutputFormat;

/// Bulk-create address objects on a firewall or Panorama
///
/// Without a file, prompts for a comma-separated list such as
/// `web:10.1.1.1,10.2.0.0/16,ftp.example.com,10.0.0.5-10.0.0.9`.
/// With a file, reads `name,address` rows; a blank name derives one.
#[derive(Parser, Debug)]
#[command(name = "addrpush")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// CSV file with `name,address` rows
    #[arg(value_name = "CSV_FILE")]
    pub file: Option<PathBuf>,

    /// Firewall or Panorama address (IP or FQDN)
    #[arg(long, env = "ADDRPUSH_HOST")]
    pub host: Option<String>,

    /// Administrator username
    #[arg(short, long, env = "ADDRPUSH_USER")]
    pub user: Option<String>,

    /// Verify the device's TLS certificate
    #[arg(long)]
    pub verify_tls: bool,

    /// Longest request URL to send, in characters
    #[arg(long, value_name = "CHARS")]
    pub max_request_len: Option<usize>,

    /// Put the new objects in this address group without asking
    #[arg(short, long, value_name = "NAME")]
    pub group: Option<String>,

    /// Classify and plan batches without contacting a device
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for the plan and summary
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage saved defaults
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (host, username, verify_tls, max_request_len, auth_attempts, timeout_secs)
        key: String,
        /// Value to set
        value: String,
    },

    /// Show configuration file path
    Path,
}

/// Arguments of the default push command.
#[derive(Debug, Clone, Default)]
pub struct PushArgs {
    pub file: Option<PathBuf>,
    pub host: Option<String>,
    pub user: Option<String>,
    pub group: Option<String>,
    pub dry_run: bool,
}

impl Cli {
    /// Split out the push arguments.
    #[must_use]
    pub fn push_args(&self) -> PushArgs {
        PushArgs {
            file: self.file.clone(),
            host: self.host.clone(),
            user: self.user.clone(),
            group: self.group.clone(),
            dry_run: self.dry_run,
        }
    }
}
