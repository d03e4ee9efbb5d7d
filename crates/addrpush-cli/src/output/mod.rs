//! Output formatting for plans, summaries and messages.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::time::Duration;

use addrpush::{AddressEntry, AddressGroup, Batch, DuplicateName, RawToken, Rejected, Scope};
use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tables and colored messages
    #[default]
    Pretty,
    /// JSON document on stdout
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Turn colors off globally.
pub fn disable_color() {
    colored::control::set_override(false);
}

// Messages go to stderr so JSON on stdout stays parseable.

pub fn success(msg: &str) {
    eprintln!("{} {msg}", "Success:".green().bold());
}

pub fn warn(msg: &str) {
    eprintln!("{} {msg}", "Warning:".yellow().bold());
}

pub fn error(msg: &str) {
    eprintln!("{} {msg}", "Error:".red().bold());
}

pub fn note(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Address")]
    value: String,
}

/// Table of classified entries.
pub fn entries_table(entries: &[AddressEntry]) -> String {
    let rows: Vec<EntryRow> = entries
        .iter()
        .map(|e| EntryRow {
            name: e.name.clone(),
            kind: e.kind.to_string(),
            value: e.value.clone(),
        })
        .collect();
    Table::new(&rows).with(Style::rounded()).to_string()
}

/// Write a table to `out`, or to `err` when `out` carries JSON.
pub fn write_table<O, E>(out: &mut O, err: &mut E, format: OutputFormat, table: &str) -> io::Result<()>
where
    O: Write,
    E: Write,
{
    match format {
        OutputFormat::Pretty => writeln!(out, "{table}"),
        OutputFormat::Json => writeln!(err, "{table}"),
    }
}

/// Print a table where it does not interfere with `format`.
pub fn print_table(format: OutputFormat, table: &str) {
    let _ = write_table(&mut io::stdout().lock(), &mut io::stderr().lock(), format, table);
}

#[derive(Tabled)]
struct TokenRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Address")]
    value: String,
}

/// Table of raw input rows as read.
pub fn tokens_table(tokens: &[RawToken]) -> String {
    let rows: Vec<TokenRow> = tokens
        .iter()
        .map(|t| TokenRow {
            name: t.name.clone().unwrap_or_else(|| "(derived)".to_string()),
            value: t.value.clone(),
        })
        .collect();
    Table::new(&rows).with(Style::rounded()).to_string()
}

pub fn print_rejected(rejected: &[Rejected]) {
    error(&format!("{} entr(ies) could not be used:", rejected.len()));
    for r in rejected {
        eprintln!("  {} {}", r.token.to_string().red(), r.reason);
    }
}

pub fn print_duplicates(duplicates: &[DuplicateName]) {
    error("The same name is used more than once:");
    for d in duplicates {
        eprintln!("  {} used {} times", d.name.red(), d.count());
    }
}

/// Entries dropped because the name already exists on the device.
pub fn print_collisions(scope: &Scope, removed: &[AddressEntry]) {
    warn(&format!(
        "{} object(s) already exist in {scope} or a location it inherits from and will be skipped:",
        removed.len()
    ));
    for e in removed {
        eprintln!("  {}", e.name.yellow());
    }
}

/// Progress bar over push requests. Hidden when stderr is not a terminal.
pub fn progress(requests: u64) -> ProgressBar {
    let pb = ProgressBar::new(requests);
    if let Ok(style) = ProgressStyle::default_bar().template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}") {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// What a push would send, computed without contacting a device.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    /// Request length limit used for packing
    pub max_request_len: usize,
    pub entries: Vec<AddressEntry>,
    /// Entry count of each address request
    pub address_batches: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<AddressGroup>,
    /// Member count of each group request
    pub group_batches: Vec<usize>,
}

impl Plan {
    pub fn new(
        max_request_len: usize,
        entries: Vec<AddressEntry>,
        address_batches: &[Batch],
        group: Option<AddressGroup>,
        group_batches: &[Batch],
    ) -> Self {
        Self {
            max_request_len,
            entries,
            address_batches: address_batches.iter().map(Batch::len).collect(),
            group,
            group_batches: group_batches.iter().map(Batch::len).collect(),
        }
    }

    pub fn requests(&self) -> usize {
        self.address_batches.len() + self.group_batches.len()
    }
}

/// Outcome of a finished session.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub scope: Scope,
    pub created: Vec<AddressEntry>,
    /// Names skipped because they already existed
    pub skipped: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// API calls made to create objects
    pub requests: usize,
}

fn batch_sizes(sizes: &[usize]) -> String {
    sizes.iter().fold(String::new(), |mut out, n| {
        if !out.is_empty() {
            out.push_str(", ");
        }
        let _ = write!(out, "{n}");
        out
    })
}

pub fn print_plan(plan: &Plan, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(plan)?),
        OutputFormat::Pretty => {
            println!("{}", "Dry run, nothing was sent.".bold());
            println!();
            println!("{}", entries_table(&plan.entries));
            println!();
            println!(
                "{} {} request(s) of at most {} characters",
                "Plan:".bold(),
                plan.requests().to_string().cyan(),
                plan.max_request_len
            );
            println!("  address objects per request: {}", batch_sizes(&plan.address_batches));
            if let Some(group) = &plan.group {
                println!(
                    "  group '{}' members per request: {}",
                    group.name.cyan(),
                    batch_sizes(&plan.group_batches)
                );
            }
        }
    }
    Ok(())
}

pub fn print_summary(summary: &Summary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(summary)?),
        OutputFormat::Pretty => {
            if summary.created.is_empty() {
                warn(&format!("Nothing was created in {}.", summary.scope));
            } else {
                println!("{}", entries_table(&summary.created));
                success(&format!(
                    "Created {} address object(s) in {} with {} request(s).",
                    summary.created.len(),
                    summary.scope,
                    summary.requests
                ));
            }
            if let Some(group) = &summary.group {
                success(&format!(
                    "Address group '{group}' holds {} member(s).",
                    summary.created.len()
                ));
            }
            if !summary.skipped.is_empty() {
                note(&format!("Skipped existing: {}", summary.skipped.join(", ")));
            }
        }
    }
    Ok(())
}
