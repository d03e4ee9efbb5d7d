//! `addrpush [CSV_FILE]` - classify a list and push it to a device.

use std::path::Path;

use addrpush::{
    classify, ensure_unique, naming, AddrError, AddressEntry, AddressGroup, Classification,
    Location, PanosClient, PanosError, RawToken, Scope,
};
use anyhow::{bail, Result};
use tracing::debug;

use super::Context;
use crate::cli::args::PushArgs;
use crate::input;
use crate::output::{self, OutputFormat, Plan};
use crate::prompt::{check_host, input_checked, Prompter, TerminalPrompter};
use crate::session::Session;

/// Host assumed when planning without one
const PLAN_HOST: &str = "firewall";

/// Typical API key length, used to size the request envelope when planning
const PLAN_KEY_LEN: usize = 128;

pub async fn execute(ctx: Context, args: PushArgs) -> Result<()> {
    if let Some(group) = &args.group {
        naming::validate(group)?;
    }
    let mut prompter = TerminalPrompter::new();

    let entries = match &args.file {
        Some(path) => entries_from_file(path, &mut prompter, !args.dry_run, ctx.output_format)?,
        None => entries_from_prompt(&mut prompter)?,
    };

    if args.dry_run {
        let host = args.host.as_deref().or(ctx.config.host.as_deref()).unwrap_or(PLAN_HOST);
        let plan = plan(host, ctx.config.max_request_len, entries, args.group)?;
        return output::print_plan(&plan, ctx.output_format);
    }

    let host = match args.host.clone().or_else(|| ctx.config.host.clone()) {
        Some(host) => {
            check_host(&host).map_err(anyhow::Error::msg)?;
            host
        }
        None => input_checked(&mut prompter, "Firewall or Panorama address", None, check_host)?,
    };
    let client = ctx.client_builder(&host).build()?;
    let settings = ctx.session_settings(args.user, args.group);
    let mut session = Session::new(entries, settings)?;

    match session.run(&client, &mut prompter).await {
        Ok(summary) => output::print_summary(&summary, ctx.output_format),
        Err(e) => {
            if let Some(request) = e.downcast_ref::<PanosError>().and_then(PanosError::rejected_request) {
                output::error("The device rejected this request:");
                eprintln!("  {request}");
            }
            Err(e)
        }
    }
}

/// Read and classify a CSV file. Any bad row fails the whole file.
fn entries_from_file<P>(
    path: &Path,
    prompter: &mut P,
    interactive: bool,
    format: OutputFormat,
) -> Result<Vec<AddressEntry>>
where
    P: Prompter + ?Sized,
{
    let tokens = input::read_csv_file(path)?;
    if tokens.is_empty() {
        bail!("{} contains no addresses", path.display());
    }
    debug!(path = %path.display(), rows = tokens.len(), "read CSV");

    let question = format!("Print the {} entries read from {}?", tokens.len(), path.display());
    if interactive && prompter.confirm(&question, false)? {
        output::print_table(format, &output::tokens_table(&tokens));
    }
    checked_entries(classify(tokens))
}

/// Ask for a comma-separated list until one classifies cleanly.
///
/// Unrecognized entries are asked again; a name used twice ends the run.
fn entries_from_prompt<P>(prompter: &mut P) -> Result<Vec<AddressEntry>>
where
    P: Prompter + ?Sized,
{
    output::note("Enter addresses separated by commas. Use name:address to pick a name, e.g. web:10.1.1.1");
    loop {
        let line = prompter.input("Addresses", None)?;
        let tokens = RawToken::parse_list(&line);
        if tokens.is_empty() {
            output::warn("No addresses entered.");
            continue;
        }
        let classification = classify(tokens);
        if !classification.is_clean() {
            output::print_rejected(&classification.rejected);
            debug!(rejected = classification.rejected.len(), "list rejected");
            continue;
        }
        return unique_entries(classification.into_result()?);
    }
}

/// Entries of a clean classification with unique names; problems are printed.
fn checked_entries(classification: Classification) -> Result<Vec<AddressEntry>> {
    if !classification.is_clean() {
        output::print_rejected(&classification.rejected);
    }
    unique_entries(classification.into_result()?)
}

fn unique_entries(entries: Vec<AddressEntry>) -> Result<Vec<AddressEntry>> {
    if let Err(e) = ensure_unique(&entries) {
        if let AddrError::Duplicates(duplicates) = &e {
            output::print_duplicates(duplicates);
        }
        return Err(e.into());
    }
    Ok(entries)
}

/// Batches a push would use, sized for `host` and the default vsys.
fn plan(host: &str, max_request_len: usize, entries: Vec<AddressEntry>, group: Option<String>) -> Result<Plan> {
    let client = PanosClient::builder(host).api_key("x".repeat(PLAN_KEY_LEN)).build()?;
    let objects = client.objects();
    let location = Location::Vsys(Scope::DEFAULT_VSYS.to_string());

    let batches = objects.address_batcher(&location, max_request_len).pack_entries(&entries)?;
    let group = group
        .map(|name| AddressGroup::new(name, entries.iter().map(|e| e.name.clone()).collect()))
        .transpose()?;
    let group_batches = match &group {
        Some(group) => objects.group_batcher(&location, max_request_len).pack_members(group)?,
        None => Vec::new(),
    };

    Ok(Plan::new(max_request_len, entries, &batches, group, &group_batches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::scripted::{text, Answer, ScriptedPrompter};

    #[test]
    fn test_prompt_repeats_until_clean() {
        let mut prompter = ScriptedPrompter::new([
            text(""),
            text("10.0.0.1, not an address"),
            text("web:10.1.1.1, 10.2.0.0/16, ftp.example.com"),
        ]);
        let entries = entries_from_prompt(&mut prompter).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["web", "N-10.2.0.0-16", "ftp.example.com"]);
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn test_prompted_duplicates_end_the_run() {
        let mut prompter = ScriptedPrompter::new([text("web:10.1.1.1, web:10.1.1.2"), text("10.0.0.1")]);
        let err = entries_from_prompt(&mut prompter).unwrap_err();
        assert!(err.to_string().contains("web (used 2 times)"), "{err}");
        assert_eq!(prompter.remaining(), 1);
    }

    #[test]
    fn test_file_with_bad_row_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.csv");
        std::fs::write(&path, "web,10.1.1.1\nbad,999.1.1.1\n").unwrap();

        let mut prompter = ScriptedPrompter::new([Answer::No]);
        let err = entries_from_file(&path, &mut prompter, true, OutputFormat::Pretty).unwrap_err();
        assert!(err.to_string().contains("could not be classified"), "{err}");
    }

    #[test]
    fn test_file_without_prompts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.csv");
        std::fs::write(&path, ",192.168.0.5\n").unwrap();

        let mut prompter = ScriptedPrompter::default();
        let entries = entries_from_file(&path, &mut prompter, false, OutputFormat::Json).unwrap();
        assert_eq!(entries[0].name, "H-192.168.0.5");
    }

    #[test]
    fn test_plan_splits_large_lists() {
        let entries: Vec<AddressEntry> = (1..=200)
            .map(|i| {
                let value = format!("10.0.0.{i}");
                AddressEntry::new(format!("H-{value}"), value, addrpush::AddressKind::NetworkHost)
            })
            .collect();
        let plan = plan("fw1", 2000, entries, Some("bulk".into())).unwrap();

        assert!(plan.address_batches.len() > 1);
        assert_eq!(plan.address_batches.iter().sum::<usize>(), 200);
        assert_eq!(plan.group_batches.iter().sum::<usize>(), 200);
        assert_eq!(plan.group.unwrap().members.len(), 200);
    }
}
