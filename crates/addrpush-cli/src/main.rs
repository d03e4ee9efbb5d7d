//! addrpush - create address objects on a firewall or Panorama
//!
//! Reads a list of addresses interactively or from a CSV file, names and
//! classifies them, then pushes them in as few API calls as fit.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    addrpush_cli::run().await
}
