//! # addrpush-cli
//!
//! Command-line front end for bulk address object creation.
//!
//! ## Features
//!
//! - **Two input modes**: a comma-separated list typed at the prompt, or a
//!   `name,address` CSV file passed as the only argument
//! - **Automatic naming**: `H-`/`N-` prefixes for hosts and networks,
//!   `range_` for ranges, the FQDN itself for FQDNs
//! - **Duplicate checks**: inside the list, and against the device group
//!   lineage or vsys plus shared
//! - **Batched pushes**: requests are split to stay under the device's
//!   request length limit
//! - **Optional address group** holding every created object
//! - **Dry run**: show the plan without contacting a device

pub mod cli;
pub mod config;
pub mod input;
pub mod logging;
pub mod output;
pub mod prompt;
pub mod session;

pub use cli::run;
