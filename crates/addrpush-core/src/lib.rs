//! Core types and logic for creating firewall address objects.
//!
//! This crate holds everything that does not touch the network:
//!
//! - **Types**: [`AddressEntry`], [`AddressGroup`], [`Scope`] and friends
//! - **Naming**: the object naming convention shared by addresses and groups
//! - **Classification**: turning raw `name:value` tokens into typed entries
//! - **Duplicates**: intra-batch and against-target collision checks
//! - **Batching**: packing serialized entries into size-bounded requests
//! - **Stages**: the push sequence a session walks through
//!
//! # Example
//!
//! ```rust,ignore
//! use addrpush_core::{classify, BatchBuilder, RawToken};
//!
//! let tokens = RawToken::parse_list("webserver:10.1.1.1, 10.1.1.2/24");
//! let entries = classify(tokens).into_result()?;
//! let batches = BatchBuilder::new(5000, 180).pack_entries(&entries)?;
//! assert_eq!(batches.len(), 1);
//! ```

pub mod batch;
pub mod classify;
pub mod duplicates;
mod error;
pub mod naming;
pub mod stage;
pub mod types;

pub use batch::{encoded_len, Batch, BatchBuilder, DEFAULT_MAX_REQUEST_LEN};
pub use classify::{classify, classify_parts, classify_token, Classification, RawToken, RejectReason, Rejected};
pub use duplicates::{ensure_unique, find_duplicates, remove_existing, DuplicateName, Partition};
pub use error::{AddrError, Result};
pub use naming::{NameViolation, MAX_NAME_LEN};
pub use stage::PushStage;
pub use types::*;
