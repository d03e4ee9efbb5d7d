//! HTTP client for the firewall / Panorama XML configuration API.
//!
//! The API is a single endpoint, `/api/`, driven by query parameters
//! (`type`, `action`, `xpath`, `element`, `cmd`, `key`). Every response is
//! an XML document whose root carries `status="success"` or
//! `status="error"`.
//!
//! ```rust,ignore
//! use addrpush_client::PanosClient;
//!
//! let client = PanosClient::builder("fw.example.net").build()?;
//! let client = client.authenticate("admin", "secret").await?;
//! let device = client.objects().detect_device_type().await?;
//! ```

#![doc(html_root_url = "https://docs.rs/addrpush-client/0.3.0")]

mod client;
mod error;
pub mod api;
pub mod xml;
pub mod xpath;

pub use client::{PanosClient, PanosClientBuilder};
pub use error::{PanosError, Result};
pub use xpath::Location;
