//! Create firewall and Panorama address objects in bulk.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use addrpush::{classify, ensure_unique, Location, PanosClient, RawToken, Scope};
//!
//! let entries = classify(RawToken::parse_list("web:10.1.1.1, 10.1.1.0/24")).into_result()?;
//! ensure_unique(&entries)?;
//!
//! let client = PanosClient::builder("fw.example.net")
//!     .accept_invalid_certs(true)
//!     .build()?
//!     .authenticate("admin", "secret")
//!     .await?;
//!
//! let scope = Scope::Vsys { name: Scope::DEFAULT_VSYS.into() };
//! let location = Location::target(&scope);
//! let objects = client.objects();
//! for batch in objects.address_batcher(&location, 5000).pack_entries(&entries)? {
//!     objects.create_addresses(&location, &batch).await?;
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/addrpush/0.3.0")]

// Re-export core types
pub use addrpush_core::*;

// Re-export client
pub use addrpush_client::{api, xml, xpath, Location, PanosClient, PanosClientBuilder, PanosError};
