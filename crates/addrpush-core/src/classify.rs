//! Address classification.
//!
//! A raw token is either `name:value` or a bare `value`. The value is matched
//! against the address kinds in a fixed order, IP/netmask first, then FQDN,
//! then range. The patterns overlap on some malformed input, so the order is
//! part of the contract.
//!
//! When no name is given one is derived from the value:
//!
//! | value                | derived name                 |
//! |----------------------|------------------------------|
//! | `10.1.1.1`, `/32`    | `H-10.1.1.1`                 |
//! | `10.1.1.0/24`        | `N-10.1.1.0-24`              |
//! | `ftp.example.com`    | `ftp.example.com`            |
//! | `10.1.1.1-10.1.1.9`  | `range_10.1.1.1-10.1.1.9`    |

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::naming::{self, NameViolation};
use crate::types::{AddressEntry, AddressKind};
use crate::{AddrError, Result};

const OCTET: &str = r"(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)";

static IP_NETMASK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<addr>(?:{OCTET}\.){{3}}{OCTET})(?:/(?P<mask>3[0-2]|[12]?[0-9]))?$"
    ))
    .expect("ip-netmask pattern is valid")
});

static FQDN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9]+(?:-[A-Za-z0-9]+)*\.)+[A-Za-z]{2,63}$")
        .expect("fqdn pattern is valid")
});

static IP_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?:{OCTET}\.){{3}}{OCTET}-(?:{OCTET}\.){{3}}{OCTET}$"
    ))
    .expect("ip-range pattern is valid")
});

const FQDN_MIN_LEN: usize = 4;
const FQDN_MAX_LEN: usize = 253;
const LABEL_MAX_LEN: usize = 63;

/// A matcher returns the derived default name when the value is its kind.
type Matcher = fn(&str) -> Option<String>;

/// Matchers in classification order.
const MATCHERS: [(AddressKind, Matcher); 3] = [
    (AddressKind::NetworkHost, match_ip_netmask),
    (AddressKind::Fqdn, match_fqdn),
    (AddressKind::Range, match_ip_range),
];

fn match_ip_netmask(value: &str) -> Option<String> {
    let caps = IP_NETMASK.captures(value)?;
    let addr = &caps["addr"];
    match caps.name("mask").map(|m| m.as_str()) {
        None | Some("32") => Some(format!("H-{addr}")),
        Some(mask) => Some(format!("N-{addr}-{mask}")),
    }
}

fn match_fqdn(value: &str) -> Option<String> {
    let len_ok = (FQDN_MIN_LEN..=FQDN_MAX_LEN).contains(&value.len());
    let labels_ok = value.split('.').all(|label| label.len() <= LABEL_MAX_LEN);
    (len_ok && labels_ok && FQDN.is_match(value)).then(|| value.to_string())
}

fn match_ip_range(value: &str) -> Option<String> {
    IP_RANGE
        .is_match(value)
        .then(|| format!("range_{value}"))
}

/// Determine the kind of an address value and its default name.
#[must_use]
pub fn detect(value: &str) -> Option<(AddressKind, String)> {
    MATCHERS
        .iter()
        .find_map(|(kind, matcher)| matcher(value).map(|name| (*kind, name)))
}

/// One unclassified input item: an optional name and an address value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawToken {
    /// Explicit name, if one was given
    pub name: Option<String>,

    /// Address value
    pub value: String,
}

impl RawToken {
    /// Create a token from already separated parts.
    ///
    /// A blank name counts as no name.
    #[must_use]
    pub fn new(name: Option<&str>, value: &str) -> Self {
        Self {
            name: name.filter(|n| !n.trim().is_empty()).map(str::to_string),
            value: value.trim().to_string(),
        }
    }

    /// Parse `name:value` or `value`.
    ///
    /// Whitespace after the colon is ignored. The name keeps its spacing so
    /// that a trailing space is reported rather than silently dropped.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        match token.split_once(':') {
            Some((name, value)) => Self {
                name: Some(name.to_string()),
                value: value.trim_start().to_string(),
            },
            None => Self {
                name: None,
                value: token.to_string(),
            },
        }
    }

    /// Split a comma-separated list into tokens, skipping empty items.
    #[must_use]
    pub fn parse_list(list: &str) -> Vec<Self> {
        list.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(Self::parse)
            .collect()
    }
}

impl fmt::Display for RawToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}:{}", self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

/// Why a token was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Value is not an IP/netmask, FQDN or range
    #[error("not an IP/netmask, FQDN or IP range")]
    Unrecognized,

    /// Explicit name breaks the naming convention
    #[error("name {0}")]
    InvalidName(NameViolation),

    /// Derived name breaks the naming convention, an explicit name is needed
    #[error("derived name '{name}' is invalid ({violation}), give the entry an explicit name")]
    InvalidDerivedName {
        /// Name that was derived from the value
        name: String,
        /// Rule it breaks
        violation: NameViolation,
    },
}

/// A token that could not be turned into an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    /// The token as it was entered
    pub token: RawToken,

    /// Why it was rejected
    pub reason: RejectReason,
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': {}", self.token, self.reason)
    }
}

/// Classify a single token.
pub fn classify_token(token: &RawToken) -> std::result::Result<AddressEntry, Rejected> {
    let reject = |reason| Rejected {
        token: token.clone(),
        reason,
    };

    let (kind, default_name) = detect(&token.value).ok_or_else(|| reject(RejectReason::Unrecognized))?;

    let name = match &token.name {
        Some(name) => {
            naming::check(name).map_err(|v| reject(RejectReason::InvalidName(v)))?;
            name.clone()
        }
        None => {
            naming::check(&default_name).map_err(|violation| {
                reject(RejectReason::InvalidDerivedName {
                    name: default_name.clone(),
                    violation,
                })
            })?;
            default_name
        }
    };

    Ok(AddressEntry::new(name, token.value.clone(), kind))
}

/// Classify a name/value pair.
pub fn classify_parts(name: Option<&str>, value: &str) -> std::result::Result<AddressEntry, Rejected> {
    classify_token(&RawToken::new(name, value))
}

/// Result of classifying a list of tokens
#[derive(Debug, Clone, Default)]
pub struct Classification {
    /// IP/netmask entries in input order
    pub ip: Vec<AddressEntry>,

    /// FQDN entries in input order
    pub fqdn: Vec<AddressEntry>,

    /// Range entries in input order
    pub range: Vec<AddressEntry>,

    /// Tokens that could not be classified
    pub rejected: Vec<Rejected>,
}

impl Classification {
    /// All entries in push order: IP, then FQDN, then range.
    pub fn entries(&self) -> impl Iterator<Item = &AddressEntry> {
        self.ip.iter().chain(&self.fqdn).chain(&self.range)
    }

    /// Number of classified entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.ip.len() + self.fqdn.len() + self.range.len()
    }

    /// Returns true if nothing was classified
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if every token was classified
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Take the entries, failing if any token was rejected.
    ///
    /// There is no partial acceptance: one bad token rejects the whole list.
    pub fn into_result(self) -> Result<Vec<AddressEntry>> {
        if !self.rejected.is_empty() {
            return Err(AddrError::Classification(self.rejected));
        }
        let mut entries = self.ip;
        entries.extend(self.fqdn);
        entries.extend(self.range);
        Ok(entries)
    }
}

/// Classify every token, collecting rejects instead of stopping at the first.
pub fn classify<I>(tokens: I) -> Classification
where
    I: IntoIterator<Item = RawToken>,
{
    let mut out = Classification::default();
    for token in tokens {
        match classify_token(&token) {
            Ok(entry) => match entry.kind {
                AddressKind::NetworkHost => out.ip.push(entry),
                AddressKind::Fqdn => out.fqdn.push(entry),
                AddressKind::Range => out.range.push(entry),
            },
            Err(rejected) => out.rejected.push(rejected),
        }
    }
    out
}
