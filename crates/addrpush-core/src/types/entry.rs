use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of address object, in the order entries are classified and pushed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddressKind {
    /// IP address with optional netmask (`10.1.1.0/24`)
    NetworkHost,
    /// Fully qualified domain name (`ftp.example.com`)
    Fqdn,
    /// Inclusive IP range (`10.1.1.10-10.1.1.20`)
    Range,
}

impl AddressKind {
    /// All kinds in push order
    pub const ALL: [Self; 3] = [Self::NetworkHost, Self::Fqdn, Self::Range];

    /// Element tag used for this kind in the device configuration
    #[must_use]
    pub const fn element_tag(self) -> &'static str {
        match self {
            Self::NetworkHost => "ip-netmask",
            Self::Fqdn => "fqdn",
            Self::Range => "ip-range",
        }
    }
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetworkHost => write!(f, "ip-netmask"),
            Self::Fqdn => write!(f, "fqdn"),
            Self::Range => write!(f, "ip-range"),
        }
    }
}

/// A named address object ready to be created on the device
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressEntry {
    /// Object name (follows the naming convention)
    pub name: String,

    /// Address value exactly as entered
    pub value: String,

    /// What kind of address `value` is
    pub kind: AddressKind,
}

impl AddressEntry {
    /// Create an entry. Callers are expected to have validated `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>, kind: AddressKind) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind,
        }
    }

    /// Serialize this entry as a configuration element fragment.
    ///
    /// Names and values are restricted to characters that need no XML
    /// escaping.
    #[must_use]
    pub fn fragment(&self) -> String {
        let tag = self.kind.element_tag();
        format!("<entry name='{}'><{tag}>{}</{tag}></entry>", self.name, self.value)
    }
}

impl fmt::Display for AddressEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.value)
    }
}
