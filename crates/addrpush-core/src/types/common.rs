use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of device the session is talking to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    /// Centralized manager with device groups
    Panorama,
    /// Standalone firewall with one or more vsys
    Firewall,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Panorama => write!(f, "Panorama"),
            Self::Firewall => write!(f, "firewall"),
        }
    }
}

/// Where new objects are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Scope {
    /// A Panorama device group and its ancestors, nearest first
    DeviceGroup {
        /// Device group objects are created in
        name: String,
        /// Parent device groups, nearest first
        #[serde(default)]
        ancestors: Vec<String>,
    },
    /// A firewall virtual system
    Vsys {
        /// Vsys objects are created in (e.g. `vsys1`)
        name: String,
    },
}

impl Scope {
    /// Default vsys on single-vsys firewalls
    pub const DEFAULT_VSYS: &'static str = "vsys1";

    /// Name of the device group or vsys
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::DeviceGroup { name, .. } | Self::Vsys { name } => name,
        }
    }

    /// Device type this scope belongs to
    #[must_use]
    pub const fn device_type(&self) -> DeviceType {
        match self {
            Self::DeviceGroup { .. } => DeviceType::Panorama,
            Self::Vsys { .. } => DeviceType::Firewall,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceGroup { name, .. } => write!(f, "device group '{name}'"),
            Self::Vsys { name } => write!(f, "vsys '{name}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_device_type() {
        let dg = Scope::DeviceGroup { name: "branch".into(), ancestors: vec!["emea".into()] };
        assert_eq!(dg.device_type(), DeviceType::Panorama);
        assert_eq!(dg.name(), "branch");
        assert_eq!(dg.to_string(), "device group 'branch'");

        let vsys = Scope::Vsys { name: Scope::DEFAULT_VSYS.into() };
        assert_eq!(vsys.device_type(), DeviceType::Firewall);
        assert_eq!(vsys.to_string(), "vsys 'vsys1'");
    }

    #[test]
    fn test_scope_serialization() {
        let scope = Scope::DeviceGroup { name: "branch".into(), ancestors: Vec::new() };
        let json = serde_json::to_string(&scope).unwrap();
        assert_eq!(json, r#"{"type":"device-group","name":"branch","ancestors":[]}"#);

        let parsed: Scope = serde_json::from_str(r#"{"type":"vsys","name":"vsys2"}"#).unwrap();
        assert_eq!(parsed, Scope::Vsys { name: "vsys2".into() });
    }
}
