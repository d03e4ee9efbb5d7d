//! XPath construction for configuration nodes.

use std::fmt;

use addrpush_core::Scope;

/// Root of the local device configuration
pub const DEVICE_ROOT: &str = "/config/devices/entry[@name='localhost.localdomain']";

/// Root of the shared configuration
pub const SHARED_ROOT: &str = "/config/shared";

/// Operational command returning the device-group tree
pub const DG_HIERARCHY_CMD: &str = "<show><dg-hierarchy></dg-hierarchy></show>";

/// Operational command returning `on` or `off` for multi-vsys mode
pub const MULTI_VSYS_CMD: &str =
    "<show><system><setting><multi-vsys></multi-vsys></setting></system></show>";

/// Device groups container (Panorama)
#[must_use]
pub fn device_groups() -> String {
    format!("{DEVICE_ROOT}/device-group")
}

/// Vsys container (firewall)
#[must_use]
pub fn vsys_list() -> String {
    format!("{DEVICE_ROOT}/vsys")
}

/// A configuration location that holds address objects
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    /// Objects visible to every device group or vsys
    Shared,
    /// A Panorama device group
    DeviceGroup(String),
    /// A firewall vsys
    Vsys(String),
}

impl Location {
    /// XPath of the location itself
    #[must_use]
    pub fn root(&self) -> String {
        match self {
            Self::Shared => SHARED_ROOT.to_string(),
            Self::DeviceGroup(name) => format!("{DEVICE_ROOT}/device-group/entry[@name='{name}']"),
            Self::Vsys(name) => format!("{DEVICE_ROOT}/vsys/entry[@name='{name}']"),
        }
    }

    /// XPath of the address container
    #[must_use]
    pub fn addresses(&self) -> String {
        format!("{}/address", self.root())
    }

    /// XPath of the address-group container
    #[must_use]
    pub fn address_groups(&self) -> String {
        format!("{}/address-group", self.root())
    }

    /// Where objects for `scope` are created
    #[must_use]
    pub fn target(scope: &Scope) -> Self {
        match scope {
            Scope::DeviceGroup { name, .. } => Self::DeviceGroup(name.clone()),
            Scope::Vsys { name } => Self::Vsys(name.clone()),
        }
    }

    /// Every location whose names an object in `scope` could collide with:
    /// the target, its ancestor device groups, then shared.
    #[must_use]
    pub fn lineage(scope: &Scope) -> Vec<Self> {
        let mut locations = vec![Self::target(scope)];
        if let Scope::DeviceGroup { ancestors, .. } = scope {
            locations.extend(ancestors.iter().cloned().map(Self::DeviceGroup));
        }
        locations.push(Self::Shared);
        locations
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shared => write!(f, "shared"),
            Self::DeviceGroup(name) => write!(f, "device-group {name}"),
            Self::Vsys(name) => write!(f, "{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_xpaths() {
        assert_eq!(Location::Shared.addresses(), "/config/shared/address");
        assert_eq!(
            Location::DeviceGroup("branch".into()).addresses(),
            "/config/devices/entry[@name='localhost.localdomain']/device-group/entry[@name='branch']/address"
        );
        assert_eq!(
            Location::Vsys("vsys1".into()).address_groups(),
            "/config/devices/entry[@name='localhost.localdomain']/vsys/entry[@name='vsys1']/address-group"
        );
    }

    #[test]
    fn test_lineage_for_device_group() {
        let scope = Scope::DeviceGroup {
            name: "branch".into(),
            ancestors: vec!["emea".into(), "global".into()],
        };
        assert_eq!(
            Location::lineage(&scope),
            vec![
                Location::DeviceGroup("branch".into()),
                Location::DeviceGroup("emea".into()),
                Location::DeviceGroup("global".into()),
                Location::Shared,
            ]
        );
    }

    #[test]
    fn test_lineage_for_vsys() {
        let scope = Scope::Vsys { name: "vsys2".into() };
        assert_eq!(
            Location::lineage(&scope),
            vec![Location::Vsys("vsys2".into()), Location::Shared]
        );
    }
}
