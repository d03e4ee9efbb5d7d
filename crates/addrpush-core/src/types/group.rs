use serde::{Deserialize, Serialize};

use crate::{naming, Result};

/// A static address group listing address objects by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressGroup {
    /// Group name (follows the naming convention)
    pub name: String,

    /// Member object names, in push order
    pub members: Vec<String>,
}

impl AddressGroup {
    /// Create a group after validating its name.
    pub fn new(name: impl Into<String>, members: Vec<String>) -> Result<Self> {
        let name = name.into();
        naming::validate(&name)?;
        Ok(Self { name, members })
    }

    /// Fragment for one member.
    #[must_use]
    pub fn member_fragment(member: &str) -> String {
        format!("<member>{member}</member>")
    }

    /// Opening part of the group element, up to the first member.
    #[must_use]
    pub fn head(&self) -> String {
        format!("<entry name='{}'><static>", self.name)
    }

    /// Closing part of the group element.
    #[must_use]
    pub const fn tail() -> &'static str {
        "</static></entry>"
    }

    /// Wrap a run of member fragments into a complete group element.
    #[must_use]
    pub fn element(&self, members_payload: &str) -> String {
        format!("{}{members_payload}{}", self.head(), Self::tail())
    }

    /// Encoded length of the wrapper around the member fragments.
    #[must_use]
    pub fn wrapper_len(&self) -> usize {
        crate::encoded_len(&self.head()) + crate::encoded_len(Self::tail())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_element() {
        let group = AddressGroup::new("web servers", vec!["a".into(), "b".into()]).unwrap();
        let payload = format!(
            "{}{}",
            AddressGroup::member_fragment("a"),
            AddressGroup::member_fragment("b")
        );
        assert_eq!(
            group.element(&payload),
            "<entry name='web servers'><static><member>a</member><member>b</member></static></entry>"
        );
    }

    #[test]
    fn test_group_name_validated() {
        assert!(AddressGroup::new("bad name ", Vec::new()).is_err());
        assert!(AddressGroup::new("", Vec::new()).is_err());
    }
}
