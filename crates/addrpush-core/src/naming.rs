//! Object naming convention.
//!
//! Address objects and address groups share one rule set:
//!
//! - first character is a letter or digit
//! - remaining characters are letters, digits, `_`, `.`, `-` or space
//! - at most 63 characters
//! - no trailing space

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{AddrError, Result};

/// Maximum length of an object name
pub const MAX_NAME_LEN: usize = 63;

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9_. -]{0,61}[A-Za-z0-9_.-])?$")
        .expect("name pattern is valid")
});

/// The rule a rejected name breaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameViolation {
    /// Name is empty
    Empty,
    /// Name is longer than [`MAX_NAME_LEN`]
    TooLong,
    /// First character is not alphanumeric
    BadStart,
    /// Name contains a character outside the allowed set
    BadCharacter(char),
    /// Name ends with a space
    TrailingSpace,
}

impl fmt::Display for NameViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "name is empty"),
            Self::TooLong => write!(f, "longer than {MAX_NAME_LEN} characters"),
            Self::BadStart => write!(f, "must start with a letter or digit"),
            Self::BadCharacter(c) => write!(f, "character '{c}' is not allowed"),
            Self::TrailingSpace => write!(f, "must not end with a space"),
        }
    }
}

/// Returns true if `name` is a valid object name.
#[must_use]
pub fn is_valid(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// Check a name and report the first rule it breaks.
pub fn check(name: &str) -> std::result::Result<(), NameViolation> {
    if is_valid(name) {
        return Ok(());
    }

    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(NameViolation::Empty);
    };
    if !first.is_ascii_alphanumeric() {
        return Err(NameViolation::BadStart);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(NameViolation::TooLong);
    }
    if let Some(bad) = chars.find(|c| !is_allowed(*c)) {
        return Err(NameViolation::BadCharacter(bad));
    }
    Err(NameViolation::TrailingSpace)
}

/// Validate a name, wrapping any violation in [`AddrError::InvalidName`].
pub fn validate(name: &str) -> Result<()> {
    check(name).map_err(|violation| AddrError::InvalidName {
        name: name.to_string(),
        violation,
    })
}

const fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | ' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["a", "ab", "web-01", "H-10.1.1.1", "N-10.0.0.0-8", "range_1.1.1.1-1.1.1.9", "dmz net.1"] {
            assert!(is_valid(name), "{name} should be valid");
        }
        assert!(is_valid(&"a".repeat(MAX_NAME_LEN)));
    }

    #[test]
    fn test_violations() {
        assert_eq!(check(""), Err(NameViolation::Empty));
        assert_eq!(check("_web"), Err(NameViolation::BadStart));
        assert_eq!(check("-web"), Err(NameViolation::BadStart));
        assert_eq!(check(&"a".repeat(MAX_NAME_LEN + 1)), Err(NameViolation::TooLong));
        assert_eq!(check("web/1"), Err(NameViolation::BadCharacter('/')));
        assert_eq!(check("web'1"), Err(NameViolation::BadCharacter('\'')));
        assert_eq!(check("web "), Err(NameViolation::TrailingSpace));
    }

    #[test]
    fn test_validate_wraps_violation() {
        let err = validate("bad<name").unwrap_err();
        assert!(matches!(
            err,
            AddrError::InvalidName { violation: NameViolation::BadCharacter('<'), .. }
        ));
        assert!(err.is_validation_error());
    }
}
