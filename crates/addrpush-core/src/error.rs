use thiserror::Error;

use crate::classify::Rejected;
use crate::duplicates::DuplicateName;
use crate::naming::NameViolation;
use crate::stage::PushStage;

/// Result type alias for address object operations
pub type Result<T> = std::result::Result<T, AddrError>;

/// Errors raised while validating, classifying or batching address objects
#[derive(Error, Debug)]
pub enum AddrError {
    /// A name does not follow the object naming convention
    #[error("invalid name '{name}': {violation}")]
    InvalidName {
        /// The offending name
        name: String,
        /// Which rule it breaks
        violation: NameViolation,
    },

    /// One or more input tokens could not be classified
    #[error("{} input entries could not be classified: {}", .0.len(), join_rejected(.0))]
    Classification(Vec<Rejected>),

    /// The same name was used more than once in one input list
    #[error("duplicate names in input: {}", join_duplicates(.0))]
    Duplicates(Vec<DuplicateName>),

    /// A single fragment does not fit into one request
    #[error("'{label}' needs {needed} characters but a request only has room for {available}")]
    FragmentTooLarge {
        /// Name of the entry or member that does not fit
        label: String,
        /// Encoded length of the fragment
        needed: usize,
        /// Room left after the envelope overhead
        available: usize,
    },

    /// A session tried to skip or repeat a push stage
    #[error("cannot move from '{from}' to '{to}'")]
    Stage {
        /// Stage the session is in
        from: PushStage,
        /// Stage that was requested
        to: PushStage,
    },

    /// Raw input (CSV row, list) is malformed
    #[error("input error: {0}")]
    Input(String),
}

impl AddrError {
    /// Returns true if the error came from user input rather than program state
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidName { .. } | Self::Classification(_) | Self::Input(_)
        )
    }
}

fn join_rejected(rejected: &[Rejected]) -> String {
    rejected
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_duplicates(duplicates: &[DuplicateName]) -> String {
    duplicates
        .iter()
        .map(|d| format!("{} (used {} times)", d.name, d.count()))
        .collect::<Vec<_>>()
        .join(", ")
}
