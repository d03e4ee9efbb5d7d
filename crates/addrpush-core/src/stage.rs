//! Push sequence stages.

use serde::Serialize;
use std::fmt;

use crate::{AddrError, Result};

/// Where a push session is in its sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PushStage {
    /// Nothing done yet
    #[default]
    Idle,
    /// API key obtained
    Authenticated,
    /// Panorama or firewall detected
    DeviceTypeResolved,
    /// Device group or vsys chosen
    ScopeResolved,
    /// Local and remote duplicates handled
    DuplicatesResolved,
    /// Address group name chosen
    GroupNameChosen,
    /// Address objects (and group, if any) created
    Pushed,
    /// Run finished
    Done,
    /// Run stopped on an error
    Aborted,
}

impl PushStage {
    /// Returns true if no further transition is possible
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }

    /// Returns true if a session may move from `self` to `next`.
    ///
    /// The group stage is optional and a run with nothing left to push
    /// after duplicate removal finishes early.
    #[must_use]
    pub const fn can_advance_to(self, next: Self) -> bool {
        use PushStage::{
            Aborted, Authenticated, DeviceTypeResolved, Done, DuplicatesResolved,
            GroupNameChosen, Idle, Pushed, ScopeResolved,
        };
        match (self, next) {
            (Done | Aborted, _) => false,
            (_, Aborted) => true,
            (Idle, Authenticated)
            | (Authenticated, DeviceTypeResolved)
            | (DeviceTypeResolved, ScopeResolved)
            | (ScopeResolved, DuplicatesResolved)
            | (DuplicatesResolved, GroupNameChosen | Pushed | Done)
            | (GroupNameChosen, Pushed)
            | (Pushed, Done) => true,
            _ => false,
        }
    }

    /// Move to `next`, failing on an illegal transition.
    pub fn advance(&mut self, next: Self) -> Result<()> {
        if !self.can_advance_to(next) {
            return Err(AddrError::Stage { from: *self, to: next });
        }
        *self = next;
        Ok(())
    }
}

impl fmt::Display for PushStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Authenticated => "authenticated",
            Self::DeviceTypeResolved => "device type resolved",
            Self::ScopeResolved => "device group/vsys resolved",
            Self::DuplicatesResolved => "duplicates resolved",
            Self::GroupNameChosen => "group name chosen",
            Self::Pushed => "pushed",
            Self::Done => "done",
            Self::Aborted => "aborted",
        };
        f.write_str(label)
    }
}
