mod common;
mod entry;
mod group;

pub use common::*;
pub use entry::*;
pub use group::*;
