//! Duplicate name detection.
//!
//! Two checks run before anything is pushed:
//!
//! - names repeated inside the input list are fatal, since later entries
//!   would overwrite earlier ones on the device
//! - names that already exist on the device are dropped from the working set

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::types::AddressEntry;
use crate::{AddrError, Result};

/// A name used more than once in the input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateName {
    /// The repeated name
    pub name: String,

    /// Zero-based positions of every use, ascending
    pub positions: Vec<usize>,
}

impl DuplicateName {
    /// How many times the name appears
    #[must_use]
    pub fn count(&self) -> usize {
        self.positions.len()
    }
}

/// Report every name that appears at two or more positions.
///
/// Results are ordered by first occurrence.
pub fn find_duplicates<'a, I>(names: I) -> Vec<DuplicateName>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut order: Vec<&str> = Vec::new();
    let mut positions: HashMap<&str, Vec<usize>> = HashMap::new();

    for (i, name) in names.into_iter().enumerate() {
        positions
            .entry(name)
            .or_insert_with(|| {
                order.push(name);
                Vec::new()
            })
            .push(i);
    }

    order
        .into_iter()
        .filter_map(|name| {
            let seen = positions.remove(name)?;
            (seen.len() > 1).then(|| DuplicateName {
                name: name.to_string(),
                positions: seen,
            })
        })
        .collect()
}

/// Fail with [`AddrError::Duplicates`] if any entry name repeats.
pub fn ensure_unique(entries: &[AddressEntry]) -> Result<()> {
    let duplicates = find_duplicates(entries.iter().map(|e| e.name.as_str()));
    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(AddrError::Duplicates(duplicates))
    }
}

/// Entries split by whether their name already exists on the device
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Entries safe to create
    pub kept: Vec<AddressEntry>,

    /// Entries whose name is already taken
    pub removed: Vec<AddressEntry>,
}

impl Partition {
    /// Returns true if any entry collided with an existing object
    #[must_use]
    pub fn has_collisions(&self) -> bool {
        !self.removed.is_empty()
    }
}

/// Drop entries whose names appear in `existing`, keeping order.
pub fn remove_existing<S>(entries: Vec<AddressEntry>, existing: &[S]) -> Partition
where
    S: AsRef<str>,
{
    let taken: HashSet<&str> = existing.iter().map(AsRef::as_ref).collect();
    let (removed, kept) = entries
        .into_iter()
        .partition(|entry| taken.contains(entry.name.as_str()));
    Partition { kept, removed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AddressKind;

    fn host(name: &str) -> AddressEntry {
        AddressEntry::new(name, "10.0.0.1", AddressKind::NetworkHost)
    }

    #[test]
    fn test_no_duplicates() {
        assert!(find_duplicates(["a", "b", "c"]).is_empty());
        assert!(find_duplicates(Vec::<&str>::new()).is_empty());
    }

    #[test]
    fn test_duplicates_reported_with_positions() {
        let dups = find_duplicates(["a", "b", "a", "c", "b", "a"]);
        assert_eq!(
            dups,
            vec![
                DuplicateName { name: "a".into(), positions: vec![0, 2, 5] },
                DuplicateName { name: "b".into(), positions: vec![1, 4] },
            ]
        );
        assert_eq!(dups[0].count(), 3);
    }

    #[test]
    fn test_ensure_unique() {
        assert!(ensure_unique(&[host("a"), host("b")]).is_ok());

        let err = ensure_unique(&[host("a"), host("a")]).unwrap_err();
        assert!(matches!(err, AddrError::Duplicates(ref d) if d[0].name == "a"));
        assert_eq!(err.to_string(), "duplicate names in input: a (used 2 times)");
    }

    #[test]
    fn test_derived_name_collides_with_explicit() {
        let entries = crate::classify(crate::RawToken::parse_list("H-10.0.0.1:10.9.9.9, 10.0.0.1"))
            .into_result()
            .unwrap();
        assert!(ensure_unique(&entries).is_err());
    }

    #[test]
    fn test_remove_existing() {
        let entries = vec![host("a"), host("b"), host("c")];
        let part = remove_existing(entries, &["b", "z"]);
        assert!(part.has_collisions());
        assert_eq!(part.kept, vec![host("a"), host("c")]);
        assert_eq!(part.removed, vec![host("b")]);
    }

    #[test]
    fn test_remove_existing_none_taken() {
        let entries = vec![host("a")];
        let part = remove_existing(entries, &Vec::<String>::new());
        assert!(!part.has_collisions());
        assert_eq!(part.kept.len(), 1);
    }
}
