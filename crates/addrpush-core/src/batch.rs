//! Packing configuration fragments into size-bounded requests.
//!
//! The device API takes the whole element in a query string, so every
//! request has a length ceiling. Fragments are packed greedily in input
//! order: a fragment goes into the current batch if the envelope overhead,
//! the batch so far and the fragment fit under the capacity, otherwise it
//! opens the next batch. A fragment is never split.
//!
//! Lengths are measured after percent-encoding, as the fragment will appear
//! on the wire.

use serde::Serialize;

use crate::types::{AddressEntry, AddressGroup};
use crate::{AddrError, Result};

/// Default request length ceiling, envelope included
pub const DEFAULT_MAX_REQUEST_LEN: usize = 5000;

/// Length of `s` once percent-encoded into a query string.
#[must_use]
pub fn encoded_len(s: &str) -> usize {
    url::form_urlencoded::byte_serialize(s.as_bytes())
        .map(str::len)
        .sum()
}

/// One request's worth of fragments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Batch {
    fragments: Vec<String>,
    encoded_len: usize,
}

impl Batch {
    /// Fragments in this batch, in order
    #[must_use]
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Number of fragments
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Returns true if the batch has no fragments
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Encoded length of the payload, envelope not included
    #[must_use]
    pub const fn encoded_len(&self) -> usize {
        self.encoded_len
    }

    /// The concatenated fragments, ready to be sent as `element`
    #[must_use]
    pub fn payload(&self) -> String {
        self.fragments.concat()
    }

    fn push(&mut self, fragment: String, len: usize) {
        self.fragments.push(fragment);
        self.encoded_len += len;
    }
}

/// Greedy packer with a fixed capacity and per-request overhead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchBuilder {
    capacity: usize,
    overhead: usize,
}

impl BatchBuilder {
    /// Create a builder.
    ///
    /// `capacity` is the full request ceiling. `overhead` is the length of
    /// everything in the request other than the fragments.
    #[must_use]
    pub const fn new(capacity: usize, overhead: usize) -> Self {
        Self { capacity, overhead }
    }

    /// Request ceiling
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Room for fragments in each request
    #[must_use]
    pub const fn available(&self) -> usize {
        self.capacity.saturating_sub(self.overhead)
    }

    /// Pack labelled fragments.
    ///
    /// The label names the fragment in errors.
    pub fn pack<I>(&self, fragments: I) -> Result<Vec<Batch>>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let available = self.available();
        let mut batches = Vec::new();
        let mut current = Batch::default();

        for (label, fragment) in fragments {
            let len = encoded_len(&fragment);
            if len > available {
                return Err(AddrError::FragmentTooLarge {
                    label,
                    needed: len,
                    available,
                });
            }
            if current.encoded_len + len > available {
                batches.push(std::mem::take(&mut current));
            }
            current.push(fragment, len);
        }

        if !current.is_empty() {
            batches.push(current);
        }
        Ok(batches)
    }

    /// Pack address entries, IP first, then FQDN, then range.
    ///
    /// The sort is stable, so input order is kept within each kind.
    pub fn pack_entries(&self, entries: &[AddressEntry]) -> Result<Vec<Batch>> {
        let mut ordered: Vec<&AddressEntry> = entries.iter().collect();
        ordered.sort_by_key(|e| e.kind);
        self.pack(ordered.into_iter().map(|e| (e.name.clone(), e.fragment())))
    }

    /// Pack group members.
    ///
    /// Each batch becomes one group element, so the group wrapper counts as
    /// overhead on top of the envelope.
    pub fn pack_members(&self, group: &AddressGroup) -> Result<Vec<Batch>> {
        let builder = Self::new(self.capacity, self.overhead + group.wrapper_len());
        builder.pack(
            group
                .members
                .iter()
                .map(|m| (m.clone(), AddressGroup::member_fragment(m))),
        )
    }
}

impl Default for BatchBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUEST_LEN, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AddressKind;

    fn hosts(n: usize) -> Vec<AddressEntry> {
        (0..n)
            .map(|i| {
                let value = format!("10.0.{}.{}", i / 256, i % 256);
                AddressEntry::new(format!("H-{value}"), value, AddressKind::NetworkHost)
            })
            .collect()
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(encoded_len("abc"), 3);
        // '<' '=' '\'' '>' are escaped to three characters each, ' ' to '+'
        assert_eq!(encoded_len("<a b='c'>"), 3 + 1 + 1 + 1 + 3 + 3 + 1 + 3 + 3);
    }

    #[test]
    fn test_single_batch() {
        let entries = hosts(4);
        let batches = BatchBuilder::new(5000, 200).pack_entries(&entries).unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 4);
    }

    #[test]
    fn test_no_batch_exceeds_capacity() {
        let entries = hosts(500);
        let builder = BatchBuilder::new(2000, 300);
        let batches = builder.pack_entries(&entries).unwrap();
        assert!(batches.len() > 1);
        for batch in &batches {
            assert!(batch.encoded_len() + 300 <= 2000);
            assert_eq!(batch.encoded_len(), encoded_len(&batch.payload()));
        }
    }

    #[test]
    fn test_concatenation_preserves_entries() {
        let entries = hosts(300);
        let batches = BatchBuilder::new(1500, 100).pack_entries(&entries).unwrap();

        let joined: String = batches.iter().map(Batch::payload).collect();
        let expected: String = entries.iter().map(AddressEntry::fragment).collect();
        assert_eq!(joined, expected);

        let count: usize = batches.iter().map(Batch::len).sum();
        assert_eq!(count, entries.len());
    }

    #[test]
    fn test_greedy_fill() {
        let fragments = ["aaaa", "bbbb", "cccc", "dd"]
            .iter()
            .map(|s| ((*s).to_string(), (*s).to_string()));
        let batches = BatchBuilder::new(10, 2).pack(fragments).unwrap();
        let payloads: Vec<_> = batches.iter().map(Batch::payload).collect();
        assert_eq!(payloads, ["aaaabbbb", "ccccdd"]);
    }

    #[test]
    fn test_entries_reordered_by_kind() {
        let entries = vec![
            AddressEntry::new("r", "10.0.0.1-10.0.0.2", AddressKind::Range),
            AddressEntry::new("f", "a.example.com", AddressKind::Fqdn),
            AddressEntry::new("h", "10.0.0.1", AddressKind::NetworkHost),
        ];
        let batches = BatchBuilder::default().pack_entries(&entries).unwrap();
        let payload = batches[0].payload();
        let h = payload.find("'h'").unwrap();
        let f = payload.find("'f'").unwrap();
        let r = payload.find("'r'").unwrap();
        assert!(h < f && f < r);
    }

    #[test]
    fn test_fragment_too_large() {
        let entries = hosts(1);
        let err = BatchBuilder::new(50, 40).pack_entries(&entries).unwrap_err();
        assert!(matches!(
            err,
            AddrError::FragmentTooLarge { ref label, available: 10, .. } if label == "H-10.0.0.0"
        ));
    }

    #[test]
    fn test_empty_input() {
        let batches = BatchBuilder::default().pack_entries(&[]).unwrap();
        assert!(batches.is_empty());
    }

    #[test]
    fn test_group_members_leave_room_for_wrapper() {
        let members: Vec<String> = (0..200).map(|i| format!("member-{i}")).collect();
        let group = AddressGroup::new("big group", members.clone()).unwrap();
        let builder = BatchBuilder::new(1000, 100);
        let batches = builder.pack_members(&group).unwrap();

        assert!(batches.len() > 1);
        for batch in &batches {
            let element = group.element(&batch.payload());
            assert!(encoded_len(&element) + 100 <= 1000);
        }

        let packed: usize = batches.iter().map(Batch::len).sum();
        assert_eq!(packed, members.len());
    }
}
