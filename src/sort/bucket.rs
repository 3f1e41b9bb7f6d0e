/// Ordered bucket sets for one key position of a multi-key sort.
///
/// A bucketing pass groups records by rendered key string. Buckets hold
/// record indices, never records: the engine reorders references into an
/// immutable slice, the same index-vector model the rest of the crate uses
/// for line data.
use std::cmp::Ordering;

use super::key::Direction;

/// One group of records sharing a rendered key string.
#[derive(Debug)]
pub struct Bucket {
    pub key: String,
    pub items: Vec<usize>,
    /// Sealed against further insertion and reordering for the rest of the
    /// current pass. Frozen buckets always precede unfrozen ones.
    pub frozen: bool,
}

impl Bucket {
    fn new(key: String, first: usize) -> Bucket {
        Bucket {
            key,
            items: vec![first],
            frozen: false,
        }
    }
}

/// The ordered sequence of buckets produced for one key position, plus the
/// direction that governs where new keys are placed.
///
/// Invariant: the unfrozen suffix is always sorted by key string according
/// to `direction`; frozen buckets are never reordered or merged.
#[derive(Debug)]
pub struct BucketSet {
    direction: Direction,
    buckets: Vec<Bucket>,
}

impl BucketSet {
    pub fn new(direction: Direction) -> BucketSet {
        BucketSet {
            direction,
            buckets: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Seal every bucket currently in the set and return the resulting
    /// total count — the freeze boundary for the next parent group.
    ///
    /// Called once per parent group, before that group contributes any
    /// records: buckets inherited from earlier parent groups must not
    /// receive later groups' records, or the ordering established by
    /// higher-priority keys would be corrupted.
    pub fn freeze_all(&mut self) -> usize {
        for bucket in &mut self.buckets {
            bucket.frozen = true;
        }
        self.buckets.len()
    }

    /// Find the unfrozen bucket matching `key`, scanning from `boundary`.
    ///
    /// Lookup is deliberately scoped to the unfrozen suffix: a key string
    /// that also occurred under an earlier parent group lives in a frozen
    /// bucket, and merging into it would move the record across the parent
    /// boundary. Duplicate keys merge per parent group, never across.
    pub fn find_unfrozen_mut(&mut self, key: &str, boundary: usize) -> Option<&mut Bucket> {
        self.buckets[boundary..].iter_mut().find(|b| b.key == key)
    }

    /// Append a fresh bucket at the end of the set. Used for the first
    /// record of a parent group, when the unfrozen region is empty and no
    /// placement scan is needed.
    pub fn append_new(&mut self, key: String, item: usize) {
        self.buckets.push(Bucket::new(key, item));
    }

    /// Insert a new bucket into the unfrozen suffix, keeping it ordered.
    ///
    /// One linear insertion-sort step: scan from `boundary`, and place the
    /// new bucket before the first existing bucket it should precede under
    /// `direction` (Ascending: first key >= new key; Descending: first
    /// key < new key). Appends at the end when no such bucket exists.
    pub fn insert_ordered(&mut self, key: String, item: usize, boundary: usize) {
        let mut at = self.buckets.len();
        for (i, bucket) in self.buckets.iter().enumerate().skip(boundary) {
            let cmp = key.as_str().cmp(bucket.key.as_str());
            let precedes = match self.direction {
                Direction::Ascending => cmp != Ordering::Greater,
                Direction::Descending => cmp == Ordering::Greater,
            };
            if precedes {
                at = i;
                break;
            }
        }
        self.buckets.insert(at, Bucket::new(key, item));
    }

    /// Consume the set, yielding each bucket's record indices in bucket
    /// order. Non-final passes feed these back in as parent groups; the
    /// final pass concatenates them into the total order.
    pub fn into_groups(self) -> impl Iterator<Item = Vec<usize>> {
        self.buckets.into_iter().map(|b| b.items)
    }
}
