/// Multi-key sort driver.
///
/// Breadth-first, iterative most-significant-key bucket sort: one bucketing
/// pass per key, carrying the bucket boundaries of each pass into the
/// grouping of the next, then flattening the last pass into the total
/// order. Equivalent to sorting by a tuple of rendered key strings with
/// per-key direction, and stable on full-key ties.
use thiserror::Error;

use super::bucket::BucketSet;
use super::key::{Keyed, SortKey};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SortError {
    /// The specification had no keys; there is nothing to sort by.
    #[error("empty sort specification")]
    EmptySpec,

    /// The record collection was empty.
    #[error("no records to sort")]
    NoRecords,

    /// The passes lost or duplicated records. Reported instead of returning
    /// a partially bucketed order.
    #[error("sort produced {actual} records, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Sort `records` by `spec` (most significant key first) and return the
/// total order as indices into `records`.
///
/// Records are read-only throughout; all working state is local to this
/// call, so independent invocations over the same slice may run in
/// parallel.
pub fn sort_records<R: Keyed>(
    records: &[R],
    spec: &[SortKey<R::Field>],
) -> Result<Vec<usize>, SortError> {
    if spec.is_empty() {
        return Err(SortError::EmptySpec);
    }
    if records.is_empty() {
        return Err(SortError::NoRecords);
    }

    // A single implicit parent group holding every record, in input order.
    let mut parents: Vec<Vec<usize>> = vec![(0..records.len()).collect()];

    for key in spec {
        let mut set = BucketSet::new(key.direction);

        for group in &parents {
            // Seal buckets contributed by the parent groups already
            // processed; this group's records may only create or join
            // buckets past the boundary.
            let boundary = set.freeze_all();

            for &idx in group {
                let key_string = records[idx].key_string(key.field);

                if set.len() == boundary {
                    // No unfrozen buckets yet for this parent group.
                    set.append_new(key_string, idx);
                } else if let Some(bucket) = set.find_unfrozen_mut(&key_string, boundary) {
                    bucket.items.push(idx);
                } else {
                    set.insert_ordered(key_string, idx, boundary);
                }
            }
        }

        // Each bucket, in its final order, becomes one parent group for the
        // next key; after the last key this is the flatten input.
        parents = set.into_groups().collect();
    }

    let sorted: Vec<usize> = parents.into_iter().flatten().collect();
    if sorted.len() != records.len() {
        return Err(SortError::LengthMismatch {
            expected: records.len(),
            actual: sorted.len(),
        });
    }
    Ok(sorted)
}
