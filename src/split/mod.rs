//! Fair random partitioner: shuffle the merged leads, cut them into
//! roughly-equal contiguous shares, one per recipient.
//!
//! The shuffle is the only source of non-determinism in the whole
//! pipeline. No seed is exposed: repeated runs on identical input
//! produce different partitions, which is the point of assigning leads
//! fairly across runs.

use rand::seq::SliceRandom;

use crate::models::{RecordSet, Share};

/// Share sizes for `total` records over `parts` recipients.
///
/// `base = total div parts`, `remainder = total mod parts`; the first
/// `remainder` shares get `base + 1` records, the rest `base`. Sizes sum
/// to `total` and never differ by more than 1.
pub fn fair_sizes(total: usize, parts: usize) -> Vec<usize> {
    let base = total / parts;
    let remainder = total % parts;

    (0..parts)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

/// Shuffle the record set and split it between the recipients.
///
/// Every record lands in exactly one share (a partition, not a sample),
/// and the full-sequence shuffle gives each record equal probability of
/// any output position, so upload order cannot bias who gets what.
/// Shares map to recipients left to right; with fewer records than
/// recipients, the trailing recipients receive explicit empty shares.
///
/// Callers gate the recipient list (length ≥ 2) upstream; the split
/// itself cannot fail.
pub fn partition(set: RecordSet, recipients: &[String]) -> Vec<Share> {
    let mut records = set.records;
    records.shuffle(&mut rand::thread_rng());

    let sizes = fair_sizes(records.len(), recipients.len());

    let mut shares = Vec::with_capacity(recipients.len());
    let mut rest = records;
    for (recipient, &size) in recipients.iter().zip(&sizes) {
        let tail = rest.split_off(size);
        shares.push(Share {
            recipient: recipient.clone(),
            records: rest,
        });
        rest = tail;
    }

    shares
}
