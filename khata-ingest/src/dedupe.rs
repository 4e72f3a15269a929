//! Duplicate removal and month partitioning over parsed transactions.

use khata_core::Transaction;
use std::collections::{BTreeMap, HashSet};

/// Drop repeated transaction ids, keeping the first occurrence in document
/// order. Transactions with an empty id never deduplicate against each other.
pub fn dedupe(txns: Vec<Transaction>) -> Vec<Transaction> {
    let mut seen: HashSet<String> = HashSet::new();
    txns.into_iter()
        .filter(|t| t.txn_id.is_empty() || seen.insert(t.txn_id.clone()))
        .collect()
}

/// Group transactions by `"YYYY-MM"`. `BTreeMap` keys iterate
/// lexicographically, which for zero-padded keys is chronological.
pub fn partition_by_month(txns: Vec<Transaction>) -> BTreeMap<String, Vec<Transaction>> {
    let mut partitions: BTreeMap<String, Vec<Transaction>> = BTreeMap::new();
    for txn in txns {
        partitions.entry(txn.partition_key()).or_default().push(txn);
    }
    partitions
}
