//! Record grouping.

use std::collections::BTreeMap;

use super::records::Record;

/// Partitions records by code.
///
/// Each record's raw line is appended to its code's sequence in extraction
/// order, so within a group the line order equals the order of appearance
/// in the source text. No deduplication: a code recurring across rows keeps
/// every one of its lines. The `BTreeMap` keeps group iteration in
/// ascending code order, which makes archive contents reproducible across
/// runs on identical input.
pub fn group_records(records: Vec<Record>) -> BTreeMap<String, Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for record in records {
        groups.entry(record.code).or_default().push(record.raw_line);
    }
    groups
}
