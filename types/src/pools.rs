//! Choice lists derived from the current records. Always recomputed from the
//! full list, never cached.

use itertools::Itertools;

use crate::record::MatchRecord;

/// Sorted, deduplicated union of every player and opponent name.
pub fn name_pool(records: &[MatchRecord]) -> Vec<String> {
    distinct_sorted(records.iter().flat_map(|record| record.names()))
}

/// Sorted, deduplicated union of every player and opponent deck.
pub fn deck_pool(records: &[MatchRecord]) -> Vec<String> {
    distinct_sorted(records.iter().flat_map(|record| record.decks()))
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|value| !value.trim().is_empty())
        .sorted()
        .dedup()
        .map(str::to_string)
        .collect()
}
