//! Card pool types and copy aggregation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single physical card drawn from a pack or redeemed with a wild card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardCopy {
    pub name: String,
    pub set_code: String,
    pub collector_number: i32,
}

impl CardCopy {
    pub fn new(name: impl Into<String>, set_code: impl Into<String>, collector_number: i32) -> Self {
        Self {
            name: name.into(),
            set_code: set_code.into(),
            collector_number,
        }
    }
}

/// One row of a player's card pool; `count` is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPoolEntry {
    pub name: String,
    pub set_code: String,
    pub collector_number: i32,
    pub count: i32,
}

impl CardPoolEntry {
    pub fn key(&self) -> (&str, i32) {
        (&self.set_code, self.collector_number)
    }
}

/// Collapse individual copies into one entry per (set, collector number).
///
/// The output is ordered by set code then collector number so that stores
/// touch rows in a stable order. The first name seen for a key wins.
pub fn group_copies(copies: &[CardCopy]) -> Vec<CardPoolEntry> {
    let mut grouped: BTreeMap<(&str, i32), CardPoolEntry> = BTreeMap::new();
    for copy in copies {
        grouped
            .entry((copy.set_code.as_str(), copy.collector_number))
            .and_modify(|entry| entry.count += 1)
            .or_insert_with(|| CardPoolEntry {
                name: copy.name.clone(),
                set_code: copy.set_code.clone(),
                collector_number: copy.collector_number,
                count: 1,
            });
    }
    grouped.into_values().collect()
}
