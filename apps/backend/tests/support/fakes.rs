// In-process stand-ins for the pack generator and the card lookup service.

use std::collections::BTreeSet;

use async_trait::async_trait;
use league::clients::{CardLookup, CardMatch, GeneratedCard, PackSource};
use league::errors::domain::{DomainError, NotFoundKind};
use parking_lot::Mutex;

pub fn generated(name: &str, set: &str, collector_number: &str) -> GeneratedCard {
    GeneratedCard {
        name: name.to_string(),
        foil: false,
        scryfall_uri: String::new(),
        set: set.to_string(),
        collector_number: collector_number.to_string(),
        image_url: String::new(),
    }
}

pub fn printing(name: &str, set: &str, collector_number: &str) -> CardMatch {
    CardMatch {
        name: name.to_string(),
        set_code: set.to_string(),
        collector_number: collector_number.to_string(),
    }
}

/// Every pack has the same contents, re-labelled with the requested set.
pub struct FakePacks {
    pack: Vec<GeneratedCard>,
    unknown_sets: BTreeSet<String>,
    known_numbers: BTreeSet<i32>,
    malformed_after: Option<usize>,
    requests: Mutex<Vec<(String, u32)>>,
}

impl FakePacks {
    pub fn new(pack: Vec<GeneratedCard>) -> Self {
        let known_numbers = pack
            .iter()
            .filter_map(|card| card.collector_number.parse().ok())
            .collect();
        Self {
            pack,
            unknown_sets: BTreeSet::new(),
            known_numbers,
            malformed_after: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Opt, Shock and a second Opt: three cards, two distinct printings.
    pub fn standard() -> Self {
        Self::new(vec![
            generated("Opt", "xxx", "65"),
            generated("Shock", "xxx", "156"),
            generated("Opt", "xxx", "65"),
        ])
    }

    pub fn with_unknown_set(mut self, set_code: &str) -> Self {
        self.unknown_sets.insert(set_code.to_string());
        self
    }

    pub fn with_known_number(mut self, collector_number: i32) -> Self {
        self.known_numbers.insert(collector_number);
        self
    }

    /// After `calls` good responses, packs carry a non-numeric collector number.
    pub fn malformed_after(mut self, calls: usize) -> Self {
        self.malformed_after = Some(calls);
        self
    }

    pub fn pack_size(&self) -> usize {
        self.pack.len()
    }

    /// `(set, count)` of every `get_packs` call so far.
    pub fn requests(&self) -> Vec<(String, u32)> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl PackSource for FakePacks {
    async fn get_packs(&self, set_code: &str, count: u32) -> Result<Vec<GeneratedCard>, DomainError> {
        let calls_before = {
            let mut requests = self.requests.lock();
            requests.push((set_code.to_string(), count));
            requests.len() - 1
        };
        if self.unknown_sets.contains(set_code) {
            return Err(DomainError::not_found(
                NotFoundKind::Set,
                format!("set {set_code} not found"),
            ));
        }
        let mut cards = Vec::new();
        for _ in 0..count {
            cards.extend(self.pack.iter().map(|card| GeneratedCard {
                set: set_code.to_string(),
                ..card.clone()
            }));
        }
        if self.malformed_after.is_some_and(|good| calls_before >= good) {
            cards.push(generated("Jumpstart Shard", set_code, "J12"));
        }
        Ok(cards)
    }

    async fn check_card(&self, _set_code: &str, collector_number: i32) -> Result<bool, DomainError> {
        Ok(self.known_numbers.contains(&collector_number))
    }
}

/// Case-insensitive substring search over a fixed printing list.
#[derive(Default)]
pub struct FakeLookup {
    printings: Vec<CardMatch>,
}

impl FakeLookup {
    pub fn new(printings: Vec<CardMatch>) -> Self {
        Self { printings }
    }
}

#[async_trait]
impl CardLookup for FakeLookup {
    async fn search_in_sets(
        &self,
        name: &str,
        sets: &[String],
    ) -> Result<Vec<CardMatch>, DomainError> {
        let needle = name.to_lowercase();
        let mut matches: Vec<CardMatch> = Vec::new();
        for found in &self.printings {
            let in_sets = sets.is_empty() || sets.iter().any(|s| s == &found.set_code);
            if in_sets
                && found.name.to_lowercase().contains(&needle)
                && !matches.iter().any(|m| m.name == found.name)
            {
                matches.push(found.clone());
            }
        }
        Ok(matches)
    }
}
