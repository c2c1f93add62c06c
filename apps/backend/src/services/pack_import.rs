//! Converts generator card records into pool copies.

use crate::clients::GeneratedCard;
use crate::domain::cards::CardCopy;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// One [`CardCopy`] per record, in input order. Aggregation into counts is
/// left to the store.
///
/// A collector number that is not a plain integer fails the whole batch
/// with `Infra(MalformedUpstream)`.
pub fn convert_cards(cards: &[GeneratedCard]) -> Result<Vec<CardCopy>, DomainError> {
    cards
        .iter()
        .map(|card| {
            let collector_number = card.collector_number.trim().parse::<i32>().map_err(|_| {
                DomainError::infra(
                    InfraErrorKind::MalformedUpstream,
                    format!(
                        "card {:?} of set {:?} has non-numeric collector number {:?}",
                        card.name, card.set, card.collector_number
                    ),
                )
            })?;
            Ok(CardCopy::new(card.name.clone(), card.set.clone(), collector_number))
        })
        .collect()
}
