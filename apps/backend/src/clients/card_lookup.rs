use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{build_http_client, ClientError};
use crate::errors::domain::DomainError;

/// Upper bound the lookup service accepts for the `q` parameter.
pub const MAX_QUERY_LEN: usize = 1000;

/// A card printing returned by a name search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMatch {
    pub name: String,
    #[serde(rename = "set")]
    pub set_code: String,
    pub collector_number: String,
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    data: Vec<CardMatch>,
}

/// Card search by name, optionally restricted to a list of set codes.
#[async_trait]
pub trait CardLookup: Send + Sync {
    /// Distinct cards matching `name` within `sets` (all sets when empty).
    async fn search_in_sets(&self, name: &str, sets: &[String])
        -> Result<Vec<CardMatch>, DomainError>;
}

/// Builds `(s:a or s:b ...)` clauses, splitting into several clauses when
/// one would push the query past `budget` characters.
pub fn generate_set_restrictions(sets: &[String], budget: usize) -> Vec<String> {
    let mut restrictions = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_len = 2;

    for set in sets {
        let term = format!("s:{set}");
        let added = if current.is_empty() {
            term.len()
        } else {
            term.len() + " or ".len()
        };
        if !current.is_empty() && current_len + added > budget {
            restrictions.push(format!("({})", current.join(" or ")));
            current.clear();
            current_len = 2;
        }
        current_len += if current.is_empty() {
            term.len()
        } else {
            added
        };
        current.push(term);
    }

    if !current.is_empty() {
        restrictions.push(format!("({})", current.join(" or ")));
    }
    restrictions
}

/// Scryfall-compatible search client.
#[derive(Debug, Clone)]
pub struct ScryfallClient {
    client: Client,
    base_url: String,
}

impl ScryfallClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_http_client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// One `q` value per restriction chunk; just the name without sets.
    pub fn build_queries(name: &str, sets: &[String]) -> Vec<String> {
        // name, a space and the wrapping parentheses
        let budget = MAX_QUERY_LEN.saturating_sub(name.len() + 3);
        let restrictions = generate_set_restrictions(sets, budget);
        if restrictions.is_empty() {
            return vec![name.to_string()];
        }
        restrictions
            .into_iter()
            .map(|restriction| format!("{name} ({restriction})"))
            .collect()
    }

    async fn search(&self, query: &str) -> Result<Vec<CardMatch>, ClientError> {
        let response = self
            .client
            .get(format!("{}/cards/search", self.base_url))
            .query(&[
                ("q", query),
                ("unique", "cards"),
                ("order", "set"),
                ("dir", "desc"),
                ("include_extras", "true"),
            ])
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json::<SearchPage>().await?.data),
            // No matches is reported as 404
            StatusCode::NOT_FOUND => Ok(Vec::new()),
            status => Err(ClientError::HttpStatus {
                service: "card lookup",
                status: status.as_u16(),
            }),
        }
    }
}

#[async_trait]
impl CardLookup for ScryfallClient {
    async fn search_in_sets(
        &self,
        name: &str,
        sets: &[String],
    ) -> Result<Vec<CardMatch>, DomainError> {
        let mut matches: Vec<CardMatch> = Vec::new();
        for query in Self::build_queries(name, sets) {
            for found in self.search(&query).await? {
                if !matches.iter().any(|m| m.name == found.name) {
                    matches.push(found);
                }
            }
        }
        debug!(matches = matches.len(), sets = sets.len(), "card search finished");
        Ok(matches)
    }
}
