use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{build_http_client, ClientError};
use crate::errors::domain::DomainError;

/// One card record as produced by the booster generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCard {
    pub name: String,
    #[serde(default)]
    pub foil: bool,
    #[serde(rename = "scryfallURI", default)]
    pub scryfall_uri: String,
    pub set: String,
    /// Kept as text; conversion to an integer happens on import.
    pub collector_number: String,
    #[serde(rename = "imageURL", default)]
    pub image_url: String,
}

/// Source of randomly generated booster packs.
#[async_trait]
pub trait PackSource: Send + Sync {
    /// All cards of `count` packs of `set_code`, flattened.
    /// `NotFound(Set)` when the generator does not know the set.
    async fn get_packs(&self, set_code: &str, count: u32) -> Result<Vec<GeneratedCard>, DomainError>;

    /// Whether the generator knows a card with that collector number.
    async fn check_card(&self, set_code: &str, collector_number: i32) -> Result<bool, DomainError>;
}

/// HTTP client for the booster pack generator service.
#[derive(Debug, Clone)]
pub struct PackGeneratorClient {
    client: Client,
    base_url: String,
}

impl PackGeneratorClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_http_client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn pack_url(&self, set_code: &str) -> String {
        format!("{}/pack/{set_code}", self.base_url)
    }

    pub fn card_url(&self, set_code: &str, collector_number: i32) -> String {
        format!("{}/card/{set_code}/{collector_number}", self.base_url)
    }

    async fn fetch_packs(&self, set_code: &str, count: u32) -> Result<Vec<GeneratedCard>, ClientError> {
        let response = self
            .client
            .get(self.pack_url(set_code))
            .query(&[
                ("count", count.to_string().as_str()),
                ("export", "false"),
                ("outputformat", "json"),
                ("tokens", "false"),
            ])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            warn!(set_code, status = response.status().as_u16(), "pack generator rejected set");
            return Err(ClientError::SetNotFound(set_code.to_string()));
        }

        let cards: Vec<GeneratedCard> = response.json().await?;
        debug!(set_code, count, cards = cards.len(), "packs generated");
        Ok(cards)
    }
}

#[async_trait]
impl PackSource for PackGeneratorClient {
    async fn get_packs(&self, set_code: &str, count: u32) -> Result<Vec<GeneratedCard>, DomainError> {
        Ok(self.fetch_packs(set_code, count).await?)
    }

    async fn check_card(&self, set_code: &str, collector_number: i32) -> Result<bool, DomainError> {
        let response = self
            .client
            .get(self.card_url(set_code, collector_number))
            .send()
            .await
            .map_err(ClientError::from)?;
        Ok(response.status() == StatusCode::OK)
    }
}
