//! HTTP clients for the pack generator and the card lookup service.

pub mod card_lookup;
pub mod pack_generator;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use thiserror::Error;

pub use card_lookup::{CardLookup, CardMatch, ScryfallClient};
pub use pack_generator::{GeneratedCard, PackGeneratorClient, PackSource};

use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};

/// Errors raised by the outbound clients.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("set {0:?} not found")]
    SetNotFound(String),

    #[error("HTTP {status} from {service}")]
    HttpStatus { service: &'static str, status: u16 },
}

impl From<ClientError> for DomainError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::SetNotFound(set) => {
                DomainError::not_found(NotFoundKind::Set, format!("set {set:?} not found"))
            }
            ClientError::Http(err) if err.is_timeout() => {
                DomainError::infra(InfraErrorKind::Timeout, format!("upstream timed out: {err}"))
            }
            ClientError::Http(err) if err.is_decode() => DomainError::infra(
                InfraErrorKind::MalformedUpstream,
                format!("upstream sent an unreadable body: {err}"),
            ),
            other => DomainError::infra(InfraErrorKind::Upstream, other.to_string()),
        }
    }
}

pub(crate) fn build_http_client(timeout: Duration) -> Result<Client, ClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("league/", env!("CARGO_PKG_VERSION"))),
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Ok(Client::builder()
        .timeout(timeout)
        .default_headers(headers)
        .build()?)
}
